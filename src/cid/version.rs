use core::convert::TryFrom;

use crate::error::{
  Error,
  Result,
};

/// The version of a CID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
  /// Legacy form: the bare multihash, implicitly dag-pb and sha2-256.
  V0,
  /// `varint(1) ++ varint(codec) ++ multihash`.
  V1,
}

impl TryFrom<u64> for Version {
  type Error = Error;

  fn try_from(raw: u64) -> Result<Self> {
    match raw {
      0 => Ok(Self::V0),
      1 => Ok(Self::V1),
      _ => Err(Error::InvalidCidVersion(raw)),
    }
  }
}

impl From<Version> for u64 {
  fn from(version: Version) -> u64 {
    match version {
      Version::V0 => 0,
      Version::V1 => 1,
    }
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;

  #[test]
  fn raw_round_trip() {
    for version in [Version::V0, Version::V1].iter() {
      assert_eq!(Version::try_from(u64::from(*version)).unwrap(), *version);
    }
    assert!(matches!(Version::try_from(2), Err(Error::InvalidCidVersion(2))));
  }
}
