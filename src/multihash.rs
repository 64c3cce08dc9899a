//! Self-describing digests: `varint(code) ++ varint(size) ++ digest`.

use core::{
  convert::TryFrom,
  fmt,
};

use crate::{
  error::{
    Error,
    Result,
  },
  varint,
};

/// The sha2-256 multihash code.
pub const SHA2_256: u64 = 0x12;

/// A hash digest tagged with the code of the function that produced it.
///
/// Only the serialized form is stored; the digest is its tail. Varints are
/// canonical, so equal bytes mean equal `(code, size, digest)`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Multihash {
  code: u64,
  size: usize,
  bytes: Vec<u8>,
}

impl Multihash {
  /// Wraps a digest computed by the hash function `code`.
  #[must_use]
  pub fn create(code: u64, digest: &[u8]) -> Self {
    let size = digest.len();
    let mut bytes = Vec::with_capacity(
      varint::encoding_length(code) + varint::encoding_length(size as u64) + size,
    );
    varint::encode_into(code, &mut bytes);
    varint::encode_into(size as u64, &mut bytes);
    bytes.extend_from_slice(digest);
    Self { code, size, bytes }
  }

  /// Parses a standalone multihash; the buffer must hold exactly one.
  ///
  /// # Errors
  ///
  /// Will return `Err` if either header varint is malformed or if the bytes
  /// after the header are not exactly the declared digest size.
  pub fn decode(bytes: &[u8]) -> Result<Self> {
    let (code, code_len) = varint::decode(bytes, 0)?;
    let (declared, size_len) = varint::decode(bytes, code_len)?;
    let found = bytes.len() - code_len - size_len;
    match usize::try_from(declared) {
      Ok(size) if size == found => Ok(Self { code, size, bytes: bytes.to_vec() }),
      _ => Err(Error::InvalidDigestLength { declared, found }),
    }
  }

  /// Rebuilds a digest from a region whose layout is already known to match.
  pub(crate) fn from_parts(code: u64, size: usize, bytes: &[u8]) -> Self {
    Self { code, size, bytes: bytes.to_vec() }
  }

  #[must_use]
  pub const fn code(&self) -> u64 { self.code }

  #[must_use]
  pub const fn size(&self) -> usize { self.size }

  #[must_use]
  pub fn digest(&self) -> &[u8] { &self.bytes[self.bytes.len() - self.size..] }

  #[must_use]
  pub fn as_bytes(&self) -> &[u8] { &self.bytes }

  #[must_use]
  pub fn into_bytes(self) -> Vec<u8> { self.bytes }
}

impl AsRef<[u8]> for Multihash {
  fn as_ref(&self) -> &[u8] { &self.bytes }
}

impl TryFrom<&[u8]> for Multihash {
  type Error = Error;

  fn try_from(bytes: &[u8]) -> Result<Self> { Self::decode(bytes) }
}

impl fmt::Debug for Multihash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Multihash")
      .field("code", &self.code)
      .field("size", &self.size)
      .field("digest", &self.digest())
      .finish()
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use quickcheck::{
    Arbitrary,
    Gen,
  };
  use sha2::{
    Digest,
    Sha256,
  };

  impl Arbitrary for Multihash {
    fn arbitrary(g: &mut Gen) -> Self {
      let code = u64::arbitrary(g) >> (u8::arbitrary(g) % 64);
      let mut digest = vec![0u8; usize::from(u8::arbitrary(g) % 65)];
      for byte in digest.iter_mut() {
        *byte = u8::arbitrary(g);
      }
      Multihash::create(code, &digest)
    }
  }

  #[quickcheck]
  fn prop_decode_create(code: u64, digest: Vec<u8>) -> bool {
    let mh = Multihash::create(code, &digest);
    match Multihash::decode(mh.as_bytes()) {
      Ok(decoded) => {
        decoded == mh
          && decoded.code() == code
          && decoded.size() == digest.len()
          && decoded.digest() == &digest[..]
      }
      Err(_) => false,
    }
  }

  #[test]
  fn sha2_256_layout() {
    let digest = Sha256::digest(b"hello world");
    let mh = Multihash::create(SHA2_256, &digest);
    assert_eq!(mh.size(), 32);
    assert_eq!(&mh.as_bytes()[..2], &[0x12, 0x20]);
    assert_eq!(
      hex::encode(mh.as_bytes()),
      "1220b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
  }

  #[test]
  fn multi_byte_code() {
    let mh = Multihash::create(0xb220, &[1, 2, 3]);
    assert_eq!(mh.as_bytes(), &[0xa0, 0xe4, 0x02, 0x03, 1, 2, 3]);
    assert_eq!(Multihash::decode(mh.as_bytes()).unwrap().code(), 0xb220);
  }

  #[test]
  fn equality_is_structural() {
    let a = Multihash::create(SHA2_256, &[1; 32]);
    let b = Multihash::decode(&hex::decode(format!("1220{}", "01".repeat(32))).unwrap())
      .unwrap();
    assert_eq!(a, b);
    assert_ne!(a, Multihash::create(0x13, &[1; 32]));
    assert_ne!(a, Multihash::create(SHA2_256, &[2; 32]));
  }

  #[test]
  fn invalid_fixtures_reject() {
    let fixtures: [&str; 7] = [
      // declared 32, only 31 present
      "1220b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcd",
      // declared 32, 33 present
      "1220b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde900",
      // declared 4, digest missing
      "1304",
      // size varint missing
      "12",
      // truncated code varint
      "80",
      // empty
      "",
      // non-minimal code
      "9200201234",
    ];
    for fixture in fixtures.iter() {
      let bytes = hex::decode(fixture).unwrap();
      assert!(Multihash::decode(&bytes).is_err(), "{}", fixture);
    }
    assert!(matches!(
      Multihash::decode(&[0x12, 0x02, 0xaa]),
      Err(Error::InvalidDigestLength { declared: 2, found: 1 })
    ));
  }

  #[test]
  fn byte_conversions() {
    let mh = Multihash::create(SHA2_256, &[9; 32]);
    let bytes = mh.clone().into_bytes();
    assert_eq!(bytes, mh.as_bytes());
    assert_eq!(Multihash::try_from(&bytes[..]).unwrap(), mh);
    assert!(matches!(
      Multihash::try_from(&bytes[..33]),
      Err(Error::InvalidDigestLength { declared: 32, found: 31 })
    ));
  }

  #[test]
  fn empty_digest() {
    let mh = Multihash::create(0x00, &[]);
    assert_eq!(mh.as_bytes(), &[0x00, 0x00]);
    assert_eq!(mh.digest(), &[] as &[u8]);
    assert_eq!(Multihash::decode(&[0x00, 0x00]).unwrap(), mh);
  }
}
