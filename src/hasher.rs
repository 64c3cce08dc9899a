//! The contract hash functions fulfil to produce [`Multihash`] values.
//!
//! Concrete algorithms live outside this crate; [`HasherFn`] adapts any
//! plain digest function and [`Identity`] is the one built in.

use core::fmt;

use crate::{
  error::Result,
  multihash::Multihash,
};

/// The identity multihash code.
pub const IDENTITY: u64 = 0x00;

pub trait Hasher {
  fn name(&self) -> &str;

  fn code(&self) -> u64;

  /// Hashes `input` and wraps the result as a multihash tagged with
  /// [`Hasher::code`].
  ///
  /// # Errors
  ///
  /// Will return `Err` if the underlying hash function rejects the input.
  fn digest(&self, input: &[u8]) -> Result<Multihash>;
}

/// A hasher built from a name, a code and a digest function.
#[derive(Clone, Copy)]
pub struct HasherFn {
  name: &'static str,
  code: u64,
  encode: fn(&[u8]) -> Vec<u8>,
}

impl HasherFn {
  #[must_use]
  pub const fn new(name: &'static str, code: u64, encode: fn(&[u8]) -> Vec<u8>) -> Self {
    Self { name, code, encode }
  }
}

impl fmt::Debug for HasherFn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HasherFn")
      .field("name", &self.name)
      .field("code", &self.code)
      .finish()
  }
}

impl Hasher for HasherFn {
  fn name(&self) -> &str { self.name }

  fn code(&self) -> u64 { self.code }

  fn digest(&self, input: &[u8]) -> Result<Multihash> {
    Ok(Multihash::create(self.code, &(self.encode)(input)))
  }
}

/// Stores the input itself as the digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl Hasher for Identity {
  fn name(&self) -> &str { "identity" }

  fn code(&self) -> u64 { IDENTITY }

  fn digest(&self, input: &[u8]) -> Result<Multihash> {
    Ok(Multihash::create(IDENTITY, input))
  }
}
