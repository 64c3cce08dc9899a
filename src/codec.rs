//! Block codecs turn values into the bytes a CID is computed over.

use core::convert::TryFrom;

use crate::{
  cid::Cid,
  error::{
    Error,
    Result,
  },
  hasher::Hasher,
};

pub trait Codec:
  Copy
  + Unpin
  + Send
  + Sync
  + 'static
  + Sized
  + TryFrom<u64, Error = Error>
  + Into<u64> {
  /// Human readable name of the codec.
  const NAME: &'static str;

  /// # Errors
  ///
  /// Will return `Err` if there was a problem encoding the object
  fn encode<T: Encode<Self> + ?Sized>(&self, obj: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    obj.encode(*self, &mut buf)?;
    Ok(buf)
  }

  /// # Errors
  ///
  /// Will return `Err` if the bytes are not a valid encoding of `T`
  fn decode<T: Decode<Self>>(&self, bytes: &[u8]) -> Result<T> {
    T::decode(*self, bytes)
  }
}

/// A trait to represent the ability to encode with
/// the codec `C` for the type.
pub trait Encode<C: Codec> {
  /// Appends the encoding of `Self` with codec `C` to `w`.
  ///
  /// # Errors
  ///
  /// Will return `Err` if there was a problem during encoding
  fn encode(&self, c: C, w: &mut Vec<u8>) -> Result<()>;
}

/// A trait representing the ability to decode with
/// the codec `C` for the type.
pub trait Decode<C: Codec>: Sized {
  /// Decodes all of `r` using the codec `C`.
  ///
  /// # Errors
  ///
  /// Will return `Err` if there was a problem during decoding
  fn decode(c: C, r: &[u8]) -> Result<Self>;
}

/// Encodes `value` with `codec`, hashes the bytes with `hasher` and returns
/// the version 1 CID naming them.
///
/// # Errors
///
/// Will return `Err` if encoding or hashing fails.
pub fn cid<C, H, T>(codec: C, hasher: &H, value: &T) -> Result<Cid>
where
  C: Codec,
  H: Hasher + ?Sized,
  T: Encode<C> + ?Sized, {
  let bytes = codec.encode(value)?;
  Ok(Cid::new_v1(codec.into(), hasher.digest(&bytes)?))
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::{
    hasher::{
      tests::SHA256,
      Identity,
    },
    json::JsonCodec,
    raw::RawCodec,
  };
  use serde::{
    Deserialize,
    Serialize,
  };

  #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
  struct Greeting {
    hello: String,
  }

  #[test]
  fn raw_cid() {
    let cid = cid(RawCodec, &SHA256, &b"hello world"[..]).unwrap();
    assert_eq!(
      cid.to_string(),
      "bafkreifzjut3te2nhyekklss27nh3k72ysco7y32koao5eei66wof36n5e"
    );
    let inline = super::cid(RawCodec, &Identity, &b"hello"[..]).unwrap();
    assert_eq!(inline.to_string(), "bafkqablimvwgy3y");
  }

  #[test]
  fn json_cid() {
    let value = Greeting { hello: "world".to_owned() };
    let cid = cid(JsonCodec, &SHA256, &value).unwrap();
    assert_eq!(cid.code(), 0x0200);
    assert_eq!(
      cid.to_string(),
      "bagaaierasords4njcts6vs7qvdjfcvgnume4hqohf65zsfguprqphs3icwea"
    );
  }

  #[test]
  fn hasher_as_trait_object() {
    let hasher: &dyn Hasher = &SHA256;
    let cid = cid(RawCodec, hasher, &vec![1u8, 2, 3]).unwrap();
    assert_eq!(cid.multihash().code(), SHA256.code());
  }
}
