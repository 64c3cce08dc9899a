use core::convert::TryFrom;

use serde::{
  de::DeserializeOwned,
  Serialize,
};

use crate::{
  codec::{
    Codec,
    Decode,
    Encode,
  },
  error::{
    Error,
    Result,
  },
};

/// The json multicodec code.
pub const JSON: u64 = 0x0200;

/// Plain JSON through `serde_json`. Links serialize as `{"/": "<cid>"}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct JsonCodec;

impl Codec for JsonCodec {
  const NAME: &'static str = "json";
}

impl From<JsonCodec> for u64 {
  fn from(_: JsonCodec) -> Self { JSON }
}

impl TryFrom<u64> for JsonCodec {
  type Error = Error;

  fn try_from(code: u64) -> Result<Self> {
    if code == JSON { Ok(Self) } else { Err(Error::UnsupportedCodec(code)) }
  }
}

impl<T: Serialize + ?Sized> Encode<JsonCodec> for T {
  fn encode(&self, _: JsonCodec, w: &mut Vec<u8>) -> Result<()> {
    serde_json::to_writer(w, self)?;
    Ok(())
  }
}

impl<T: DeserializeOwned> Decode<JsonCodec> for T {
  fn decode(_: JsonCodec, r: &[u8]) -> Result<Self> { Ok(serde_json::from_slice(r)?) }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::cid::Cid;
  use serde::Deserialize;
  use std::collections::BTreeMap;

  fn encode_decode_id<T>(value: T) -> bool
  where T: Serialize + DeserializeOwned + PartialEq {
    match JsonCodec.encode(&value) {
      Ok(bytes) => match JsonCodec.decode::<T>(&bytes) {
        Ok(new_value) => value == new_value,
        Err(e) => {
          println!("Error occurred during decoding: {}", e);
          false
        }
      },
      Err(e) => {
        println!("Error occurred during encoding: {}", e);
        false
      }
    }
  }

  #[quickcheck]
  fn edid_string(x: String) -> bool { encode_decode_id(x) }

  #[quickcheck]
  fn edid_list(x: Vec<i64>) -> bool { encode_decode_id(x) }

  #[quickcheck]
  fn edid_string_map(x: BTreeMap<String, Option<bool>>) -> bool { encode_decode_id(x) }

  #[quickcheck]
  fn edid_link(x: Cid) -> bool { encode_decode_id(x) }

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Node {
    name: String,
    next: Option<Cid>,
  }

  #[test]
  fn links_are_link_objects() {
    let link = Cid::parse("bafkqablimvwgy3y").unwrap();
    let node = Node { name: "head".to_owned(), next: Some(link) };
    let bytes = JsonCodec.encode(&node).unwrap();
    assert_eq!(
      String::from_utf8(bytes.clone()).unwrap(),
      r#"{"name":"head","next":{"/":"bafkqablimvwgy3y"}}"#
    );
    assert_eq!(JsonCodec.decode::<Node>(&bytes).unwrap(), node);
  }

  #[test]
  fn rejects_invalid_json() {
    assert!(matches!(JsonCodec.decode::<Vec<u8>>(b"[1,"), Err(Error::Json(_))));
    assert!(matches!(JsonCodec::try_from(0x55), Err(Error::UnsupportedCodec(0x55))));
  }
}
