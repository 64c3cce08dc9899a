//! Recognizing CIDs that arrive as plain data, e.g. from another
//! implementation of the format that serialized its own CID type.

use core::convert::TryFrom;

use serde_json::{
  Map,
  Value,
};

use super::{
  Cid,
  Version,
  LINK_KEY,
};
use crate::multihash::Multihash;

/// Marker field of CIDs written by the legacy standalone CID library.
pub const LEGACY_TAG: &str = "@ipld/js-cid/CID";

const BYTES_KEY: &str = "bytes";

/// Values that may stand for a CID.
pub trait AsCid {
  /// The canonical CID this value stands for, or `None` when it is not one
  /// or is internally inconsistent.
  fn as_cid(&self) -> Option<Cid>;
}

/// Free-standing form of [`AsCid::as_cid`].
pub fn as_cid<T: AsCid + ?Sized>(value: &T) -> Option<Cid> { value.as_cid() }

impl AsCid for Cid {
  fn as_cid(&self) -> Option<Cid> { Some(self.clone()) }
}

impl AsCid for str {
  fn as_cid(&self) -> Option<Cid> { Cid::parse(self).ok() }
}

impl AsCid for [u8] {
  fn as_cid(&self) -> Option<Cid> { Cid::decode(self).ok() }
}

/// Accepts three object shapes:
///
/// * a DAG-JSON link, `{"/": "<cid string>"}` and nothing else;
/// * a self-referencing CID, whose `"/"` and `"bytes"` fields hold the same
///   canonical byte array, with optional `version` and `code` that must
///   agree with it;
/// * a legacy tagged CID, `{"@ipld/js-cid/CID": true, "version", "code",
///   "multihash"}` with the multihash as a byte array.
impl AsCid for Value {
  fn as_cid(&self) -> Option<Cid> {
    let object = self.as_object()?;
    match (object.get(LINK_KEY), object.get(BYTES_KEY)) {
      (Some(Value::String(text)), _) if object.len() == 1 => Cid::parse(text).ok(),
      (Some(link), Some(bytes)) if link == bytes => self_referencing(object, bytes),
      _ if object.get(LEGACY_TAG) == Some(&Value::Bool(true)) => legacy(object),
      _ => None,
    }
  }
}

fn byte_array(value: &Value) -> Option<Vec<u8>> {
  value
    .as_array()?
    .iter()
    .map(|byte| byte.as_u64().and_then(|byte| u8::try_from(byte).ok()))
    .collect()
}

fn agrees(object: &Map<String, Value>, key: &str, expected: u64) -> bool {
  object.get(key).map_or(true, |value| value.as_u64() == Some(expected))
}

fn self_referencing(object: &Map<String, Value>, bytes: &Value) -> Option<Cid> {
  let cid = Cid::decode(&byte_array(bytes)?).ok()?;
  if agrees(object, "version", u64::from(cid.version())) && agrees(object, "code", cid.code()) {
    Some(cid)
  }
  else {
    None
  }
}

fn legacy(object: &Map<String, Value>) -> Option<Cid> {
  let version = Version::try_from(object.get("version")?.as_u64()?).ok()?;
  let code = object.get("code")?.as_u64()?;
  let multihash = Multihash::decode(&byte_array(object.get("multihash")?)?).ok()?;
  Cid::create(version, code, multihash).ok()
}
