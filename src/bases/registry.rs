use std::collections::BTreeMap;

use super::{
  Codec,
  ComposedDecoder,
  BUILTIN,
};

/// Codecs indexed by both prefix and name.
///
/// `Registry::default()` holds every built-in codec; `Registry::new()` starts
/// empty. Build it once at startup and share it read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry {
  by_prefix: BTreeMap<char, Codec>,
  by_name: BTreeMap<&'static str, Codec>,
}

impl Registry {
  #[must_use]
  pub fn new() -> Self {
    Self { by_prefix: BTreeMap::new(), by_name: BTreeMap::new() }
  }

  /// Registers `codec`, returning any codec it displaced by prefix or name.
  pub fn add(&mut self, codec: Codec) -> Option<Codec> {
    log::debug!("registering multibase {} ({:?})", codec.name(), codec.prefix());
    let by_prefix = self.by_prefix.insert(codec.prefix(), codec);
    let by_name = self.by_name.insert(codec.name(), codec);
    // keep both indexes pointing at the same set of codecs
    for old in by_prefix.iter().chain(by_name.iter()) {
      if old.prefix() != codec.prefix() {
        self.by_prefix.remove(&old.prefix());
      }
      if old.name() != codec.name() {
        self.by_name.remove(old.name());
      }
    }
    by_prefix.or(by_name)
  }

  /// Looks a codec up by its prefix character or, failing that, its name.
  #[must_use]
  pub fn get(&self, name_or_prefix: &str) -> Option<&Codec> {
    let mut chars = name_or_prefix.chars();
    let by_prefix = match (chars.next(), chars.next()) {
      (Some(prefix), None) => self.by_prefix.get(&prefix),
      _ => None,
    };
    by_prefix.or_else(|| self.by_name.get(name_or_prefix))
  }

  pub fn iter(&self) -> impl Iterator<Item = &Codec> { self.by_prefix.values() }

  #[must_use]
  pub fn len(&self) -> usize { self.by_prefix.len() }

  #[must_use]
  pub fn is_empty(&self) -> bool { self.by_prefix.is_empty() }

  /// A decoder that accepts every registered prefix.
  #[must_use]
  pub fn decoder(&self) -> ComposedDecoder {
    self.iter().fold(ComposedDecoder::new(), |decoder, codec| decoder.or(codec))
  }
}

impl Default for Registry {
  fn default() -> Self {
    let mut registry = Self::new();
    for codec in BUILTIN.iter() {
      registry.add(*codec);
    }
    registry
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::{
    bases::{
      Scheme,
      BASE32,
      BASE58_BTC,
      BASE64,
    },
    error::Result,
  };

  #[test]
  fn lookup_by_prefix_and_name() {
    let registry = Registry::default();
    assert_eq!(registry.len(), BUILTIN.len());
    assert_eq!(registry.get("b"), Some(&BASE32));
    assert_eq!(registry.get("base32"), Some(&BASE32));
    assert_eq!(registry.get("z"), Some(&BASE58_BTC));
    assert_eq!(registry.get("🚀").map(Codec::name), Some("base256emoji"));
    assert_eq!(registry.get("\x00").map(Codec::name), Some("identity"));
    assert_eq!(registry.get("base99"), None);
    assert_eq!(registry.get(""), None);
  }

  #[test]
  fn every_builtin_round_trips_through_the_decoder() {
    let registry = Registry::default();
    let decoder = registry.decoder();
    let bytes = b"multiformats";
    for codec in registry.iter() {
      assert_eq!(decoder.decode(&codec.encode(bytes)).unwrap(), bytes.to_vec());
    }
  }

  #[test]
  fn add_replaces_consistently() {
    fn reversed(bytes: &[u8]) -> String {
      let mut bytes = bytes.to_vec();
      bytes.reverse();
      BASE64.base_encode(&bytes)
    }
    fn unreversed(text: &str) -> Result<Vec<u8>> {
      let mut bytes = BASE64.base_decode(text)?;
      bytes.reverse();
      Ok(bytes)
    }
    let mut registry = Registry::default();
    let custom = Codec::new("base64", 'x', Scheme::Custom {
      encode: reversed,
      decode: unreversed,
    });
    assert_eq!(registry.add(custom), Some(BASE64));
    assert_eq!(registry.get("m"), None);
    assert_eq!(registry.get("base64"), Some(&custom));
    assert_eq!(registry.get("x"), Some(&custom));
    assert_eq!(registry.len(), BUILTIN.len());
    assert_eq!(registry.decoder().decode(&custom.encode(b"ab")).unwrap(), b"ab");
  }
}
