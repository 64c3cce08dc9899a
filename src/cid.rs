//! Content identifiers.
//!
//! A [`Cid`] names content by the multihash of its bytes plus the codec that
//! interprets them. Version 0 is the bare sha2-256 multihash of a dag-pb
//! node; version 1 prefixes `varint(1) ++ varint(codec)`.

use core::{
  cmp::Ordering,
  convert::TryFrom,
  fmt,
  hash::{
    Hash,
    Hasher,
  },
  str::FromStr,
};
use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::{
  de,
  ser::SerializeMap,
  Deserialize,
  Deserializer,
  Serialize,
  Serializer,
};

use crate::{
  bases::{
    Codec,
    Decoder,
    Encoder,
    BASE32,
    BASE36,
    BASE58_BTC,
  },
  error::{
    Error,
    Result,
  },
  multihash::{
    Multihash,
    SHA2_256,
  },
  varint,
};

#[cfg(test)]
mod arb;
mod recognize;
mod version;

pub use recognize::{
  as_cid,
  AsCid,
  LEGACY_TAG,
};
pub use version::Version;

/// The dag-pb codec, the only one a version 0 CID can carry.
pub const DAG_PB: u64 = 0x70;

/// The key of a DAG-JSON link object.
pub const LINK_KEY: &str = "/";

/// Layout of a binary CID, recovered without copying its digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CidSpecs {
  pub version: Version,
  pub codec: u64,
  pub multihash_code: u64,
  pub digest_size: usize,
  /// Bytes taken by the multihash, header included.
  pub multihash_size: usize,
  /// Bytes taken by the whole CID.
  pub size: usize,
}

struct Scanner<'a> {
  bytes: &'a [u8],
  offset: usize,
}

impl Scanner<'_> {
  fn read(&mut self) -> Result<u64> {
    let (value, length) = varint::decode(self.bytes, self.offset)?;
    self.offset += length;
    Ok(value)
  }
}

/// A content identifier.
///
/// Immutable once built. Every instance memoizes the strings it has been
/// rendered to, keyed by multibase prefix; the cache never takes part in
/// equality, ordering or hashing.
pub struct Cid {
  version: Version,
  code: u64,
  multihash: Multihash,
  bytes: Vec<u8>,
  cache: RwLock<BTreeMap<char, String>>,
}

impl Cid {
  /// # Errors
  ///
  /// Will return `Err` if a version 0 CID is requested with a codec other
  /// than dag-pb or a multihash other than sha2-256.
  pub fn create(version: Version, code: u64, multihash: Multihash) -> Result<Self> {
    match version {
      Version::V0 if code != DAG_PB => Err(Error::IncompatibleCodecForV0(code)),
      Version::V0 => Self::new_v0(multihash),
      Version::V1 => Ok(Self::new_v1(code, multihash)),
    }
  }

  /// # Errors
  ///
  /// Will return `Err` if `multihash` is not a sha2-256 digest.
  pub fn new_v0(multihash: Multihash) -> Result<Self> {
    if multihash.code() != SHA2_256 {
      return Err(Error::IncompatibleHashForV0(multihash.code()));
    }
    let bytes = multihash.as_bytes().to_vec();
    Ok(Self::from_parts(Version::V0, DAG_PB, multihash, bytes))
  }

  #[must_use]
  pub fn new_v1(code: u64, multihash: Multihash) -> Self {
    let mut bytes = Vec::with_capacity(
      varint::encoding_length(1)
        + varint::encoding_length(code)
        + multihash.as_bytes().len(),
    );
    varint::encode_into(u64::from(Version::V1), &mut bytes);
    varint::encode_into(code, &mut bytes);
    bytes.extend_from_slice(multihash.as_bytes());
    Self::from_parts(Version::V1, code, multihash, bytes)
  }

  fn from_parts(version: Version, code: u64, multihash: Multihash, bytes: Vec<u8>) -> Self {
    Self { version, code, multihash, bytes, cache: RwLock::new(BTreeMap::new()) }
  }

  #[must_use]
  pub const fn version(&self) -> Version { self.version }

  #[must_use]
  pub const fn code(&self) -> u64 { self.code }

  #[must_use]
  pub const fn multihash(&self) -> &Multihash { &self.multihash }

  #[must_use]
  pub fn as_bytes(&self) -> &[u8] { &self.bytes }

  #[must_use]
  pub fn to_bytes(&self) -> Vec<u8> { self.bytes.clone() }

  /// Reads the header of a binary CID, decoding at most four varints.
  ///
  /// A first varint of `0x12` is the sha2-256 code of a version 0 CID and
  /// the scan restarts from the beginning; otherwise it is the version and
  /// must be 1. The digest itself is neither read nor checked to be present.
  ///
  /// # Errors
  ///
  /// Will return `Err` if a header varint is malformed or the version is not
  /// 1.
  pub fn inspect_bytes(bytes: &[u8]) -> Result<CidSpecs> {
    let mut scan = Scanner { bytes, offset: 0 };
    let (version, codec) = match scan.read()? {
      SHA2_256 => {
        scan.offset = 0;
        (Version::V0, DAG_PB)
      }
      1 => (Version::V1, scan.read()?),
      other => return Err(Error::InvalidCidVersion(other)),
    };
    let prefix_size = scan.offset;
    let multihash_code = scan.read()?;
    let declared = scan.read()?;
    let header_size = scan.offset;
    let digest_size = usize::try_from(declared).ok();
    let size = match digest_size.and_then(|digest| header_size.checked_add(digest)) {
      Some(size) => size,
      None => {
        return Err(Error::InvalidDigestLength {
          declared,
          found: bytes.len() - header_size,
        })
      }
    };
    Ok(CidSpecs {
      version,
      codec,
      multihash_code,
      digest_size: size - header_size,
      multihash_size: size - prefix_size,
      size,
    })
  }

  /// Decodes the CID at the start of `bytes` and returns whatever follows it.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the header is invalid or the buffer ends before the
  /// declared digest does.
  pub fn decode_first(bytes: &[u8]) -> Result<(Self, &[u8])> {
    let specs = Self::inspect_bytes(bytes)?;
    let prefix_size = specs.size - specs.multihash_size;
    let region = match bytes.get(prefix_size..specs.size) {
      Some(region) => region,
      None => {
        return Err(Error::InvalidDigestLength {
          declared: specs.digest_size as u64,
          found: bytes.len() - (specs.size - specs.digest_size),
        })
      }
    };
    let multihash = Multihash::from_parts(specs.multihash_code, specs.digest_size, region);
    let cid = match specs.version {
      Version::V0 => Self::new_v0(multihash)?,
      Version::V1 => Self::new_v1(specs.codec, multihash),
    };
    Ok((cid, &bytes[specs.size..]))
  }

  /// # Errors
  ///
  /// Will return `Err` if `bytes` is not exactly one valid CID.
  pub fn decode(bytes: &[u8]) -> Result<Self> {
    let (cid, remainder) = Self::decode_first(bytes)?;
    if remainder.is_empty() {
      Ok(cid)
    }
    else {
      Err(Error::TrailingBytes(remainder.len()))
    }
  }

  /// Parses a CID string in one of the bases that can be detected from the
  /// first character: a bare `Q...` version 0 string, or a version 1 string
  /// in base58btc (`z`), base32 (`b`) or base36 (`k`).
  ///
  /// # Errors
  ///
  /// Will return `Err` if the base cannot be detected or the decoded bytes
  /// are not a CID.
  pub fn parse(source: &str) -> Result<Self> { Self::parse_inner(source, None) }

  /// Parses a CID string with `base`, which replaces the default decoder
  /// for every prefix.
  ///
  /// # Errors
  ///
  /// Will return `Err` if `base` rejects the string or the decoded bytes are
  /// not a CID.
  pub fn parse_with_base(source: &str, base: &dyn Decoder) -> Result<Self> {
    Self::parse_inner(source, Some(base))
  }

  fn parse_inner(source: &str, base: Option<&dyn Decoder>) -> Result<Self> {
    let first = source.chars().next().ok_or(Error::InputTooShort)?;
    // legacy strings are base58btc with the prefix left off
    let text = match first {
      'Q' => format!("{}{}", BASE58_BTC.prefix(), source),
      _ => source.to_owned(),
    };
    let bytes = match (base, default_decoder(first)) {
      (Some(base), _) => base.decode(&text)?,
      (None, Some(codec)) => codec.decode(&text)?,
      (None, None) => return Err(Error::AmbiguousBaseForParse(first)),
    };
    let cid = Self::decode(&bytes)?;
    log::trace!("parsed {:?} as {:?} CID with codec {:#x}", source, cid.version, cid.code);
    let cached = match cid.version {
      Version::V0 if first != 'Q' => return Err(Error::ExplicitV0Prefix),
      Version::V0 => source.to_owned(),
      Version::V1 => text,
    };
    // a caller's decoder may accept non-canonical text; only cache what a
    // built-in codec has checked
    if base.is_none() {
      let prefix = if first == 'Q' { BASE58_BTC.prefix() } else { first };
      cid.cache.write().insert(prefix, cached);
    }
    Ok(cid)
  }

  /// Renders the CID with `base`, reusing a previous rendering with the same
  /// prefix. Version 0 CIDs render in base58btc without the prefix
  /// character.
  ///
  /// # Errors
  ///
  /// Will return `Err` if a version 0 CID is asked for any base but
  /// base58btc, or if `base` returns text without its own prefix.
  pub fn to_string_of_base(&self, base: &dyn Encoder) -> Result<String> {
    let prefix = base.prefix();
    if self.version == Version::V0 && prefix != BASE58_BTC.prefix() {
      return Err(Error::IncompatibleBaseForV0(base.name().to_owned()));
    }
    if let Some(cached) = self.cache.read().get(&prefix) {
      return Ok(cached.clone());
    }
    let encoded = base.encode(&self.bytes);
    let payload = match encoded.strip_prefix(prefix) {
      Some(payload) => payload,
      None => {
        return Err(Error::UnrecognizedMultibasePrefix {
          found: encoded.chars().next(),
          supported: format!("{:?}", prefix),
        })
      }
    };
    let text = match self.version {
      Version::V0 => payload.to_owned(),
      Version::V1 => encoded,
    };
    Ok(self.cache.write().entry(prefix).or_insert(text).clone())
  }

  /// # Errors
  ///
  /// Will return `Err` if the CID does not use dag-pb and sha2-256.
  pub fn to_v0(&self) -> Result<Self> {
    match self.version {
      Version::V0 => Ok(self.clone()),
      Version::V1 if self.code != DAG_PB => Err(Error::IncompatibleCodecForV0(self.code)),
      Version::V1 => Self::new_v0(self.multihash.clone()),
    }
  }

  #[must_use]
  pub fn to_v1(&self) -> Self {
    match self.version {
      Version::V0 => Self::new_v1(self.code, self.multihash.clone()),
      Version::V1 => self.clone(),
    }
  }

  fn default_encoder(&self) -> &'static Codec {
    match self.version {
      Version::V0 => &BASE58_BTC,
      Version::V1 => &BASE32,
    }
  }
}

fn default_decoder(first: char) -> Option<&'static Codec> {
  match first {
    'Q' | 'z' => Some(&BASE58_BTC),
    'b' => Some(&BASE32),
    'k' => Some(&BASE36),
    _ => None,
  }
}

impl Clone for Cid {
  fn clone(&self) -> Self {
    Self {
      version: self.version,
      code: self.code,
      multihash: self.multihash.clone(),
      bytes: self.bytes.clone(),
      cache: RwLock::new(self.cache.read().clone()),
    }
  }
}

impl PartialEq for Cid {
  fn eq(&self, other: &Self) -> bool {
    self.version == other.version
      && self.code == other.code
      && self.multihash == other.multihash
  }
}

impl Eq for Cid {}

impl PartialOrd for Cid {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Cid {
  fn cmp(&self, other: &Self) -> Ordering {
    (self.version, self.code, &self.multihash).cmp(&(
      other.version,
      other.code,
      &other.multihash,
    ))
  }
}

impl Hash for Cid {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.version.hash(state);
    self.code.hash(state);
    self.multihash.hash(state);
  }
}

impl fmt::Display for Cid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.to_string_of_base(self.default_encoder()) {
      Ok(text) => f.write_str(&text),
      Err(_) => Err(fmt::Error),
    }
  }
}

impl fmt::Debug for Cid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
      f.debug_struct("Cid")
        .field("version", &self.version)
        .field("code", &self.code)
        .field("multihash", &self.multihash)
        .finish()
    }
    else {
      write!(f, "Cid({})", self)
    }
  }
}

impl FromStr for Cid {
  type Err = Error;

  fn from_str(source: &str) -> Result<Self> { Self::parse(source) }
}

impl TryFrom<&str> for Cid {
  type Error = Error;

  fn try_from(source: &str) -> Result<Self> { Self::parse(source) }
}

impl TryFrom<&[u8]> for Cid {
  type Error = Error;

  fn try_from(bytes: &[u8]) -> Result<Self> { Self::decode(bytes) }
}

impl TryFrom<Vec<u8>> for Cid {
  type Error = Error;

  fn try_from(bytes: Vec<u8>) -> Result<Self> { Self::decode(&bytes) }
}

impl From<Cid> for Vec<u8> {
  fn from(cid: Cid) -> Self { cid.bytes }
}

impl From<Cid> for String {
  fn from(cid: Cid) -> Self { cid.to_string() }
}

impl Serialize for Cid {
  fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
  where S: Serializer {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(LINK_KEY, &self.to_string())?;
    map.end()
  }
}

struct CidVisitor;

impl<'de> de::Visitor<'de> for CidVisitor {
  type Value = Cid;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("a CID string or a {\"/\": <CID string>} link")
  }

  fn visit_str<E: de::Error>(self, value: &str) -> core::result::Result<Cid, E> {
    Cid::parse(value).map_err(E::custom)
  }

  fn visit_map<A>(self, mut map: A) -> core::result::Result<Cid, A::Error>
  where A: de::MapAccess<'de> {
    let key: String = match map.next_key()? {
      Some(key) => key,
      None => return Err(de::Error::missing_field(LINK_KEY)),
    };
    if key != LINK_KEY {
      return Err(de::Error::unknown_field(&key, &[LINK_KEY]));
    }
    let value: String = map.next_value()?;
    if map.next_key::<String>()?.is_some() {
      return Err(de::Error::custom("a link has exactly one key"));
    }
    Cid::parse(&value).map_err(de::Error::custom)
  }
}

impl<'de> Deserialize<'de> for Cid {
  fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
  where D: Deserializer<'de> {
    deserializer.deserialize_any(CidVisitor)
  }
}
