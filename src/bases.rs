//! Multibase: text encodings prefixed with a character naming the base.
//!
//! A [`Codec`] pairs one base algorithm ([`Scheme`]) with its name and
//! prefix. Codecs are plain `Copy` values; the built-in ones are constants in
//! this module and [`Registry::default`] collects all of them. Several codecs
//! combine into a [`ComposedDecoder`] that dispatches on the first character.

use core::fmt;
use std::collections::BTreeMap;

use crate::error::{
  Error,
  Result,
};

mod base256emoji;
mod base45;
mod base_x;
mod proquint;
mod registry;
mod rfc4648;

pub use registry::Registry;

/// The algorithm behind a [`Codec`].
#[derive(Clone, Copy)]
pub enum Scheme {
  /// Bytes are the text, as UTF-8. Text only: bytes that are not valid
  /// UTF-8 encode with U+FFFD replacements and do not round trip.
  Identity,
  /// RFC4648 bit packing. Padding with `=` is applied when the alphabet ends
  /// with `=`.
  Rfc4648 { alphabet: &'static str, bits_per_char: u32 },
  /// Big-integer radix conversion with leading-zero preservation.
  BaseX { alphabet: &'static str },
  /// RFC 9285.
  Base45,
  /// `ro-` prefixed consonant/vowel blocks.
  Proquint,
  /// One emoji per byte.
  Base256Emoji,
  /// A caller-supplied pair of un-prefixed payload functions.
  Custom { encode: fn(&[u8]) -> String, decode: fn(&str) -> Result<Vec<u8>> },
}

/// Anything that renders bytes as a multibase string.
pub trait Encoder {
  fn name(&self) -> &str;

  fn prefix(&self) -> char;

  /// Encodes `bytes`, including the prefix character.
  fn encode(&self, bytes: &[u8]) -> String;
}

/// Anything that turns a multibase string back into bytes.
pub trait Decoder {
  /// Decodes a prefixed multibase string.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the prefix is not handled by this decoder or if
  /// the payload is not valid in its base.
  fn decode(&self, text: &str) -> Result<Vec<u8>>;
}

/// A named multibase encoding with a single-character prefix.
#[derive(Clone, Copy)]
pub struct Codec {
  name: &'static str,
  prefix: char,
  scheme: Scheme,
}

/// An RFC4648 alphabet needs one ASCII symbol per `bits_per_char` value,
/// optionally followed by `=`.
const fn valid_rfc4648(alphabet: &str, bits_per_char: u32) -> bool {
  let symbols = alphabet.as_bytes();
  let mut len = symbols.len();
  if len > 0 && symbols[len - 1] == b'=' {
    len -= 1;
  }
  if bits_per_char == 0 || bits_per_char > 8 || len != 1 << bits_per_char {
    return false;
  }
  let mut i = 0;
  while i < len {
    if !symbols[i].is_ascii() || symbols[i] == b'=' {
      return false;
    }
    i += 1;
  }
  true
}

/// A radix alphabet is 2 to 256 ASCII symbols.
const fn valid_base_x(alphabet: &str) -> bool {
  let symbols = alphabet.as_bytes();
  if symbols.len() < 2 || symbols.len() > 256 {
    return false;
  }
  let mut i = 0;
  while i < symbols.len() {
    if !symbols[i].is_ascii() {
      return false;
    }
    i += 1;
  }
  true
}

impl Codec {
  /// # Panics
  ///
  /// Panics if an `Rfc4648` alphabet is not `2^bits_per_char` ASCII symbols
  /// (plus an optional trailing `=`) with `bits_per_char` in `1..=8`, or if
  /// a `BaseX` alphabet is not 2 to 256 ASCII symbols. For constants this
  /// is a compile error.
  #[must_use]
  pub const fn new(name: &'static str, prefix: char, scheme: Scheme) -> Self {
    match scheme {
      Scheme::Rfc4648 { alphabet, bits_per_char } => {
        assert!(valid_rfc4648(alphabet, bits_per_char), "invalid rfc4648 alphabet");
      }
      Scheme::BaseX { alphabet } => {
        assert!(valid_base_x(alphabet), "invalid radix alphabet");
      }
      _ => {}
    }
    Self { name, prefix, scheme }
  }

  #[must_use]
  pub const fn name(&self) -> &'static str { self.name }

  #[must_use]
  pub const fn prefix(&self) -> char { self.prefix }

  /// Encodes `bytes` without the prefix character.
  #[must_use]
  pub fn base_encode(&self, bytes: &[u8]) -> String {
    match self.scheme {
      Scheme::Identity => String::from_utf8_lossy(bytes).into_owned(),
      Scheme::Rfc4648 { alphabet, bits_per_char } => {
        rfc4648::encode(bytes, alphabet, bits_per_char)
      }
      Scheme::BaseX { alphabet } => base_x::encode(bytes, alphabet),
      Scheme::Base45 => base45::encode(bytes),
      Scheme::Proquint => proquint::encode(bytes),
      Scheme::Base256Emoji => base256emoji::encode(bytes),
      Scheme::Custom { encode, .. } => encode(bytes),
    }
  }

  /// Decodes text that carries no prefix character.
  ///
  /// # Errors
  ///
  /// Will return `Err` if `text` is not a valid payload for this base.
  pub fn base_decode(&self, text: &str) -> Result<Vec<u8>> {
    match self.scheme {
      Scheme::Identity => Ok(text.as_bytes().to_vec()),
      Scheme::Rfc4648 { alphabet, bits_per_char } => {
        rfc4648::decode(text, alphabet, bits_per_char, self.name)
      }
      Scheme::BaseX { alphabet } => base_x::decode(text, alphabet, self.name),
      Scheme::Base45 => base45::decode(text, self.name),
      Scheme::Proquint => proquint::decode(text, self.name),
      Scheme::Base256Emoji => base256emoji::decode(text, self.name),
      Scheme::Custom { decode, .. } => decode(text),
    }
  }

  #[must_use]
  pub fn encode(&self, bytes: &[u8]) -> String {
    let payload = self.base_encode(bytes);
    let mut out = String::with_capacity(self.prefix.len_utf8() + payload.len());
    out.push(self.prefix);
    out.push_str(&payload);
    out
  }

  /// # Errors
  ///
  /// Will return `Err` if `text` does not start with this codec's prefix or
  /// its payload is invalid.
  pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
    match text.strip_prefix(self.prefix) {
      Some(payload) => self.base_decode(payload),
      None => Err(Error::UnrecognizedMultibasePrefix {
        found: text.chars().next(),
        supported: format!("{:?}", self.prefix),
      }),
    }
  }

  /// Combines this codec with more decoders.
  #[must_use]
  pub fn or<D: Into<ComposedDecoder>>(self, other: D) -> ComposedDecoder {
    or(self, other)
  }
}

impl Encoder for Codec {
  fn name(&self) -> &str { self.name }

  fn prefix(&self) -> char { self.prefix }

  fn encode(&self, bytes: &[u8]) -> String { Codec::encode(self, bytes) }
}

impl Decoder for Codec {
  fn decode(&self, text: &str) -> Result<Vec<u8>> { Codec::decode(self, text) }
}

impl fmt::Debug for Codec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Codec")
      .field("name", &self.name)
      .field("prefix", &self.prefix)
      .finish()
  }
}

impl PartialEq for Codec {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name && self.prefix == other.prefix
  }
}

impl Eq for Codec {}

/// A decoder that picks one of several codecs by the first character of
/// its input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposedDecoder {
  decoders: BTreeMap<char, Codec>,
}

impl ComposedDecoder {
  #[must_use]
  pub fn new() -> Self { Self::default() }

  /// Adds the decoders of `other`; on a shared prefix `other` wins.
  #[must_use]
  pub fn or<D: Into<ComposedDecoder>>(mut self, other: D) -> Self {
    self.decoders.extend(other.into().decoders);
    self
  }

  pub fn prefixes(&self) -> impl Iterator<Item = char> + '_ {
    self.decoders.keys().copied()
  }

  #[must_use]
  pub fn get(&self, prefix: char) -> Option<&Codec> { self.decoders.get(&prefix) }

  /// # Errors
  ///
  /// Will return `Err` if no member codec owns the first character of
  /// `text`, or if that codec rejects the payload.
  pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
    let found = text.chars().next();
    match found.and_then(|prefix| self.decoders.get(&prefix)) {
      Some(codec) => codec.decode(text),
      None => {
        log::trace!("no multibase decoder for prefix {:?}", found);
        let supported: Vec<String> =
          self.prefixes().map(|p| format!("{:?}", p)).collect();
        Err(Error::UnrecognizedMultibasePrefix {
          found,
          supported: supported.join(", "),
        })
      }
    }
  }
}

impl Decoder for ComposedDecoder {
  fn decode(&self, text: &str) -> Result<Vec<u8>> {
    ComposedDecoder::decode(self, text)
  }
}

impl From<Codec> for ComposedDecoder {
  fn from(codec: Codec) -> Self {
    let mut decoders = BTreeMap::new();
    decoders.insert(codec.prefix, codec);
    Self { decoders }
  }
}

impl From<&Codec> for ComposedDecoder {
  fn from(codec: &Codec) -> Self { Self::from(*codec) }
}

/// Builds a decoder accepting the prefixes of both sides.
pub fn or<L, R>(left: L, right: R) -> ComposedDecoder
where
  L: Into<ComposedDecoder>,
  R: Into<ComposedDecoder>, {
  left.into().or(right)
}

const BASE2_ALPHABET: &str = "01";
const BASE8_ALPHABET: &str = "01234567";
const BASE10_ALPHABET: &str = "0123456789";
const BASE64_ALPHABET: &str =
  "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64_PAD_ALPHABET: &str =
  "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";
const BASE64_URL_ALPHABET: &str =
  "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const BASE64_URL_PAD_ALPHABET: &str =
  "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_=";

pub const IDENTITY: Codec = Codec::new("identity", '\x00', Scheme::Identity);

pub const BASE2: Codec = Codec::new("base2", '0', Scheme::Rfc4648 {
  alphabet: BASE2_ALPHABET,
  bits_per_char: 1,
});

pub const BASE8: Codec = Codec::new("base8", '7', Scheme::Rfc4648 {
  alphabet: BASE8_ALPHABET,
  bits_per_char: 3,
});

pub const BASE10: Codec =
  Codec::new("base10", '9', Scheme::BaseX { alphabet: BASE10_ALPHABET });

pub const BASE16: Codec = Codec::new("base16", 'f', Scheme::Rfc4648 {
  alphabet: "0123456789abcdef",
  bits_per_char: 4,
});

pub const BASE16_UPPER: Codec = Codec::new("base16upper", 'F', Scheme::Rfc4648 {
  alphabet: "0123456789ABCDEF",
  bits_per_char: 4,
});

pub const BASE32: Codec = Codec::new("base32", 'b', Scheme::Rfc4648 {
  alphabet: "abcdefghijklmnopqrstuvwxyz234567",
  bits_per_char: 5,
});

pub const BASE32_UPPER: Codec =
  Codec::new("base32upper", 'B', Scheme::Rfc4648 {
    alphabet: "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567",
    bits_per_char: 5,
  });

pub const BASE32_PAD: Codec = Codec::new("base32pad", 'c', Scheme::Rfc4648 {
  alphabet: "abcdefghijklmnopqrstuvwxyz234567=",
  bits_per_char: 5,
});

pub const BASE32_PAD_UPPER: Codec =
  Codec::new("base32padupper", 'C', Scheme::Rfc4648 {
    alphabet: "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567=",
    bits_per_char: 5,
  });

pub const BASE32_HEX: Codec = Codec::new("base32hex", 'v', Scheme::Rfc4648 {
  alphabet: "0123456789abcdefghijklmnopqrstuv",
  bits_per_char: 5,
});

pub const BASE32_HEX_UPPER: Codec =
  Codec::new("base32hexupper", 'V', Scheme::Rfc4648 {
    alphabet: "0123456789ABCDEFGHIJKLMNOPQRSTUV",
    bits_per_char: 5,
  });

pub const BASE32_HEX_PAD: Codec =
  Codec::new("base32hexpad", 't', Scheme::Rfc4648 {
    alphabet: "0123456789abcdefghijklmnopqrstuv=",
    bits_per_char: 5,
  });

pub const BASE32_HEX_PAD_UPPER: Codec =
  Codec::new("base32hexpadupper", 'T', Scheme::Rfc4648 {
    alphabet: "0123456789ABCDEFGHIJKLMNOPQRSTUV=",
    bits_per_char: 5,
  });

pub const BASE32_Z: Codec = Codec::new("base32z", 'h', Scheme::Rfc4648 {
  alphabet: "ybndrfg8ejkmcpqxot1uwisza345h769",
  bits_per_char: 5,
});

pub const BASE36: Codec = Codec::new("base36", 'k', Scheme::BaseX {
  alphabet: "0123456789abcdefghijklmnopqrstuvwxyz",
});

pub const BASE36_UPPER: Codec = Codec::new("base36upper", 'K', Scheme::BaseX {
  alphabet: "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ",
});

pub const BASE45: Codec = Codec::new("base45", 'R', Scheme::Base45);

pub const BASE58_BTC: Codec = Codec::new("base58btc", 'z', Scheme::BaseX {
  alphabet: "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz",
});

pub const BASE58_FLICKR: Codec =
  Codec::new("base58flickr", 'Z', Scheme::BaseX {
    alphabet: "123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ",
  });

pub const BASE64: Codec = Codec::new("base64", 'm', Scheme::Rfc4648 {
  alphabet: BASE64_ALPHABET,
  bits_per_char: 6,
});

pub const BASE64_PAD: Codec = Codec::new("base64pad", 'M', Scheme::Rfc4648 {
  alphabet: BASE64_PAD_ALPHABET,
  bits_per_char: 6,
});

pub const BASE64_URL: Codec = Codec::new("base64url", 'u', Scheme::Rfc4648 {
  alphabet: BASE64_URL_ALPHABET,
  bits_per_char: 6,
});

pub const BASE64_URL_PAD: Codec =
  Codec::new("base64urlpad", 'U', Scheme::Rfc4648 {
    alphabet: BASE64_URL_PAD_ALPHABET,
    bits_per_char: 6,
  });

pub const PROQUINT: Codec = Codec::new("proquint", 'p', Scheme::Proquint);

pub const BASE256_EMOJI: Codec =
  Codec::new("base256emoji", '\u{1F680}', Scheme::Base256Emoji);

/// Every codec shipped with the crate.
pub const BUILTIN: [Codec; 26] = [
  IDENTITY,
  BASE2,
  BASE8,
  BASE10,
  BASE16,
  BASE16_UPPER,
  BASE32,
  BASE32_UPPER,
  BASE32_PAD,
  BASE32_PAD_UPPER,
  BASE32_HEX,
  BASE32_HEX_UPPER,
  BASE32_HEX_PAD,
  BASE32_HEX_PAD_UPPER,
  BASE32_Z,
  BASE36,
  BASE36_UPPER,
  BASE45,
  BASE58_BTC,
  BASE58_FLICKR,
  BASE64,
  BASE64_PAD,
  BASE64_URL,
  BASE64_URL_PAD,
  PROQUINT,
  BASE256_EMOJI,
];
