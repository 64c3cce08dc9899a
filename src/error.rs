use thiserror::Error;

/// Type alias to use this library's [`Error`] type in a `Result`.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
  /// A varint ran off the end of its buffer, overflowed `u64`, or was not
  /// minimally encoded.
  #[error("malformed varint at offset {offset}: {reason}")]
  MalformedVarint { offset: usize, reason: &'static str },

  #[error("non-{base} character {character:?}")]
  InvalidBaseCharacter { base: &'static str, character: char },

  /// The text ended in the middle of a group, or the trailing bits do not
  /// form a zero-padded partial byte.
  #[error("unexpected end of {base} data")]
  UnexpectedEndOfData { base: &'static str },

  #[error("{base} group {group:?} does not fit its byte range")]
  InvalidBaseGroup { base: &'static str, group: String },

  #[error("incorrect digest length: declared {declared}, found {found}")]
  InvalidDigestLength { declared: u64, found: usize },

  #[error("invalid CID version {0}")]
  InvalidCidVersion(u64),

  #[error("incorrect length: {0} trailing bytes after CID")]
  TrailingBytes(usize),

  #[error("version 0 CID must use dag-pb (code: 0x70), found codec {0:#x}")]
  IncompatibleCodecForV0(u64),

  #[error("version 0 CID must use sha2-256 (code: 0x12), found hash {0:#x}")]
  IncompatibleHashForV0(u64),

  #[error("cannot string encode version 0 CID in {0} encoding")]
  IncompatibleBaseForV0(String),

  #[error("version 0 CID string must not include multibase prefix")]
  ExplicitV0Prefix,

  #[error(
    "unable to decode multibase string with prefix {found:?}, only inputs \
     prefixed with {supported} are supported"
  )]
  UnrecognizedMultibasePrefix { found: Option<char>, supported: String },

  #[error(
    "to parse a CID with prefix {0:?} (not base32, base36 or base58btc) a \
     multibase decoder must be provided"
  )]
  AmbiguousBaseForParse(char),

  #[error("input too short")]
  InputTooShort,

  #[error("unsupported codec {0:#x}")]
  UnsupportedCodec(u64),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}
