use core::convert::TryFrom;

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

/// The raw multicodec code.
pub const RAW: u64 = 0x55;

/// Bytes as they are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RawCodec;

impl Codec for RawCodec {
  const NAME: &'static str = "raw";
}

impl From<RawCodec> for u64 {
  fn from(_: RawCodec) -> Self { RAW }
}

impl TryFrom<u64> for RawCodec {
  type Error = Error;

  fn try_from(code: u64) -> Result<Self> {
    if code == RAW { Ok(Self) } else { Err(Error::UnsupportedCodec(code)) }
  }
}

impl Encode<RawCodec> for [u8] {
  fn encode(&self, _: RawCodec, w: &mut Vec<u8>) -> Result<()> {
    w.extend_from_slice(self);
    Ok(())
  }
}

impl Encode<RawCodec> for Vec<u8> {
  fn encode(&self, c: RawCodec, w: &mut Vec<u8>) -> Result<()> {
    self.as_slice().encode(c, w)
  }
}

impl Decode<RawCodec> for Vec<u8> {
  fn decode(_: RawCodec, r: &[u8]) -> Result<Self> { Ok(r.to_vec()) }
}
