//! Unsigned LEB128 varints, the integer encoding shared by every header in
//! this crate.
//!
//! Each byte carries seven payload bits; a set high bit means more bytes
//! follow. Encodings are canonical: decoding rejects non-minimal forms, so
//! every integer has exactly one byte representation.

use unsigned_varint::{
  decode as varint_decode,
  encode as varint_encode,
};

use crate::error::{
  Error,
  Result,
};

/// Longest encoding of a `u64`.
pub const MAX_LEN: usize = 10;

/// Decodes the varint starting at `offset`, returning the value and the
/// number of bytes it occupied.
///
/// # Errors
///
/// Returns [`Error::MalformedVarint`] when the buffer ends before a
/// terminating byte, when the value overflows `u64`, or when the encoding is
/// not minimal.
pub fn decode(bytes: &[u8], offset: usize) -> Result<(u64, usize)> {
  let input = bytes.get(offset..).unwrap_or(&[]);
  match varint_decode::u64(input) {
    Ok((value, rest)) => Ok((value, input.len() - rest.len())),
    Err(varint_decode::Error::Insufficient) => {
      Err(Error::MalformedVarint { offset, reason: "unexpected end of buffer" })
    }
    Err(varint_decode::Error::Overflow) => {
      Err(Error::MalformedVarint { offset, reason: "value overflows u64" })
    }
    Err(varint_decode::Error::NotMinimal) => {
      Err(Error::MalformedVarint { offset, reason: "encoding is not minimal" })
    }
    Err(_) => Err(Error::MalformedVarint { offset, reason: "invalid varint" }),
  }
}

/// Writes the minimal encoding of `value` into `target` at `offset` and
/// returns the number of bytes written.
///
/// # Panics
///
/// Panics if `target` has fewer than `encoding_length(value)` bytes after
/// `offset`.
pub fn encode_to(value: u64, target: &mut [u8], offset: usize) -> usize {
  let mut buf = varint_encode::u64_buffer();
  let encoded = varint_encode::u64(value, &mut buf);
  target[offset..offset + encoded.len()].copy_from_slice(encoded);
  encoded.len()
}

/// Appends the minimal encoding of `value` to `out`.
pub fn encode_into(value: u64, out: &mut Vec<u8>) {
  let mut buf = varint_encode::u64_buffer();
  out.extend_from_slice(varint_encode::u64(value, &mut buf));
}

#[must_use]
pub fn encode(value: u64) -> Vec<u8> {
  let mut out = Vec::with_capacity(encoding_length(value));
  encode_into(value, &mut out);
  out
}

/// Number of bytes [`encode_to`] writes for `value`.
#[must_use]
pub const fn encoding_length(value: u64) -> usize {
  let mut len = 1;
  let mut rest = value >> 7;
  while rest != 0 {
    len += 1;
    rest >>= 7;
  }
  len
}

#[cfg(test)]
pub mod tests {
  use super::*;

  #[quickcheck]
  fn prop_u32_round_trip(n: u32) -> bool {
    let n = u64::from(n);
    let mut buf = [0u8; MAX_LEN];
    let written = encode_to(n, &mut buf, 0);
    written == encoding_length(n)
      && matches!(decode(&buf, 0), Ok((m, len)) if m == n && len == written)
  }

  #[quickcheck]
  fn prop_u64_round_trip(n: u64, pad: Vec<u8>) -> bool {
    let mut bytes = pad.clone();
    encode_into(n, &mut bytes);
    bytes.extend_from_slice(&pad);
    matches!(
      decode(&bytes, pad.len()),
      Ok((m, len)) if m == n && len == encoding_length(n)
    )
  }

  #[test]
  fn known_encodings() {
    assert_eq!(encode(0), vec![0x00]);
    assert_eq!(encode(1), vec![0x01]);
    assert_eq!(encode(127), vec![0x7f]);
    assert_eq!(encode(128), vec![0x80, 0x01]);
    assert_eq!(encode(300), vec![0xac, 0x02]);
    assert_eq!(encode(0x7701), vec![0x81, 0xee, 0x01]);
    assert_eq!(encode((1 << 53) - 1), vec![
      0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x0f
    ]);
    assert_eq!(encoding_length(u64::MAX), MAX_LEN);
  }

  #[test]
  fn encode_to_offset() {
    let mut buf = [0xaau8; 4];
    assert_eq!(encode_to(300, &mut buf, 1), 2);
    assert_eq!(buf, [0xaa, 0xac, 0x02, 0xaa]);
  }

  #[test]
  fn rejects_truncated() {
    assert!(matches!(
      decode(&[0x80, 0x80], 0),
      Err(Error::MalformedVarint { offset: 0, .. })
    ));
    assert!(matches!(decode(&[], 0), Err(Error::MalformedVarint { .. })));
    assert!(matches!(
      decode(&[0x01], 5),
      Err(Error::MalformedVarint { offset: 5, .. })
    ));
  }

  #[test]
  fn rejects_non_minimal() {
    assert!(matches!(
      decode(&[0x81, 0x00], 0),
      Err(Error::MalformedVarint { .. })
    ));
  }

  #[test]
  fn decodes_from_offset() {
    let bytes = [0x12, 0xac, 0x02, 0x20];
    assert_eq!(decode(&bytes, 1).unwrap(), (300, 2));
    assert_eq!(decode(&bytes, 3).unwrap(), (0x20, 1));
  }
}
