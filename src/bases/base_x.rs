//! Arbitrary-radix encodings (base10, base36, base58).
//!
//! The input is treated as one big-endian integer and repeatedly divided by
//! the radix. Each leading zero byte maps to one leading zero symbol.

use std::iter;

use crate::error::{
  Error,
  Result,
};

pub(crate) fn encode(data: &[u8], alphabet: &str) -> String {
  let symbols = alphabet.as_bytes();
  let base = symbols.len() as u32;
  let zeros = data.iter().take_while(|&&byte| byte == 0).count();

  // little-endian digits in `base`
  let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 2);
  for &byte in &data[zeros..] {
    let mut carry = u32::from(byte);
    for digit in digits.iter_mut() {
      carry += u32::from(*digit) << 8;
      *digit = (carry % base) as u8;
      carry /= base;
    }
    while carry > 0 {
      digits.push((carry % base) as u8);
      carry /= base;
    }
  }

  iter::repeat(char::from(symbols[0]))
    .take(zeros)
    .chain(digits.iter().rev().map(|&digit| char::from(symbols[usize::from(digit)])))
    .collect()
}

pub(crate) fn decode(
  text: &str,
  alphabet: &str,
  name: &'static str,
) -> Result<Vec<u8>> {
  let base = alphabet.len() as u32;
  let leader = char::from(alphabet.as_bytes()[0]);
  let zeros = text.chars().take_while(|&character| character == leader).count();

  // little-endian bytes
  let mut bytes: Vec<u8> = Vec::with_capacity(text.len());
  for character in text.chars().skip(zeros) {
    let mut carry = match alphabet.find(character) {
      Some(value) => value as u32,
      None => return Err(Error::InvalidBaseCharacter { base: name, character }),
    };
    for byte in bytes.iter_mut() {
      carry += u32::from(*byte) * base;
      *byte = (carry & 0xff) as u8;
      carry >>= 8;
    }
    while carry > 0 {
      bytes.push((carry & 0xff) as u8);
      carry >>= 8;
    }
  }

  let mut out = vec![0u8; zeros];
  out.extend(bytes.iter().rev());
  Ok(out)
}

#[cfg(test)]
pub mod tests {
  use super::*;

  const BTC: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

  #[test]
  fn bitcoin_vectors() {
    let vectors: [(&[u8], &str); 5] = [
      (b"", ""),
      (&[0x00], "1"),
      (&[0x00, 0x00, 0x28, 0x7f, 0xb4, 0xcd], "11233QC4"),
      (b"Hello World!", "2NEpo7TZRRrLZSi2U"),
      (&[0x61], "2g"),
    ];
    for (bytes, text) in vectors.iter() {
      assert_eq!(encode(bytes, BTC), *text);
      assert_eq!(decode(text, BTC, "base58btc").unwrap(), bytes.to_vec());
    }
  }

  #[test]
  fn zeros_only() {
    assert_eq!(encode(&[0, 0, 0], BTC), "111");
    assert_eq!(decode("111", BTC, "base58btc").unwrap(), vec![0, 0, 0]);
  }
}
