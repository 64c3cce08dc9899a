//! Base45 as specified by RFC 9285.

use crate::error::{
  Error,
  Result,
};

const ALPHABET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";
const RADIX: u32 = 45;

fn symbol(value: u32) -> char { char::from(ALPHABET[value as usize]) }

fn value_of(character: char, name: &'static str) -> Result<u32> {
  ALPHABET
    .iter()
    .position(|&symbol| char::from(symbol) == character)
    .map(|value| value as u32)
    .ok_or(Error::InvalidBaseCharacter { base: name, character })
}

pub(crate) fn encode(data: &[u8]) -> String {
  let mut out = String::with_capacity((data.len() + 1) / 2 * 3);
  for chunk in data.chunks(2) {
    if let [high, low] = chunk {
      let value = u32::from(*high) << 8 | u32::from(*low);
      out.push(symbol(value % RADIX));
      out.push(symbol(value / RADIX % RADIX));
      out.push(symbol(value / (RADIX * RADIX)));
    }
    else {
      let value = u32::from(chunk[0]);
      out.push(symbol(value % RADIX));
      out.push(symbol(value / RADIX));
    }
  }
  out
}

pub(crate) fn decode(text: &str, name: &'static str) -> Result<Vec<u8>> {
  let characters: Vec<char> = text.chars().collect();
  if characters.len() % 3 == 1 {
    return Err(Error::UnexpectedEndOfData { base: name });
  }

  let mut out = Vec::with_capacity(characters.len() / 3 * 2 + 1);
  for group in characters.chunks(3) {
    let mut value = 0u32;
    for character in group.iter().rev() {
      value = value * RADIX + value_of(*character, name)?;
    }
    let limit = if group.len() == 3 { 0xffff } else { 0xff };
    if value > limit {
      return Err(Error::InvalidBaseGroup { base: name, group: group.iter().collect() });
    }
    if group.len() == 3 {
      out.extend_from_slice(&(value as u16).to_be_bytes());
    }
    else {
      out.push(value as u8);
    }
  }
  Ok(out)
}

#[cfg(test)]
pub mod tests {
  use super::*;

  #[test]
  fn rfc9285_vectors() {
    let vectors: [(&str, &str); 4] = [
      ("AB", "BB8"),
      ("Hello!!", "%69 VD92EX0"),
      ("base-45", "UJCLQE7W581"),
      ("ietf!", "QED8WEX0"),
    ];
    for (plain, encoded) in vectors.iter() {
      assert_eq!(encode(plain.as_bytes()), *encoded);
      assert_eq!(decode(encoded, "base45").unwrap(), plain.as_bytes());
    }
  }

  #[test]
  fn rejects_dangling_character() {
    assert!(matches!(
      decode("BB8A", "base45"),
      Err(Error::UnexpectedEndOfData { base: "base45" })
    ));
  }

  #[test]
  fn rejects_out_of_range_groups() {
    // ":::" is 44 + 44*45 + 44*2025, beyond 0xffff
    assert!(matches!(decode(":::", "base45"), Err(Error::InvalidBaseGroup { .. })));
    // "::" is 44 + 44*45, beyond 0xff
    assert!(matches!(decode("::", "base45"), Err(Error::InvalidBaseGroup { .. })));
  }

  #[test]
  fn rejects_lowercase() {
    assert!(matches!(
      decode("bb8", "base45"),
      Err(Error::InvalidBaseCharacter { character: 'b', .. })
    ));
  }
}
