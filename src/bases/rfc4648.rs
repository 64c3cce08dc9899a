//! Bit-packed encodings (base2, base8, base16, base32, base64 and their
//! variants), most significant bit first.

use crate::error::{
  Error,
  Result,
};

const PAD: u8 = b'=';

fn lookup_table(alphabet: &str) -> [u8; 128] {
  let mut table = [u8::MAX; 128];
  for (value, symbol) in alphabet.bytes().enumerate() {
    if symbol != PAD {
      table[usize::from(symbol)] = value as u8;
    }
  }
  table
}

pub(crate) fn encode(data: &[u8], alphabet: &str, bits_per_char: u32) -> String {
  let symbols = alphabet.as_bytes();
  let pad = symbols.last() == Some(&PAD);
  let mask = (1u32 << bits_per_char) - 1;
  let width = bits_per_char as usize;
  let mut out = String::with_capacity((data.len() * 8 + width - 1) / width);

  let mut bits = 0u32;
  let mut buffer = 0u32;
  for &byte in data {
    buffer = (buffer << 8) | u32::from(byte);
    bits += 8;
    while bits > bits_per_char {
      bits -= bits_per_char;
      out.push(char::from(symbols[(mask & (buffer >> bits)) as usize]));
    }
    buffer &= (1 << bits) - 1;
  }

  if bits != 0 {
    out.push(char::from(
      symbols[(mask & (buffer << (bits_per_char - bits))) as usize],
    ));
  }

  if pad {
    while (out.len() * width) & 7 != 0 {
      out.push(char::from(PAD));
    }
  }

  out
}

pub(crate) fn decode(
  text: &str,
  alphabet: &str,
  bits_per_char: u32,
  name: &'static str,
) -> Result<Vec<u8>> {
  let table = lookup_table(alphabet);
  let width = bits_per_char as usize;
  let text = if alphabet.as_bytes().last() == Some(&PAD) {
    let payload = text.trim_end_matches(char::from(PAD));
    // exactly as much padding as encode emits
    let mut padded = payload.len();
    while (padded * width) & 7 != 0 {
      padded += 1;
    }
    if text.len() != padded {
      return Err(Error::UnexpectedEndOfData { base: name });
    }
    payload
  }
  else {
    text
  };
  let mut out = Vec::with_capacity(text.len() * width / 8);

  let mut bits = 0u32;
  let mut buffer = 0u32;
  for character in text.chars() {
    let value = match table.get(character as usize) {
      Some(&value) if value != u8::MAX => u32::from(value),
      _ => return Err(Error::InvalidBaseCharacter { base: name, character }),
    };
    buffer = (buffer << bits_per_char) | value;
    bits += bits_per_char;
    if bits >= 8 {
      bits -= 8;
      out.push((buffer >> bits) as u8);
    }
    buffer &= (1 << bits) - 1;
  }

  // Leftover bits must be fewer than one character and all zero.
  if bits >= bits_per_char || buffer != 0 {
    return Err(Error::UnexpectedEndOfData { base: name });
  }

  Ok(out)
}
