//! Proquints: pronounceable `ro-` prefixed blocks.
//!
//! Each 16-bit big-endian chunk becomes consonant-vowel-consonant-vowel-
//! consonant (4+2+4+2+4 bits). A trailing odd byte becomes a three letter
//! block (4+2+2 bits) whose last consonant is one of the first four.

use crate::error::{
  Error,
  Result,
};

const CONSONANTS: &[u8; 16] = b"bdfghjklmnprstvz";
const VOWELS: &[u8; 4] = b"aiou";
const PREFIX: &str = "ro-";

fn consonant(value: u16) -> char { char::from(CONSONANTS[usize::from(value & 0xf)]) }

fn vowel(value: u16) -> char { char::from(VOWELS[usize::from(value & 0x3)]) }

pub(crate) fn encode(data: &[u8]) -> String {
  let mut out = String::with_capacity(PREFIX.len() + data.len() * 3);
  out.push_str(PREFIX);
  for (i, chunk) in data.chunks(2).enumerate() {
    if i > 0 {
      out.push('-');
    }
    if let [high, low] = chunk {
      let value = u16::from_be_bytes([*high, *low]);
      out.push(consonant(value >> 12));
      out.push(vowel(value >> 10));
      out.push(consonant(value >> 6));
      out.push(vowel(value >> 4));
      out.push(consonant(value));
    }
    else {
      let value = u16::from(chunk[0]);
      out.push(consonant(value >> 4));
      out.push(vowel(value >> 2));
      out.push(consonant(value & 0x3));
    }
  }
  out
}

struct Block<'a> {
  name: &'static str,
  characters: &'a [char],
}

impl Block<'_> {
  fn consonant(&self, at: usize) -> Result<u16> {
    let character = self.characters[at];
    CONSONANTS
      .iter()
      .position(|&symbol| char::from(symbol) == character)
      .map(|value| value as u16)
      .ok_or(Error::InvalidBaseCharacter { base: self.name, character })
  }

  fn vowel(&self, at: usize) -> Result<u16> {
    let character = self.characters[at];
    VOWELS
      .iter()
      .position(|&symbol| char::from(symbol) == character)
      .map(|value| value as u16)
      .ok_or(Error::InvalidBaseCharacter { base: self.name, character })
  }
}

pub(crate) fn decode(text: &str, name: &'static str) -> Result<Vec<u8>> {
  let body = match text.strip_prefix(PREFIX) {
    Some(body) => body,
    None => {
      let mismatch =
        text.chars().zip(PREFIX.chars()).find(|(found, wanted)| found != wanted);
      return Err(match mismatch {
        Some((character, _)) => Error::InvalidBaseCharacter { base: name, character },
        None => Error::UnexpectedEndOfData { base: name },
      });
    }
  };

  let mut out = Vec::with_capacity(body.len() / 3);
  if body.is_empty() {
    return Ok(out);
  }

  let blocks: Vec<&str> = body.split('-').collect();
  let last = blocks.len() - 1;
  for (i, text) in blocks.iter().enumerate() {
    let characters: Vec<char> = text.chars().collect();
    let block = Block { name, characters: &characters };
    match characters.len() {
      5 => {
        let value = block.consonant(0)? << 12
          | block.vowel(1)? << 10
          | block.consonant(2)? << 6
          | block.vowel(3)? << 4
          | block.consonant(4)?;
        out.extend_from_slice(&value.to_be_bytes());
      }
      3 if i == last => {
        let tail = block.consonant(2)?;
        if tail > 0x3 {
          return Err(Error::InvalidBaseCharacter { base: name, character: characters[2] });
        }
        let value = block.consonant(0)? << 4 | block.vowel(1)? << 2 | tail;
        out.push(value as u8);
      }
      _ => return Err(Error::UnexpectedEndOfData { base: name }),
    }
  }
  Ok(out)
}
