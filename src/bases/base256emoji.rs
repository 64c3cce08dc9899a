//! One emoji per byte, through a fixed table.

use crate::error::{
  Error,
  Result,
};

/// Byte `n` encodes as the `n`th character.
const ALPHABET: &str = "🚀🪐☄🛰🌌🌑🌒🌓🌔🌕🌖🌗🌘🌍🌏🌎🐉☀💻🖥💾💿😂❤😍🤣😊🙏💕😭😘👍😅👏😁🔥🥰💔💖💙😢🤔😆🙄💪😉☺👌🤗💜😔😎😇🌹🤦🎉💞✌✨🤷😱😌🌸🙌😋💗💚😏💛🙂💓🤩😄😀🖤😃💯🙈👇🎶😒🤭❣😜💋👀😪😑💥🙋😞😩😡🤪👊🥳😥🤤👉💃😳✋😚😝😴🌟😬🙃🍀🌷😻😓⭐✅🥺🌈😈🤘💦✔😣🏃💐☹🎊💘😠☝😕🌺🎂🌻😐🖕💝🙊😹🗣💫💀👑🎵🤞😛🔴😤🌼😫⚽🤙☕🏆🤫👈😮🙆🍻🍃🐶💁😲🌿🧡🎁⚡🌞🎈❌✊👋😰🤨😶🤝🚶💰🍓💢🤟🙁🚨💨🤬✈🎀🍺🤓😙💟🌱😖👶🥴▶➡❓💎💸⬇😨🌚🦋😷🕺⚠🙅😟😵👎🤲🤠🤧📌🔵💅🧐🐾🍒😗🤑🌊🤯🐷☎💧😯💆👆🎤🙇🍑❄🌴💣🐸💌📍🥀🤢👅💡💩👐📸👻🤐🤮🎼🥵🚩🍎🍊👼💍📣🥂";

pub(crate) fn encode(data: &[u8]) -> String {
  let table: Vec<char> = ALPHABET.chars().collect();
  data.iter().map(|&byte| table[usize::from(byte)]).collect()
}

pub(crate) fn decode(text: &str, name: &'static str) -> Result<Vec<u8>> {
  text
    .chars()
    .map(|character| {
      ALPHABET
        .chars()
        .position(|symbol| symbol == character)
        .map(|byte| byte as u8)
        .ok_or(Error::InvalidBaseCharacter { base: name, character })
    })
    .collect()
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use std::collections::BTreeSet;

  #[test]
  fn table_is_a_bijection() {
    let symbols: BTreeSet<char> = ALPHABET.chars().collect();
    assert_eq!(ALPHABET.chars().count(), 256);
    assert_eq!(symbols.len(), 256);
  }

  #[test]
  fn every_byte() {
    let bytes: Vec<u8> = (0..=255).collect();
    assert_eq!(decode(&encode(&bytes), "base256emoji").unwrap(), bytes);
  }

  #[test]
  fn rejects_foreign_codepoints() {
    assert!(matches!(
      decode("🚀a", "base256emoji"),
      Err(Error::InvalidBaseCharacter { character: 'a', .. })
    ));
    // the variation selector is not part of the table
    assert!(matches!(
      decode("\u{2764}\u{fe0f}", "base256emoji"),
      Err(Error::InvalidBaseCharacter { character: '\u{fe0f}', .. })
    ));
  }
}
