//! Kanji character dictionary and its code lookup.
//!
//! [`KanjiIndex`] finds a character by its literal or by any of its
//! character-set codes (JIS X 0208, JIS X 0212, JIS X 0213 kuten codes and
//! the Unicode hex value), e.g. `水`, `1-31-69` or `6c34`.

use std::fmt;
use std::io::Read;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{JdictError, Result};

/// Position of a character inside [`KanjiDictionary::characters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharId(pub u32);

impl CharId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CharId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Codes of a character in the standard character sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodePoints {
    pub jis208: Option<String>,
    pub jis212: Option<String>,
    pub jis213: Option<String>,
    /// Unicode scalar value in hex, as written by the loader (`6c34`).
    pub ucs: Option<String>,
}

impl CodePoints {
    /// Every non-empty code, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [&self.jis208, &self.jis212, &self.jis213, &self.ucs]
            .into_iter()
            .filter_map(|code| code.as_deref())
            .filter(|code| !code.is_empty())
    }
}

/// One kanji record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub literal: String,
    #[serde(default)]
    pub codepoint: CodePoints,
    /// School grade; 1 to 6 are the Kyouiku kanji.
    #[serde(default)]
    pub grade: Option<u8>,
    /// The first count is the accepted one, later ones are common miscounts.
    #[serde(default)]
    pub stroke_count: Vec<u8>,
    /// Newspaper frequency rank, 1 to 2500.
    #[serde(default)]
    pub frequency: Option<u32>,
    #[serde(default)]
    pub jlpt: Option<u8>,
    #[serde(default)]
    pub meanings: Vec<String>,
}

impl Character {
    pub fn new(literal: impl Into<String>) -> Self {
        Character {
            literal: literal.into(),
            ..Default::default()
        }
    }

    pub fn with_codepoint(mut self, codepoint: CodePoints) -> Self {
        self.codepoint = codepoint;
        self
    }

    pub fn add_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meanings.push(meaning.into());
        self
    }
}

/// A fully parsed kanji dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiDictionary {
    pub characters: Vec<Character>,
}

impl KanjiDictionary {
    pub fn new(characters: Vec<Character>) -> Self {
        KanjiDictionary { characters }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, id: CharId) -> Option<&Character> {
        self.characters.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CharId, &Character)> {
        self.characters
            .iter()
            .enumerate()
            .map(|(idx, character)| (CharId(idx as u32), character))
    }
}

/// Exact-key lookup from literal or code to characters.
///
/// Keys are matched verbatim; one key may resolve to several characters.
pub struct KanjiIndex<'a> {
    dictionary: &'a KanjiDictionary,
    keys: AHashMap<&'a str, Vec<CharId>>,
}

impl std::fmt::Debug for KanjiIndex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanjiIndex")
            .field("characters", &self.dictionary.len())
            .field("keys", &self.keys.len())
            .finish()
    }
}

impl<'a> KanjiIndex<'a> {
    pub fn build(dictionary: &'a KanjiDictionary) -> Result<Self> {
        if dictionary.len() > u32::MAX as usize {
            return Err(JdictError::index(format!(
                "kanji dictionary has {} characters, at most {} are supported",
                dictionary.len(),
                u32::MAX
            )));
        }

        let mut keys: AHashMap<&'a str, Vec<CharId>> = AHashMap::with_capacity(dictionary.len() * 3);
        for (id, character) in dictionary.iter() {
            let literal = Some(character.literal.as_str()).filter(|l| !l.is_empty());
            for key in literal.into_iter().chain(character.codepoint.iter()) {
                let ids = keys.entry(key).or_default();
                // A character listing the same key twice is stored once.
                if ids.last() != Some(&id) {
                    ids.push(id);
                }
            }
        }

        log::debug!(
            "kanji index built: {} characters, {} keys",
            dictionary.len(),
            keys.len()
        );
        Ok(KanjiIndex { dictionary, keys })
    }

    /// Characters whose literal or code equals `term`, in dictionary order.
    pub fn search(&self, term: &str) -> &[CharId] {
        self.keys
            .get(term.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first character matching `term`.
    pub fn find(&self, term: &str) -> Option<&'a Character> {
        self.search(term)
            .first()
            .and_then(|&id| self.dictionary.get(id))
    }

    pub fn character(&self, id: CharId) -> Option<&'a Character> {
        self.dictionary.get(id)
    }

    /// Number of distinct lookup keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(jis208: &str, ucs: &str) -> CodePoints {
        CodePoints {
            jis208: Some(jis208.into()),
            ucs: Some(ucs.into()),
            ..Default::default()
        }
    }

    fn dictionary() -> KanjiDictionary {
        KanjiDictionary::new(vec![
            Character::new("水")
                .with_codepoint(codes("1-31-69", "6c34"))
                .add_meaning("water"),
            Character::new("亜").with_codepoint(CodePoints {
                jis208: Some("1-16-01".into()),
                jis213: Some("1-16-01".into()),
                ucs: Some("4e9c".into()),
                ..Default::default()
            }),
            Character::new("丂").with_codepoint(CodePoints {
                jis212: Some("1-16-02".into()),
                jis208: Some(String::new()),
                ucs: Some("5402".into()),
                ..Default::default()
            }),
        ])
    }

    #[test]
    fn test_lookup_by_literal_and_codes() {
        let dictionary = dictionary();
        let index = KanjiIndex::build(&dictionary).unwrap();

        for term in ["水", "1-31-69", "6c34", " 6c34 "] {
            assert_eq!(index.search(term), &[CharId(0)], "term {term:?}");
        }
        assert_eq!(index.find("1-16-02").map(|c| c.literal.as_str()), Some("丂"));
        assert_eq!(index.find("水").unwrap().meanings, vec!["water"]);
    }

    #[test]
    fn test_unknown_and_empty_terms() {
        let dictionary = dictionary();
        let index = KanjiIndex::build(&dictionary).unwrap();

        assert!(index.search("火").is_empty());
        assert!(index.search("").is_empty());
        assert!(index.search("6C34").is_empty());
        assert_eq!(index.find("1-99-99"), None);
    }

    #[test]
    fn test_repeated_code_stored_once() {
        let dictionary = dictionary();
        let index = KanjiIndex::build(&dictionary).unwrap();

        // 亜 has the same JIS X 0208 and 0213 code.
        assert_eq!(index.search("1-16-01"), &[CharId(1)]);
        // 水, 1-31-69, 6c34, 亜, 1-16-01, 4e9c, 丂, 1-16-02, 5402
        assert_eq!(index.key_count(), 9);
    }

    #[test]
    fn test_shared_key_returns_every_character() {
        let dictionary = KanjiDictionary::new(vec![
            Character::new("辺").with_codepoint(codes("1-42-53", "8fba")),
            Character::new("邊").with_codepoint(CodePoints {
                jis212: Some("1-42-53".into()),
                ..Default::default()
            }),
        ]);
        let index = KanjiIndex::build(&dictionary).unwrap();

        assert_eq!(index.search("1-42-53"), &[CharId(0), CharId(1)]);
        assert_eq!(index.find("1-42-53").map(|c| c.literal.as_str()), Some("辺"));
        assert_eq!(index.character(CharId(1)).map(|c| c.literal.as_str()), Some("邊"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "characters": [
                {
                    "literal": "水",
                    "codepoint": { "jis208": "1-31-69", "ucs": "6c34" },
                    "grade": 1,
                    "stroke_count": [4],
                    "frequency": 223,
                    "jlpt": 4,
                    "meanings": ["water"]
                },
                { "literal": "丂" }
            ]
        }"#;
        let dictionary = KanjiDictionary::from_json_str(json).unwrap();
        assert_eq!(dictionary.len(), 2);

        let water = dictionary.get(CharId(0)).unwrap();
        assert_eq!(water.grade, Some(1));
        assert_eq!(water.stroke_count, vec![4]);
        assert_eq!(water.codepoint.iter().collect::<Vec<_>>(), vec!["1-31-69", "6c34"]);

        let bare = dictionary.get(CharId(1)).unwrap();
        assert_eq!(bare.codepoint, CodePoints::default());
        assert_eq!(bare.frequency, None);
    }
}
