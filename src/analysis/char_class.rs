//! Codepoint classification.
//!
//! Every Unicode scalar maps to exactly one [`CharClass`]. The mapping is a
//! sorted, non-overlapping table of inclusive ranges searched with a binary
//! search; anything outside the table is [`CharClass::Other`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a codepoint for indexing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// Latin and Cyrillic letters.
    Alpha,
    /// Hiragana and Katakana.
    Kana,
    /// CJK unified ideographs, extensions and compatibility ideographs.
    Kanji,
    /// ASCII digits.
    Numeric,
    /// Control characters and space (≤ U+0020).
    Whitespace,
    /// Printable ASCII punctuation.
    AsciiPunct,
    /// Everything else.
    Other,
}

use CharClass::*;

/// `(first, last, class)`, sorted by `first`, ranges never overlap.
const CLASS_TABLE: &[(u32, u32, CharClass)] = &[
    (0x0000, 0x0020, Whitespace),
    (0x0021, 0x002F, AsciiPunct),
    (0x0030, 0x0039, Numeric),
    (0x003A, 0x0040, AsciiPunct),
    (0x0041, 0x005A, Alpha),
    (0x005B, 0x0060, AsciiPunct),
    (0x0061, 0x007A, Alpha),
    (0x007B, 0x007E, AsciiPunct),
    // Latin-1 Supplement letters, skipping × (U+00D7) and ÷ (U+00F7)
    (0x00C0, 0x00D6, Alpha),
    (0x00D8, 0x00F6, Alpha),
    // rest of Latin-1, Latin Extended-A and -B
    (0x00F8, 0x024F, Alpha),
    // Cyrillic, Cyrillic Supplement
    (0x0400, 0x052F, Alpha),
    // Cyrillic Extended-C
    (0x1C80, 0x1C8F, Alpha),
    // Cyrillic phonetic extensions
    (0x1D2B, 0x1D78, Alpha),
    // Latin Extended Additional
    (0x1E02, 0x1EF3, Alpha),
    // Cyrillic Extended-A
    (0x2DE0, 0x2DFF, Alpha),
    // Hiragana
    (0x3040, 0x309F, Kana),
    // Katakana
    (0x30A0, 0x30FF, Kana),
    // CJK Extension A
    (0x3400, 0x4DBF, Kanji),
    // CJK Unified Ideographs
    (0x4E00, 0x9FFF, Kanji),
    // Cyrillic Extended-B
    (0xA640, 0xA69F, Alpha),
    // CJK Compatibility Ideographs
    (0xF900, 0xFAFF, Kanji),
    // Cyrillic combining half marks
    (0xFE2E, 0xFE2F, Alpha),
    // CJK Extensions B through G
    (0x2_0000, 0x2_A6DF, Kanji),
    (0x2_A700, 0x2_B73F, Kanji),
    (0x2_B740, 0x2_B81F, Kanji),
    (0x2_B820, 0x2_CEAF, Kanji),
    (0x2_CEB0, 0x2_EBEF, Kanji),
    (0x3_0000, 0x3_134F, Kanji),
];

impl CharClass {
    /// Classify a codepoint.
    pub fn of(ch: char) -> CharClass {
        let cp = ch as u32;
        CLASS_TABLE
            .binary_search_by(|&(first, last, _)| {
                if last < cp {
                    Ordering::Less
                } else if first > cp {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .map(|idx| CLASS_TABLE[idx].2)
            .unwrap_or(Other)
    }

    /// Digits, whitespace and ASCII punctuation never produce fragments.
    #[inline]
    pub fn is_ignorable(self) -> bool {
        matches!(self, Numeric | Whitespace | AsciiPunct)
    }

    pub fn name(self) -> &'static str {
        match self {
            Alpha => "alpha",
            Kana => "kana",
            Kanji => "kanji",
            Numeric => "numeric",
            Whitespace => "whitespace",
            AsciiPunct => "ascii_punct",
            Other => "other",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A codepoint together with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codepoint {
    pub ch: char,
    pub class: CharClass,
}

impl Codepoint {
    pub fn new(ch: char) -> Self {
        Codepoint {
            ch,
            class: CharClass::of(ch),
        }
    }

    #[inline]
    pub fn is_ignorable(&self) -> bool {
        self.class.is_ignorable()
    }
}

impl From<char> for Codepoint {
    fn from(ch: char) -> Self {
        Codepoint::new(ch)
    }
}
