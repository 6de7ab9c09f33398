//! Category-aware n-gram segmentation.
//!
//! A [`Segmenter`] turns text into the ordered sequence of fragments used as
//! inverted-index keys. [`NgramSegmenter`] skips digits, whitespace and ASCII
//! punctuation and emits sliding n-grams over each run of letters, kanji,
//! kana or other codepoints, each class with its own window size.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::analysis::char_class::{CharClass, Codepoint};
use crate::analysis::window::SlidingWindow;
use crate::error::{JdictError, Result};

/// Produces index fragments from text.
///
/// Fragments are borrowed from the input and must be emitted in a
/// deterministic order.
pub trait Segmenter: Send + Sync + Debug {
    /// Call `emit` for each fragment of `text`, in order.
    fn segment<'a>(&self, text: &'a str, emit: &mut dyn FnMut(&'a str));

    /// Collect the fragments of `text`.
    fn fragments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut fragments = Vec::new();
        self.segment(text, &mut |fragment| fragments.push(fragment));
        fragments
    }

    /// Name of this segmenter, for diagnostics.
    fn name(&self) -> &'static str;
}

/// Window sizes, in codepoints, per character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Latin / Cyrillic letters.
    pub alpha: usize,
    /// CJK ideographs.
    pub kanji: usize,
    /// Hiragana / Katakana.
    pub kana: usize,
    /// Any other non-ignorable codepoint.
    pub other: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig {
            alpha: 3,
            kanji: 1,
            kana: 2,
            other: 1,
        }
    }
}

impl SegmenterConfig {
    pub fn new(alpha: usize, kanji: usize, kana: usize, other: usize) -> Self {
        SegmenterConfig {
            alpha,
            kanji,
            kana,
            other,
        }
    }

    /// A zero-sized window would stall segmentation on that class.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("alpha", self.alpha),
            ("kanji", self.kanji),
            ("kana", self.kana),
            ("other", self.other),
        ];
        for (name, size) in sizes {
            if size == 0 {
                return Err(JdictError::invalid_config(format!(
                    "{name} window size must be at least 1"
                )));
            }
        }
        Ok(())
    }
}

/// Sliding n-gram segmenter.
#[derive(Debug, Clone)]
pub struct NgramSegmenter {
    config: SegmenterConfig,
}

impl NgramSegmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        Ok(NgramSegmenter { config })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }
}

impl Default for NgramSegmenter {
    fn default() -> Self {
        NgramSegmenter {
            config: SegmenterConfig::default(),
        }
    }
}

fn is_other(c: Codepoint) -> bool {
    !c.is_ignorable() && !matches!(c.class, CharClass::Alpha | CharClass::Kanji | CharClass::Kana)
}

impl Segmenter for NgramSegmenter {
    fn segment<'a>(&self, text: &'a str, emit: &mut dyn FnMut(&'a str)) {
        let config = &self.config;
        let mut window = SlidingWindow::new(text);

        // Ignorable + the four classes partition every codepoint, so each
        // round either consumes a run or finds the input exhausted.
        loop {
            window.skip(|c| c.is_ignorable());

            let progressed = window.slide(config.alpha, &mut *emit, |c| c.class == CharClass::Alpha)
                || window.slide(config.kanji, &mut *emit, |c| c.class == CharClass::Kanji)
                || window.slide(config.kana, &mut *emit, |c| c.class == CharClass::Kana)
                || window.slide(config.other, &mut *emit, is_other);
            if !progressed {
                break;
            }
        }
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter(alpha: usize, kanji: usize, kana: usize) -> NgramSegmenter {
        NgramSegmenter::new(SegmenterConfig::new(alpha, kanji, kana, 1)).unwrap()
    }

    #[test]
    fn test_mixed_script() {
        let segmenter = segmenter(2, 1, 2);
        let text = "abcd 4242.ひらがな漢字";
        let expected = vec!["ab", "bc", "cd", "ひら", "らが", "がな", "漢", "字"];

        assert_eq!(segmenter.fragments(text), expected);
        // Deterministic across runs.
        for _ in 0..3 {
            assert_eq!(segmenter.fragments(text), expected);
        }
    }

    #[test]
    fn test_default_windows() {
        let segmenter = NgramSegmenter::default();
        assert_eq!(segmenter.fragments("water"), vec!["wat", "ate", "ter"]);
        assert_eq!(segmenter.fragments("食べる"), vec!["食", "べる"]);
    }

    #[test]
    fn test_run_shorter_than_window() {
        let segmenter = segmenter(5, 3, 4);
        assert_eq!(segmenter.fragments("to 見る"), vec!["to", "見", "る"]);
    }

    #[test]
    fn test_empty_and_ignorable_only() {
        let segmenter = NgramSegmenter::default();
        assert!(segmenter.fragments("").is_empty());
        assert!(segmenter.fragments("  12.34, (56)!").is_empty());
    }

    #[test]
    fn test_other_class() {
        let segmenter = NgramSegmenter::default();
        // Ideographic punctuation is neither ignorable nor kana/kanji.
        assert_eq!(segmenter.fragments("、。"), vec!["、", "。"]);
        assert_eq!(segmenter.fragments("ab〜cd"), vec!["ab", "〜", "cd"]);
    }

    #[test]
    fn test_cyrillic_and_accents() {
        let segmenter = segmenter(3, 1, 2);
        assert_eq!(segmenter.fragments("вода"), vec!["вод", "ода"]);
        assert_eq!(segmenter.fragments("café"), vec!["caf", "afé"]);
    }

    #[test]
    fn test_katakana_with_long_vowel() {
        let segmenter = NgramSegmenter::default();
        assert_eq!(
            segmenter.fragments("コーヒー"),
            vec!["コー", "ーヒ", "ヒー"]
        );
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = NgramSegmenter::new(SegmenterConfig::new(3, 0, 2, 1)).unwrap_err();
        assert!(matches!(err, JdictError::InvalidConfig(_)));
    }

    #[test]
    fn test_trait_object() {
        let segmenter: Box<dyn Segmenter> = Box::new(NgramSegmenter::default());
        assert_eq!(segmenter.name(), "ngram");
        assert_eq!(segmenter.fragments("漢字"), vec!["漢", "字"]);
    }
}
