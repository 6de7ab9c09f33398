//! Text normalization applied to indexed text and queries alike.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfkc_quick};

/// Normalization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Lowercase letters, so "Water" and "water" index identically.
    pub lowercase: bool,
    /// Apply NFKC, folding half-width kana and full-width Latin.
    pub nfkc: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            lowercase: true,
            nfkc: false,
        }
    }
}

/// Normalizes text without allocating when nothing changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        TextNormalizer { config }
    }

    /// A normalizer that leaves text untouched.
    pub fn identity() -> Self {
        TextNormalizer {
            config: NormalizerConfig {
                lowercase: false,
                nfkc: false,
            },
        }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(text);

        if self.config.nfkc && is_nfkc_quick(text.chars()) != IsNormalized::Yes {
            let normalized: String = text.nfkc().collect();
            if normalized != text {
                text = Cow::Owned(normalized);
            }
        }
        if self.config.lowercase && text.chars().any(char::is_uppercase) {
            text = Cow::Owned(text.to_lowercase());
        }

        text
    }
}
