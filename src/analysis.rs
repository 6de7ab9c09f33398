//! Text analysis for the full-text index.
//!
//! Turns arbitrary mixed-script text into the fragments used as inverted
//! index keys:
//!
//! ```text
//! bytes → utf8::decode → Codepoint (char + CharClass) → SlidingWindow → Segmenter → fragments
//! ```
//!
//! # Modules
//!
//! - [`utf8`]: Total UTF-8 decoder that never fails
//! - [`char_class`]: Codepoint classification by Unicode block
//! - [`window`]: Codepoint-granular sliding window over a string
//! - [`segmenter`]: Category-aware n-gram segmentation
//! - [`normalizer`]: Optional lowercasing / NFKC applied before segmentation

pub mod char_class;
pub mod normalizer;
pub mod segmenter;
pub mod utf8;
pub mod window;

// Re-exports
pub use char_class::{CharClass, Codepoint};
pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use segmenter::{NgramSegmenter, Segmenter, SegmenterConfig};
pub use window::SlidingWindow;
