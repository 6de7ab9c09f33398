//! # jdict
//!
//! Full-text indexing and ranking core for a Japanese–English dictionary.
//!
//! ## Features
//!
//! - Mixed-script n-gram segmentation (Latin, kana, kanji, other scripts)
//! - Inverted index with substring-verified lookups
//! - Multi-factor relevance ranking of dictionary entries
//! - Lock-free concurrent searching of a built index
//! - Kanji lookup by literal or JIS/Unicode code
//!
//! ```
//! use jdict::{Dictionary, Entry, IndexConfig, build_index};
//!
//! let dictionary = Dictionary::new(vec![
//!     Entry::new("1562350")
//!         .add_kanji("水", &[])
//!         .add_reading("みず", Some("mizu"), &[])
//!         .add_sense(["water"]),
//! ]);
//! let index = build_index(&dictionary, IndexConfig::default())?;
//! let hits = index.search("mizu");
//! assert_eq!(hits.len(), 1);
//! # Ok::<(), jdict::JdictError>(())
//! ```

// Core modules
pub mod analysis;
pub mod dictionary;
pub mod engine;
mod error;
pub mod kanji;
pub mod lexical;

// Re-exports for the public API
pub use analysis::segmenter::{NgramSegmenter, Segmenter, SegmenterConfig};
pub use analysis::normalizer::NormalizerConfig;
pub use dictionary::{Dictionary, Entry, EntryId, Gloss, Kanji, Priority, Reading, Sense};
pub use engine::config::{IndexConfig, IndexConfigBuilder};
pub use engine::observer::{BuildPhase, IndexObserver, LogObserver, NoopObserver};
pub use engine::rating::Rating;
pub use engine::search::{SearchHit, SearchRequest, SearchRequestBuilder, SearchResults};
pub use engine::{DictionaryIndex, build_index};
pub use error::{JdictError, Result};
pub use kanji::{CharId, Character, CodePoints, KanjiDictionary, KanjiIndex};
pub use lexical::{FullTextIndex, FullTextIndexWriter, PostingStats};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
