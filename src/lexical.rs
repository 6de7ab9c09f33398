//! Inverted index over text fragments.
//!
//! # Module Structure
//!
//! - `writer`: Building state, accepts inserts
//! - `index`: Built state, read-only queries
//! - `posting`: Postings and indexed values
//! - `stats`: Posting-list statistics and export

pub mod index;
pub mod posting;
pub mod stats;
pub mod writer;

// Re-exports
pub use index::FullTextIndex;
pub use posting::{IndexedText, Posting};
pub use stats::PostingStats;
pub use writer::FullTextIndexWriter;
