//! Full-text index writer.
//!
//! The writer is the building state of the index: it accepts inserts and is
//! turned into a read-only [`FullTextIndex`] by [`build`](FullTextIndexWriter::build).
//! Because `build` consumes the writer, inserting into a built index or
//! querying an unbuilt one does not compile.

use std::borrow::Cow;
use std::hash::Hash;
use std::sync::Arc;

use crate::analysis::segmenter::{NgramSegmenter, Segmenter};
use crate::lexical::index::FullTextIndex;
use crate::lexical::posting::{IndexedText, Posting, PostingMap, remove_duplicate_postings};

/// Inverted index under construction.
pub struct FullTextIndexWriter<'a, P> {
    /// Segmenter shared with the built index, so queries are split exactly
    /// like indexed text.
    segmenter: Arc<dyn Segmenter>,

    /// Every inserted value, in insertion order.
    values: Vec<IndexedText<'a, P>>,

    /// Fragment → postings.
    postings: PostingMap,
}

impl<P> std::fmt::Debug for FullTextIndexWriter<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullTextIndexWriter")
            .field("segmenter", &self.segmenter.name())
            .field("values", &self.values.len())
            .field("fragments", &self.postings.len())
            .finish()
    }
}

impl<P> Default for FullTextIndexWriter<'_, P> {
    fn default() -> Self {
        Self::new(Arc::new(NgramSegmenter::default()))
    }
}

impl<'a, P> FullTextIndexWriter<'a, P> {
    pub fn new(segmenter: Arc<dyn Segmenter>) -> Self {
        FullTextIndexWriter {
            segmenter,
            values: Vec::new(),
            postings: PostingMap::default(),
        }
    }

    /// Index `text` under `payload` with the given `weight`.
    ///
    /// The same text and payload may be inserted any number of times, e.g.
    /// once per field of an entry.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` values are inserted.
    pub fn insert(&mut self, text: impl Into<Cow<'a, str>>, payload: P, weight: i32) {
        assert!(
            self.values.len() < u32::MAX as usize,
            "full-text index holds at most u32::MAX values"
        );
        let text = text.into();
        let posting = Posting::new(self.values.len() as u32);

        let postings = &mut self.postings;
        self.segmenter.segment(&text, &mut |fragment| {
            match postings.get_mut(fragment) {
                // A fragment repeated inside one text gets a single posting.
                Some(list) if list.last() == Some(&posting) => {}
                Some(list) => list.push(posting),
                None => {
                    postings.insert(fragment.into(), vec![posting]);
                }
            }
        });

        self.values.push(IndexedText {
            text,
            payload,
            weight,
        });
    }

    /// Number of inserted values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct fragments seen so far.
    pub fn fragment_count(&self) -> usize {
        self.postings.len()
    }

    /// Total postings across all fragments.
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }
}

impl<'a, P: Eq + Hash> FullTextIndexWriter<'a, P> {
    /// Sort every posting list and drop postings that refer to an identical
    /// `(text, payload, weight)` value. Returns how many were removed;
    /// calling it again right away returns 0.
    pub fn remove_duplicates(&mut self) -> usize {
        remove_duplicate_postings(&self.values, &mut self.postings)
    }

    /// Finish construction.
    pub fn build(mut self) -> FullTextIndex<'a, P> {
        self.remove_duplicates();
        for list in self.postings.values_mut() {
            list.shrink_to_fit();
        }
        self.postings.shrink_to_fit();
        self.values.shrink_to_fit();

        FullTextIndex::from_parts(self.segmenter, self.values, self.postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::segmenter::SegmenterConfig;

    fn writer<'a>() -> FullTextIndexWriter<'a, u32> {
        let segmenter = NgramSegmenter::new(SegmenterConfig::new(3, 1, 2, 1)).unwrap();
        FullTextIndexWriter::new(Arc::new(segmenter))
    }

    #[test]
    fn test_insert_creates_postings() {
        let mut writer = writer();
        writer.insert("water", 1, 20);
        writer.insert("waterfall", 2, 20);

        assert_eq!(writer.len(), 2);
        // wat, ate, ter, erf, rfa, fal, all
        assert_eq!(writer.fragment_count(), 7);
        assert_eq!(writer.posting_count(), 3 + 7);
    }

    #[test]
    fn test_repeated_fragment_in_one_text() {
        let mut writer = writer();
        writer.insert("ままま", 1, 0);
        // "まま" appears twice but is posted once.
        assert_eq!(writer.fragment_count(), 1);
        assert_eq!(writer.posting_count(), 1);
    }

    #[test]
    fn test_remove_duplicates_is_idempotent() {
        let mut writer = writer();
        writer.insert("水", 1, 30);
        writer.insert("水", 1, 30);
        writer.insert("水", 2, 30);
        writer.insert("みず", 1, 20);
        writer.insert("みず", 1, 20);

        assert_eq!(writer.remove_duplicates(), 2);
        assert_eq!(writer.remove_duplicates(), 0);
        assert_eq!(writer.posting_count(), 3);
    }

    #[test]
    fn test_ignorable_only_text() {
        let mut writer = writer();
        writer.insert("1234", 1, 0);
        assert_eq!(writer.len(), 1);
        assert_eq!(writer.fragment_count(), 0);
    }
}
