//! Read-only full-text index.

use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

use crate::analysis::segmenter::Segmenter;
use crate::error::Result;
use crate::lexical::posting::{IndexedText, Posting, PostingMap, remove_duplicate_postings};
use crate::lexical::stats::{self, PostingStats};

/// A built inverted index over fragments.
///
/// Immutable once built; queries take `&self` and need no synchronization,
/// so the index can be shared between threads whenever `P` can.
pub struct FullTextIndex<'a, P> {
    segmenter: Arc<dyn Segmenter>,
    values: Vec<IndexedText<'a, P>>,
    postings: PostingMap,
}

impl<P> std::fmt::Debug for FullTextIndex<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullTextIndex")
            .field("segmenter", &self.segmenter.name())
            .field("values", &self.values.len())
            .field("fragments", &self.postings.len())
            .finish()
    }
}

impl<'a, P> FullTextIndex<'a, P> {
    pub(crate) fn from_parts(
        segmenter: Arc<dyn Segmenter>,
        values: Vec<IndexedText<'a, P>>,
        postings: PostingMap,
    ) -> Self {
        FullTextIndex {
            segmenter,
            values,
            postings,
        }
    }

    /// Find every indexed text that contains `query` as a literal substring
    /// and call `emit(text, payload, weight)` for it.
    ///
    /// Only the posting list of the rarest query fragment is scanned; each
    /// candidate is then verified against the full query. An empty query, or
    /// one none of whose fragments is indexed, emits nothing.
    pub fn find<F>(&self, query: &str, mut emit: F)
    where
        F: FnMut(&str, &P, i32),
    {
        let Some(candidates) = self.smallest_posting_list(query) else {
            return;
        };

        for posting in candidates {
            let value = &self.values[posting.value_index()];
            if value.text.contains(query) {
                emit(&value.text, &value.payload, value.weight);
            }
        }
    }

    /// The shortest posting list among the fragments of `query`.
    pub fn smallest_posting_list(&self, query: &str) -> Option<&[Posting]> {
        let mut smallest: Option<&[Posting]> = None;
        self.segmenter.segment(query, &mut |fragment| {
            if let Some(list) = self.postings.get(fragment) {
                if smallest.is_none_or(|current| list.len() < current.len()) {
                    smallest = Some(list.as_slice());
                }
            }
        });
        smallest
    }

    /// Postings stored under one fragment.
    pub fn posting_list(&self, fragment: &str) -> Option<&[Posting]> {
        self.postings.get(fragment).map(Vec::as_slice)
    }

    /// The value a posting refers to.
    pub fn value(&self, posting: Posting) -> Option<&IndexedText<'a, P>> {
        self.values.get(posting.value_index())
    }

    pub fn segmenter(&self) -> &Arc<dyn Segmenter> {
        &self.segmenter
    }

    /// Number of indexed values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fragment_count(&self) -> usize {
        self.postings.len()
    }

    /// Posting-list size statistics.
    pub fn stats(&self) -> PostingStats {
        PostingStats::from_lists(self.values.len(), self.postings.values().map(Vec::len))
    }

    /// Write one `fragment count` line per fragment, largest lists first.
    pub fn write_posting_sizes<Q: AsRef<Path>>(&self, path: Q) -> Result<()> {
        stats::write_posting_sizes(
            path.as_ref(),
            self.postings
                .iter()
                .map(|(fragment, list)| (&**fragment, list.len())),
        )
    }
}

impl<P: Eq + Hash> FullTextIndex<'_, P> {
    /// Same as [`FullTextIndexWriter::remove_duplicates`]; returns 0 on a
    /// freshly built index.
    ///
    /// [`FullTextIndexWriter::remove_duplicates`]: crate::lexical::writer::FullTextIndexWriter::remove_duplicates
    pub fn remove_duplicates(&mut self) -> usize {
        remove_duplicate_postings(&self.values, &mut self.postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::segmenter::{NgramSegmenter, SegmenterConfig};
    use crate::lexical::writer::FullTextIndexWriter;

    fn build<'a>(texts: &[(&'a str, u32, i32)]) -> FullTextIndex<'a, u32> {
        let segmenter = NgramSegmenter::new(SegmenterConfig::new(3, 1, 2, 1)).unwrap();
        let mut writer = FullTextIndexWriter::new(Arc::new(segmenter));
        for &(text, payload, weight) in texts {
            writer.insert(text, payload, weight);
        }
        writer.build()
    }

    fn find(index: &FullTextIndex<'_, u32>, query: &str) -> Vec<(String, u32, i32)> {
        let mut hits = Vec::new();
        index.find(query, |text, payload, weight| {
            hits.push((text.to_string(), *payload, weight))
        });
        hits.sort();
        hits
    }

    const TEXTS: &[(&str, u32, i32)] = &[
        ("water", 1, 20),
        ("waterfall", 2, 20),
        ("hot water", 3, 1),
        ("水", 4, 30),
        ("水道", 5, 30),
        ("みず", 4, 20),
        ("to drink", 6, 1),
    ];

    #[test]
    fn test_self_lookup() {
        let index = build(TEXTS);
        for &(text, payload, _) in TEXTS {
            let hits = find(&index, text);
            assert!(
                hits.iter().any(|(_, p, _)| *p == payload),
                "{text} did not find its own payload"
            );
        }
    }

    #[test]
    fn test_substring_verification() {
        let index = build(TEXTS);
        let hits = find(&index, "water");
        let mut payloads: Vec<u32> = hits.iter().map(|(_, p, _)| *p).collect();
        payloads.sort();
        assert_eq!(payloads, vec![1, 2, 3]);

        // "erf" is indexed (from "waterfall") but the literal text is not.
        assert!(find(&index, "waterfell").is_empty());
    }

    #[test]
    fn test_emits_weights_and_text() {
        let index = build(TEXTS);
        assert_eq!(
            find(&index, "水道"),
            vec![("水道".to_string(), 5, 30)]
        );
    }

    #[test]
    fn test_empty_and_unknown_queries() {
        let index = build(TEXTS);
        assert!(find(&index, "").is_empty());
        assert!(find(&index, "123 ...").is_empty());
        assert!(find(&index, "xyz").is_empty());
        assert!(index.smallest_posting_list("xyz").is_none());
    }

    #[test]
    fn test_smallest_posting_list() {
        let index = build(TEXTS);
        // "wat"/"ate"/"ter" are shared by three values, "fal" by one.
        assert_eq!(index.posting_list("wat").map(<[_]>::len), Some(3));
        let smallest = index.smallest_posting_list("waterfall").unwrap();
        assert_eq!(smallest.len(), 1);
        let value = index.value(smallest[0]).unwrap();
        assert_eq!(value.payload, 2);
    }

    #[test]
    fn test_remove_duplicates_after_build() {
        let mut index = build(&[("水", 1, 30), ("水", 1, 30), ("水", 1, 30)]);
        assert_eq!(index.posting_list("水").map(<[_]>::len), Some(1));
        assert_eq!(index.remove_duplicates(), 0);
        assert_eq!(index.remove_duplicates(), 0);
        assert_eq!(find(&index, "水").len(), 1);
    }

    #[test]
    fn test_stats() {
        let index = build(TEXTS);
        let stats = index.stats();
        assert_eq!(stats.values, TEXTS.len());
        assert_eq!(stats.fragments, index.fragment_count());
        assert_eq!(stats.max_list, 3);
        assert_eq!(stats.min_list, 1);
    }

    #[test]
    fn test_shared_between_threads() {
        let index = build(TEXTS);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(find(&index, "water").len(), 3);
                });
            }
        });
    }
}
