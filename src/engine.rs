//! Dictionary search engine.
//!
//! [`DictionaryIndex`] indexes every kanji, reading and gloss of a
//! [`Dictionary`] in one full-text index and answers queries with entries
//! ranked by the heuristics in [`rating`].

pub mod config;
pub mod observer;
pub mod rating;
pub mod search;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use ahash::AHashMap;

use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::segmenter::NgramSegmenter;
use crate::dictionary::{Dictionary, Entry, EntryId};
use crate::error::{JdictError, Result};
use crate::lexical::{FullTextIndex, FullTextIndexWriter, PostingStats};

use self::config::IndexConfig;
use self::observer::{BuildPhase, IndexObserver, LogObserver};
use self::rating::{Rating, SEQUENCE_NUMBER, rate_hit, weighted_fields};
use self::search::{SearchHit, SearchRequest, SearchResults};

/// Build a [`DictionaryIndex`] over `dictionary`.
pub fn build_index(dictionary: &Dictionary, config: IndexConfig) -> Result<DictionaryIndex<'_>> {
    DictionaryIndex::build(dictionary, config)
}

/// Read-only search index over a borrowed [`Dictionary`].
///
/// Searching takes `&self`, so one index can serve any number of threads.
pub struct DictionaryIndex<'a> {
    dictionary: &'a Dictionary,
    normalizer: TextNormalizer,
    general: FullTextIndex<'a, EntryId>,
    by_sequence: AHashMap<&'a str, EntryId>,
    observer: Arc<dyn IndexObserver>,
}

impl std::fmt::Debug for DictionaryIndex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryIndex")
            .field("entries", &self.dictionary.len())
            .field("normalizer", &self.normalizer)
            .field("general", &self.general)
            .field("sequence_numbers", &self.by_sequence.len())
            .finish()
    }
}

impl<'a> DictionaryIndex<'a> {
    /// Index every entry of `dictionary`.
    ///
    /// Fails on an invalid configuration, on a dictionary with more entries
    /// than an [`EntryId`] can address, and on a repeated sequence number.
    /// A failing stats export is reported to the observer but does not fail
    /// the build.
    pub fn build(dictionary: &'a Dictionary, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        if dictionary.len() > u32::MAX as usize {
            return Err(JdictError::index(format!(
                "dictionary has {} entries, at most {} are supported",
                dictionary.len(),
                u32::MAX
            )));
        }

        let observer: Arc<dyn IndexObserver> = config
            .observer
            .clone()
            .unwrap_or_else(|| Arc::new(LogObserver));
        let segmenter = Arc::new(NgramSegmenter::new(config.segmenter)?);
        let normalizer = TextNormalizer::new(config.normalizer);

        let started = Instant::now();
        let mut writer = FullTextIndexWriter::new(segmenter);
        let mut by_sequence = AHashMap::with_capacity(dictionary.len());
        for (id, entry) in dictionary.iter() {
            if !entry.sequence.is_empty()
                && by_sequence.insert(entry.sequence.as_str(), id).is_some()
            {
                return Err(JdictError::index(format!(
                    "duplicate sequence number {}",
                    entry.sequence
                )));
            }
            for field in weighted_fields(entry) {
                writer.insert(normalizer.normalize(field.text), id, field.weight);
            }
        }
        observer.phase_finished(BuildPhase::Insert, started.elapsed());

        let started = Instant::now();
        let removed = writer.remove_duplicates();
        observer.duplicates_removed(removed);
        observer.phase_finished(BuildPhase::RemoveDuplicates, started.elapsed());

        let started = Instant::now();
        let general = writer.build();
        observer.phase_finished(BuildPhase::Build, started.elapsed());
        observer.index_built(&general.stats());

        let index = DictionaryIndex {
            dictionary,
            normalizer,
            general,
            by_sequence,
            observer,
        };

        if let Some(path) = &config.stats_path {
            let started = Instant::now();
            if let Err(err) = index.write_posting_stats(path) {
                index.observer.stats_export_failed(path, &err);
            }
            index
                .observer
                .phase_finished(BuildPhase::WriteStats, started.elapsed());
        }

        Ok(index)
    }

    /// All entries matching `query`, best first.
    ///
    /// An entry whose sequence number equals the query is rated
    /// [`SEQUENCE_NUMBER`]; full-text hits keep the best rating of any of
    /// the entry's fields. Equal ratings are ordered by ascending entry id.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        let mut ratings: AHashMap<EntryId, Rating> = AHashMap::new();

        if let Some(id) = self.find_by_sequence_number(query) {
            ratings.insert(id, SEQUENCE_NUMBER);
        }

        let normalized = self.normalizer.normalize(query);
        self.general.find(&normalized, |text, &id, weight| {
            let rating = rate_hit(&normalized, text, weight);
            ratings
                .entry(id)
                .and_modify(|best| *best = (*best).max(rating))
                .or_insert(rating);
        });

        let mut hits: Vec<SearchHit> = ratings
            .into_iter()
            .map(|(entry, rating)| SearchHit { entry, rating })
            .collect();
        hits.sort_unstable_by(|a, b| b.rating.cmp(&a.rating).then(a.entry.cmp(&b.entry)));

        log::debug!("query {query:?} matched {} entries", hits.len());
        hits
    }

    /// One page of [`search`](Self::search) results plus the total count.
    pub fn search_with(&self, request: &SearchRequest) -> SearchResults {
        SearchResults::paginate(self.search(&request.query), request)
    }

    /// The entry with the given sequence number.
    pub fn find_by_sequence_number(&self, sequence: &str) -> Option<EntryId> {
        self.by_sequence.get(sequence.trim()).copied()
    }

    pub fn entry(&self, id: EntryId) -> Option<&'a Entry> {
        self.dictionary.get(id)
    }

    /// Resolve hits to their entries.
    pub fn entries(&self, hits: &[SearchHit]) -> impl Iterator<Item = (&'a Entry, Rating)> {
        let dictionary = self.dictionary;
        hits.iter()
            .filter_map(move |hit| dictionary.get(hit.entry).map(|entry| (entry, hit.rating)))
    }

    pub fn dictionary(&self) -> &'a Dictionary {
        self.dictionary
    }

    /// The underlying full-text index.
    pub fn full_text(&self) -> &FullTextIndex<'a, EntryId> {
        &self.general
    }

    /// Drop postings that refer to identical indexed values. `build` already
    /// does this, so on a built index the result is 0.
    pub fn remove_duplicate_postings(&mut self) -> usize {
        let removed = self.general.remove_duplicates();
        self.observer.duplicates_removed(removed);
        removed
    }

    pub fn stats(&self) -> PostingStats {
        self.general.stats()
    }

    /// Write one `fragment count` line per fragment, largest lists first.
    pub fn write_posting_stats<Q: AsRef<Path>>(&self, path: Q) -> Result<()> {
        self.general.write_posting_sizes(path)
    }
}
