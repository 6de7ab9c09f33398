use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::normalizer::NormalizerConfig;
use crate::analysis::segmenter::SegmenterConfig;
use crate::engine::observer::IndexObserver;
use crate::error::Result;

/// Configuration for building a [`DictionaryIndex`](crate::engine::DictionaryIndex).
///
/// Loadable from JSON; every field is optional there:
///
/// ```json
/// { "segmenter": { "alpha": 3, "kanji": 1, "kana": 2, "other": 1 },
///   "normalizer": { "lowercase": true, "nfkc": false },
///   "stats_path": "/var/tmp/postings.txt" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Window sizes for fragment generation.
    pub segmenter: SegmenterConfig,
    /// Normalization applied to indexed text and to queries alike.
    pub normalizer: NormalizerConfig,
    /// Where to write per-fragment posting sizes after the build, if anywhere.
    pub stats_path: Option<PathBuf>,
    /// Build-progress receiver. Defaults to [`LogObserver`](crate::engine::observer::LogObserver).
    #[serde(skip)]
    pub observer: Option<Arc<dyn IndexObserver>>,
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.segmenter.validate()
    }
}

#[derive(Default)]
pub struct IndexConfigBuilder {
    segmenter: SegmenterConfig,
    normalizer: NormalizerConfig,
    stats_path: Option<PathBuf>,
    observer: Option<Arc<dyn IndexObserver>>,
}

impl IndexConfigBuilder {
    pub fn segmenter(mut self, segmenter: SegmenterConfig) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn stats_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stats_path = Some(path.into());
        self
    }

    pub fn observer(mut self, observer: Arc<dyn IndexObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> IndexConfig {
        IndexConfig {
            segmenter: self.segmenter,
            normalizer: self.normalizer,
            stats_path: self.stats_path,
            observer: self.observer,
        }
    }
}
