//! Build-progress reporting.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use crate::error::JdictError;
use crate::lexical::PostingStats;

/// A step of [`DictionaryIndex::build`](crate::engine::DictionaryIndex::build).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildPhase {
    /// Segmenting and inserting every entry field.
    Insert,
    RemoveDuplicates,
    /// Sealing the writer into the read-only index.
    Build,
    WriteStats,
}

impl BuildPhase {
    pub fn name(self) -> &'static str {
        match self {
            BuildPhase::Insert => "insert",
            BuildPhase::RemoveDuplicates => "remove_duplicates",
            BuildPhase::Build => "build",
            BuildPhase::WriteStats => "write_stats",
        }
    }
}

/// Receives progress notifications while an index is built.
///
/// Every method has an empty default, so implementors only override what
/// they care about.
pub trait IndexObserver: Send + Sync + Debug {
    fn phase_finished(&self, _phase: BuildPhase, _elapsed: Duration) {}

    fn duplicates_removed(&self, _removed: usize) {}

    fn index_built(&self, _stats: &PostingStats) {}

    /// Stats export is best-effort: a failure is reported here and the build
    /// still succeeds.
    fn stats_export_failed(&self, _path: &Path, _error: &JdictError) {}
}

/// Observer that forwards everything to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl IndexObserver for LogObserver {
    fn phase_finished(&self, phase: BuildPhase, elapsed: Duration) {
        log::info!("index {} took {:.3}s", phase.name(), elapsed.as_secs_f64());
    }

    fn duplicates_removed(&self, removed: usize) {
        log::debug!("removed {removed} duplicate postings");
    }

    fn index_built(&self, stats: &PostingStats) {
        log::info!(
            "index built: {} values, {} fragments, {} postings (list sizes {}..={}, avg {:.2})",
            stats.values,
            stats.fragments,
            stats.postings,
            stats.min_list,
            stats.max_list,
            stats.average_list()
        );
    }

    fn stats_export_failed(&self, path: &Path, error: &JdictError) {
        log::warn!("failed to write posting stats to {}: {error}", path.display());
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IndexObserver for NoopObserver {}
