//! Posting-list statistics for operational tuning.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Summary of posting-list sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PostingStats {
    /// Indexed values.
    pub values: usize,
    /// Distinct fragments.
    pub fragments: usize,
    /// Postings across all fragments.
    pub postings: usize,
    pub min_list: usize,
    pub max_list: usize,
}

impl PostingStats {
    pub fn from_lists<I>(values: usize, list_sizes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut stats = PostingStats {
            values,
            ..Default::default()
        };
        for size in list_sizes {
            stats.min_list = if stats.fragments == 0 {
                size
            } else {
                stats.min_list.min(size)
            };
            stats.max_list = stats.max_list.max(size);
            stats.postings += size;
            stats.fragments += 1;
        }
        stats
    }

    /// Mean posting-list length, 0 for an empty index.
    pub fn average_list(&self) -> f64 {
        if self.fragments == 0 {
            0.0
        } else {
            self.postings as f64 / self.fragments as f64
        }
    }
}

/// Write `fragment count` lines, largest lists first, ties by fragment.
pub(crate) fn write_posting_sizes<'a, I>(path: &Path, sizes: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, usize)>,
{
    let mut sizes: Vec<(&str, usize)> = sizes.into_iter().collect();
    sizes.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut writer = BufWriter::new(File::create(path)?);
    for (fragment, size) in sizes {
        writeln!(writer, "{fragment} {size}")?;
    }
    writer.flush()?;
    Ok(())
}
