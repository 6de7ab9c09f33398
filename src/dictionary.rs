//! Dictionary data model consumed by the index.
//!
//! The dictionary is produced by a loader (the JMdict XML reader lives outside
//! this crate) and owns all entry text. A built index borrows from it, so the
//! dictionary must outlive every index built over it.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{JdictError, Result};

/// Position of an entry inside [`Dictionary::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u32);

impl EntryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Frequency-list markers attached to kanji and reading elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Priority {
    News1,
    News2,
    Ichi1,
    Ichi2,
    Spec1,
    Spec2,
    Gai1,
    Gai2,
    /// Frequency band `nfXX`, one band per 500 words.
    Nf(u32),
}

impl FromStr for Priority {
    type Err = JdictError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "news1" => Ok(Priority::News1),
            "news2" => Ok(Priority::News2),
            "ichi1" => Ok(Priority::Ichi1),
            "ichi2" => Ok(Priority::Ichi2),
            "spec1" => Ok(Priority::Spec1),
            "spec2" => Ok(Priority::Spec2),
            "gai1" => Ok(Priority::Gai1),
            "gai2" => Ok(Priority::Gai2),
            other => other
                .strip_prefix("nf")
                .and_then(|n| n.parse().ok())
                .map(Priority::Nf)
                .ok_or_else(|| JdictError::invalid_argument(format!("unknown priority: {other}"))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::News1 => f.write_str("news1"),
            Priority::News2 => f.write_str("news2"),
            Priority::Ichi1 => f.write_str("ichi1"),
            Priority::Ichi2 => f.write_str("ichi2"),
            Priority::Spec1 => f.write_str("spec1"),
            Priority::Spec2 => f.write_str("spec2"),
            Priority::Gai1 => f.write_str("gai1"),
            Priority::Gai2 => f.write_str("gai2"),
            Priority::Nf(n) => write!(f, "nf{n:02}"),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = JdictError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.to_string()
    }
}

/// Kanji writing of an entry (`k_ele`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kanji {
    pub value: String,
    #[serde(default)]
    pub priorities: Vec<Priority>,
}

/// Kana reading of an entry (`r_ele`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub value: String,
    /// Romanized reading, filled in by the loader when available.
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub priorities: Vec<Priority>,
}

/// Translation of one meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gloss {
    pub content: String,
    /// Marked as a head-word for reverse (target language → Japanese) lookup.
    #[serde(default)]
    pub highlight: bool,
}

/// One meaning of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub glosses: Vec<Gloss>,
}

/// A dictionary record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique sequence number (`ent_seq`).
    pub sequence: String,
    #[serde(default)]
    pub kanji: Vec<Kanji>,
    #[serde(default)]
    pub readings: Vec<Reading>,
    #[serde(default)]
    pub senses: Vec<Sense>,
}

impl Entry {
    pub fn new(sequence: impl Into<String>) -> Self {
        Entry {
            sequence: sequence.into(),
            ..Default::default()
        }
    }

    /// Add a kanji writing.
    pub fn add_kanji(mut self, value: impl Into<String>, priorities: &[Priority]) -> Self {
        self.kanji.push(Kanji {
            value: value.into(),
            priorities: priorities.to_vec(),
        });
        self
    }

    /// Add a kana reading, optionally with its romanization.
    pub fn add_reading(
        mut self,
        value: impl Into<String>,
        romaji: Option<&str>,
        priorities: &[Priority],
    ) -> Self {
        self.readings.push(Reading {
            value: value.into(),
            romaji: romaji.map(str::to_string),
            priorities: priorities.to_vec(),
        });
        self
    }

    /// Add a sense made of plain glosses.
    pub fn add_sense<I, S>(mut self, glosses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.senses.push(Sense {
            glosses: glosses
                .into_iter()
                .map(|content| Gloss {
                    content: content.into(),
                    highlight: false,
                })
                .collect(),
        });
        self
    }

    /// Add a sense with explicit glosses.
    pub fn add_sense_glosses(mut self, glosses: Vec<Gloss>) -> Self {
        self.senses.push(Sense { glosses });
        self
    }
}

/// A fully parsed dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    pub entries: Vec<Entry>,
}

impl Dictionary {
    pub fn new(entries: Vec<Entry>) -> Self {
        Dictionary { entries }
    }

    /// Load a dictionary that the XML loader already converted to JSON.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (EntryId(idx as u32), entry))
    }
}
