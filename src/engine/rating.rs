//! Relevance heuristics for dictionary hits.
//!
//! A hit's rating is the sum of
//!
//! - the field weight fixed at insertion time: field base + entry priority
//!   bonus − positional penalty (+ highlight bonus for glosses),
//! - the match tier (exact > starts-with > ends-with > contains), and
//! - a length-proximity term that favours candidates close in length to the
//!   query.
//!
//! An entry keeps the maximum over all of its hits. The tiers are 100000
//! apart and every other term is bounded well below that, so a better match
//! tier always wins.

use crate::analysis::utf8::count_codepoints;
use crate::dictionary::{Entry, Priority};

/// Integer relevance score; higher is better.
pub type Rating = i32;

pub const MATCH_EXACT: Rating = 400_000;
pub const MATCH_STARTS_WITH: Rating = 300_000;
pub const MATCH_ENDS_WITH: Rating = 200_000;
pub const MATCH_CONTAINS: Rating = 100_000;
/// Subtracted from the rating computed with a leading "to " removed.
pub const MATCH_FUZZY_PENALTY: Rating = 1_000;

/// Smallest distance between two match tiers.
pub const MATCH_TIER_GAP: Rating = 100_000;
/// Upper bound of the per-entry priority bonus.
pub const MAX_PRIORITY_BONUS: Rating = MATCH_TIER_GAP - 1;

pub const HAS_NEWS1: Rating = 2_000;
pub const HAS_NEWS2: Rating = 1_000;
pub const HAS_ICHI1: Rating = 2_000;
pub const HAS_ICHI2: Rating = 1_000;
pub const HAS_SPEC1: Rating = 2_000;
pub const HAS_SPEC2: Rating = 1_000;
pub const HAS_GAI1: Rating = 2_000;
pub const HAS_GAI2: Rating = 1_000;

const _: () = assert!(
    HAS_NEWS1 + HAS_NEWS2 + HAS_ICHI1 + HAS_ICHI2 + HAS_SPEC1 + HAS_SPEC2 + HAS_GAI1 + HAS_GAI2
        < MATCH_CONTAINS
);

pub const WORD_LENGTH: Rating = 2_000;
pub const MAX_WORD_LENGTH: usize = 100;

pub const KANJI: Rating = 30;
pub const READING_KANA: Rating = 20;
pub const READING_ROMAJI: Rating = 20;
pub const MEANING: Rating = 1;
pub const HIGHLIGHTED_GLOSS: Rating = 10;
pub const SEQUENCE_NUMBER: Rating = 1_000_000;

pub const POSITION_PENALTY_KANJI: Rating = 400;
pub const POSITION_PENALTY_READING: Rating = 400;
pub const POSITION_PENALTY_SENSE: Rating = 200;
pub const POSITION_PENALTY_GLOSS: Rating = 400;

const INFINITIVE_MARKER: &str = "to ";

/// Which part of an entry a piece of indexed text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Kanji,
    Kana,
    Romaji,
    Gloss,
}

impl FieldKind {
    pub fn base_weight(self) -> Rating {
        match self {
            FieldKind::Kanji => KANJI,
            FieldKind::Kana => READING_KANA,
            FieldKind::Romaji => READING_ROMAJI,
            FieldKind::Gloss => MEANING,
        }
    }
}

/// A piece of entry text with the weight it is indexed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedField<'a> {
    pub text: &'a str,
    pub kind: FieldKind,
    pub weight: Rating,
}

impl<'a> WeightedField<'a> {
    pub fn new(text: &'a str, kind: FieldKind, bonus: Rating, penalty: Rating) -> Self {
        WeightedField {
            text,
            kind,
            weight: field_weight(kind, bonus, penalty),
        }
    }
}

fn priority_weight(priority: Priority) -> Rating {
    match priority {
        Priority::News1 => HAS_NEWS1,
        Priority::News2 => HAS_NEWS2,
        Priority::Ichi1 => HAS_ICHI1,
        Priority::Ichi2 => HAS_ICHI2,
        Priority::Spec1 => HAS_SPEC1,
        Priority::Spec2 => HAS_SPEC2,
        Priority::Gai1 => HAS_GAI1,
        Priority::Gai2 => HAS_GAI2,
        Priority::Nf(_) => 0,
    }
}

/// Sum of the frequency-list flags present; each flag counts once.
pub fn priority_rating(priorities: &[Priority]) -> Rating {
    const FLAGS: [Priority; 8] = [
        Priority::News1,
        Priority::News2,
        Priority::Ichi1,
        Priority::Ichi2,
        Priority::Spec1,
        Priority::Spec2,
        Priority::Gai1,
        Priority::Gai2,
    ];
    FLAGS
        .into_iter()
        .filter(|flag| priorities.contains(flag))
        .map(priority_weight)
        .sum()
}

/// Priority bonus shared by every field of `entry`: the best flag sum of any
/// kanji or reading element, capped at [`MAX_PRIORITY_BONUS`].
pub fn entry_priority(entry: &Entry) -> Rating {
    let kanji = entry.kanji.iter().map(|k| priority_rating(&k.priorities));
    let readings = entry.readings.iter().map(|r| priority_rating(&r.priorities));
    kanji
        .chain(readings)
        .max()
        .unwrap_or(0)
        .min(MAX_PRIORITY_BONUS)
}

/// `index² × per_step`: earlier forms are more canonical.
pub fn position_penalty(index: usize, per_step: Rating) -> Rating {
    let squared = index.saturating_mul(index).min(Rating::MAX as usize) as Rating;
    squared.saturating_mul(per_step)
}

/// Insertion weight of a field: base weight plus `bonus` minus `penalty`.
/// Saturates instead of overflowing for absurdly long element lists.
pub fn field_weight(kind: FieldKind, bonus: Rating, penalty: Rating) -> Rating {
    kind.base_weight().saturating_add(bonus).saturating_sub(penalty)
}

/// Every indexable text of `entry` with its insertion weight.
///
/// Glosses are indexed without their trailing parenthetical annotation;
/// texts that end up empty are left out.
pub fn weighted_fields(entry: &Entry) -> Vec<WeightedField<'_>> {
    let priority = entry_priority(entry);
    let mut fields = Vec::new();

    for (k_idx, kanji) in entry.kanji.iter().enumerate() {
        let penalty = position_penalty(k_idx, POSITION_PENALTY_KANJI);
        fields.push(WeightedField::new(&kanji.value, FieldKind::Kanji, priority, penalty));
    }

    for (r_idx, reading) in entry.readings.iter().enumerate() {
        let penalty = position_penalty(r_idx, POSITION_PENALTY_READING);
        fields.push(WeightedField::new(&reading.value, FieldKind::Kana, priority, penalty));
        if let Some(romaji) = reading.romaji.as_deref().filter(|r| !r.is_empty()) {
            fields.push(WeightedField::new(romaji, FieldKind::Romaji, priority, penalty));
        }
    }

    for (s_idx, sense) in entry.senses.iter().enumerate() {
        let sense_penalty = position_penalty(s_idx, POSITION_PENALTY_SENSE);
        for (g_idx, gloss) in sense.glosses.iter().enumerate() {
            let highlight = if gloss.highlight { HIGHLIGHTED_GLOSS } else { 0 };
            let penalty =
                sense_penalty.saturating_add(position_penalty(g_idx, POSITION_PENALTY_GLOSS));
            fields.push(WeightedField::new(
                strip_annotation(&gloss.content),
                FieldKind::Gloss,
                priority + highlight,
                penalty,
            ));
        }
    }

    fields.retain(|field| !field.text.is_empty());
    fields
}

/// Cut `text` at its first `(` and drop the whitespace before it, so that
/// "to eat (e.g. a meal)" becomes "to eat".
pub fn strip_annotation(text: &str) -> &str {
    let text = text.find('(').map_or(text, |idx| &text[..idx]);
    text.trim_end_matches(|c: char| c <= ' ')
}

fn strip_infinitive(text: &str) -> &str {
    text.strip_prefix(INFINITIVE_MARKER).unwrap_or(text)
}

/// Tier of `candidate` relative to `query`. Candidates come out of a
/// substring search, so anything that is not exact, a prefix or a suffix is
/// rated as contained.
fn match_tier(query: &str, candidate: &str) -> Rating {
    if candidate == query {
        MATCH_EXACT
    } else if candidate.starts_with(query) {
        MATCH_STARTS_WITH
    } else if candidate.ends_with(query) {
        MATCH_ENDS_WITH
    } else {
        MATCH_CONTAINS
    }
}

/// Match-tier rating of `candidate` for `query`.
///
/// The candidate's trailing annotation is ignored. The comparison is also
/// made with a leading "to " removed from both sides, at a penalty of
/// [`MATCH_FUZZY_PENALTY`]; the better of the two is returned.
pub fn rate_match(query: &str, candidate: &str) -> Rating {
    let candidate = strip_annotation(candidate);
    let exact = match_tier(query, candidate);
    let fuzzy = match_tier(strip_infinitive(query), strip_infinitive(candidate)) - MATCH_FUZZY_PENALTY;
    exact.max(fuzzy)
}

/// Length-proximity bonus: [`WORD_LENGTH`] for equal codepoint counts,
/// decaying linearly to 0 at a difference of [`MAX_WORD_LENGTH`].
pub fn rate_length(query: &str, candidate: &str) -> Rating {
    let mut candidate = strip_annotation(candidate);
    if !query.starts_with(INFINITIVE_MARKER) {
        candidate = strip_infinitive(candidate);
    }

    let diff = count_codepoints(candidate)
        .abs_diff(count_codepoints(query))
        .min(MAX_WORD_LENGTH);
    WORD_LENGTH * (MAX_WORD_LENGTH - diff) as Rating / MAX_WORD_LENGTH as Rating
}

/// Full rating of one hit.
pub fn rate_hit(query: &str, candidate: &str, field_weight: Rating) -> Rating {
    field_weight
        .saturating_add(rate_match(query, candidate))
        .saturating_add(rate_length(query, candidate))
}
