//! Postings and the values they point at.

use std::borrow::Cow;
use std::hash::Hash;

use ahash::AHashMap;

/// One inserted `(text, payload, weight)` triple.
///
/// The text is kept so that candidates can be verified against the literal
/// query after the fragment lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedText<'a, P> {
    pub text: Cow<'a, str>,
    pub payload: P,
    pub weight: i32,
}

/// Reference from a fragment to an [`IndexedText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Posting(u32);

impl Posting {
    #[inline]
    pub(crate) fn new(value: u32) -> Self {
        Posting(value)
    }

    /// Position of the referenced value in the index.
    #[inline]
    pub fn value_index(self) -> usize {
        self.0 as usize
    }
}

/// Fragment → posting list.
pub(crate) type PostingMap = AHashMap<Box<str>, Vec<Posting>>;

/// Point postings of equal values at the first such value, then sort and
/// de-duplicate every list. Returns the number of postings removed.
pub(crate) fn remove_duplicate_postings<P>(values: &[IndexedText<'_, P>], postings: &mut PostingMap) -> usize
where
    P: Eq + Hash,
{
    let mut first_seen: AHashMap<(&str, &P, i32), u32> = AHashMap::with_capacity(values.len());
    let canonical: Vec<u32> = values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            *first_seen
                .entry((value.text.as_ref(), &value.payload, value.weight))
                .or_insert(idx as u32)
        })
        .collect();

    let mut removed = 0;
    for list in postings.values_mut() {
        let before = list.len();
        for posting in list.iter_mut() {
            *posting = Posting(canonical[posting.value_index()]);
        }
        list.sort_unstable();
        list.dedup();
        removed += before - list.len();
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(text: &'static str, payload: u32, weight: i32) -> IndexedText<'static, u32> {
        IndexedText {
            text: Cow::Borrowed(text),
            payload,
            weight,
        }
    }

    #[test]
    fn test_remove_duplicate_postings() {
        let values = vec![
            value("water", 1, 20),
            value("water", 1, 20),
            value("water", 2, 20),
            value("water", 1, 30),
        ];
        let mut postings = PostingMap::default();
        postings.insert(
            "wat".into(),
            vec![Posting(3), Posting(1), Posting(0), Posting(2)],
        );

        let removed = remove_duplicate_postings(&values, &mut postings);
        assert_eq!(removed, 1);
        assert_eq!(
            postings.get("wat").unwrap(),
            &vec![Posting(0), Posting(2), Posting(3)]
        );

        assert_eq!(remove_duplicate_postings(&values, &mut postings), 0);
    }
}
