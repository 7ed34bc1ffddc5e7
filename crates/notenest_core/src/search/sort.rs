//! Note ordering for the list view.
//!
//! # Invariants
//! - Sorting works on a copy; the source collection is never reordered.
//! - Every mode is a total order: ties on the primary key fall back to `id`.

use crate::model::note::Note;
use icu_collator::{CaseFirst, Collator, CollatorOptions, Strength};
use log::warn;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

thread_local! {
    static ROOT_COLLATOR: Option<Collator> = root_collator();
}

/// List ordering selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Effective timestamp descending.
    #[default]
    Newest,
    /// Effective timestamp ascending.
    Oldest,
    /// Title, locale-aware ascending.
    Az,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Az => "az",
        }
    }

    /// Label shown in the sort selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::Az => "A–Z",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortModeParseError(pub String);

impl Display for SortModeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported sort mode `{}`; expected newest|oldest|az",
            self.0
        )
    }
}

impl Error for SortModeParseError {}

impl FromStr for SortMode {
    type Err = SortModeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "az" => Ok(Self::Az),
            other => Err(SortModeParseError(other.to_string())),
        }
    }
}

/// Returns a sorted copy of `notes`.
pub fn sort_notes(notes: &[Note], mode: SortMode) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sorted.sort_by(|a, b| compare_notes(a, b, mode));
    sorted
}

fn compare_notes(a: &Note, b: &Note, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Newest => b
            .effective_timestamp()
            .cmp(&a.effective_timestamp())
            .then_with(|| b.id.cmp(&a.id)),
        SortMode::Oldest => a
            .effective_timestamp()
            .cmp(&b.effective_timestamp())
            .then_with(|| a.id.cmp(&b.id)),
        SortMode::Az => locale_compare(&a.title, &b.title).then_with(|| a.id.cmp(&b.id)),
    }
}

/// Compares two strings with the root-locale collator: tertiary strength,
/// lowercase before uppercase.
///
/// Falls back to code point order if the collator cannot be built.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    options.case_first = Some(CaseFirst::LowerFirst);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            warn!("event=collator_init module=search status=error error={err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{locale_compare, sort_notes, SortMode};
    use crate::model::note::Note;
    use std::cmp::Ordering;

    fn note(id: i64, title: &str, created_at: Option<i64>) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: None,
            created_at,
        }
    }

    fn ids(notes: &[Note]) -> Vec<i64> {
        notes.iter().map(|n| n.id).collect()
    }

    #[test]
    fn newest_and_oldest_are_reverses_without_ties() {
        let notes = vec![
            note(1, "a", Some(300)),
            note(2, "b", Some(100)),
            note(3, "c", Some(200)),
        ];
        let newest = sort_notes(&notes, SortMode::Newest);
        let mut oldest = sort_notes(&notes, SortMode::Oldest);
        assert_eq!(ids(&newest), vec![1, 3, 2]);
        oldest.reverse();
        assert_eq!(newest, oldest);
    }

    #[test]
    fn timestamp_ties_break_on_id() {
        let notes = vec![note(5, "x", Some(10)), note(9, "y", Some(10)), note(7, "z", Some(10))];
        assert_eq!(ids(&sort_notes(&notes, SortMode::Newest)), vec![9, 7, 5]);
        assert_eq!(ids(&sort_notes(&notes, SortMode::Oldest)), vec![5, 7, 9]);
    }

    #[test]
    fn missing_created_at_uses_id_as_timestamp() {
        let notes = vec![note(1, "legacy", None), note(50, "new", Some(20))];
        assert_eq!(ids(&sort_notes(&notes, SortMode::Newest)), vec![50, 1]);
    }

    #[test]
    fn sorting_leaves_source_untouched() {
        let notes = vec![note(1, "b", Some(1)), note(2, "a", Some(2))];
        let before = notes.clone();
        let _ = sort_notes(&notes, SortMode::Az);
        assert_eq!(notes, before);
    }

    #[test]
    fn az_ignores_case_and_accents_at_primary_level() {
        let notes = vec![
            note(1, "banana", None),
            note(2, "Éclair", None),
            note(3, "apple", None),
            note(4, "Cherry", None),
        ];
        let sorted = sort_notes(&notes, SortMode::Az);
        assert_eq!(ids(&sorted), vec![3, 1, 4, 2]);
        assert_eq!(sort_notes(&sorted, SortMode::Az), sorted);
    }

    #[test]
    fn locale_compare_orders_case_accents_and_symbols() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("e", "é"), Ordering::Less);
        assert_eq!(locale_compare("é", "f"), Ordering::Less);
        assert_eq!(locale_compare("_x", "1x"), Ordering::Less);
        assert_eq!(locale_compare("9", "a"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn letters_without_decomposition_sort_among_their_base_letters() {
        assert_eq!(locale_compare("Ørsted", "Zebra"), Ordering::Less);
        assert_eq!(locale_compare("Æble", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Straße", "Strasz"), Ordering::Less);
        assert_eq!(locale_compare("Łódź", "Madrid"), Ordering::Less);
        assert_eq!(locale_compare("Đakovo", "Ember"), Ordering::Less);
    }

    #[test]
    fn az_keeps_nordic_titles_before_later_letters() {
        let notes = vec![
            note(1, "Zebra", None),
            note(2, "Ørsted", None),
            note(3, "Banana", None),
            note(4, "Æble", None),
        ];
        assert_eq!(ids(&sort_notes(&notes, SortMode::Az)), vec![4, 3, 2, 1]);
    }

    #[test]
    fn az_breaks_equal_titles_on_id() {
        let notes = vec![note(8, "Same", None), note(3, "Same", None)];
        assert_eq!(ids(&sort_notes(&notes, SortMode::Az)), vec![3, 8]);
    }

    #[test]
    fn parses_sort_modes() {
        assert_eq!("az".parse::<SortMode>().unwrap(), SortMode::Az);
        assert_eq!(" newest".parse::<SortMode>().unwrap(), SortMode::Newest);
        assert!("title".parse::<SortMode>().is_err());
        assert_eq!(SortMode::default(), SortMode::Newest);
        assert_eq!(SortMode::Newest.label(), "Newest first");
        assert_eq!(SortMode::Az.label(), "A–Z");
    }
}
