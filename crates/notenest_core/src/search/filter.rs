//! Free-text note filter.
//!
//! # Invariants
//! - Matching is case-insensitive on the trimmed query.
//! - A blank query keeps every note.
//! - Absent content never matches a non-empty query.
//! - Input order is preserved.

use crate::model::note::Note;

/// Returns the notes whose title or content contains `query`.
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return notes.to_vec();
    }

    notes
        .iter()
        .filter(|note| note_matches(note, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be trimmed and lowercased.
fn note_matches(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle)
        || note
            .content
            .as_deref()
            .is_some_and(|content| content.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::filter_notes;
    use crate::model::note::{seed_notes, Note};

    #[test]
    fn blank_query_keeps_everything() {
        let notes = seed_notes();
        assert_eq!(filter_notes(&notes, "   "), notes);
        assert_eq!(filter_notes(&notes, ""), notes);
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let hits = filter_notes(&seed_notes(), "  MEETING ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn content_matches_and_absent_content_does_not() {
        let notes = vec![
            Note::new(10, "alpha".into(), Some("contains needle".into()), 10),
            Note::new(11, "beta".into(), None, 11),
        ];
        let hits = filter_notes(&notes, "needle");
        assert_eq!(hits.iter().map(|n| n.id).collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let notes = seed_notes();
        for query in ["project", "o", "zzz", ""] {
            let once = filter_notes(&notes, query);
            assert_eq!(filter_notes(&once, query), once);
        }
    }
}
