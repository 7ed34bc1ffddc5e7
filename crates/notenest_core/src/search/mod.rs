//! Pure list derivations: filtering, ordering, and query intake.
//!
//! # Responsibility
//! - Project the note collection into the displayed sequence.
//! - Stay free of side effects so views can recompute on every read.
//!
//! # Invariants
//! - Derivations never mutate or persist the source collection.

pub mod filter;
pub mod query;
pub mod sort;

pub use filter::filter_notes;
pub use query::search_query_from_url;
pub use sort::{locale_compare, sort_notes, SortMode, SortModeParseError};

use crate::model::note::Note;

/// Filters then sorts, producing the displayed sequence.
pub fn visible_notes(notes: &[Note], query: &str, mode: SortMode) -> Vec<Note> {
    sort_notes(&filter_notes(notes, query), mode)
}
