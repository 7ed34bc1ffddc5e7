//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its JSON shape.
//! - Own title/content normalization used by create and edit flows.
//!
//! # Invariants
//! - `id` is unique within one collection and never reused.
//! - A persisted `title` is trimmed and has 1..=`TITLE_MAX_CHARS` characters.
//! - `content: None` is distinct from `Some("")`; normalization never
//!   produces `Some("")`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default maximum title length, counted in characters after trimming.
pub const TITLE_MAX_CHARS: usize = 200;

/// Integer note identifier. New ids are derived from epoch milliseconds.
pub type NoteId = i64;

/// One user-authored note.
///
/// Serialized as `{ id, title, content?, createdAt? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Epoch milliseconds. Absent on legacy and seed records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Note {
    /// Builds a freshly created note. Inputs are expected to be normalized.
    pub fn new(id: NoteId, title: String, content: Option<String>, created_at: i64) -> Self {
        Self {
            id,
            title,
            content,
            created_at: Some(created_at),
        }
    }

    /// Sort key for time-based ordering: `created_at`, else `id`.
    pub fn effective_timestamp(&self) -> i64 {
        self.created_at.unwrap_or(self.id)
    }
}

/// Validation failure for user-entered note fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after trimming.
    TitleRequired,
    /// Trimmed title is longer than `max` characters.
    TitleTooLong { max: usize },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "Title is required"),
            Self::TitleTooLong { max } => write!(f, "Title must be {max} characters or less"),
        }
    }
}

impl Error for NoteValidationError {}

/// Trims and validates a raw title against `max_chars`.
///
/// # Errors
/// - `TitleRequired` when the trimmed title is empty.
/// - `TitleTooLong` when the trimmed title exceeds `max_chars` characters.
pub fn normalize_title(raw: &str, max_chars: usize) -> Result<String, NoteValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NoteValidationError::TitleRequired);
    }
    if trimmed.chars().count() > max_chars {
        return Err(NoteValidationError::TitleTooLong { max: max_chars });
    }
    Ok(trimmed.to_string())
}

/// Trims content; blank input becomes `None`.
pub fn normalize_content(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Fixed records shown when storage holds no notes.
pub fn seed_notes() -> Vec<Note> {
    vec![
        Note {
            id: 1,
            title: "Project Overview".to_string(),
            content: Some("A high-level overview of the project.".to_string()),
            created_at: None,
        },
        Note {
            id: 2,
            title: "Meeting Notes".to_string(),
            content: Some("Key points from the last team sync.".to_string()),
            created_at: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_content, normalize_title, seed_notes, Note, NoteValidationError, TITLE_MAX_CHARS,
    };

    #[test]
    fn normalize_title_trims_surrounding_whitespace() {
        assert_eq!(normalize_title("  Hello  ", TITLE_MAX_CHARS).unwrap(), "Hello");
    }

    #[test]
    fn normalize_title_rejects_blank_input() {
        let err = normalize_title(" \t\n ", TITLE_MAX_CHARS).unwrap_err();
        assert_eq!(err, NoteValidationError::TitleRequired);
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn normalize_title_counts_characters_not_bytes() {
        let exactly_max = "é".repeat(TITLE_MAX_CHARS);
        assert!(normalize_title(&exactly_max, TITLE_MAX_CHARS).is_ok());

        let too_long = format!("  {}  ", "a".repeat(TITLE_MAX_CHARS + 1));
        let err = normalize_title(&too_long, TITLE_MAX_CHARS).unwrap_err();
        assert_eq!(err.to_string(), "Title must be 200 characters or less");
    }

    #[test]
    fn normalize_content_maps_blank_to_none() {
        assert_eq!(normalize_content("   "), None);
        assert_eq!(normalize_content(" body "), Some("body".to_string()));
    }

    #[test]
    fn serialization_omits_absent_optional_fields() {
        let json = serde_json::to_string(&seed_notes()[0]).unwrap();
        assert!(!json.contains("createdAt"));

        let note = Note::new(10, "t".to_string(), None, 42);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["createdAt"], 42);
        assert!(json.get("content").is_none());
    }

    #[test]
    fn effective_timestamp_falls_back_to_id() {
        let legacy = &seed_notes()[1];
        assert_eq!(legacy.effective_timestamp(), 2);
        assert_eq!(Note::new(5, "x".into(), None, 99).effective_timestamp(), 99);
    }
}
