//! Render-facing snapshot of controller state.

use crate::model::note::{Note, NoteId};
use crate::search::SortMode;

/// Which flow the note modal serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(NoteId),
}

impl FormMode {
    pub fn heading(self) -> &'static str {
        match self {
            Self::Create => "New note",
            Self::Edit(_) => "Edit note",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Create note",
            Self::Edit(_) => "Update note",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Note created successfully.",
            Self::Edit(_) => "Note updated successfully.",
        }
    }
}

/// Note modal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    OpenCreate,
    OpenEdit(NoteId),
    Submitting(FormMode),
}

impl ModalState {
    /// Mode of an open or submitting modal.
    pub fn form_mode(self) -> Option<FormMode> {
        match self {
            Self::Closed => None,
            Self::OpenCreate => Some(FormMode::Create),
            Self::OpenEdit(id) => Some(FormMode::Edit(id)),
            Self::Submitting(mode) => Some(mode),
        }
    }

    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// One row of the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub note: Note,
    /// Relative creation label, e.g. "Created 5 minutes ago".
    pub created_label: String,
}

impl NoteListItem {
    /// Body text with the empty placeholder applied.
    pub fn content_preview(&self) -> &str {
        self.note.content.as_deref().unwrap_or("No content")
    }
}

/// Modal form fields and derived affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: FormMode,
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub title: String,
    pub content: String,
    /// Character count of the untrimmed title input.
    pub title_char_count: usize,
    pub title_max_chars: usize,
    pub error: Option<String>,
    pub can_submit: bool,
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesView {
    pub is_loading: bool,
    pub load_error: Option<String>,
    pub notes: Vec<NoteListItem>,
    /// True once loaded when the filtered list is empty.
    pub is_empty_result: bool,
    pub search_query: String,
    pub sort_mode: SortMode,
    pub form: Option<FormView>,
    pub success_message: Option<String>,
    pub pending_delete: Option<Note>,
    pub show_create_action: bool,
    pub show_item_actions: bool,
}
