//! Core notes-list logic for NoteNest.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{ConfigError, NotesConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::capability::{
    parse_user_role, Capabilities, PermissionsProvider, RoleParseError, UserRole,
};
pub use model::note::{seed_notes, Note, NoteId, NoteValidationError, TITLE_MAX_CHARS};
pub use repo::notes_repo::{LoadOutcome, NotesRepository};
pub use search::{
    filter_notes, search_query_from_url, sort_notes, visible_notes, SortMode, SortModeParseError,
};
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::notes_controller::{
    ControllerError, ControllerResult, FocusTarget, Key, NoteAction, NotesController, TimerTask,
};
pub use service::relative_time::format_relative_time;
pub use service::view::{FormMode, FormView, ModalState, NoteListItem, NotesView};
pub use store::{BlobStore, MemoryBlobStore, SqliteBlobStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
