//! Domain model for the notes list.
//!
//! # Responsibility
//! - Define the persisted `Note` record and field normalization rules.
//! - Define the capability set consumed from the permissions collaborator.
//!
//! # Invariants
//! - Every note is identified by a unique integer `NoteId`.
//! - Deletion is a hard removal from the collection.

pub mod capability;
pub mod note;
