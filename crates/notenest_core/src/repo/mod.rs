//! Repository layer over the blob store.
//!
//! # Responsibility
//! - Map the note collection onto its storage key and JSON layout.
//! - Keep serialization details out of the controller.

pub mod notes_repo;
