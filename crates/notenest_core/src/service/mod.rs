//! Notes list controller and its supporting pieces.
//!
//! # Responsibility
//! - Drive the load/create/edit/delete state machine.
//! - Own timer-based transitions (load delay, notice dismissal).
//! - Keep rendering layers decoupled from storage details.

pub mod clock;
pub mod notes_controller;
pub mod relative_time;
pub mod timer;
pub mod view;
