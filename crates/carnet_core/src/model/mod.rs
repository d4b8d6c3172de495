//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the note record shared by text and drawing projections.
//!
//! # Invariants
//! - `id == 0` means the note has not been persisted yet.

pub mod note;
