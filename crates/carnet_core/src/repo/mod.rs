//! Repository layer.
//!
//! # Responsibility
//! - Define the note data-access contract used by sessions and UI.
//! - Isolate SQLite query details from orchestration code.
//!
//! # Invariants
//! - Writes that depend on existing state treat a missing record as a
//!   silent no-op, not an error.
//! - Stroke-blob decode failures surface as typed errors, never as an
//!   empty result.

pub mod notes_repo;
