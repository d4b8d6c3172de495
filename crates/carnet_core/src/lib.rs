//! Core domain logic for Carnet, a notebook app with text and freehand
//! ink notes. This crate is the single source of truth for business
//! invariants: undo/redo history, stroke persistence and brush state.

pub mod brushes;
pub mod codec;
pub mod db;
pub mod files;
pub mod ink;
pub mod logging;
pub mod model;
pub mod observe;
pub mod repo;
pub mod session;

pub use brushes::catalog::{CustomBrush, CustomBrushCatalog};
pub use codec::{deserialize_strokes, serialize_strokes, CodecError};
pub use ink::brush::{Brush, BrushFamily, Color, CustomFamily, StockBrush};
pub use ink::strokes::{Stroke, StrokeInput, StrokeInputBatch};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteType};
pub use repo::notes_repo::{NotesRepository, RepoError, RepoResult, SqliteNotesRepository};
pub use session::{DrawingSession, SessionError, Theme};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
