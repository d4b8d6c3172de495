//! Note domain model.

use serde::{Deserialize, Serialize};

/// Rendering/editing projection of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    /// Plain text note.
    Text,
    /// Freehand ink note with optional background images.
    Drawing,
}

/// Persisted note record.
///
/// One shape backs both note types; drawing-specific fields stay `None`
/// for text notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Auto-assigned row id; 0 denotes not-yet-persisted.
    pub id: i64,
    pub title: String,
    /// Body text for text notes.
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: NoteType,
    pub is_favorite: bool,
    /// Local image URIs attached to a drawing note.
    pub image_uri_list: Option<Vec<String>>,
    /// JSON blob of serialized strokes; `None` when never drawn on.
    pub strokes_data: Option<String>,
    /// Custom brush family last used on this note.
    pub client_brush_family_id: Option<String>,
}

impl Note {
    pub fn text_note(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            text: None,
            kind: NoteType::Text,
            is_favorite: false,
            image_uri_list: None,
            strokes_data: None,
            client_brush_family_id: None,
        }
    }

    pub fn drawing_note(title: impl Into<String>) -> Self {
        Self {
            kind: NoteType::Drawing,
            ..Self::text_note(title)
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::text_note("")
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteType};

    #[test]
    fn fresh_notes_are_unpersisted() {
        let note = Note::drawing_note("sketch");
        assert!(!note.is_persisted());
        assert_eq!(note.kind, NoteType::Drawing);
        assert!(note.strokes_data.is_none());
    }
}
