//! Drawing session orchestration.
//!
//! # Responsibility
//! - Tie the history engine, eraser, brush state and background saver
//!   together for one open drawing note.
//!
//! # Invariants
//! - The visible stroke list is always exactly the history snapshot at the
//!   cursor.
//! - Persistence happens on append/undo/redo/clear/erase-end/teardown
//!   only, never per pointer move.
//! - All mutators are called from one thread; only persistence runs in the
//!   background.

use crate::brushes::catalog::{CustomBrush, CustomBrushCatalog};
use crate::ink::brush::{Brush, BrushFamily, Color};
use crate::ink::strokes::Stroke;
use crate::model::note::Note;
use crate::observe::{Subject, Subscription};
use crate::repo::notes_repo::{NotesRepository, RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod brush_state;
pub mod eraser;
pub mod history;
pub mod saver;

pub use brush_state::{BrushState, Theme, DEFAULT_BRUSH_SIZE, DEFAULT_EPSILON, HIGHLIGHTER_ALPHA};
pub use eraser::{Eraser, ERASER_PADDING};
pub use history::{StrokeHistory, StrokeSnapshot};
use saver::{SaveRequest, StrokeSaver};

/// Failure opening or reloading a drawing session.
#[derive(Debug)]
pub enum SessionError {
    NoteNotFound(i64),
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoteNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One open drawing note: history, brush state, eraser and persistence.
pub struct DrawingSession {
    note_id: i64,
    repo: Arc<dyn NotesRepository>,
    catalog: Arc<CustomBrushCatalog>,
    history: StrokeHistory,
    brush_state: BrushState,
    eraser: Eraser,
    saver: StrokeSaver,
    strokes: Subject<StrokeSnapshot>,
    note: Option<Note>,
}

impl DrawingSession {
    /// Creates a session for `note_id`; call [`load`](Self::load) before
    /// drawing.
    pub fn open(
        note_id: i64,
        repo: Arc<dyn NotesRepository>,
        catalog: Arc<CustomBrushCatalog>,
        theme: Theme,
    ) -> Self {
        let saver = StrokeSaver::spawn(Arc::clone(&repo));
        Self {
            note_id,
            repo,
            catalog,
            history: StrokeHistory::new(),
            brush_state: BrushState::new(theme),
            eraser: Eraser::default(),
            saver,
            strokes: Subject::new(Arc::new(Vec::new())),
            note: None,
        }
    }

    /// Loads (or reloads) the note backing this session.
    ///
    /// First load seeds the history with the persisted strokes; a reload of
    /// a live session keeps the stack and re-publishes the cursor snapshot,
    /// so in-session history survives reconfiguration.
    pub fn load(&mut self) -> Result<(), SessionError> {
        let note = self
            .repo
            .get_note(self.note_id)?
            .ok_or(SessionError::NoteNotFound(self.note_id))?;

        let initial = if note.strokes_data.is_some() {
            self.repo.get_note_strokes(self.note_id)?
        } else {
            Vec::new()
        };

        if let Some(family_id) = note.client_brush_family_id.as_deref() {
            if !self.brush_state.brush_picked() {
                if let Some(family) = self.catalog.find_family(family_id) {
                    self.brush_state
                        .adopt_family(BrushFamily::Custom(family.clone()));
                }
            }
        }

        if self.history.is_empty() {
            let snapshot = self.history.load(initial);
            self.strokes.publish(snapshot);
        } else if let Some(snapshot) = self.history.current() {
            self.strokes.publish(snapshot);
        }

        info!(
            "event=session_load module=session status=ok note_id={} snapshots={}",
            self.note_id,
            self.history.len()
        );
        self.note = Some(note);
        Ok(())
    }

    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    /// Latest visible stroke list.
    pub fn strokes(&self) -> StrokeSnapshot {
        self.strokes.latest()
    }

    /// Replay-latest stream of the visible stroke list.
    pub fn watch_strokes(&self) -> Subscription<StrokeSnapshot> {
        self.strokes.subscribe()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn current_brush(&self) -> &Brush {
        self.brush_state.brush()
    }

    pub fn eraser_mode(&self) -> bool {
        self.brush_state.eraser_mode()
    }

    pub fn custom_brushes(&self) -> &[CustomBrush] {
        self.catalog.get()
    }

    /// Appends finished strokes to the current snapshot and persists.
    pub fn on_strokes_finished(&mut self, finished: Vec<Stroke>) {
        let mut next: Vec<Stroke> = self
            .history
            .current()
            .map(|snapshot| snapshot.as_ref().clone())
            .unwrap_or_default();
        next.extend(finished);

        let snapshot = self.history.push(next);
        self.strokes.publish(snapshot);
        self.persist_current();
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.strokes.publish(snapshot);
            self.persist_current();
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.strokes.publish(snapshot);
            self.persist_current();
        }
    }

    /// Clears the canvas as one undoable edit; no-op when already empty.
    pub fn clear_strokes(&mut self) {
        let is_empty = self
            .history
            .current()
            .map_or(true, |snapshot| snapshot.is_empty());
        if is_empty {
            return;
        }
        let snapshot = self.history.push(Vec::new());
        self.strokes.publish(snapshot);
        self.persist_current();
    }

    pub fn begin_erase(&mut self) {
        self.eraser.begin();
    }

    /// Advances an erase drag; each sub-step that deletes something becomes
    /// its own undoable snapshot. Persistence waits for `end_erase`.
    pub fn erase(&mut self, x: f32, y: f32) {
        let current = self.history.current().unwrap_or_else(|| Arc::new(Vec::new()));
        if let Some(remaining) = self.eraser.sweep(x, y, &current) {
            let snapshot = self.history.push(remaining);
            self.strokes.publish(snapshot);
        }
    }

    pub fn end_erase(&mut self) {
        self.eraser.end();
        self.persist_current();
    }

    pub fn change_brush(&mut self, family: BrushFamily) {
        self.brush_state.change_brush(family);
    }

    pub fn change_brush_and_size(&mut self, family: BrushFamily, size: f32) {
        self.brush_state.change_brush_and_size(family, size);
    }

    pub fn change_brush_color(&mut self, color: Color) {
        self.brush_state.change_color(color);
    }

    pub fn change_brush_size(&mut self, size: f32) {
        self.brush_state.change_size(size);
    }

    pub fn set_eraser_mode(&mut self, enabled: bool) {
        self.brush_state.set_eraser_mode(enabled);
    }

    pub fn toggle_favorite(&self) -> RepoResult<()> {
        self.repo.toggle_favorite(self.note_id)
    }

    pub fn update_title(&mut self, title: impl Into<String>) -> RepoResult<()> {
        let Some(mut note) = self.repo.get_note(self.note_id)? else {
            return Ok(());
        };
        note.title = title.into();
        self.repo.update_note(&note)?;
        self.note = Some(note);
        Ok(())
    }

    /// Replaces the note's image list with one local URI.
    pub fn set_image(&self, uri: &str) -> RepoResult<()> {
        self.repo
            .update_note_image_uri_list(self.note_id, Some(&[uri.to_string()]))
    }

    pub fn clear_images(&self) -> RepoResult<()> {
        self.repo.update_note_image_uri_list(self.note_id, Some(&[]))
    }

    /// Clears strokes and images together.
    pub fn clear_screen(&mut self) -> RepoResult<()> {
        self.clear_strokes();
        self.clear_images()
    }

    /// Final persistence of the cursor snapshot, then worker join.
    /// Idempotent; also runs on drop.
    pub fn close(&mut self) {
        self.persist_current();
        self.saver.close();
    }

    fn persist_current(&self) {
        // An empty history persists an empty stroke list rather than
        // erroring; the session may be torn down before its first load.
        let snapshot = self
            .history
            .current()
            .unwrap_or_else(|| Arc::new(Vec::new()));
        let client_brush_family_id = snapshot
            .first()
            .and_then(|stroke| stroke.brush.family.client_brush_family_id())
            .map(str::to_string);

        self.saver.enqueue(SaveRequest {
            note_id: self.note_id,
            strokes: snapshot,
            client_brush_family_id,
        });
    }
}

impl Drop for DrawingSession {
    fn drop(&mut self) {
        self.close();
    }
}
