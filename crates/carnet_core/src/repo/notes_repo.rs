//! Notes repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD and stream access over persisted note records.
//! - Mediate between the stroke codec and the datastore.
//!
//! # Invariants
//! - `toggle_favorite`, `update_note_strokes` and
//!   `update_note_image_uri_list` are read-modify-write; a missing record
//!   makes them silent no-ops (last-writer-wins by design).
//! - Every successful write republishes the watch streams.

use crate::brushes::catalog::CustomBrushCatalog;
use crate::codec::{self, CodecError};
use crate::db::DbError;
use crate::ink::strokes::Stroke;
use crate::model::note::{Note, NoteType};
use crate::observe::{Subject, Subscription};
use log::{debug, error, warn};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    text,
    type,
    is_favorite,
    image_uri_list,
    strokes_data,
    client_brush_family_id
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Codec(CodecError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<CodecError> for RepoError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// Data-access contract for notes.
///
/// `Send + Sync` so the background saver can share one handle with the
/// UI-thread session.
pub trait NotesRepository: Send + Sync {
    /// All notes, newest updated first.
    fn all_notes(&self) -> RepoResult<Vec<Note>>;
    /// Replay-latest stream of the full note list.
    fn watch_all_notes(&self) -> Subscription<Vec<Note>>;
    fn get_note(&self, id: i64) -> RepoResult<Option<Note>>;
    /// Replay-latest stream of one note; `None` once it is deleted.
    fn watch_note(&self, id: i64) -> Subscription<Option<Note>>;
    /// Inserts a note and returns the generated id.
    fn add_note(&self, note: &Note) -> RepoResult<i64>;
    fn delete_note(&self, id: i64) -> RepoResult<()>;
    /// Full-record replace; missing record is a silent no-op.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    /// Serializes and writes the strokes blob plus brush-family tag.
    fn update_note_strokes(
        &self,
        note_id: i64,
        strokes: &[Stroke],
        client_brush_family_id: Option<&str>,
    ) -> RepoResult<()>;
    /// Reads and deserializes the strokes blob; empty when absent.
    fn get_note_strokes(&self, note_id: i64) -> RepoResult<Vec<Stroke>>;
    fn toggle_favorite(&self, note_id: i64) -> RepoResult<()>;
    fn update_note_image_uri_list(
        &self,
        note_id: i64,
        image_uri_list: Option<&[String]>,
    ) -> RepoResult<()>;
}

/// SQLite-backed notes repository.
pub struct SqliteNotesRepository {
    conn: Mutex<Connection>,
    catalog: Arc<CustomBrushCatalog>,
    all_notes_subject: Subject<Vec<Note>>,
    note_subjects: Mutex<HashMap<i64, Arc<Subject<Option<Note>>>>>,
}

impl SqliteNotesRepository {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: Connection, catalog: Arc<CustomBrushCatalog>) -> RepoResult<Self> {
        let repo = Self {
            conn: Mutex::new(conn),
            catalog,
            all_notes_subject: Subject::new(Vec::new()),
            note_subjects: Mutex::new(HashMap::new()),
        };
        repo.all_notes_subject.publish(repo.all_notes()?);
        Ok(repo)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock still guards a usable connection; SQLite keeps
        // its own transactional consistency.
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn note_subjects(&self) -> MutexGuard<'_, HashMap<i64, Arc<Subject<Option<Note>>>>> {
        match self.note_subjects.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Republishes the watch streams after a successful write.
    fn publish_changes(&self) {
        match self.all_notes() {
            Ok(notes) => self.all_notes_subject.publish(notes),
            Err(err) => {
                error!("event=watch_refresh module=repo status=error stream=all error={err}")
            }
        }

        let subjects: Vec<(i64, Arc<Subject<Option<Note>>>)> = self
            .note_subjects()
            .iter()
            .map(|(id, subject)| (*id, Arc::clone(subject)))
            .collect();
        for (id, subject) in subjects {
            match self.get_note(id) {
                Ok(note) => subject.publish(note),
                Err(err) => error!(
                    "event=watch_refresh module=repo status=error stream=note note_id={id} error={err}"
                ),
            }
        }
    }
}

impl NotesRepository for SqliteNotesRepository {
    fn all_notes(&self) -> RepoResult<Vec<Note>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("{NOTE_SELECT_SQL} ORDER BY updated_at DESC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn watch_all_notes(&self) -> Subscription<Vec<Note>> {
        self.all_notes_subject.subscribe()
    }

    fn get_note(&self, id: i64) -> RepoResult<Option<Note>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn watch_note(&self, id: i64) -> Subscription<Option<Note>> {
        let seed = self.get_note(id).unwrap_or_else(|err| {
            error!("event=watch_open module=repo status=error note_id={id} error={err}");
            None
        });
        let mut subjects = self.note_subjects();
        let subject = subjects
            .entry(id)
            .or_insert_with(|| Arc::new(Subject::new(seed)));
        subject.subscribe()
    }

    fn add_note(&self, note: &Note) -> RepoResult<i64> {
        let id = {
            let conn = self.conn();
            conn.execute(
                "INSERT INTO notes (
                    title,
                    text,
                    type,
                    is_favorite,
                    image_uri_list,
                    strokes_data,
                    client_brush_family_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    note.title.as_str(),
                    note.text.as_deref(),
                    note_type_to_db(note.kind),
                    note.is_favorite as i64,
                    encode_uri_list(note.image_uri_list.as_deref()),
                    note.strokes_data.as_deref(),
                    note.client_brush_family_id.as_deref(),
                ],
            )?;
            conn.last_insert_rowid()
        };

        debug!("event=note_add module=repo status=ok note_id={id}");
        self.publish_changes();
        Ok(id)
    }

    fn delete_note(&self, id: i64) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        if changed > 0 {
            self.publish_changes();
        }
        Ok(())
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE notes
             SET
                title = ?2,
                text = ?3,
                type = ?4,
                is_favorite = ?5,
                image_uri_list = ?6,
                strokes_data = ?7,
                client_brush_family_id = ?8,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                note.id,
                note.title.as_str(),
                note.text.as_deref(),
                note_type_to_db(note.kind),
                note.is_favorite as i64,
                encode_uri_list(note.image_uri_list.as_deref()),
                note.strokes_data.as_deref(),
                note.client_brush_family_id.as_deref(),
            ],
        )?;

        if changed == 0 {
            debug!(
                "event=note_update module=repo status=noop note_id={}",
                note.id
            );
            return Ok(());
        }

        self.publish_changes();
        Ok(())
    }

    fn update_note_strokes(
        &self,
        note_id: i64,
        strokes: &[Stroke],
        client_brush_family_id: Option<&str>,
    ) -> RepoResult<()> {
        let Some(mut note) = self.get_note(note_id)? else {
            debug!("event=strokes_save module=repo status=noop note_id={note_id}");
            return Ok(());
        };

        note.strokes_data = Some(codec::serialize_strokes(strokes)?);
        note.client_brush_family_id = client_brush_family_id.map(str::to_string);
        self.update_note(&note)?;
        debug!(
            "event=strokes_save module=repo status=ok note_id={note_id} strokes={}",
            strokes.len()
        );
        Ok(())
    }

    fn get_note_strokes(&self, note_id: i64) -> RepoResult<Vec<Stroke>> {
        let Some(note) = self.get_note(note_id)? else {
            return Ok(Vec::new());
        };
        let Some(blob) = note.strokes_data else {
            return Ok(Vec::new());
        };
        Ok(codec::deserialize_strokes(&blob, self.catalog.get())?)
    }

    fn toggle_favorite(&self, note_id: i64) -> RepoResult<()> {
        let Some(mut note) = self.get_note(note_id)? else {
            debug!("event=favorite_toggle module=repo status=noop note_id={note_id}");
            return Ok(());
        };
        note.is_favorite = !note.is_favorite;
        self.update_note(&note)
    }

    fn update_note_image_uri_list(
        &self,
        note_id: i64,
        image_uri_list: Option<&[String]>,
    ) -> RepoResult<()> {
        let Some(mut note) = self.get_note(note_id)? else {
            debug!("event=image_list_update module=repo status=noop note_id={note_id}");
            return Ok(());
        };
        note.image_uri_list = image_uri_list.map(<[String]>::to_vec);
        self.update_note(&note)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let type_text: String = row.get("type")?;
    let kind = parse_note_type(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid note type `{type_text}` in notes.type"))
    })?;

    let is_favorite = match row.get::<_, i64>("is_favorite")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_favorite value `{other}` in notes.is_favorite"
            )));
        }
    };

    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        text: row.get("text")?,
        kind,
        is_favorite,
        image_uri_list: decode_uri_list(row.get::<_, Option<String>>("image_uri_list")?),
        strokes_data: row.get("strokes_data")?,
        client_brush_family_id: row.get("client_brush_family_id")?,
    })
}

fn note_type_to_db(kind: NoteType) -> &'static str {
    match kind {
        NoteType::Text => "text",
        NoteType::Drawing => "drawing",
    }
}

fn parse_note_type(value: &str) -> Option<NoteType> {
    match value {
        "text" => Some(NoteType::Text),
        "drawing" => Some(NoteType::Drawing),
        _ => None,
    }
}

fn encode_uri_list(list: Option<&[String]>) -> Option<String> {
    let list = list?;
    match serde_json::to_string(list) {
        Ok(json) => Some(json),
        Err(err) => {
            // String lists cannot realistically fail to encode; keep the
            // record writable regardless.
            warn!("event=uri_list_encode module=repo status=error error={err}");
            None
        }
    }
}

fn decode_uri_list(json: Option<String>) -> Option<Vec<String>> {
    let json = json?;
    match serde_json::from_str(&json) {
        Ok(list) => Some(list),
        Err(err) => {
            // A corrupt URI list degrades to no images; strokes are the
            // only blob whose corruption must surface.
            warn!("event=uri_list_decode module=repo status=error error={err}");
            None
        }
    }
}
