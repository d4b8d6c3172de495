//! Background stroke persistence worker.
//!
//! # Responsibility
//! - Serialize and write stroke snapshots off the UI thread.
//!
//! # Invariants
//! - Requests are processed in submission order by a single worker, so the
//!   last enqueued snapshot for a note is the last one written.
//! - `close()` drains the queue and joins the worker; repository errors
//!   are logged and never crash the session.

use crate::repo::notes_repo::NotesRepository;
use crate::session::history::StrokeSnapshot;
use log::{error, warn};
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// One deferred persistence write.
pub struct SaveRequest {
    pub note_id: i64,
    pub strokes: StrokeSnapshot,
    pub client_brush_family_id: Option<String>,
}

enum Command {
    Persist(SaveRequest),
    Shutdown,
}

/// Handle to the persistence worker thread.
pub struct StrokeSaver {
    tx: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl StrokeSaver {
    /// Spawns the worker with its own repository handle.
    pub fn spawn(repo: Arc<dyn NotesRepository>) -> Self {
        let (tx, rx) = channel::<Command>();
        let worker = thread::spawn(move || {
            while let Ok(command) = rx.recv() {
                match command {
                    Command::Persist(request) => {
                        if let Err(err) = repo.update_note_strokes(
                            request.note_id,
                            &request.strokes,
                            request.client_brush_family_id.as_deref(),
                        ) {
                            error!(
                                "event=strokes_save module=saver status=error note_id={} error={err}",
                                request.note_id
                            );
                        }
                    }
                    Command::Shutdown => break,
                }
            }
        });

        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Queues one write; fire-and-forget from the caller's perspective.
    pub fn enqueue(&self, request: SaveRequest) {
        let Some(tx) = &self.tx else {
            warn!(
                "event=strokes_save module=saver status=dropped note_id={} reason=closed",
                request.note_id
            );
            return;
        };
        if tx.send(Command::Persist(request)).is_err() {
            warn!("event=strokes_save module=saver status=dropped reason=worker_gone");
        }
    }

    /// Drains pending writes and joins the worker. Idempotent.
    pub fn close(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Command::Shutdown);
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=saver_join module=saver status=error reason=worker_panicked");
            }
        }
    }
}

impl Drop for StrokeSaver {
    fn drop(&mut self) {
        self.close();
    }
}
