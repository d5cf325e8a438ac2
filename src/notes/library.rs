//! Note library — in-memory collection backing the list and search screens.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::model::Note;

/// In-memory snapshot of the user's notes.
///
/// The backend (out of scope here) pushes full snapshots in via
/// [`NoteLibrary::replace_all`]; individual edits land through
/// [`NoteLibrary::upsert`] and friends. Readers get clones ordered by
/// capture time, newest first.
pub struct NoteLibrary {
    notes: RwLock<Vec<Note>>,
}

impl NoteLibrary {
    /// Create an empty library.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            notes: RwLock::new(Vec::new()),
        })
    }

    /// Replace the entire collection with a fresh snapshot.
    pub async fn replace_all(&self, snapshot: Vec<Note>) {
        let count = snapshot.len();
        let mut notes = self.notes.write().await;
        *notes = snapshot;
        info!(count, "Note library replaced from snapshot");
    }

    /// Insert a note, or replace the existing note with the same id.
    pub async fn upsert(&self, note: Note) {
        let mut notes = self.notes.write().await;
        match notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => {
                debug!(note_id = %note.id, "Note updated");
                *existing = note;
            }
            None => {
                debug!(note_id = %note.id, title = %note.title, "Note added");
                notes.push(note);
            }
        }
    }

    /// Remove a note by id. Returns true if it was present.
    pub async fn remove(&self, id: &str) -> bool {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        let removed = notes.len() < before;
        if removed {
            debug!(note_id = %id, "Note removed");
        }
        removed
    }

    /// Flip the favorite flag on a note. Returns the new flag, or `None`
    /// if no note has that id.
    pub async fn toggle_favorite(&self, id: &str) -> Option<bool> {
        let mut notes = self.notes.write().await;
        let note = notes.iter_mut().find(|n| n.id == id)?;
        note.favorite = !note.favorite;
        debug!(note_id = %id, favorite = note.favorite, "Favorite toggled");
        Some(note.favorite)
    }

    /// All notes, newest first.
    pub async fn snapshot(&self) -> Vec<Note> {
        let notes = self.notes.read().await;
        Self::by_recency(notes.iter().cloned().collect())
    }

    /// Starred notes, newest first.
    pub async fn favorites(&self) -> Vec<Note> {
        let notes = self.notes.read().await;
        Self::by_recency(notes.iter().filter(|n| n.favorite).cloned().collect())
    }

    /// Notes in a folder, newest first.
    pub async fn in_folder(&self, folder_id: &str) -> Vec<Note> {
        let notes = self.notes.read().await;
        Self::by_recency(
            notes
                .iter()
                .filter(|n| n.folder_id.as_deref() == Some(folder_id))
                .cloned()
                .collect(),
        )
    }

    /// Number of notes in the library.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    /// Check if the library is empty.
    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }

    fn by_recency(mut notes: Vec<Note>) -> Vec<Note> {
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }
}
