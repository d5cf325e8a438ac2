//! Note source boundary — where snapshots of the user's notes come from.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::error::SourceError;

use super::model::Note;

/// A place notes can be loaded from.
///
/// The hosted backend implements this on the app side; here the crate ships
/// a JSON file source for the CLI and for tests.
#[async_trait]
pub trait NoteSource: Send + Sync {
    /// Source name, for logs.
    fn name(&self) -> &str;

    /// Load a full snapshot of the user's notes.
    async fn load(&self) -> Result<Vec<Note>, SourceError>;
}

/// Loads notes from a JSON file containing an array of [`Note`] records.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl NoteSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn load(&self) -> Result<Vec<Note>, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        let notes: Vec<Note> =
            serde_json::from_str(&raw).map_err(|source| SourceError::Decode {
                path: self.path.clone(),
                source,
            })?;

        info!(count = notes.len(), path = %self.path.display(), "Loaded notes");
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::model::NoteKind;

    #[tokio::test]
    async fn load_from_json_file() {
        let notes = vec![
            Note::new("Meeting Notes", NoteKind::Audio),
            Note::new("Shopping List", NoteKind::Text),
        ];
        let json = serde_json::to_string(&notes).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, json).unwrap();

        let source = JsonFileSource::new(&path);
        let loaded = source.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "Meeting Notes");
        assert_eq!(loaded[1].kind, NoteKind::Text);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = JsonFileSource::new("/nonexistent/notes.json");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "{not json").unwrap();

        let source = JsonFileSource::new(&path);
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
    }
}
