//! Note data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of capture produced a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Audio,
    Pdf,
    Text,
    Youtube,
    Image,
}

impl std::fmt::Display for NoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Text => "text",
            Self::Youtube => "youtube",
            Self::Image => "image",
        };
        write!(f, "{s}")
    }
}

/// A user-created note record.
///
/// The backend owns these; ids assigned there arrive as opaque strings.
/// Notes drafted locally before upload get a fresh v4 id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique ID.
    pub id: String,
    /// Short title shown in lists.
    pub title: String,
    /// Transcribed or typed body, if processing has produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// User-assigned tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// When the note was captured.
    pub created_at: DateTime<Utc>,
    /// Whether the user starred this note.
    #[serde(default)]
    pub favorite: bool,
    /// Folder containing this note, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    /// Capture kind.
    pub kind: NoteKind,
}

impl Note {
    /// Create a locally drafted note with a fresh id.
    pub fn new(title: impl Into<String>, kind: NoteKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: None,
            tags: Vec::new(),
            created_at: Utc::now(),
            favorite: false,
            folder_id: None,
            kind,
        }
    }

    /// Builder: set body content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Builder: set tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Builder: place in a folder.
    pub fn with_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    /// Builder: set the capture timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_defaults() {
        let note = Note::new("Standup recap", NoteKind::Audio);
        assert!(!note.id.is_empty());
        assert_eq!(note.title, "Standup recap");
        assert!(note.content.is_none());
        assert!(note.tags.is_empty());
        assert!(!note.favorite);
        assert!(note.folder_id.is_none());
        assert_eq!(note.kind, NoteKind::Audio);
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = Note::new("a", NoteKind::Text);
        let b = Note::new("b", NoteKind::Text);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serde_roundtrip() {
        let note = Note::new("Lecture 4", NoteKind::Pdf)
            .with_content("Derivatives and limits")
            .with_tags(vec!["math".into()])
            .with_folder("school");

        let json = serde_json::to_string(&note).unwrap();
        let parsed: Note = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, note.id);
        assert_eq!(parsed.content.as_deref(), Some("Derivatives and limits"));
        assert_eq!(parsed.tags, vec!["math".to_string()]);
        assert_eq!(parsed.folder_id.as_deref(), Some("school"));
        assert_eq!(parsed.kind, NoteKind::Pdf);
    }

    #[test]
    fn optional_fields_omitted_from_json() {
        let note = Note::new("Quick thought", NoteKind::Text);
        let json = serde_json::to_string(&note).unwrap();
        assert!(!json.contains("\"content\""));
        assert!(!json.contains("\"tags\""));
        assert!(!json.contains("\"folder_id\""));
    }

    #[test]
    fn kind_serde_matches_display() {
        for kind in [
            NoteKind::Audio,
            NoteKind::Pdf,
            NoteKind::Text,
            NoteKind::Youtube,
            NoteKind::Image,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
