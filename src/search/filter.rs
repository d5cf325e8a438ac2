//! Pure note filtering.

use crate::notes::model::Note;

/// Filter notes by a free-text query.
///
/// Case-insensitive substring match against title and body content, a note
/// matching if either field contains the query. An empty or whitespace-only
/// query returns the input unchanged. Matching notes keep their relative
/// order from the input. The query is always a literal substring; it is
/// never interpreted as a pattern.
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    let needle = query.trim();
    if needle.is_empty() {
        return notes.to_vec();
    }
    let needle = needle.to_lowercase();
    notes
        .iter()
        .filter(|note| note_matches(note, &needle))
        .cloned()
        .collect()
}

/// Whether a note matches an already-lowercased needle.
fn note_matches(note: &Note, needle: &str) -> bool {
    if note.title.to_lowercase().contains(needle) {
        return true;
    }
    note.content
        .as_deref()
        .is_some_and(|content| content.to_lowercase().contains(needle))
}
