//! Note data model, in-memory library, and source boundary.

pub mod library;
pub mod model;
pub mod source;

pub use library::NoteLibrary;
pub use model::{Note, NoteKind};
pub use source::{JsonFileSource, NoteSource};
