//! Error types for Note Assist.
//!
//! The search and onboarding state machines are total over their inputs and
//! never return these; errors only arise at the load-time boundaries (flow
//! table validation, note source decoding).

use std::path::PathBuf;

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Note source error: {0}")]
    Source(#[from] SourceError),
}

/// Structural defects in an onboarding flow table, caught at load time.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Flow has no steps")]
    EmptyFlow,

    #[error("Duplicate step id: {id}")]
    DuplicateStep { id: String },

    #[error("Duplicate question id: {id}")]
    DuplicateQuestion { id: String },

    #[error("Question {id} matches no step")]
    OrphanQuestion { id: String },

    #[error("Select question {id} has no options")]
    NoOptions { id: String },

    #[error("Failed to parse flow definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Note source loading errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read notes from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode notes from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
