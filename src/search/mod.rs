//! Client-side note search — pure filtering plus a debounced query pipeline.

pub mod filter;
pub mod pipeline;

pub use filter::filter_notes;
pub use pipeline::{SearchPipeline, SearchQuery};
