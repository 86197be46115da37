// src/extractors/mod.rs
pub mod rows;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use rows::{ResultRow, RowExtractor, DEFAULT_ID_PATTERN};
