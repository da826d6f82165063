//! Final canvas assembly

/// Chunk pasting and canvas sizing
pub mod compose;

pub use compose::{canvas_dimensions, compose};
