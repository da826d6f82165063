//! Quilt assembly orchestration

/// Validation, parallel analysis, layout search and composition
pub mod pipeline;

pub use pipeline::{CutPointTable, Quilt, QuiltConfig, Quilter};
