//! Stitching of equal-width rendered code images into one balanced quilt
//!
//! Each patch is scanned for interior blank rows where it can be split. A
//! greedy pass then fills columns of a target height, cutting patches only
//! at those rows, and the target height is chosen from a menu of canvas
//! aspect ratios so that the columns leave the least unused space.

#![forbid(unsafe_code)]

/// Safe split row detection and blank row bands
pub mod analysis;
/// Composition of a layout into the final canvas
pub mod canvas;
/// Orchestration of the full quilt pipeline
pub mod engine;
/// Input/output operations and error handling
pub mod io;
/// Greedy column chunking and aspect ratio search
pub mod layout;

pub use engine::{CutPointTable, Quilt, QuiltConfig, Quilter};
pub use io::error::{QuiltError, Result};
