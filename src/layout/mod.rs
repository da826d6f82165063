//! Column layout computation
//!
//! This module contains the packing search:
//! - Candidate aspect ratio configuration
//! - Greedy chunking of patches into columns
//! - Selection of the least wasteful candidate

/// Greedy column filling at safe split rows
pub mod chunking;
/// Candidate canvas aspect ratios
pub mod ratio;
/// Aspect ratio search and waste scoring
pub mod selection;

pub use chunking::{Chunk, Column, PatchExtent};
pub use ratio::AspectRatio;
pub use selection::Layout;
