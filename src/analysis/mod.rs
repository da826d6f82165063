//! Per-patch pixel analysis
//!
//! This module finds where rendered patches may be split:
//! - Uniform row detection and edge trimming
//! - Grouping of blank rows into bands

/// Blank row bands and their relative sizes
pub mod bands;
/// Safe cut row detection
pub mod cut_points;

pub use cut_points::{SafeCutSet, analyze_patch};
