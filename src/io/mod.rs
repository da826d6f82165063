//! Input/output operations and error handling

/// Command-line parsing and batch orchestration
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error type and context helpers
pub mod error;
/// Width normalization, color parsing and export
pub mod image;
/// Patch sources with scoped pixel acquisition
pub mod patch;
/// Stage progress bars
pub mod progress;
