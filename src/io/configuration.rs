//! Engine constants and runtime configuration defaults

// Layout defaults
/// Gap in pixels between columns, between stacked chunks and around the canvas edge
pub const DEFAULT_MARGIN: u32 = 5;

/// Candidate canvas aspect ratios as (width, height), in evaluation order
///
/// Earlier entries win ties on waste.
pub const DEFAULT_ASPECT_RATIOS: [(u32, u32); 7] =
    [(5, 4), (16, 10), (4, 3), (16, 9), (3, 2), (2, 1), (1, 1)];

// Output settings
/// Default location of the composed quilt
pub const DEFAULT_OUTPUT_PATH: &str = "output/quilt.png";
/// File extension accepted for patch images
pub const PATCH_EXTENSION: &str = "png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Width reserved for the stage title in front of each bar
pub const STAGE_TITLE_WIDTH: usize = 18;

// Logging
/// Log filter used when `RUST_LOG` is unset and no verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "info";
