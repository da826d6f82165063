//! Error types and context management for quilt operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all quilt operations
#[derive(Debug)]
pub enum QuiltError {
    /// Failed to load a patch image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the composed quilt to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Patch data doesn't meet the engine's requirements
    InvalidSourceData {
        /// Description of what's wrong with the patch data
        reason: String,
    },

    /// Patches handed to the engine do not share one width
    InconsistentWidth {
        /// Identity of the first patch with a deviating width
        patch: String,
        /// Width of the first patch, used as the column width
        expected: u32,
        /// Width of the offending patch
        found: u32,
    },

    /// No patches were supplied, so no layout can be formed
    EmptyInput,

    /// A patch must be split but has no safe cut row ahead of the cursor
    ///
    /// Occurs when the patch is taller than the remaining column space and
    /// no interior blank row lies between the cursor and the patch end.
    UnsafeSplit {
        /// Identity of the patch that could not be split
        patch: String,
        /// First row of the patch not yet placed in a column
        start: u32,
        /// Row at which the column would ideally end
        ideal_row: u32,
    },

    /// Geometry is empty or cannot be turned into a column height
    DegenerateGeometry {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Reading or analysing one patch failed
    PatchAnalysis {
        /// Identity of the failing patch
        patch: String,
        /// Underlying failure
        source: Box<QuiltError>,
    },
}

impl fmt::Display for QuiltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InconsistentWidth {
                patch,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Patch '{patch}' is {found} px wide, expected {expected} px (patches must share one width)"
                )
            }
            Self::EmptyInput => write!(f, "Cannot stitch an empty patch list"),
            Self::UnsafeSplit {
                patch,
                start,
                ideal_row,
            } => {
                write!(
                    f,
                    "Patch '{patch}' needs a split near row {ideal_row} but has no blank row after row {start}"
                )
            }
            Self::DegenerateGeometry { operation, reason } => {
                write!(f, "Degenerate geometry in {operation}: {reason}")
            }
            Self::PatchAnalysis { patch, source } => {
                write!(f, "Failed to analyse patch '{patch}': {source}")
            }
        }
    }
}

impl std::error::Error for QuiltError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::PatchAnalysis { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenience type alias for quilt results
pub type Result<T> = std::result::Result<T, QuiltError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Identity of the patch being processed
    pub patch: Option<String>,
    /// Backing file of the patch being processed
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with the state of the failing operation
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Attach the identity of the patch an error belongs to
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped with the patch identity
    fn for_patch(self, patch: &str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<QuiltError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Errors converted through `From` carry placeholder locations
            match &mut error {
                QuiltError::ImageLoad { path, .. }
                | QuiltError::ImageExport { path, .. }
                | QuiltError::FileSystem { path, .. } => {
                    if let Some(known) = &context.path {
                        path.clone_from(known);
                    }
                }
                QuiltError::DegenerateGeometry { operation, .. } => {
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                _ => {}
            }
            if let Some(patch) = context.patch {
                if !matches!(error, QuiltError::PatchAnalysis { .. }) {
                    error = QuiltError::PatchAnalysis {
                        patch,
                        source: Box::new(error),
                    };
                }
            }
            error
        })
    }

    fn for_patch(self, patch: &str) -> Result<T> {
        self.with_context(ErrorContext {
            patch: Some(patch.to_string()),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for QuiltError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for QuiltError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> QuiltError {
    QuiltError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a degenerate geometry error
pub fn degenerate_geometry(operation: &'static str, reason: &impl ToString) -> QuiltError {
    QuiltError::DegenerateGeometry {
        operation,
        reason: reason.to_string(),
    }
}
