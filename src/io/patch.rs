//! Patch sources with scoped pixel acquisition
//!
//! A patch only needs its identity and dimensions to take part in layout.
//! Pixels are acquired on demand through [`PatchSource::pixels`]; the returned
//! buffer is the acquisition guard and releases the pixels when dropped, so a
//! file-backed patch never holds decoded data between engine calls.

use crate::io::error::{ErrorContext, QuiltError, Result, WithContext};
use image::RgbaImage;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A raster patch that can be measured cheaply and read on demand
pub trait PatchSource {
    /// Identity used in diagnostics and error messages
    fn name(&self) -> &str;

    /// Pixel dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Acquire the patch pixels for the duration of the returned guard
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or no longer
    /// matches the recorded dimensions
    fn pixels(&self) -> Result<Cow<'_, RgbaImage>>;

    /// Pixel width
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    /// Pixel height
    fn height(&self) -> u32 {
        self.dimensions().1
    }
}

/// Patch backed by an image file, decoded afresh on every acquisition
#[derive(Clone, Debug)]
pub struct PatchFile {
    path: PathBuf,
    name: String,
    dimensions: (u32, u32),
}

impl PatchFile {
    /// Record a patch file, reading only its header for the dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a supported image
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dimensions = image::image_dimensions(&path).with_context(ErrorContext {
            path: Some(path.clone()),
            ..Default::default()
        })?;

        Ok(Self {
            name: path.display().to_string(),
            path,
            dimensions,
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatchSource for PatchFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    fn pixels(&self) -> Result<Cow<'_, RgbaImage>> {
        let img = image::open(&self.path).map_err(|e| QuiltError::ImageLoad {
            path: self.path.clone(),
            source: e,
        })?;
        let rgba = img.into_rgba8();

        if rgba.dimensions() != self.dimensions {
            return Err(QuiltError::InvalidSourceData {
                reason: format!(
                    "'{}' changed size from {}x{} to {}x{} since it was opened",
                    self.path.display(),
                    self.dimensions.0,
                    self.dimensions.1,
                    rgba.width(),
                    rgba.height()
                ),
            });
        }

        Ok(Cow::Owned(rgba))
    }
}

/// Patch whose pixels are already resident
#[derive(Clone, Debug)]
pub struct MemoryPatch {
    name: String,
    pixels: RgbaImage,
}

impl MemoryPatch {
    /// Wrap a decoded image under the given identity
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    /// Consume the patch and return its pixels
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

impl PatchSource for MemoryPatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn pixels(&self) -> Result<Cow<'_, RgbaImage>> {
        Ok(Cow::Borrowed(&self.pixels))
    }
}

/// Either kind of patch, so file-backed and padded patches can share one list
#[derive(Clone, Debug)]
pub enum Patch {
    /// Read from disk on demand
    File(PatchFile),
    /// Held in memory, e.g. after width normalization
    Memory(MemoryPatch),
}

impl PatchSource for Patch {
    fn name(&self) -> &str {
        match self {
            Self::File(file) => file.name(),
            Self::Memory(memory) => memory.name(),
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::File(file) => file.dimensions(),
            Self::Memory(memory) => memory.dimensions(),
        }
    }

    fn pixels(&self) -> Result<Cow<'_, RgbaImage>> {
        match self {
            Self::File(file) => file.pixels(),
            Self::Memory(memory) => memory.pixels(),
        }
    }
}

impl From<PatchFile> for Patch {
    fn from(file: PatchFile) -> Self {
        Self::File(file)
    }
}

impl From<MemoryPatch> for Patch {
    fn from(memory: MemoryPatch) -> Self {
        Self::Memory(memory)
    }
}
