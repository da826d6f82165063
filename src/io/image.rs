//! Patch width normalization, color parsing and PNG export

use crate::io::error::{QuiltError, Result, WithContext, invalid_parameter};
use crate::io::patch::{MemoryPatch, Patch, PatchSource};
use image::{GenericImage, Rgba, RgbaImage};
use std::path::Path;

/// Pad `pixels` on the right with `background` up to `width`
///
/// Returns an unchanged copy when the image already has the requested width.
///
/// # Errors
///
/// Returns an error if the image is wider than `width`
pub fn extend_width(pixels: &RgbaImage, width: u32, background: Rgba<u8>) -> Result<RgbaImage> {
    if pixels.width() > width {
        return Err(QuiltError::InvalidSourceData {
            reason: format!(
                "image is {} px wide and cannot be narrowed to {width} px",
                pixels.width()
            ),
        });
    }

    let mut extended = RgbaImage::from_pixel(width, pixels.height(), background);
    extended.copy_from(pixels, 0, 0)?;
    Ok(extended)
}

/// Bring every patch to the width of the widest one
///
/// Patches already at full width are kept as they are; narrower ones are
/// padded in memory. Order is preserved. `on_patch` runs once per patch.
///
/// # Errors
///
/// Returns an error if a narrower patch cannot be read
pub fn normalize_widths<F>(
    patches: Vec<Patch>,
    background: Rgba<u8>,
    mut on_patch: F,
) -> Result<Vec<Patch>>
where
    F: FnMut(),
{
    let width = patches.iter().map(PatchSource::width).max().unwrap_or(0);

    patches
        .into_iter()
        .map(|patch| -> Result<Patch> {
            let normalized = if patch.width() == width {
                patch
            } else {
                let pixels = patch.pixels().for_patch(patch.name())?;
                let extended = extend_width(&pixels, width, background).for_patch(patch.name())?;
                Patch::from(MemoryPatch::new(patch.name(), extended))
            };
            on_patch();
            Ok(normalized)
        })
        .collect()
}

/// Parse a `RRGGBB` or `RRGGBBAA` hex color, with or without a leading `#`
///
/// # Errors
///
/// Returns an error if the string has the wrong length or is not hexadecimal
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_parameter(
            "background",
            &value,
            &"expected RRGGBB or RRGGBBAA",
        ));
    }

    let mut channels = [u8::MAX; 4];
    for (channel, index) in channels.iter_mut().zip((0..digits.len()).step_by(2)) {
        let pair = digits.get(index..index + 2).unwrap_or_default();
        *channel = u8::from_str_radix(pair, 16)
            .map_err(|e| invalid_parameter("background", &value, &e))?;
    }

    Ok(Rgba(channels))
}

/// Color of the top-left pixel of `patch`, used as the default background
///
/// # Errors
///
/// Returns an error if the patch cannot be read or has no pixels
pub fn corner_color<P: PatchSource + ?Sized>(patch: &P) -> Result<Rgba<u8>> {
    let pixels = patch.pixels().for_patch(patch.name())?;
    pixels
        .get_pixel_checked(0, 0)
        .copied()
        .ok_or_else(|| QuiltError::InvalidSourceData {
            reason: format!("patch '{}' has no pixels to sample", patch.name()),
        })
}

/// Save the composed quilt, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_quilt(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| QuiltError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| QuiltError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
