//! Composition of a chosen layout into the final quilt image

use crate::io::error::{QuiltError, Result, WithContext, degenerate_geometry};
use crate::io::patch::PatchSource;
use crate::layout::selection::Layout;
use image::{GenericImage, Rgba, RgbaImage, imageops};
use tracing::instrument;

/// Canvas size as (width, height) for `layout` with uniform `margin`
///
/// Width is `columns * (column_width + margin) + margin`; height is the
/// tallest padded column plus a margin above and below.
///
/// # Errors
///
/// Returns an error if either dimension overflows `u32`
pub fn canvas_dimensions(layout: &Layout, column_width: u32, margin: u32) -> Result<(u32, u32)> {
    let gap = u64::from(margin);
    let width = layout.columns.len() as u64 * (u64::from(column_width) + gap) + gap;
    let tallest = layout
        .columns
        .iter()
        .map(|column| column.padded_height(margin))
        .max()
        .unwrap_or(0);
    let height = tallest + 2 * gap;

    let to_u32 = |value: u64, axis: &str| {
        u32::try_from(value).map_err(|_overflow| {
            degenerate_geometry("canvas dimensions", &format!("canvas {axis} {value} px overflows"))
        })
    };

    Ok((to_u32(width, "width")?, to_u32(height, "height")?))
}

/// Paste every chunk of `layout` onto a `background`-filled canvas
///
/// Columns run left to right and chunks top to bottom, each separated by
/// `margin`. Each chunk acquires its patch right before it is pasted, so at
/// most one patch is resident at a time. `on_chunk` runs after each paste.
///
/// # Errors
///
/// Returns an error if:
/// - A chunk refers to a patch index outside `patches`
/// - A patch cannot be read
/// - A chunk does not fit inside its patch or the canvas
#[instrument(skip_all, fields(columns = layout.columns.len(), chunks = layout.total_chunks()))]
pub fn compose<P, F>(
    layout: &Layout,
    patches: &[P],
    column_width: u32,
    margin: u32,
    background: Rgba<u8>,
    mut on_chunk: F,
) -> Result<RgbaImage>
where
    P: PatchSource,
    F: FnMut(),
{
    let (width, height) = canvas_dimensions(layout, column_width, margin)?;
    let mut canvas = RgbaImage::from_pixel(width, height, background);

    let mut x = margin;
    for column in &layout.columns {
        let mut y = margin;
        for chunk in column.chunks() {
            let patch = patches
                .get(chunk.patch)
                .ok_or_else(|| QuiltError::InvalidSourceData {
                    reason: format!(
                        "layout refers to patch {} but only {} patches were supplied",
                        chunk.patch,
                        patches.len()
                    ),
                })?;

            let pixels = patch.pixels().for_patch(patch.name())?;
            if chunk.is_empty() || chunk.stop > pixels.height() {
                return Err(QuiltError::InvalidSourceData {
                    reason: format!(
                        "chunk rows {}..{} are empty or exceed height {} of patch '{}'",
                        chunk.start,
                        chunk.stop,
                        pixels.height(),
                        patch.name()
                    ),
                });
            }

            let slice =
                imageops::crop_imm(pixels.as_ref(), 0, chunk.start, pixels.width(), chunk.len())
                    .to_image();
            canvas
                .copy_from(&slice, x, y)
                .map_err(|e| degenerate_geometry("paste chunk", &e))?;
            on_chunk();

            y += chunk.len() + margin;
        }
        x += column_width + margin;
    }

    Ok(canvas)
}
