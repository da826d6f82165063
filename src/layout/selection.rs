//! Aspect ratio search over greedy column layouts

use crate::io::error::{Result, degenerate_geometry, invalid_parameter};
use crate::layout::chunking::{Column, PatchExtent, chunk};
use crate::layout::ratio::AspectRatio;
use num_traits::ToPrimitive;
use tracing::{debug, instrument};

/// One evaluated packing for a candidate aspect ratio
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Layout {
    /// Ratio the column height was derived from
    pub ratio: AspectRatio,
    /// Target content height of every column
    pub column_height: u32,
    /// Columns left to right
    pub columns: Vec<Column>,
    /// Total dangling space across columns; lower is better
    pub waste: i64,
}

impl Layout {
    /// Number of chunks across all columns
    pub fn total_chunks(&self) -> usize {
        self.columns.iter().map(|column| column.chunks().len()).sum()
    }
}

/// Column height that gives a zero-waste canvas the requested aspect ratio
///
/// The canvas area is about `ratio * h^2` while the content area
/// `column_width * sum(heights)` is fixed, so `h = sqrt(area / ratio)`.
/// Halves round to even.
///
/// # Errors
///
/// Returns an error if the content has zero area or the height does not fit in `u32`
pub fn target_height(
    patches: &[PatchExtent<'_>],
    column_width: u32,
    ratio: AspectRatio,
) -> Result<u32> {
    let total_height: u64 = patches.iter().map(|p| u64::from(p.height)).sum();
    let total_area = u64::from(column_width) * total_height;
    if total_area == 0 {
        return Err(degenerate_geometry(
            "target height",
            &format!("content area is zero ({column_width} px wide, {total_height} px tall)"),
        ));
    }

    let height = (total_area as f64 / ratio.value()).sqrt().round_ties_even();
    match height.to_u32() {
        Some(h) if h > 0 => Ok(h),
        _ => Err(degenerate_geometry(
            "target height",
            &format!("ratio {ratio} yields unusable column height {height}"),
        )),
    }
}

/// Chunk `patches` for a single candidate ratio and score the result
///
/// # Errors
///
/// Returns an error if the target height is degenerate or chunking fails
pub fn evaluate(
    patches: &[PatchExtent<'_>],
    column_width: u32,
    ratio: AspectRatio,
) -> Result<Layout> {
    let column_height = target_height(patches, column_width, ratio)?;
    let columns = chunk(column_height, patches)?;
    let waste = columns
        .iter()
        .map(|column| column.dangling(column_height))
        .sum();

    Ok(Layout {
        ratio,
        column_height,
        columns,
        waste,
    })
}

/// Pick the candidate ratio whose layout leaves the least dangling space
///
/// Candidates are evaluated in order and earlier ones win ties.
/// `on_evaluated` sees every candidate layout as it is scored.
///
/// # Errors
///
/// Returns an error if the candidate list is empty or any candidate fails to
/// chunk; no layout is returned in that case
#[instrument(skip_all, fields(patches = patches.len(), candidates = ratios.len()))]
pub fn select<F>(
    patches: &[PatchExtent<'_>],
    column_width: u32,
    ratios: &[AspectRatio],
    mut on_evaluated: F,
) -> Result<Layout>
where
    F: FnMut(&Layout),
{
    let mut best: Option<Layout> = None;

    for &ratio in ratios {
        let layout = evaluate(patches, column_width, ratio)?;
        debug!(
            %ratio,
            column_height = layout.column_height,
            columns = layout.columns.len(),
            waste = layout.waste,
            "evaluated candidate"
        );
        on_evaluated(&layout);

        if best.as_ref().is_none_or(|current| layout.waste < current.waste) {
            best = Some(layout);
        }
    }

    best.ok_or_else(|| invalid_parameter("ratios", &"[]", &"at least one candidate ratio is required"))
}
