//! Greedy column filling at safe split rows
//!
//! Patches are consumed strictly in order. Each is appended to the current
//! column while it fits; a patch taller than the space left is cut at the
//! safe row nearest the column's ideal end and the remainder continues in a
//! fresh column. Columns are never revisited.

use crate::analysis::cut_points::SafeCutSet;
use crate::io::error::{QuiltError, Result, degenerate_geometry};
use tracing::trace;

/// Layout-relevant view of one patch
#[derive(Clone, Copy, Debug)]
pub struct PatchExtent<'a> {
    /// Identity used in error messages
    pub name: &'a str,
    /// Pixel height of the patch
    pub height: u32,
    /// Rows at which the patch may be split
    pub cut_points: &'a SafeCutSet,
}

/// Half-open row range `[start, stop)` of one patch placed in a column
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Chunk {
    /// Index of the patch in the caller's patch list
    pub patch: usize,
    /// First row of the slice
    pub start: u32,
    /// One past the last row of the slice
    pub stop: u32,
}

impl Chunk {
    /// Number of rows in the slice
    ///
    /// Zero for an inverted range.
    pub const fn len(&self) -> u32 {
        self.stop.saturating_sub(self.start)
    }

    /// Always false for chunks produced by the chunker
    pub const fn is_empty(&self) -> bool {
        self.stop <= self.start
    }
}

/// Chunks stacked top to bottom in one column
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Column {
    chunks: Vec<Chunk>,
    content_height: u32,
}

impl Column {
    fn push(&mut self, chunk: Chunk) {
        self.content_height += chunk.len();
        self.chunks.push(chunk);
    }

    /// Chunks in paste order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Sum of chunk lengths, margins excluded
    pub const fn content_height(&self) -> u32 {
        self.content_height
    }

    /// Unused space below the content relative to `target`
    ///
    /// Negative when a split landed past the ideal row.
    pub fn dangling(&self, target: u32) -> i64 {
        i64::from(target) - i64::from(self.content_height)
    }

    /// Content height plus one margin between each pair of chunks
    pub fn padded_height(&self, margin: u32) -> u64 {
        let gaps = self.chunks.len().saturating_sub(1) as u64;
        u64::from(self.content_height) + gaps * u64::from(margin)
    }
}

impl FromIterator<Chunk> for Column {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        let mut column = Self::default();
        for chunk in iter {
            column.push(chunk);
        }
        column
    }
}

/// Outcome of one chunker step
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Step {
    /// The rest of the current patch fit; moved to the next patch
    Placed,
    /// The current patch was cut; its remainder continues in a new column
    Split,
}

struct Chunker<'p, 'a> {
    target: u32,
    patches: &'p [PatchExtent<'a>],
    patch: usize,
    start: u32,
    remaining_space: u32,
    fresh_column: bool,
    columns: Vec<Column>,
}

impl<'p, 'a> Chunker<'p, 'a> {
    const fn new(target: u32, patches: &'p [PatchExtent<'a>]) -> Self {
        Self {
            target,
            patches,
            patch: 0,
            start: 0,
            remaining_space: target,
            fresh_column: true,
            columns: Vec::new(),
        }
    }

    fn emit(&mut self, stop: u32) {
        if self.fresh_column {
            self.columns.push(Column::default());
            self.fresh_column = false;
        }
        if let Some(column) = self.columns.last_mut() {
            column.push(Chunk {
                patch: self.patch,
                start: self.start,
                stop,
            });
        }
    }

    fn step(&mut self, extent: &PatchExtent<'a>) -> Result<Step> {
        if self.remaining_space == 0 {
            self.remaining_space = self.target;
            self.fresh_column = true;
        }

        let remaining_height = extent.height - self.start;
        if remaining_height <= self.remaining_space {
            // Zero-height patches occupy no rows and produce no chunk
            if remaining_height > 0 {
                self.emit(extent.height);
            }
            self.remaining_space -= remaining_height;
            self.patch += 1;
            self.start = 0;
            return Ok(Step::Placed);
        }

        let ideal_row = self.start + self.remaining_space;
        match extent
            .cut_points
            .closest_between(self.start, extent.height, ideal_row)
        {
            Some(cut) => {
                self.emit(cut);
                self.remaining_space = 0;
                self.start = cut;
                Ok(Step::Split)
            }
            None => Err(QuiltError::UnsafeSplit {
                patch: extent.name.to_string(),
                start: self.start,
                ideal_row,
            }),
        }
    }

    fn run(mut self) -> Result<Vec<Column>> {
        let patches = self.patches;
        while let Some(extent) = patches.get(self.patch) {
            let step = self.step(extent)?;
            trace!(patch = extent.name, ?step, start = self.start, "chunker step");
        }
        Ok(self.columns)
    }
}

/// Partition `patches` into columns of at most roughly `target` rows
///
/// # Errors
///
/// Returns an error if:
/// - `target` is zero
/// - A patch must be split but has no safe cut row beyond the rows already placed
pub fn chunk(target: u32, patches: &[PatchExtent<'_>]) -> Result<Vec<Column>> {
    if target == 0 {
        return Err(degenerate_geometry(
            "chunk",
            &"target column height is zero",
        ));
    }

    Chunker::new(target, patches).run()
}
