//! Safe split row discovery for rendered patches
//!
//! A row is a cut candidate when every pixel in it matches the pixel in
//! column 0, i.e. it is a blank line of the rendering. The top and bottom
//! padding of a patch produce long runs of such rows at either end; those
//! runs are trimmed so only interior blank rows remain usable as splits.

use crate::io::error::{Result, WithContext};
use crate::io::patch::PatchSource;
use bitvec::prelude::*;
use image::RgbaImage;

/// Which end of a candidate list a run is trimmed from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Remove the run of +1 steps starting at the first candidate
    Leading,
    /// Remove the run of -1 steps starting at the last candidate
    Trailing,
}

/// Interior rows of a patch at which it may be split, ascending
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SafeCutSet {
    rows: Vec<u32>,
}

impl SafeCutSet {
    /// Build from raw ascending candidates, trimming both edge runs
    pub fn from_candidates(candidates: &[u32]) -> Self {
        let interior = trim_consecutive(candidates, Direction::Leading);
        let interior = trim_consecutive(interior, Direction::Trailing);
        Self {
            rows: interior.to_vec(),
        }
    }

    /// Build from rows already known to be safe, without trimming
    pub fn from_rows(mut rows: Vec<u32>) -> Self {
        rows.sort_unstable();
        rows.dedup();
        Self { rows }
    }

    /// Safe rows in ascending order
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Number of safe rows
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the patch has no interior blank rows
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Test whether `row` is a safe split row
    pub fn contains(&self, row: u32) -> bool {
        self.rows.binary_search(&row).is_ok()
    }

    /// The safe row nearest to `target`, preferring the lower row on ties
    pub fn closest_to(&self, target: u32) -> Option<u32> {
        self.rows.iter().copied().min_by_key(|row| row.abs_diff(target))
    }

    /// The safe row strictly between `after` and `before` nearest to `target`
    ///
    /// Rows outside the open interval are ignored; ties prefer the lower row.
    pub fn closest_between(&self, after: u32, before: u32, target: u32) -> Option<u32> {
        let lo = self.rows.partition_point(|&row| row <= after);
        let hi = self.rows.partition_point(|&row| row < before);
        self.rows
            .get(lo..hi)?
            .iter()
            .copied()
            .min_by_key(|row| row.abs_diff(target))
    }
}

/// Mark each row of `pixels` whose pixels all equal the pixel in column 0
pub fn uniform_rows(pixels: &RgbaImage) -> BitVec {
    if pixels.width() == 0 {
        return bitvec![1; pixels.height() as usize];
    }

    pixels
        .rows()
        .map(|mut row| row.next().is_none_or(|first| row.all(|pixel| pixel == first)))
        .collect()
}

/// All uniform rows of `pixels`, ascending and untrimmed
pub fn raw_cut_points(pixels: &RgbaImage) -> Vec<u32> {
    if pixels.width() == 0 || pixels.height() == 0 {
        return Vec::new();
    }

    uniform_rows(pixels)
        .iter_ones()
        .map(|row| row as u32)
        .collect()
}

/// Drop the maximal run of consecutive rows at one end of `candidates`
///
/// A list that is a single run trims to empty, as does a single candidate.
pub fn trim_consecutive(candidates: &[u32], direction: Direction) -> &[u32] {
    let breaks_run = |pair: &[u32]| matches!(pair, [a, b] if a.checked_add(1) != Some(*b));

    match direction {
        Direction::Leading => candidates
            .windows(2)
            .position(breaks_run)
            .and_then(|index| candidates.get(index + 1..))
            .unwrap_or(&[]),
        Direction::Trailing => candidates
            .windows(2)
            .rposition(breaks_run)
            .and_then(|index| candidates.get(..=index))
            .unwrap_or(&[]),
    }
}

/// Compute the safe cut set of already-acquired pixels
pub fn analyze_pixels(pixels: &RgbaImage) -> SafeCutSet {
    SafeCutSet::from_candidates(&raw_cut_points(pixels))
}

/// Compute the safe cut set of a patch, holding its pixels only while scanning
///
/// Zero-area patches yield an empty set without being read.
///
/// # Errors
///
/// Returns an error tagged with the patch identity if its pixels cannot be read
pub fn analyze_patch<P: PatchSource + ?Sized>(patch: &P) -> Result<SafeCutSet> {
    let (width, height) = patch.dimensions();
    if width == 0 || height == 0 {
        return Ok(SafeCutSet::default());
    }

    let pixels = patch.pixels().for_patch(patch.name())?;
    Ok(analyze_pixels(&pixels))
}
