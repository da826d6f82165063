//! End-to-end quilt assembly over an ordered patch list

use crate::analysis::cut_points::{SafeCutSet, analyze_patch};
use crate::canvas::compose::compose;
use crate::io::configuration::DEFAULT_MARGIN;
use crate::io::error::{QuiltError, Result, degenerate_geometry, invalid_parameter};
use crate::io::patch::PatchSource;
use crate::layout::chunking::PatchExtent;
use crate::layout::ratio::AspectRatio;
use crate::layout::selection::{Layout, select};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Safe cut sets keyed by patch index, computed once per patch
#[derive(Clone, Debug, Default)]
pub struct CutPointTable {
    entries: HashMap<usize, SafeCutSet>,
}

impl CutPointTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyse every patch in parallel
    ///
    /// Results are keyed by the index of the patch they were computed from,
    /// independent of completion order. `on_done` runs once per finished
    /// patch, possibly from several worker threads.
    ///
    /// # Errors
    ///
    /// Returns the first patch failure, tagged with that patch's identity
    #[instrument(skip_all, fields(patches = patches.len()))]
    pub fn compute<P, F>(patches: &[P], on_done: F) -> Result<Self>
    where
        P: PatchSource + Sync,
        F: Fn() + Sync,
    {
        let entries = patches
            .par_iter()
            .enumerate()
            .map(|(index, patch)| -> Result<(usize, SafeCutSet)> {
                let cut_points = analyze_patch(patch)?;
                debug!(
                    patch = patch.name(),
                    safe_rows = cut_points.len(),
                    "analysed cut points"
                );
                on_done();
                Ok((index, cut_points))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self { entries })
    }

    /// Record the cut set for one patch, replacing any previous entry
    pub fn insert(&mut self, patch: usize, cut_points: SafeCutSet) {
        self.entries.insert(patch, cut_points);
    }

    /// Cut set of the patch at `patch`, if analysed
    pub fn get(&self, patch: usize) -> Option<&SafeCutSet> {
        self.entries.get(&patch)
    }

    /// Number of analysed patches
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no patch has been analysed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parameters of a quilt run
#[derive(Clone, Debug)]
pub struct QuiltConfig {
    /// Gap in pixels around and between chunks
    pub margin: u32,
    /// Fill color of the canvas
    pub background: Rgba<u8>,
    /// Candidate canvas aspect ratios in priority order
    pub ratios: Vec<AspectRatio>,
}

impl Default for QuiltConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            background: Rgba([0, 0, 0, 0]),
            ratios: AspectRatio::default_menu(),
        }
    }
}

/// A composed quilt and the layout it was built from
#[derive(Clone, Debug)]
pub struct Quilt {
    /// Composed canvas
    pub image: RgbaImage,
    /// Layout chosen by the aspect ratio search
    pub layout: Layout,
}

/// Runs validation, cut point analysis, layout search and composition
#[derive(Clone, Debug)]
pub struct Quilter {
    config: QuiltConfig,
}

impl Quilter {
    /// Create a quilter from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the candidate ratio list is empty
    pub fn new(config: QuiltConfig) -> Result<Self> {
        if config.ratios.is_empty() {
            return Err(invalid_parameter(
                "ratios",
                &"[]",
                &"at least one candidate ratio is required",
            ));
        }
        Ok(Self { config })
    }

    /// Active configuration
    pub const fn config(&self) -> &QuiltConfig {
        &self.config
    }

    /// Check the patch list and return the shared column width
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `patches` is empty
    /// - Any patch differs in width from the first
    /// - The shared width is zero
    pub fn column_width<P: PatchSource>(patches: &[P]) -> Result<u32> {
        let first = patches.first().ok_or(QuiltError::EmptyInput)?;
        let expected = first.width();

        if let Some(odd) = patches.iter().find(|patch| patch.width() != expected) {
            return Err(QuiltError::InconsistentWidth {
                patch: odd.name().to_string(),
                expected,
                found: odd.width(),
            });
        }

        if expected == 0 {
            return Err(degenerate_geometry(
                "column width",
                &"patches have zero width",
            ));
        }

        Ok(expected)
    }

    /// Search the candidate ratios for the least wasteful layout
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, a patch is missing from `table`,
    /// or any candidate fails to chunk
    pub fn layout<P, F>(&self, patches: &[P], table: &CutPointTable, on_evaluated: F) -> Result<Layout>
    where
        P: PatchSource,
        F: FnMut(&Layout),
    {
        let column_width = Self::column_width(patches)?;
        let extents = patches
            .iter()
            .enumerate()
            .map(|(index, patch)| {
                table
                    .get(index)
                    .map(|cut_points| PatchExtent {
                        name: patch.name(),
                        height: patch.height(),
                        cut_points,
                    })
                    .ok_or_else(|| QuiltError::InvalidSourceData {
                        reason: format!("no cut points recorded for patch '{}'", patch.name()),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let layout = select(&extents, column_width, &self.config.ratios, on_evaluated)?;
        info!(
            ratio = %layout.ratio,
            column_height = layout.column_height,
            columns = layout.columns.len(),
            waste = layout.waste,
            "selected layout"
        );
        Ok(layout)
    }

    /// Paste the chunks of `layout` into a new canvas
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or a patch cannot be read
    pub fn compose<P, F>(&self, patches: &[P], layout: &Layout, on_chunk: F) -> Result<RgbaImage>
    where
        P: PatchSource,
        F: FnMut(),
    {
        let column_width = Self::column_width(patches)?;
        compose(
            layout,
            patches,
            column_width,
            self.config.margin,
            self.config.background,
            on_chunk,
        )
    }

    /// Build a quilt from `patches` in one call
    ///
    /// # Errors
    ///
    /// Returns an error if any stage fails; no partial canvas is produced
    #[instrument(skip_all, fields(patches = patches.len()))]
    pub fn quilt<P>(&self, patches: &[P]) -> Result<Quilt>
    where
        P: PatchSource + Sync,
    {
        Self::column_width(patches)?;
        let table = CutPointTable::compute(patches, || {})?;
        let layout = self.layout(patches, &table, |_| {})?;
        let image = self.compose(patches, &layout, || {})?;
        Ok(Quilt { image, layout })
    }
}
