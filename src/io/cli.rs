//! Command-line interface for stitching rendered patches into a quilt

use crate::engine::pipeline::{CutPointTable, QuiltConfig, Quilter};
use crate::io::configuration::{
    DEFAULT_LOG_LEVEL, DEFAULT_MARGIN, DEFAULT_OUTPUT_PATH, PATCH_EXTENSION,
};
use crate::io::error::{QuiltError, Result, invalid_parameter};
use crate::io::image::{corner_color, normalize_widths, parse_hex_color, save_quilt};
use crate::io::patch::{Patch, PatchFile};
use crate::io::progress::ProgressManager;
use crate::layout::ratio::AspectRatio;
use clap::Parser;
use image::Rgba;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "codequilt")]
#[command(
    author,
    version,
    about = "Stitch rendered code images into a single quilt"
)]
/// Command-line arguments for the quilt tool
pub struct Cli {
    /// Patch PNG files or directories of PNG files, in quilt order
    #[arg(value_name = "PATCHES", required = true)]
    pub patches: Vec<PathBuf>,

    /// Where to write the composed quilt
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Gap in pixels around and between patches
    #[arg(short, long, default_value_t = DEFAULT_MARGIN)]
    pub margin: u32,

    /// Canvas color as RRGGBB or RRGGBBAA (defaults to the first patch's corner pixel)
    #[arg(short, long, value_parser = parse_hex_color)]
    pub background: Option<Rgba<u8>>,

    /// Candidate aspect ratio W:H, repeatable; replaces the default menu
    #[arg(short, long = "ratio", value_name = "W:H")]
    pub ratios: Vec<AspectRatio>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter implied by the verbosity flags
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "warn",
            0 => DEFAULT_LOG_LEVEL,
            1 => "debug",
            _ => "trace",
        }
    }

    /// Candidate ratios requested on the command line, or the default menu
    pub fn candidate_ratios(&self) -> Vec<AspectRatio> {
        if self.ratios.is_empty() {
            AspectRatio::default_menu()
        } else {
            self.ratios.clone()
        }
    }
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence over `level`
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Orchestrates loading, layout and stitching of the patch files
pub struct QuiltProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl QuiltProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Stitch the patches named on the command line and save the quilt
    ///
    /// Returns the path the quilt was written to.
    ///
    /// # Errors
    ///
    /// Returns an error if no patches are found, a patch cannot be read, the
    /// layout search fails, or the quilt cannot be saved
    pub fn process(&mut self) -> Result<PathBuf> {
        let files = self.collect_files()?;
        if files.is_empty() {
            return Err(QuiltError::EmptyInput);
        }
        info!(patches = files.len(), "collected patch files");

        let patches = self.load_patches(&files)?;
        let background = match self.cli.background {
            Some(color) => color,
            None => patches
                .first()
                .map(corner_color)
                .transpose()?
                .ok_or(QuiltError::EmptyInput)?,
        };

        let bar = self.progress_manager.start_stage("resize patches", patches.len());
        let patches = normalize_widths(patches, background, || bar.inc(1))?;
        bar.finish();

        let quilter = Quilter::new(QuiltConfig {
            margin: self.cli.margin,
            background,
            ratios: self.cli.candidate_ratios(),
        })?;
        Quilter::column_width(&patches)?;

        let bar = self.progress_manager.start_stage("load cut points", patches.len());
        let table = CutPointTable::compute(&patches, || bar.inc(1))?;
        bar.finish();

        let ratio_count = quilter.config().ratios.len();
        let bar = self.progress_manager.start_stage("pick aspect ratio", ratio_count);
        let layout = quilter.layout(&patches, &table, |_| bar.inc(1))?;
        bar.finish();

        let bar = self
            .progress_manager
            .start_stage("stitch patches", layout.total_chunks());
        let image = quilter.compose(&patches, &layout, || bar.inc(1))?;
        bar.finish();

        self.progress_manager.finish();

        info!(path = %self.cli.output.display(), "saving quilt");
        save_quilt(&image, &self.cli.output)?;
        Ok(self.cli.output.clone())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for target in &self.cli.patches {
            if target.is_file() {
                if has_patch_extension(target) {
                    files.push(target.clone());
                } else {
                    return Err(invalid_parameter(
                        "patches",
                        &target.display(),
                        &"patch files must be PNG images",
                    ));
                }
            } else if target.is_dir() {
                let mut entries = Vec::new();
                let listing = std::fs::read_dir(target).map_err(|e| QuiltError::FileSystem {
                    path: target.clone(),
                    operation: "read directory",
                    source: e,
                })?;
                for entry in listing {
                    let path = entry?.path();
                    if path.is_file() && has_patch_extension(&path) {
                        entries.push(path);
                    }
                }
                if entries.is_empty() {
                    warn!(dir = %target.display(), "directory contains no patch images");
                }
                entries.sort();
                files.extend(entries);
            } else {
                return Err(invalid_parameter(
                    "patches",
                    &target.display(),
                    &"must be a PNG file or a directory",
                ));
            }
        }

        Ok(files)
    }

    fn load_patches(&mut self, files: &[PathBuf]) -> Result<Vec<Patch>> {
        let bar = self.progress_manager.start_stage("reading sources", files.len());
        let patches = files
            .iter()
            .map(|path| {
                let patch = PatchFile::open(path).map(Patch::from);
                bar.inc(1);
                patch
            })
            .collect::<Result<Vec<_>>>()?;
        bar.finish();
        Ok(patches)
    }
}

fn has_patch_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PATCH_EXTENSION))
}
