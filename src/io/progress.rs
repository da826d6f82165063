//! Per-stage progress display for a quilt run

use crate::io::configuration::{PROGRESS_BAR_WIDTH, STAGE_TITLE_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{msg:<{STAGE_TITLE_WIDTH}}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} [{{elapsed_precise}}]"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates one progress bar per pipeline stage
///
/// Bars stack in the order stages are started. A hidden manager hands out
/// bars that accept updates but never draw.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    stages: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            stages: Vec::new(),
        }
    }

    /// Create a manager whose bars are never drawn
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            stages: Vec::new(),
        }
    }

    /// Start a stage with `len` steps and return its bar
    ///
    /// The returned handle is cheap to clone and safe to tick from worker threads.
    pub fn start_stage(&mut self, title: &str, len: usize) -> ProgressBar {
        let bar = self.multi_progress.add(ProgressBar::new(len as u64));
        bar.set_style(STAGE_STYLE.clone());
        bar.set_message(title.to_string());
        self.stages.push(bar.clone());
        bar
    }

    /// Number of stages started so far
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Mark every stage as complete and release the terminal
    pub fn finish(&self) {
        for bar in &self.stages {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }
}
