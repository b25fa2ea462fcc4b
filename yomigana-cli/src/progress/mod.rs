//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for chunk annotation
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize the progress bar; a single chunk gets none
    pub fn init_chunks(&mut self, total_chunks: u64) {
        if self.quiet || total_chunks < 2 {
            return;
        }

        let pb = ProgressBar::new(total_chunks);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} chunks {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a finished chunk
    pub fn chunk_completed(&self, annotations: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("+{annotations} ruby"));
            pb.inc(1);
        }
    }

    /// Note that the remaining chunks are being passed through
    pub fn abandon(&self, reason: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.abandon_with_message(reason.to_string());
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Whether a bar is being drawn
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }
}
