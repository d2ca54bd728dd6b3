//! Progress and trace reporting for long-running fetches
//!
//! Sinks are fire-and-forget. Nothing in the fetch pipeline depends on what
//! a sink does with the signals it receives.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Receives progress signals from a fetch
pub trait ProgressSink: Send + Sync {
    /// A fetch started
    fn start_progress(&self, label: &str);

    /// The fetch finished, successfully or not
    fn stop_progress(&self);

    /// Per-query trace message
    fn debug(&self, message: &str);

    /// `done` of `total` queries have been merged
    fn advance(&self, _done: usize, _total: usize) {}
}

/// Forwards progress to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn start_progress(&self, label: &str) {
        tracing::info!("{}", label);
    }

    fn stop_progress(&self) {
        tracing::debug!("fetch finished");
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

/// Terminal spinner for interactive runs
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        Self { bar }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for SpinnerProgress {
    fn start_progress(&self, label: &str) {
        self.bar.set_message(label.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn stop_progress(&self) {
        self.bar.finish_and_clear();
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn advance(&self, done: usize, total: usize) {
        self.bar
            .set_message(format!("Fetching events... {}/{} queries", done, total));
    }
}
