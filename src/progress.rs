//! Progress display for the resolution workflow
//!
//! Resolution spends almost all of its time waiting on the package index,
//! with no useful total to count against, so the display is a single
//! indicatif spinner whose message tracks the current phase. Disabled in
//! quiet and JSON modes to keep machine-readable output clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the resolver works
pub struct Progress {
    /// Whether the display is enabled
    enabled: bool,
    /// Live spinner, present between `spinner` and `finish_and_clear`
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Show the spinner with an initial phase message
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(spinner);
    }

    /// Update the phase message
    pub fn set_message(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Remove the spinner, leaving the terminal clean for the report
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}
