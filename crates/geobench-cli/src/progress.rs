use geobench_core::suite::SuiteEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output::OutputWriter;

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}

/// Finish a progress bar with success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Finish a progress bar with error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.abandon_with_message(format!("✗ {}", message));
}

/// Console progress for a benchmark suite run.
///
/// Spinners cover point generation, loading and each benchmark; result lines
/// are printed as each benchmark finishes.
pub struct SuiteProgress<'a> {
    output: &'a OutputWriter,
    active: Option<ProgressBar>,
    visible: bool,
    benchmarks_started: bool,
}

impl<'a> SuiteProgress<'a> {
    pub fn new(output: &'a OutputWriter) -> Self {
        Self {
            output,
            active: None,
            visible: true,
            benchmarks_started: false,
        }
    }

    /// Track progress without drawing spinners
    #[cfg(test)]
    pub fn hidden(output: &'a OutputWriter) -> Self {
        Self {
            visible: false,
            ..Self::new(output)
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn handle(&mut self, event: SuiteEvent<'_>) {
        match event {
            SuiteEvent::GeneratingPoints { count } => {
                self.start(&format!("Generating {} points...", count));
            }
            SuiteEvent::PointsGenerated { count } => {
                self.finish(&format!("Generated {} points", count));
            }
            SuiteEvent::LoadingBackend { backend } => {
                self.start(&format!("Loading {}...", backend));
            }
            SuiteEvent::BackendLoaded { backend, points } => {
                self.finish(&format!("Loaded {} points into {}", points, backend));
            }
            SuiteEvent::BenchmarkStarted { label } => {
                if !self.benchmarks_started {
                    self.benchmarks_started = true;
                    self.output.section("--- Benchmarks (indexed, same dataset) ---");
                }
                self.start(&format!("Running {}...", label));
            }
            SuiteEvent::BenchmarkFinished { report } => {
                if let Some(pb) = self.active.take() {
                    pb.finish_and_clear();
                }
                self.output.report(&report.report);
            }
        }
    }

    /// Mark the current step as failed
    pub fn abandon(&mut self, message: &str) {
        if let Some(pb) = self.active.take() {
            finish_error(&pb, message);
        }
    }

    fn start(&mut self, message: &str) {
        if let Some(previous) = self.active.take() {
            previous.finish_and_clear();
        }

        let pb = if self.visible {
            create_spinner(message)
        } else {
            let pb = ProgressBar::hidden();
            pb.set_message(message.to_string());
            pb
        };
        self.active = Some(pb);
    }

    fn finish(&mut self, message: &str) {
        if let Some(pb) = self.active.take() {
            finish_success(&pb, message);
        }
    }
}
