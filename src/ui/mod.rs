//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting for the fetch, sync and publish steps
//! - Interactive spinners and bars using indicatif
//! - Silent progress for non-interactive runs and tests
//! - Styled run summaries ([`display`])
//!
//! Pipeline code only talks to the [`ProgressReporter`] trait; the command
//! layer picks the implementation.

pub mod display;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Step;

/// Progress reporter for the sync pipeline
pub trait ProgressReporter {
    /// A pipeline step begins
    fn start_step(&mut self, step: Step, message: &str);

    /// The sync step moves on to another consumer (1-based `current`)
    fn update_consumer(&mut self, consumer: &str, current: usize, total: usize);

    /// The current step completed
    fn finish_step(&mut self, message: &str);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a spinner per step
#[derive(Default)]
pub struct InteractiveProgressReporter {
    current: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_step(&mut self, step: Step, message: &str) {
        if let Some(previous) = self.current.take() {
            previous.finish_and_clear();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(step.to_string());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        self.current = Some(pb);
    }

    fn update_consumer(&mut self, consumer: &str, current: usize, total: usize) {
        if let Some(pb) = &self.current {
            if pb.length() != Some(total as u64) {
                pb.disable_steady_tick();
                pb.set_style(Self::bar_style());
                pb.set_length(total as u64);
            }
            pb.set_position(current.saturating_sub(1) as u64);
            pb.set_message(consumer.to_string());
        }
    }

    fn finish_step(&mut self, message: &str) {
        if let Some(pb) = self.current.take() {
            if let Some(total) = pb.length() {
                pb.set_position(total);
            }
            pb.finish_with_message(message.to_string());
        }
    }

    fn abandon(&mut self) {
        if let Some(pb) = self.current.take() {
            pb.abandon();
        }
    }
}

/// No-op progress reporter for quiet runs, piped output and tests
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start_step(&mut self, step: Step, message: &str) {
        log::debug!("[{step}] {message}");
    }

    fn update_consumer(&mut self, _consumer: &str, _current: usize, _total: usize) {}

    fn finish_step(&mut self, message: &str) {
        log::debug!("{message}");
    }

    fn abandon(&mut self) {}
}
