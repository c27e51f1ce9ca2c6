//! Throttled progress logging for long enumerations.

use std::time::Instant;

/// Logs `done / total` at `info` each time another `step` percent completes.
#[derive(Debug, Clone)]
pub struct Progress {
    label: String,
    step: u32,
    last_logged: Option<u32>,
    started: Instant,
}

impl Progress {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_step(label, 10)
    }

    /// `step` is clamped to `1..=100`.
    pub fn with_step(label: impl Into<String>, step: u32) -> Self {
        Self {
            label: label.into(),
            step: step.clamp(1, 100),
            last_logged: None,
            started: Instant::now(),
        }
    }

    /// Whole percent complete; an empty run counts as finished.
    pub fn percent(done: usize, total: usize) -> u32 {
        if total == 0 {
            return 100;
        }
        ((done.min(total) as f64 / total as f64) * 100.0).floor() as u32
    }

    /// Records an update and returns whether it crossed a new step.
    pub fn update(&mut self, done: usize, total: usize) -> bool {
        let bucket = Self::percent(done, total) / self.step * self.step;
        if self.last_logged.is_some_and(|last| last >= bucket) {
            return false;
        }
        self.last_logged = Some(bucket);
        tracing::info!(
            label = %self.label,
            done,
            total,
            percent = bucket,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "progress"
        );
        true
    }
}
