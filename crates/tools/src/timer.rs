//! Wall-clock timer that reports through tracing.

use std::time::{Duration, Instant};

use tracing::{info, warn};

/// Labelled stopwatch. Each `stop` logs the time since the last `start`.
#[derive(Debug)]
pub struct Timer {
    label: String,
    started: Option<Instant>,
}

impl Timer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: None,
        }
    }

    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Stop the running measurement and return its duration.
    ///
    /// Returns zero if the timer was not started.
    pub fn stop(&mut self) -> Duration {
        let Some(started) = self.started.take() else {
            warn!("Timer '{}' stopped without being started", self.label);
            return Duration::ZERO;
        };

        let elapsed = started.elapsed();
        info!("{}: {:.3} ms", self.label, elapsed.as_secs_f64() * 1000.0);
        elapsed
    }

    /// Time a closure, returning its result.
    pub fn measure<T>(&mut self, f: impl FnOnce() -> T) -> (T, Duration) {
        self.start();
        let value = f();
        (value, self.stop())
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}
