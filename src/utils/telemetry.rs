// file: src/utils/telemetry.rs
// description: operation timers and per-stage timing aggregation
// reference: stage timings are attached to every analysis result

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Operation timer for performance tracking
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        debug!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} - {} items in {:.2}s ({:.2} items/sec)",
            self.operation,
            count,
            elapsed.as_secs_f64(),
            per_second(count, elapsed)
        );
        elapsed
    }

    pub fn warn_if_slow(&self, threshold: Duration, message: &str) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "Slow operation [{}]: {} took {:.2}s (threshold: {:.2}s)",
                self.operation,
                message,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }
}

/// Items per second, zero for an empty duration.
pub fn per_second(count: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { count as f64 / secs } else { 0.0 }
}

/// Wall-clock milliseconds spent in each named stage of one operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub operation: String,
    pub stages: BTreeMap<String, u64>,
}

impl PerformanceMetrics {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            stages: BTreeMap::new(),
        }
    }

    /// Runs `f` and records its duration under `stage`.
    pub fn time<T>(&mut self, stage: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.record(stage, start.elapsed());
        value
    }

    /// Repeated stages accumulate.
    pub fn record(&mut self, stage: &str, elapsed: Duration) {
        let ms = elapsed.as_millis() as u64;
        debug!("[{}] {} took {}ms", self.operation, stage, ms);
        *self.stages.entry(stage.to_string()).or_insert(0) += ms;
    }

    pub fn total_ms(&self) -> u64 {
        self.stages.values().sum()
    }

    pub fn slowest(&self) -> Option<(&str, u64)> {
        self.stages
            .iter()
            .max_by_key(|(_, ms)| **ms)
            .map(|(stage, ms)| (stage.as_str(), *ms))
    }

    pub fn format(&self) -> String {
        let mut output = format!("{}: {}ms total", self.operation, self.total_ms());
        if let Some((stage, ms)) = self.slowest() {
            output.push_str(&format!(" (slowest: {} {}ms)", stage, ms));
        }
        output
    }

    /// Stage map plus a `total` entry.
    pub fn into_timings(self) -> BTreeMap<String, u64> {
        let total = self.total_ms();
        let mut stages = self.stages;
        stages.insert("total".to_string(), total);
        stages
    }
}
