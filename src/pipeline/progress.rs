// file: src/pipeline/progress.rs
// description: progress bars and run statistics for batch analysis
// reference: uses indicatif for progress bars and tracks per-run counters

use crate::models::AnalysisResponse;
use crate::utils::per_second;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchStats {
    pub resumes_analyzed: usize,
    pub resumes_failed: usize,
    /// Analyses with at least one critical recommendation.
    pub critical_alerts: usize,
    pub total_bytes_processed: u64,
    /// Sum of match scores over successful analyses.
    pub score_total: f64,
    pub duration_ms: u64,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resumes_per_second(&self) -> f64 {
        per_second(self.resumes_analyzed, Duration::from_millis(self.duration_ms))
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.resumes_analyzed + self.resumes_failed;
        if total == 0 {
            return 0.0;
        }
        (self.resumes_analyzed as f64 / total as f64) * 100.0
    }

    pub fn average_score(&self) -> f64 {
        if self.resumes_analyzed == 0 {
            return 0.0;
        }
        self.score_total / self.resumes_analyzed as f64
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    resumes_analyzed: Arc<AtomicUsize>,
    resumes_failed: Arc<AtomicUsize>,
    critical_alerts: Arc<AtomicUsize>,
    bytes_processed: Arc<AtomicU64>,
    /// Score total in hundredths, so it can live in an atomic.
    score_centis: Arc<AtomicU64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, true)
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        Self::build(MultiProgress::new(), total_files, colored)
    }

    /// Counts without drawing; for tests and non-interactive runs.
    pub fn hidden(total_files: usize) -> Self {
        Self::build(
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            total_files,
            false,
        )
    }

    fn build(multi_progress: MultiProgress, total_files: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total_files as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            resumes_analyzed: Arc::new(AtomicUsize::new(0)),
            resumes_failed: Arc::new(AtomicUsize::new(0)),
            critical_alerts: Arc::new(AtomicUsize::new(0)),
            bytes_processed: Arc::new(AtomicU64::new(0)),
            score_centis: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Counts one finished analysis, successful or not.
    pub fn record(&self, response: &AnalysisResponse) {
        match response.result() {
            Some(result) => {
                self.resumes_analyzed.fetch_add(1, Ordering::SeqCst);
                self.score_centis
                    .fetch_add((result.score * 100.0).round() as u64, Ordering::SeqCst);
                if result.recommendations.critical_count() > 0 {
                    self.critical_alerts.fetch_add(1, Ordering::SeqCst);
                }
            }
            None => {
                self.resumes_failed.fetch_add(1, Ordering::SeqCst);
            }
        }
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_bytes_processed(&self, bytes: u64) {
        self.bytes_processed.fetch_add(bytes, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.main_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Analysis complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> BatchStats {
        BatchStats {
            resumes_analyzed: self.resumes_analyzed.load(Ordering::SeqCst),
            resumes_failed: self.resumes_failed.load(Ordering::SeqCst),
            critical_alerts: self.critical_alerts.load(Ordering::SeqCst),
            total_bytes_processed: self.bytes_processed.load(Ordering::SeqCst),
            score_total: self.score_centis.load(Ordering::SeqCst) as f64 / 100.0,
            duration_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }

    fn update_detail_bar(&self) {
        let analyzed = self.resumes_analyzed.load(Ordering::SeqCst);
        let failed = self.resumes_failed.load(Ordering::SeqCst);
        let critical = self.critical_alerts.load(Ordering::SeqCst);

        let message = format!(
            "Analyzed: {} | Failed: {} | With critical alerts: {}",
            analyzed, failed, critical
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}"
    };
    let chars = if colored { "█▓▒░" } else { "=>-" };

    match ProgressStyle::default_bar().template(template) {
        Ok(style) => bar.set_style(style.progress_chars(chars)),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_batch_stats_calculations() {
        let stats = BatchStats {
            resumes_analyzed: 100,
            resumes_failed: 10,
            score_total: 6500.0,
            duration_ms: 10_000,
            ..BatchStats::new()
        };

        assert_eq!(stats.resumes_per_second(), 10.0);
        assert_eq!(stats.average_score(), 65.0);
        assert!((stats.success_rate() - 90.909).abs() < 0.01);
    }

    #[test]
    fn test_batch_stats_empty() {
        let stats = BatchStats::new();
        assert_eq!(stats.resumes_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.average_score(), 0.0);
    }

    #[test]
    fn test_progress_tracker_counts_failures() {
        let tracker = ProgressTracker::hidden(3);

        let failure = AnalysisResponse::from(AnalysisError::Validation("too short".to_string()));
        tracker.record(&failure);
        tracker.record(&failure);
        tracker.add_bytes_processed(1024);

        let stats = tracker.get_stats();
        assert_eq!(stats.resumes_failed, 2);
        assert_eq!(stats.resumes_analyzed, 0);
        assert_eq!(stats.total_bytes_processed, 1024);
    }
}
