// file: src/pipeline/mod.rs
// description: analysis engine and batch progress module exports
// reference: pipeline orchestration

mod orchestrator;
mod progress;

pub use orchestrator::{AnalysisEngine, BatchItem};
pub use progress::{BatchStats, ProgressTracker};
