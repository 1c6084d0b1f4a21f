// file: src/matching/mod.rs
// description: skill matching and false-positive recovery module exports
// reference: internal module structure

pub mod engine;
pub mod recovery;
pub mod validator;

pub use engine::MatchingEngine;
pub use recovery::SentenceRecovery;
pub use validator::{
    GapValidator, LlmGapValidator, NoopValidator, ValidationOutcome, validate_or_passthrough,
};
