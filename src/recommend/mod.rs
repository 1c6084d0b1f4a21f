// file: src/recommend/mod.rs
// description: role-fit narratives and the recommendation composer
// reference: narrative points plus prioritized optimization guidance

pub mod composer;
pub mod narrative;

pub use composer::{CompositionInput, DEFAULT_MAX_RECOMMENDATIONS, RecommendationComposer};
pub use narrative::{SECTION_WEIGHTS, competency_points, compute_score, context_points, seniority_points};
