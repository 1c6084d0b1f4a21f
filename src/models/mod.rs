// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod analysis;
pub mod document;
pub mod match_result;
pub mod recommendation;
pub mod seniority;
pub mod skill;

pub use analysis::{AnalysisResponse, AnalysisResult, IndustryComparison};
pub use document::{Document, SectionKind, Sections};
pub use match_result::MatchResult;
pub use recommendation::{Priority, Recommendation, Recommendations};
pub use seniority::{SeniorityComparison, SeniorityProfile};
pub use skill::{Skill, SkillSet, SkillSource};
