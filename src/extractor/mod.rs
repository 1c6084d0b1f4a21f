// file: src/extractor/mod.rs
// description: skill and seniority extraction module exports
// reference: internal module structure

pub mod filter;
pub mod patterns;
pub mod seniority;
pub mod skills;

pub use filter::{EXCLUSION_RULES, ExclusionRule, Verdict, deciding_rule, is_non_skill_phrase};
pub use seniority::SeniorityExtractor;
pub use skills::{Candidate, SkillExtractor, expand_abbreviation, regex_skills};
