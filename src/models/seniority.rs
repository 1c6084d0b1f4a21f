// file: src/models/seniority.rs
// description: years of experience and average seniority level estimate
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeniorityProfile {
    pub years: f64,
    pub level: f64,
    pub level_count: u32,
}

impl SeniorityProfile {
    pub fn new(years: f64, level: f64, level_count: u32) -> Self {
        Self {
            years,
            level,
            level_count,
        }
    }
}

/// Resume and JD profiles side by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeniorityComparison {
    pub resume: SeniorityProfile,
    pub jd: SeniorityProfile,
}
