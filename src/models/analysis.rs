// file: src/models/analysis.rs
// description: aggregate analysis result and success-or-error response envelope
// reference: internal data structures

use crate::analyzers::EnhancedAnalysis;
use crate::error::{AnalysisError, ErrorReport};
use crate::models::{MatchResult, Recommendations, SeniorityComparison};
use crate::reference::IndustryScore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustryComparison {
    pub resume: Vec<IndustryScore>,
    pub jd: Vec<IndustryScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: String,
    pub analyzed_at: String,
    /// Weighted section similarity, 0-100.
    pub score: f64,
    pub role_fit_points: Vec<String>,
    pub comp_details: MatchResult,
    pub seniority: SeniorityComparison,
    pub seniority_analysis: String,
    pub comp_analysis: String,
    pub industries: IndustryComparison,
    pub enhanced_analysis: EnhancedAnalysis,
    pub recommendations: Recommendations,
    pub resume_hash: String,
    pub jd_hash: String,
    pub timings_ms: BTreeMap<String, u64>,
}

/// Either a complete result or an error descriptor; never partial.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Success(Box<AnalysisResult>),
    Failure(ErrorReport),
}

impl AnalysisResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResponse::Success(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisResponse::Success(result) => Some(result),
            AnalysisResponse::Failure(_) => None,
        }
    }
}

impl From<crate::error::Result<AnalysisResult>> for AnalysisResponse {
    fn from(result: crate::error::Result<AnalysisResult>) -> Self {
        match result {
            Ok(analysis) => AnalysisResponse::Success(Box::new(analysis)),
            Err(err) => AnalysisResponse::Failure(ErrorReport::from(&err)),
        }
    }
}

impl From<AnalysisError> for AnalysisResponse {
    fn from(err: AnalysisError) -> Self {
        AnalysisResponse::Failure(ErrorReport::from(&err))
    }
}
