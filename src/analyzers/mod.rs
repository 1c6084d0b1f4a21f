// file: src/analyzers/mod.rs
// description: enhancement analyzers and the aggregate that runs them over one request
// reference: independent scoring passes over resume and jd text

pub mod achievements;
pub mod ats;
pub mod bullet_quality;
pub mod career;
pub mod categorize;
pub mod clusters;
pub mod context;
pub mod evidence;
pub mod leadership;
pub mod readability;
pub mod requirements;
pub mod section_scores;
pub mod severity;
pub mod verbs;

pub use achievements::{Achievements, BulletKind, TaskOutcome, classify_task_vs_outcome, extract_achievements};
pub use ats::{AtsMetrics, KeywordPlacement, analyze_ats_keywords, analyze_keyword_placement};
pub use bullet_quality::{BulletGrade, BulletQuality, score_resume_bullets};
pub use career::{
    ConsistencyCheck, ExperienceProgression, ProgressionQuality, ScopeAnalysis, ScopeLevel,
    analyze_experience_progression, check_consistency, infer_scope_level,
};
pub use categorize::{MissingComplement, SkillCategories, analyze_skill_cooccurrence, classify_hard_vs_soft};
pub use clusters::{CLUSTER_THRESHOLD, REDUNDANCY_THRESHOLD, Redundancy, cluster_skills, detect_skill_redundancies};
pub use context::{GapContext, extract_gap_context};
pub use evidence::{EvidenceQuality, SkillEvidence, assess_skill_evidence};
pub use leadership::{LeadershipSignals, detect_leadership_signals};
pub use readability::{Readability, calculate_readability};
pub use requirements::{
    EducationValidation, ExperienceValidation, RequirementSeverity, validate_education_requirements,
    validate_years_experience,
};
pub use section_scores::{SectionScores, score_resume_sections};
pub use severity::{GapSeverity, SeverityBand, score_gap_severity};
pub use verbs::{VerbStrength, analyze_action_verbs};

use crate::models::Sections;
use crate::nlp::{Embedder, LanguagePipeline, ParsedText};
use crate::reference::{CertificationCatalog, CertificationGaps};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillClusters {
    pub resume: BTreeMap<String, Vec<String>>,
    pub jd: BTreeMap<String, Vec<String>>,
}

/// Everything the analyzers read. Built once per request by the engine.
pub struct AnalyzerInput<'a> {
    pub resume_text: &'a str,
    pub jd_text: &'a str,
    pub resume_parsed: &'a ParsedText,
    pub jd_parsed: &'a ParsedText,
    pub resume_sections: &'a Sections,
    pub resume_skills: &'a [String],
    pub jd_skills: &'a [String],
    pub gaps: &'a [String],
    pub resume_years: f64,
    pub jd_industry: Option<&'a str>,
    pub current_year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedAnalysis {
    pub achievements: Achievements,
    pub verb_strength: VerbStrength,
    pub leadership_signals: LeadershipSignals,
    pub task_vs_outcome: TaskOutcome,
    pub skill_clusters: SkillClusters,
    pub ats_optimization: AtsMetrics,
    pub section_scores: SectionScores,
    pub skill_redundancies: Vec<Redundancy>,
    pub gap_categorization: SkillCategories,
    pub gap_context: BTreeMap<String, GapContext>,
    pub experience_progression: ExperienceProgression,
    pub skill_cooccurrence: Vec<MissingComplement>,
    pub readability: Readability,
    pub scope_analysis: ScopeAnalysis,
    pub consistency_check: ConsistencyCheck,
    pub gap_severity: Vec<GapSeverity>,
    pub skill_evidence: Vec<SkillEvidence>,
    pub keyword_placement: KeywordPlacement,
    pub bullet_quality: BulletQuality,
    pub certification_gaps: CertificationGaps,
    pub education_validation: EducationValidation,
    pub experience_validation: ExperienceValidation,
}

/// Embedding-backed analyzers fall back to an empty result on failure.
fn or_neutral<T: Default>(name: &str, result: crate::error::Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("{} analyzer failed, using neutral result: {}", name, e);
        T::default()
    })
}

impl EnhancedAnalysis {
    pub fn compute(
        input: &AnalyzerInput<'_>,
        embedder: &dyn Embedder,
        pipeline: &dyn LanguagePipeline,
        certifications: &CertificationCatalog,
    ) -> Self {
        let skill_clusters = SkillClusters {
            resume: or_neutral(
                "resume skill clusters",
                cluster_skills(input.resume_skills, embedder, CLUSTER_THRESHOLD),
            ),
            jd: or_neutral(
                "jd skill clusters",
                cluster_skills(input.jd_skills, embedder, CLUSTER_THRESHOLD),
            ),
        };

        let analysis = Self {
            achievements: extract_achievements(input.resume_text),
            verb_strength: analyze_action_verbs(input.resume_parsed),
            leadership_signals: detect_leadership_signals(input.resume_text),
            task_vs_outcome: classify_task_vs_outcome(input.resume_parsed),
            skill_clusters,
            ats_optimization: analyze_ats_keywords(input.resume_text, input.jd_text, input.jd_skills),
            section_scores: score_resume_sections(input.resume_sections, input.jd_skills, pipeline),
            skill_redundancies: or_neutral(
                "skill redundancy",
                detect_skill_redundancies(input.resume_skills, embedder, REDUNDANCY_THRESHOLD),
            ),
            gap_categorization: classify_hard_vs_soft(input.gaps),
            gap_context: or_neutral(
                "gap context",
                extract_gap_context(input.resume_parsed, input.jd_parsed, input.gaps, embedder),
            ),
            experience_progression: analyze_experience_progression(input.resume_text, input.current_year),
            skill_cooccurrence: analyze_skill_cooccurrence(input.resume_skills, input.jd_skills, input.gaps),
            readability: calculate_readability(input.resume_parsed),
            scope_analysis: infer_scope_level(input.resume_text, input.jd_text),
            consistency_check: check_consistency(input.resume_parsed, input.resume_text, input.current_year),
            gap_severity: score_gap_severity(input.gaps, input.jd_text),
            skill_evidence: assess_skill_evidence(input.resume_parsed, input.resume_skills),
            keyword_placement: analyze_keyword_placement(input.resume_text, input.jd_skills),
            bullet_quality: score_resume_bullets(input.resume_parsed),
            certification_gaps: certifications.certification_gaps(input.resume_text, input.jd_text, input.jd_industry),
            education_validation: validate_education_requirements(input.resume_text, input.jd_text),
            experience_validation: validate_years_experience(input.resume_years, input.jd_text),
        };

        debug!(
            "Analyzers done: {} gap severities, {} evidence checks, {} bullets",
            analysis.gap_severity.len(),
            analysis.skill_evidence.len(),
            analysis.bullet_quality.total_analyzed
        );

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalysisError, Result};
    use crate::nlp::{HashingEmbedder, RuleBasedPipeline};
    use crate::parser::segment;
    use pretty_assertions::assert_eq;

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(AnalysisError::Embedding("model unavailable".to_string()))
        }

        fn dimensions(&self) -> usize {
            8
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(0.04), 0.0);
    }

    #[test]
    fn test_compute_runs_every_analyzer() {
        let pipeline = RuleBasedPipeline::new();
        let embedder = HashingEmbedder::new(256);
        let resume = "Experience\nLed the AP team of 6 and reduced close time by 30%.\nHelped with payroll.";
        let jd = "Accounts payable and payroll experience required. 3+ years of experience.";
        let resume_parsed = pipeline.parse(resume);
        let jd_parsed = pipeline.parse(jd);
        let sections = segment(resume);
        let resume_skills = labels(&["accounts payable", "payroll"]);
        let jd_skills = labels(&["accounts payable", "payroll", "budgeting"]);
        let gaps = labels(&["budgeting"]);

        let input = AnalyzerInput {
            resume_text: resume,
            jd_text: jd,
            resume_parsed: &resume_parsed,
            jd_parsed: &jd_parsed,
            resume_sections: &sections,
            resume_skills: &resume_skills,
            jd_skills: &jd_skills,
            gaps: &gaps,
            resume_years: 1.0,
            jd_industry: Some("finance"),
            current_year: 2025,
        };
        let analysis = EnhancedAnalysis::compute(&input, &embedder, &pipeline, &CertificationCatalog::builtin());

        assert_eq!(analysis.gap_severity.len(), 1);
        assert_eq!(analysis.gap_categorization.hard_skills, labels(&["budgeting"]));
        assert_eq!(analysis.experience_validation.min_required, Some(3));
        assert!(!analysis.experience_validation.meets_minimum);
        assert!(analysis.achievements.has_quantified_impact());
        assert!(analysis.gap_context.contains_key("budgeting"));
    }

    #[test]
    fn test_embedding_failures_are_absorbed() {
        let pipeline = RuleBasedPipeline::new();
        let parsed = pipeline.parse("Managed payroll for 40 staff.");
        let sections = segment("Managed payroll for 40 staff.");
        let skills = labels(&["payroll", "payroll tax"]);
        let gaps = labels(&["budgeting"]);

        let input = AnalyzerInput {
            resume_text: "Managed payroll for 40 staff.",
            jd_text: "Budgeting and payroll.",
            resume_parsed: &parsed,
            jd_parsed: &parsed,
            resume_sections: &sections,
            resume_skills: &skills,
            jd_skills: &skills,
            gaps: &gaps,
            resume_years: 0.0,
            jd_industry: None,
            current_year: 2025,
        };
        let analysis =
            EnhancedAnalysis::compute(&input, &FailingEmbedder, &pipeline, &CertificationCatalog::builtin());

        assert!(analysis.skill_clusters.resume.is_empty());
        assert!(analysis.skill_redundancies.is_empty());
        assert!(analysis.gap_context.is_empty());
        assert_eq!(analysis.gap_severity.len(), 1);
    }
}
