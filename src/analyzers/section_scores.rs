// file: src/analyzers/section_scores.rs
// description: per-section 1-10 scores for experience, skills and education
// reference: jd skill coverage, metrics and strong verbs per section

use super::round1;
use crate::models::{SectionKind, Sections};
use crate::nlp::{LanguagePipeline, PartOfSpeech};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EXPERIENCE_METRIC: Regex = Regex::new(r"\d+%|\$\d+|\d+\+").expect("EXPERIENCE_METRIC regex is valid");
}

const STRONG_VERBS: &[&str] = &["lead", "own", "direct", "establish", "spearhead", "drive", "launch"];
const CREDENTIAL_TERMS: &[&str] = &["bachelor", "master", "mba", "cpa", "cfa", "certified", "certification"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceScore {
    pub score: f64,
    pub has_metrics: bool,
    pub strong_verbs: usize,
    pub skill_coverage: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsSectionScore {
    pub score: f64,
    pub skill_coverage: String,
    pub coverage_pct: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationScore {
    pub score: f64,
    pub relevant_credentials: usize,
    pub recommendation: String,
}

/// Scores for the sections the resume actually has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillsSectionScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<EducationScore>,
}

impl SectionScores {
    /// Lowest scoring section with its recommendation; ties keep the first
    /// in experience, skills, education order.
    pub fn weakest(&self) -> Option<(&'static str, f64, &str)> {
        let candidates = [
            self.experience
                .as_ref()
                .map(|s| ("experience", s.score, s.recommendation.as_str())),
            self.skills
                .as_ref()
                .map(|s| ("skills", s.score, s.recommendation.as_str())),
            self.education
                .as_ref()
                .map(|s| ("education", s.score, s.recommendation.as_str())),
        ];

        candidates
            .into_iter()
            .flatten()
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn is_empty(&self) -> bool {
        self.experience.is_none() && self.skills.is_none() && self.education.is_none()
    }
}

fn skills_mentioned(text: &str, jd_skills: &[String]) -> usize {
    let lower = text.to_lowercase();
    jd_skills
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .count()
}

fn coverage_pct(mentioned: usize, jd_skills: &[String]) -> f64 {
    if jd_skills.is_empty() {
        0.0
    } else {
        mentioned as f64 / jd_skills.len() as f64 * 100.0
    }
}

pub fn score_resume_sections(
    sections: &Sections,
    jd_skills: &[String],
    pipeline: &dyn LanguagePipeline,
) -> SectionScores {
    let experience_text = sections.joined(SectionKind::Experience);
    let skills_text = sections.joined(SectionKind::Skills);
    let education_text = sections.joined(SectionKind::Education);

    SectionScores {
        experience: (!experience_text.trim().is_empty())
            .then(|| score_experience(&experience_text, jd_skills, pipeline)),
        skills: (!skills_text.trim().is_empty()).then(|| score_skills(&skills_text, jd_skills)),
        education: (!education_text.trim().is_empty()).then(|| score_education(&education_text)),
    }
}

fn score_experience(text: &str, jd_skills: &[String], pipeline: &dyn LanguagePipeline) -> ExperienceScore {
    let has_metrics = EXPERIENCE_METRIC.is_match(text);
    let strong_verbs = pipeline
        .parse(text)
        .tokens()
        .filter(|t| t.pos == PartOfSpeech::Verb && STRONG_VERBS.contains(&t.lemma.as_str()))
        .count();

    let mentioned = skills_mentioned(text, jd_skills);
    let coverage = coverage_pct(mentioned, jd_skills);

    let mut score = 5.0;
    if has_metrics {
        score += 2.0;
    }
    if strong_verbs >= 3 {
        score += 2.0;
    }
    if coverage >= 50.0 {
        score += 1.0;
    }
    let score = f64::min(10.0, score);

    ExperienceScore {
        score,
        has_metrics,
        strong_verbs,
        skill_coverage: format!("{}/{} JD skills", mentioned, jd_skills.len()),
        recommendation: experience_recommendation(score, has_metrics, strong_verbs),
    }
}

fn experience_recommendation(score: f64, has_metrics: bool, strong_verbs: usize) -> String {
    let mut parts = Vec::new();
    if !has_metrics {
        parts.push("Add quantified metrics (percentages, dollar amounts, volumes) to 3+ bullets");
    }
    if strong_verbs < 3 {
        parts.push("Replace weak verbs with strong action verbs (led, owned, drove, established)");
    }

    if score >= 8.0 {
        "Experience section is strong with good metrics and action verbs.".to_string()
    } else if !parts.is_empty() {
        format!("{}.", parts.join(". "))
    } else {
        "Experience section is solid but could use more specific achievements.".to_string()
    }
}

fn score_skills(text: &str, jd_skills: &[String]) -> SkillsSectionScore {
    let mentioned = skills_mentioned(text, jd_skills);
    let coverage = coverage_pct(mentioned, jd_skills);

    let score = if coverage >= 70.0 {
        9.0
    } else if coverage >= 50.0 {
        7.0
    } else if coverage >= 30.0 {
        5.0
    } else {
        f64::max(1.0, coverage / 10.0)
    };

    let recommendation = if score >= 8.0 {
        "Skills section has excellent JD keyword coverage.".to_string()
    } else {
        let lower = text.to_lowercase();
        let missing: Vec<&str> = jd_skills
            .iter()
            .filter(|skill| !lower.contains(&skill.to_lowercase()))
            .map(String::as_str)
            .take(3)
            .collect();
        format!(
            "Add {} missing JD skills to Skills section: {}.",
            jd_skills.len() - mentioned,
            missing.join(", ")
        )
    };

    SkillsSectionScore {
        score: round1(score),
        skill_coverage: format!("{}/{} JD skills", mentioned, jd_skills.len()),
        coverage_pct: round1(coverage),
        recommendation,
    }
}

fn score_education(text: &str) -> EducationScore {
    let lower = text.to_lowercase();
    let relevant_credentials = CREDENTIAL_TERMS.iter().filter(|t| lower.contains(*t)).count();
    let score = f64::min(10.0, 5.0 + relevant_credentials as f64);

    EducationScore {
        score,
        relevant_credentials,
        recommendation: if score >= 7.0 {
            "Education section is adequate.".to_string()
        } else {
            "Add relevant certifications if available.".to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleBasedPipeline;
    use pretty_assertions::assert_eq;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sections() -> Sections {
        Sections {
            experience: labels(&[
                "Led month end close for 4 entities.",
                "Owned payroll and cut processing time by 25%.",
                "Drove budgeting for the controller group.",
            ]),
            skills: labels(&["payroll, excel"]),
            education: labels(&["Bachelor of Science in Accounting, CPA"]),
            other: Vec::new(),
        }
    }

    #[test]
    fn test_section_scores() {
        let jd = labels(&["payroll", "budgeting", "audit", "tax"]);
        let scores = score_resume_sections(&sections(), &jd, &RuleBasedPipeline::new());

        let experience = scores.experience.clone().unwrap();
        assert!(experience.has_metrics);
        assert_eq!(experience.strong_verbs, 3);
        assert_eq!(experience.score, 10.0);
        assert_eq!(experience.skill_coverage, "2/4 JD skills");

        let skills = scores.skills.clone().unwrap();
        assert_eq!(skills.coverage_pct, 25.0);
        assert_eq!(skills.score, 2.5);
        assert_eq!(
            skills.recommendation,
            "Add 3 missing JD skills to Skills section: budgeting, audit, tax."
        );

        let education = scores.education.clone().unwrap();
        assert_eq!(education.relevant_credentials, 2);
        assert_eq!(education.score, 7.0);

        assert_eq!(scores.weakest().map(|w| w.0), Some("skills"));
    }

    #[test]
    fn test_missing_sections_are_skipped() {
        let scores = score_resume_sections(&Sections::default(), &labels(&["payroll"]), &RuleBasedPipeline::new());
        assert!(scores.is_empty());
        assert_eq!(scores.weakest(), None);
    }

    #[test]
    fn test_experience_recommendation() {
        assert_eq!(
            experience_recommendation(5.0, false, 0),
            "Add quantified metrics (percentages, dollar amounts, volumes) to 3+ bullets. \
             Replace weak verbs with strong action verbs (led, owned, drove, established)."
        );
        assert_eq!(
            experience_recommendation(9.0, true, 4),
            "Experience section is strong with good metrics and action verbs."
        );
    }
}
