// file: src/analyzers/ats.rs
// description: ats keyword coverage and keyword placement within the resume
// reference: literal keyword counting over lowercased text

use super::round1;
use serde::{Deserialize, Serialize};

const TOP_LIST_LEN: usize = 10;
const PLACEMENT_SKILLS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCoverage {
    pub skill: String,
    pub resume_mentions: usize,
    pub jd_mentions: usize,
    pub covered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsMetrics {
    pub total_keywords: usize,
    pub covered_keywords: usize,
    pub coverage_pct: f64,
    pub keyword_details: Vec<KeywordCoverage>,
    /// Uncovered keywords the jd repeats.
    pub missing_important: Vec<String>,
    /// Covered once while the jd repeats them three or more times.
    pub underrepresented: Vec<String>,
    pub recommendations: Vec<String>,
}

fn count_mentions(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        0
    } else {
        haystack.matches(needle).count()
    }
}

pub fn analyze_ats_keywords(resume_text: &str, jd_text: &str, jd_skills: &[String]) -> AtsMetrics {
    if jd_skills.is_empty() {
        return AtsMetrics::default();
    }

    let resume_lower = resume_text.to_lowercase();
    let jd_lower = jd_text.to_lowercase();

    let keyword_details: Vec<KeywordCoverage> = jd_skills
        .iter()
        .map(|skill| {
            let skill_lower = skill.to_lowercase();
            let resume_mentions = count_mentions(&resume_lower, &skill_lower);
            KeywordCoverage {
                skill: skill.clone(),
                resume_mentions,
                jd_mentions: count_mentions(&jd_lower, &skill_lower),
                covered: resume_mentions > 0,
            }
        })
        .collect();

    let total_keywords = keyword_details.len();
    let covered_keywords = keyword_details.iter().filter(|k| k.covered).count();
    let coverage_pct = covered_keywords as f64 / total_keywords as f64 * 100.0;

    let missing_important: Vec<String> = keyword_details
        .iter()
        .filter(|k| !k.covered && k.jd_mentions >= 2)
        .map(|k| k.skill.clone())
        .collect();
    let underrepresented: Vec<String> = keyword_details
        .iter()
        .filter(|k| k.covered && k.jd_mentions >= 3 && k.resume_mentions < 2)
        .map(|k| k.skill.clone())
        .collect();

    let recommendations = ats_recommendations(coverage_pct, &missing_important, &underrepresented);

    AtsMetrics {
        total_keywords,
        covered_keywords,
        coverage_pct,
        keyword_details,
        missing_important: missing_important.into_iter().take(TOP_LIST_LEN).collect(),
        underrepresented: underrepresented.into_iter().take(TOP_LIST_LEN).collect(),
        recommendations,
    }
}

fn ats_recommendations(coverage_pct: f64, missing: &[String], underrepresented: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if coverage_pct < 70.0 {
        recommendations.push(format!(
            "Low keyword coverage ({:.0}%). Add more JD keywords to improve ATS matching.",
            coverage_pct
        ));
    }
    if !missing.is_empty() {
        recommendations.push(format!(
            "Missing {} high-priority keywords: {}. These appear multiple times in JD.",
            missing.len(),
            missing.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
        ));
    }
    if !underrepresented.is_empty() {
        recommendations.push(format!(
            "Under-represented keywords: {}. Mention these more frequently.",
            underrepresented.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
        ));
    }
    if coverage_pct >= 80.0 {
        recommendations.push("Strong keyword coverage. Resume should pass ATS screening.".to_string());
    }

    recommendations
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedKeyword {
    pub skill: String,
    pub position_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordPlacement {
    pub top_third: Vec<PlacedKeyword>,
    pub middle_third: Vec<PlacedKeyword>,
    pub bottom_third: Vec<PlacedKeyword>,
    pub not_found: Vec<String>,
    pub buried_critical: Vec<String>,
}

/// Where each of the first twenty jd skills first appears in the resume.
/// Everything in the bottom third is reported as buried.
pub fn analyze_keyword_placement(resume_text: &str, jd_skills: &[String]) -> KeywordPlacement {
    let mut placement = KeywordPlacement::default();
    if jd_skills.is_empty() {
        return placement;
    }

    let resume_lower = resume_text.to_lowercase();
    let resume_chars = resume_lower.chars().count();

    for skill in jd_skills.iter().take(PLACEMENT_SKILLS) {
        let skill_lower = skill.to_lowercase();
        let Some(byte_index) = resume_lower.find(&skill_lower).filter(|_| !skill_lower.is_empty()) else {
            placement.not_found.push(skill.clone());
            continue;
        };

        let char_index = resume_lower[..byte_index].chars().count();
        let position_pct = char_index as f64 / resume_chars as f64 * 100.0;
        let placed = PlacedKeyword {
            skill: skill.clone(),
            position_pct: round1(position_pct),
        };

        if position_pct <= 33.0 {
            placement.top_third.push(placed);
        } else if position_pct <= 67.0 {
            placement.middle_third.push(placed);
        } else {
            placement.buried_critical.push(skill.clone());
            placement.bottom_third.push(placed);
        }
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ats_coverage() {
        let resume = "Budgeting and forecasting for three entities. Payroll once.";
        let jd = "Budgeting, budgeting and more budgeting. Payroll, payroll, payroll. Audit and audit.";
        let metrics = analyze_ats_keywords(resume, jd, &labels(&["budgeting", "payroll", "audit"]));

        assert_eq!(metrics.total_keywords, 3);
        assert_eq!(metrics.covered_keywords, 2);
        assert_eq!(metrics.missing_important, labels(&["audit"]));
        assert_eq!(metrics.underrepresented, labels(&["budgeting", "payroll"]));
        assert_eq!(metrics.recommendations.len(), 3);
        assert!(metrics.recommendations[0].starts_with("Low keyword coverage (67%)"));
        assert_eq!(
            metrics.recommendations[1],
            "Missing 1 high-priority keywords: audit. These appear multiple times in JD."
        );
    }

    #[test]
    fn test_ats_full_coverage() {
        let metrics = analyze_ats_keywords("payroll and audit", "payroll audit", &labels(&["payroll", "audit"]));
        assert_eq!(metrics.coverage_pct, 100.0);
        assert_eq!(
            metrics.recommendations,
            vec!["Strong keyword coverage. Resume should pass ATS screening.".to_string()]
        );
    }

    #[test]
    fn test_ats_no_skills() {
        assert_eq!(analyze_ats_keywords("resume", "jd", &[]), AtsMetrics::default());
    }

    #[test]
    fn test_keyword_placement() {
        let resume = format!("payroll {} audit {} tax", "x".repeat(40), "y".repeat(40));
        let placement = analyze_keyword_placement(&resume, &labels(&["payroll", "audit", "tax", "sql"]));

        assert_eq!(placement.top_third.len(), 1);
        assert_eq!(placement.top_third[0].position_pct, 0.0);
        assert_eq!(placement.middle_third[0].skill, "audit");
        assert_eq!(placement.bottom_third[0].skill, "tax");
        assert_eq!(placement.buried_critical, labels(&["tax"]));
        assert_eq!(placement.not_found, labels(&["sql"]));
    }

    #[test]
    fn test_placement_without_skills() {
        assert_eq!(analyze_keyword_placement("text", &[]), KeywordPlacement::default());
    }
}
