// file: src/recommend/narrative.rs
// description: section-weighted match score and the seniority, competency and context narratives
// reference: three-point role fit narratives over the match outcome

use crate::error::Result;
use crate::models::{MatchResult, SectionKind, Sections, SeniorityComparison};
use crate::nlp::{Embedder, ParsedText, cosine_similarity};
use std::collections::BTreeSet;

/// Weights for skills, experience, education and other, in that order.
pub const SECTION_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];
const CONTEXT_SIMILARITY_THRESHOLD: f64 = 70.0;

/// Weighted cosine similarity of the four section texts, 0-100.
pub fn compute_score(resume: &Sections, jd: &Sections, embedder: &dyn Embedder) -> Result<f64> {
    let section_texts =
        |sections: &Sections| -> Vec<String> { SectionKind::SCORING_ORDER.iter().map(|k| sections.joined(*k)).collect() };

    let resume_vectors = embedder.embed(&section_texts(resume))?;
    let jd_vectors = embedder.embed(&section_texts(jd))?;

    let total: f64 = resume_vectors
        .iter()
        .zip(jd_vectors.iter())
        .zip(SECTION_WEIGHTS.iter())
        .map(|((r, j), weight)| f64::from(cosine_similarity(r, j)).max(0.0) * weight)
        .sum();

    Ok((total * 100.0).clamp(0.0, 100.0))
}

pub fn seniority_points(seniority: &SeniorityComparison) -> Vec<String> {
    let resume = &seniority.resume;
    let jd = &seniority.jd;
    let tenure_ok = resume.years >= jd.years * 0.8;
    let level_ok = resume.level >= jd.level;

    vec![
        format!(
            "Experience years: Resume {} vs JD ~{} - {}.",
            resume.years,
            jd.years,
            if tenure_ok {
                "Similar: Good tenure alignment"
            } else {
                "Different: Gap in years - action: Add more details to bridge"
            }
        ),
        format!(
            "Seniority level: Resume average {:.1} vs JD's {:.1} - {}.",
            resume.level,
            jd.level,
            if level_ok {
                "Similar: Comparable leadership"
            } else {
                "Different: Lower level - action: Highlight promotions"
            }
        ),
        format!(
            "Overall seniority: {} - simple explanation: Resume and JD {}.",
            if level_ok {
                "Strong fit"
            } else {
                "Partial fit - action: Build with leadership examples"
            },
            if level_ok {
                "align in career stage"
            } else {
                "differ in responsibility; JD more senior"
            }
        ),
    ]
}

fn examples(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
    }
}

pub fn competency_points(result: &MatchResult) -> Vec<String> {
    vec![
        format!(
            "Direct matches: {} skills overlap (e.g., {}) - {}.",
            result.matches.len(),
            examples(&result.matches),
            if result.matches.is_empty() {
                "Different: No overlap - action: Add JD skills"
            } else {
                "Similar: Strong core alignment"
            }
        ),
        format!(
            "Gaps: {} skills missing (e.g., {}) - {} - action: Include examples for gaps.",
            result.gaps.len(),
            examples(&result.gaps),
            if result.gaps.is_empty() {
                "Similar: No gaps"
            } else {
                "Different: Add to resume"
            }
        ),
        format!(
            "Similar skills: {} close to gaps (e.g., {}) - {} - action: Rephrase to align.",
            result.similar.len(),
            examples(&result.similar),
            if result.similar.is_empty() {
                "Different: No close matches"
            } else {
                "Similar: Partial fit"
            }
        ),
    ]
}

/// Whole-document similarity and named entities both documents share.
pub fn context_points(
    resume_text: &str,
    jd_text: &str,
    resume: &ParsedText,
    jd: &ParsedText,
    embedder: &dyn Embedder,
) -> Result<Vec<String>> {
    let resume_entities: BTreeSet<String> = resume.entities.iter().map(|e| e.to_lowercase()).collect();
    let jd_entities: BTreeSet<String> = jd.entities.iter().map(|e| e.to_lowercase()).collect();
    let shared: Vec<String> = resume_entities.intersection(&jd_entities).cloned().collect();

    let vectors = embedder.embed(&[resume_text.to_string(), jd_text.to_string()])?;
    let similarity = match vectors.as_slice() {
        [r, j] => f64::from(cosine_similarity(r, j)) * 100.0,
        _ => 0.0,
    };
    let strong = similarity > CONTEXT_SIMILARITY_THRESHOLD;

    Ok(vec![
        format!(
            "Context similarity: {:.2}% - {}.",
            similarity,
            if strong {
                "Similar: Good industry match"
            } else {
                "Different: Partial alignment - action: Adjust resume"
            }
        ),
        format!(
            "Shared entities: {} common (e.g., {}) - {}.",
            shared.len(),
            examples(&shared),
            if shared.is_empty() {
                "Different: No shared - action: Add relevant details"
            } else {
                "Similar: Common background"
            }
        ),
        format!(
            "Overall context fit: {} - action: Tailor to JD's environment.",
            if strong { "Strong" } else { "Partial" }
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeniorityProfile;
    use crate::nlp::{HashingEmbedder, LanguagePipeline, RuleBasedPipeline};
    use crate::parser::segment;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_documents_score_full_weight_of_present_sections() {
        let embedder = HashingEmbedder::new(256);
        let text = "Experience\nManaged payroll for 200 employees.\nSkills\nExcel, QuickBooks, payroll tax.";
        let sections = segment(text);
        let score = compute_score(&sections, &sections, &embedder).unwrap();

        // education and other are empty, so only 0.4 + 0.3 can contribute
        assert!((score - 70.0).abs() < 0.01, "score was {}", score);
    }

    #[test]
    fn test_score_bounds() {
        let embedder = HashingEmbedder::new(128);
        let score = compute_score(&Sections::default(), &Sections::default(), &embedder).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_seniority_points() {
        let comparison = SeniorityComparison {
            resume: SeniorityProfile::new(3.0, 1.5, 2),
            jd: SeniorityProfile::new(5.0, 2.0, 1),
        };
        let points = seniority_points(&comparison);

        assert_eq!(points.len(), 3);
        assert_eq!(
            points[0],
            "Experience years: Resume 3 vs JD ~5 - Different: Gap in years - action: Add more details to bridge."
        );
        assert!(points[1].starts_with("Seniority level: Resume average 1.5 vs JD's 2.0"));
        assert!(points[2].contains("JD more senior"));
    }

    #[test]
    fn test_competency_points() {
        let result = MatchResult {
            matches: vec!["payroll".into(), "excel".into(), "gaap".into()],
            gaps: vec![],
            similar: vec![],
        };
        let points = competency_points(&result);
        assert_eq!(
            points[0],
            "Direct matches: 3 skills overlap (e.g., payroll, excel) - Similar: Strong core alignment."
        );
        assert!(points[1].starts_with("Gaps: 0 skills missing (e.g., none) - Similar: No gaps"));
    }

    #[test]
    fn test_context_points_share_entities() {
        let pipeline = RuleBasedPipeline::new();
        let embedder = HashingEmbedder::new(256);
        let resume = "Closed the books in NetSuite for Acme.";
        let jd = "Close the books in NetSuite each month.";

        let points = context_points(resume, jd, &pipeline.parse(resume), &pipeline.parse(jd), &embedder).unwrap();
        assert_eq!(points.len(), 3);
        assert!(points[1].starts_with("Shared entities: 1 common (e.g., netsuite)"));
    }
}
