// file: src/recommend/composer.rs
// description: merges analyzer output into an executive summary and a capped, prioritized list
// reference: two-tier ordering with critical alerts ahead of optimization points

use crate::analyzers::{
    EnhancedAnalysis, EvidenceQuality, ProgressionQuality, RequirementSeverity, SeverityBand,
};
use crate::models::{IndustryComparison, MatchResult, Recommendation, Recommendations};
use crate::reference::GENERAL_INDUSTRY;
use tracing::debug;

pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 8;
const MIN_OPTIMIZATION_POINTS: usize = 4;
const INDUSTRY_TIP_LIMIT: usize = 5;

const INDUSTRY_TIPS: &[(&str, &str)] = &[
    (
        "technology",
        "Include specific technologies, programming languages, and frameworks. Quantify impact with metrics like performance improvements, user adoption, or system reliability.",
    ),
    (
        "finance",
        "Highlight regulatory knowledge, financial metrics managed (AUM, revenue, P&L), and any relevant certifications (CFA, CPA, Series licenses).",
    ),
    (
        "healthcare",
        "Emphasize patient outcomes, compliance with healthcare regulations (HIPAA), and experience with clinical systems or healthcare technology.",
    ),
    (
        "marketing",
        "Showcase campaign results with specific metrics (ROI, conversion rates, engagement). Include tools/platforms expertise (Google Analytics, HubSpot, etc.).",
    ),
    (
        "sales",
        "Lead with revenue impact, quota attainment percentages, deal sizes, and customer retention metrics. Highlight CRM expertise and sales methodologies.",
    ),
    (
        "hr",
        "Quantify talent metrics (time-to-fill, retention rates, employee satisfaction scores). Mention HRIS systems and employment law knowledge.",
    ),
    (
        "creative",
        "Ensure your portfolio is prominently mentioned. Describe creative projects with measurable business impact (brand awareness, engagement, conversions).",
    ),
    (
        "legal",
        "Highlight bar admissions, practice areas, case outcomes, and regulatory expertise. Include any published work or speaking engagements.",
    ),
];

/// Inputs the composer reads from one finished analysis.
pub struct CompositionInput<'a> {
    pub score: f64,
    pub comp_details: &'a MatchResult,
    pub industries: &'a IndustryComparison,
    pub analysis: &'a EnhancedAnalysis,
}

#[derive(Default)]
struct Draft {
    critical: Vec<String>,
    points: Vec<String>,
}

impl Draft {
    fn point(&mut self, text: impl Into<String>) {
        self.points.push(text.into());
    }

    fn alert(&mut self, text: impl Into<String>) {
        self.critical.push(text.into());
    }
}

fn head(items: &[String], n: usize) -> String {
    items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
}

fn format_gpa(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Debug, Clone)]
pub struct RecommendationComposer {
    max_items: usize,
}

impl Default for RecommendationComposer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECOMMENDATIONS)
    }
}

impl RecommendationComposer {
    pub fn new(max_items: usize) -> Self {
        Self {
            max_items: max_items.max(1),
        }
    }

    pub fn compose(&self, input: &CompositionInput<'_>) -> Recommendations {
        let mut draft = Draft::default();

        Self::skill_points(input.comp_details, &mut draft);
        Self::writing_points(input.analysis, &mut draft);
        Self::priority_alerts(input.analysis, &mut draft);
        Self::requirement_points(input.analysis, &mut draft);
        Self::strategic_points(input, &mut draft);

        debug!(
            "Composed {} critical and {} standard recommendations",
            draft.critical.len(),
            draft.points.len()
        );

        let items: Vec<Recommendation> = draft
            .critical
            .into_iter()
            .map(Recommendation::critical)
            .chain(draft.points.into_iter().map(Recommendation::standard))
            .take(self.max_items)
            .collect();

        Recommendations {
            summary: Self::summary(input.score, input.comp_details),
            items,
        }
    }

    pub fn summary(score: f64, comp: &MatchResult) -> String {
        let alignment = if score >= 85.0 {
            "aligns very strongly with"
        } else if score >= 70.0 {
            "aligns well with"
        } else if score >= 55.0 {
            "shows moderate alignment with"
        } else {
            "shows some gaps relative to"
        };

        let strengths = if comp.matches.is_empty() {
            String::new()
        } else {
            format!(", especially in {}", head(&comp.matches, 4))
        };

        let gaps = match comp.gaps.len() {
            0 => "There are no significant skill gaps identified.".to_string(),
            1..=3 => format!("The primary gaps are around {}.", comp.gaps.join(", ")),
            _ => format!("Key gaps include {}, among others.", head(&comp.gaps, 3)),
        };

        format!("Your background {} the role{}. {}", alignment, strengths, gaps)
    }

    fn skill_points(comp: &MatchResult, draft: &mut Draft) {
        let top_gaps: Vec<&String> = comp.gaps.iter().take(5).collect();
        match top_gaps.as_slice() {
            [] => {}
            [_] | [_, _] => draft.point(format!(
                "Add explicit examples demonstrating {} to directly address the missing requirements in the job description.",
                top_gaps.iter().map(|g| g.as_str()).collect::<Vec<_>>().join(" and ")
            )),
            [first, second, third, ..] => draft.point(format!(
                "Add explicit examples demonstrating {}, {}, and {} to directly address the missing requirements.",
                first, second, third
            )),
        }

        if !comp.similar.is_empty() {
            draft.point(format!(
                "Rephrase your experience with {} to use terminology that more closely matches the job description requirements.",
                head(&comp.similar, 2)
            ));
        }
    }

    fn writing_points(analysis: &EnhancedAnalysis, draft: &mut Draft) {
        if analysis.verb_strength.weak_pct > 25.0 {
            draft.point(format!(
                "Replace weak action verbs (currently {:.0}% of bullets) with stronger leadership language like 'led', 'owned', 'directed', or 'established'.",
                analysis.verb_strength.weak_pct
            ));
        }

        if !analysis.task_vs_outcome.classifications.is_empty() && analysis.task_vs_outcome.outcome_pct < 40.0 {
            draft.point(
                "Transform task-based bullets into outcome-based achievements by adding specific metrics, percentages, or dollar amounts to demonstrate impact.",
            );
        }

        if analysis.leadership_signals.leadership_score < 40 {
            draft.point(
                "Add leadership context by highlighting team management, decision-making authority, strategic planning, or P&L ownership to demonstrate seniority.",
            );
        }

        if !analysis.achievements.has_quantified_impact() {
            draft.point(
                "Quantify your impact by adding dollar amounts, efficiency percentages, team sizes, or transaction volumes to demonstrate scope and results.",
            );
        }

        if let Some((_, score, recommendation)) = analysis.section_scores.weakest()
            && score < 6.0
            && !recommendation.is_empty()
            && !draft.points.iter().any(|p| p == recommendation)
        {
            draft.point(recommendation);
        }

        if analysis.skill_redundancies.len() >= 2 {
            let first = &analysis.skill_redundancies[0];
            draft.point(format!(
                "Remove redundant skills to save space - you list '{}' multiple times as: {}. Keep the most specific version only.",
                first.primary,
                head(&first.duplicates, 2)
            ));
        }

        let hard_gaps = &analysis.gap_categorization.hard_skills;
        if hard_gaps.len() >= 2 {
            draft.point(format!(
                "Critical hard skill gaps to address: {}. These technical skills are essential for the role.",
                head(hard_gaps, 3)
            ));
        }

        let progression = &analysis.experience_progression;
        if progression.progression_quality == ProgressionQuality::Lateral && progression.promotions == 0 {
            draft.point(
                "Highlight career growth by emphasizing scope increases, new responsibilities, or leadership opportunities at each role, even if titles remained similar.",
            );
        } else if !progression.career_gaps.is_empty() {
            draft.point(
                "Address career gaps or short tenures by briefly explaining transitions (e.g., contract work, further education, or strategic career moves).",
            );
        }

        if let Some(pair) = analysis.skill_cooccurrence.first() {
            draft.point(format!(
                "Add complementary skill '{}' - you have '{}' but the role requires both.",
                pair.missing, pair.has
            ));
        }

        let readability = &analysis.readability;
        if readability.passive_pct > 30.0 {
            draft.point(format!(
                "Reduce passive voice (currently {:.0}% of sentences) by using active, direct language like 'I led' instead of 'was responsible for'.",
                readability.passive_pct
            ));
        } else if readability.avg_sentence_length > 25.0 && readability.issues.iter().any(|i| i.contains("long")) {
            draft.point(
                "Simplify complex sentences by breaking them into shorter, punchier statements that are easier for recruiters to scan quickly.",
            );
        }

        if let Some(recommendation) = &analysis.scope_analysis.recommendation {
            draft.point(recommendation.clone());
        }

        if let Some(issue) = analysis.consistency_check.consistency_issues.first() {
            draft.point(issue.clone());
        }
    }

    fn priority_alerts(analysis: &EnhancedAnalysis, draft: &mut Draft) {
        if let Some(top) = analysis
            .gap_severity
            .iter()
            .find(|g| matches!(g.severity, SeverityBand::Critical | SeverityBand::High))
        {
            let detail = if !top.signals.is_empty() {
                head(&top.signals, 2)
            } else if top.frequency > 1 {
                format!("mentioned {}x in JD", top.frequency)
            } else {
                String::new()
            };
            draft.alert(format!(
                "PRIORITY: Add '{}' - this critical skill ({}). Provide specific example demonstrating this capability.",
                top.gap, detail
            ));
        }

        if let Some(weak) = analysis
            .skill_evidence
            .iter()
            .find(|e| e.quality == EvidenceQuality::Weak)
        {
            draft.alert(format!(
                "Strengthen '{}' claim - currently only listed without examples. Add specific project where you used this skill with quantified results.",
                weak.skill
            ));
        }

        let placement = &analysis.keyword_placement;
        if let Some(buried) = placement.buried_critical.first() {
            draft.alert(format!(
                "Move '{}' higher in resume - currently buried in bottom third where ATS may miss it. Add to summary or top third of experience section.",
                buried
            ));
        } else if placement.bottom_third.len() > 1 {
            let first = &placement.bottom_third[0];
            draft.alert(format!(
                "Improve keyword visibility - '{}' appears at {:.0}% through resume. Move important skills to top 30% for better ATS scoring.",
                first.skill, first.position_pct
            ));
        }

        let bullets = &analysis.bullet_quality;
        if bullets.weak_count >= 3
            && bullets.avg_score < 5.5
            && let Some(issue) = bullets.bullet_scores.first().and_then(|b| b.issues.first())
        {
            draft.alert(format!(
                "Rewrite {} weak bullets - example issue: {}. Transform task statements into achievement statements with metrics.",
                bullets.weak_count, issue
            ));
        }

        let certifications = &analysis.certification_gaps;
        if !certifications.missing_critical.is_empty() {
            for cert in certifications.missing_critical.iter().take(2) {
                draft.alert(format!(
                    "DEALBREAKER: Job requires {} ({}) certification not found in resume. Add this credential or explain equivalent experience.",
                    cert.name, cert.full_name
                ));
            }
        } else if let Some(cert) = certifications.missing_valuable.first()
            && !certifications.has_certifications
        {
            draft.point(format!(
                "Consider adding {} ({}) certification - highly valued for this role and would strengthen your candidacy.",
                cert.name, cert.full_name
            ));
        }
    }

    fn requirement_points(analysis: &EnhancedAnalysis, draft: &mut Draft) {
        let education = &analysis.education_validation;
        if education.severity != RequirementSeverity::None {
            if let Some(degree) = &education.degree_level_gap {
                if degree.is_required {
                    draft.alert(format!(
                        "DEALBREAKER: Job requires {} degree - resume shows {}. This may disqualify your application.",
                        degree.required.to_uppercase(),
                        degree.found
                    ));
                } else {
                    draft.point(format!(
                        "Job prefers {} degree. Consider highlighting equivalent experience or ongoing education to compensate.",
                        degree.required.to_uppercase()
                    ));
                }
            }

            if let Some(field) = &education.field_of_study_gap
                && !field.found
            {
                draft.alert(format!(
                    "DEALBREAKER: Job requires {} background. Emphasize relevant coursework, projects, or self-study in this field.",
                    title_case(&field.required_field)
                ));
            }

            if let Some(gpa) = &education.gpa_gap {
                match gpa.found {
                    Some(found) => draft.point(format!(
                        "GPA below requirement ({} vs {}). Consider removing GPA and highlighting academic achievements instead.",
                        format_gpa(found),
                        format_gpa(gpa.required)
                    )),
                    None => draft.point(format!(
                        "Job requires {} GPA. Add your GPA if it meets requirement, or emphasize academic projects and achievements.",
                        format_gpa(gpa.required)
                    )),
                }
            }
        }

        let experience = &analysis.experience_validation;
        if let Some(min) = experience.min_required {
            let years = experience.resume_years;
            if !experience.meets_minimum {
                match experience.severity {
                    RequirementSeverity::Dealbreaker => draft.alert(format!(
                        "DEALBREAKER: Job requires {}+ years experience - resume shows {} years ({} year gap). This is a significant barrier.",
                        min,
                        years,
                        f64::from(min) - years
                    )),
                    RequirementSeverity::Warning => draft.point(format!(
                        "Resume shows {} years vs {}+ required. Emphasize depth of impact and advanced responsibilities to compensate.",
                        years, min
                    )),
                    RequirementSeverity::None => {}
                }
            }
            if experience.overqualified {
                draft.point(format!(
                    "You may be overqualified ({} years for {}+ role). Tailor resume to focus on relevant skills rather than full career scope.",
                    years, min
                ));
            }
        }
    }

    fn strategic_points(input: &CompositionInput<'_>, draft: &mut Draft) {
        let matches = &input.comp_details.matches;
        if matches.len() >= 3 {
            draft.point(format!(
                "Emphasize your strongest alignments ({}) by moving them higher in your resume and adding specific achievement examples.",
                head(matches, 3)
            ));
        }

        if let Some(jd_primary) = input.industries.jd.first().map(|s| s.industry.as_str()) {
            if let Some(resume_primary) = input.industries.resume.first().map(|s| s.industry.as_str())
                && jd_primary != resume_primary
                && jd_primary != GENERAL_INDUSTRY
            {
                draft.point(format!(
                    "Since this role is in {}, emphasize transferable skills and any exposure to {}-related projects, tools, or cross-functional work.",
                    jd_primary, jd_primary
                ));
            }

            if draft.points.len() < INDUSTRY_TIP_LIMIT
                && let Some((_, tip)) = INDUSTRY_TIPS.iter().find(|(industry, _)| *industry == jd_primary)
            {
                draft.point(*tip);
            }
        }

        let ats = &input.analysis.ats_optimization;
        if ats.coverage_pct < 70.0 && !ats.missing_important.is_empty() {
            draft.point(format!(
                "Improve ATS keyword coverage (currently {:.0}%) by adding high-priority terms: {}.",
                ats.coverage_pct,
                head(&ats.missing_important, 3)
            ));
        } else if ats.coverage_pct >= 70.0 {
            draft.point(
                "Mirror key phrases from the job description in your resume to improve ATS matching and keyword relevance, particularly in your summary and core competencies sections.",
            );
        }

        if draft.points.len() < MIN_OPTIMIZATION_POINTS {
            draft.point(
                "Review each bullet point to ensure it demonstrates measurable outcomes and uses active, results-oriented language.",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::requirements::{DegreeGap, EducationValidation, ExperienceValidation};
    use crate::analyzers::severity::GapSeverity;
    use crate::analyzers::{Achievements, LeadershipSignals};
    use crate::reference::IndustryScore;
    use pretty_assertions::assert_eq;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn comp(matches: &[&str], gaps: &[&str], similar: &[&str]) -> MatchResult {
        MatchResult {
            matches: labels(matches),
            gaps: labels(gaps),
            similar: labels(similar),
        }
    }

    fn strong_writing() -> EnhancedAnalysis {
        EnhancedAnalysis {
            achievements: Achievements {
                percentages: vec!["30%".to_string()],
                ..Default::default()
            },
            leadership_signals: LeadershipSignals {
                leadership_score: 80,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_bands() {
        let none = comp(&["payroll"], &[], &[]);
        assert_eq!(
            RecommendationComposer::summary(90.0, &none),
            "Your background aligns very strongly with the role, especially in payroll. There are no significant skill gaps identified."
        );

        let many = comp(&[], &["a", "b", "c", "d"], &[]);
        assert_eq!(
            RecommendationComposer::summary(40.0, &many),
            "Your background shows some gaps relative to the role. Key gaps include a, b, c, among others."
        );

        let few = comp(&[], &["budgeting"], &[]);
        assert!(RecommendationComposer::summary(60.0, &few).contains("moderate alignment"));
        assert!(RecommendationComposer::summary(60.0, &few).ends_with("The primary gaps are around budgeting."));
    }

    #[test]
    fn test_critical_alerts_come_first_and_list_is_capped() {
        let analysis = EnhancedAnalysis {
            gap_severity: vec![GapSeverity {
                gap: "budgeting".to_string(),
                score: 10,
                severity: SeverityBand::Critical,
                signals: labels(&["appears early in JD", "in requirements section"]),
                frequency: 5,
            }],
            education_validation: EducationValidation {
                degree_level_gap: Some(DegreeGap {
                    required: "bachelor".to_string(),
                    found: "None detected".to_string(),
                    is_required: true,
                }),
                severity: RequirementSeverity::Dealbreaker,
                ..Default::default()
            },
            experience_validation: ExperienceValidation {
                meets_minimum: false,
                min_required: Some(5),
                resume_years: 1.0,
                overqualified: false,
                severity: RequirementSeverity::Dealbreaker,
            },
            ..Default::default()
        };
        let comp = comp(&["payroll", "excel", "gaap"], &["budgeting", "forecasting", "sql"], &["tax"]);
        let industries = IndustryComparison {
            resume: vec![IndustryScore { industry: "technology".into(), score: 3 }],
            jd: vec![IndustryScore { industry: "finance".into(), score: 5 }],
        };
        let input = CompositionInput {
            score: 50.0,
            comp_details: &comp,
            industries: &industries,
            analysis: &analysis,
        };

        let recommendations = RecommendationComposer::default().compose(&input);

        assert_eq!(recommendations.items.len(), 8);
        assert_eq!(recommendations.critical_count(), 3);
        assert!(recommendations.items[..3].iter().all(|r| r.is_critical()));
        assert!(recommendations.items[3..].iter().all(|r| !r.is_critical()));
        assert_eq!(
            recommendations.items[0].text,
            "PRIORITY: Add 'budgeting' - this critical skill (appears early in JD, in requirements section). Provide specific example demonstrating this capability."
        );
        assert!(recommendations.items[1].text.starts_with("DEALBREAKER: Job requires BACHELOR degree"));
        assert_eq!(
            recommendations.items[2].text,
            "DEALBREAKER: Job requires 5+ years experience - resume shows 1 years (4 year gap). This is a significant barrier."
        );
    }

    #[test]
    fn test_small_cap_keeps_critical_items() {
        let analysis = EnhancedAnalysis {
            experience_validation: ExperienceValidation {
                meets_minimum: false,
                min_required: Some(8),
                resume_years: 2.0,
                overqualified: false,
                severity: RequirementSeverity::Dealbreaker,
            },
            ..Default::default()
        };
        let comp = comp(&[], &["budgeting"], &[]);
        let industries = IndustryComparison::default();
        let input = CompositionInput {
            score: 30.0,
            comp_details: &comp,
            industries: &industries,
            analysis: &analysis,
        };

        let recommendations = RecommendationComposer::new(2).compose(&input);
        assert_eq!(recommendations.items.len(), 2);
        assert!(recommendations.items[0].is_critical());
    }

    #[test]
    fn test_gap_examples_and_fallback_points() {
        let analysis = strong_writing();
        let comp = comp(&[], &["budgeting", "forecasting"], &[]);
        let industries = IndustryComparison::default();
        let input = CompositionInput {
            score: 75.0,
            comp_details: &comp,
            industries: &industries,
            analysis: &analysis,
        };

        let recommendations = RecommendationComposer::default().compose(&input);
        let texts = recommendations.texts();

        assert_eq!(recommendations.critical_count(), 0);
        assert_eq!(
            texts[0],
            "Add explicit examples demonstrating budgeting and forecasting to directly address the missing requirements in the job description."
        );
        assert!(texts.iter().any(|t| t.starts_with("Review each bullet point")));
    }

    #[test]
    fn test_industry_guidance() {
        let analysis = strong_writing();
        let comp = comp(&[], &[], &[]);
        let industries = IndustryComparison {
            resume: vec![IndustryScore { industry: "technology".into(), score: 4 }],
            jd: vec![IndustryScore { industry: "finance".into(), score: 6 }],
        };
        let input = CompositionInput {
            score: 75.0,
            comp_details: &comp,
            industries: &industries,
            analysis: &analysis,
        };

        let texts: Vec<String> = RecommendationComposer::default()
            .compose(&input)
            .items
            .into_iter()
            .map(|r| r.text)
            .collect();

        assert!(texts[0].starts_with("Since this role is in finance"));
        assert!(texts[1].starts_with("Highlight regulatory knowledge"));
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_gpa(3.0), "3.0");
        assert_eq!(format_gpa(3.25), "3.25");
        assert_eq!(title_case("computer science"), "Computer Science");
    }
}
