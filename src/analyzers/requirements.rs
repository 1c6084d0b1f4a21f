// file: src/analyzers/requirements.rs
// description: education and years-of-experience requirement validation
// reference: required/preferred proximity patterns over the jd text

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Degree mentions in a jd. Two-letter abbreviations count only when dotted
/// or followed by "in", "of" or "degree".
const DEGREE_TERMS: &str =
    r"\b(?:bachelor|master|phd|doctorate|mba)\b|\b[bm]\.[sa]\b\.?|\b(?:bs|ba|ms|ma)\s+(?:in|of|degree)\b";

/// Degree name, resume pattern and rank, PhD highest.
const DEGREE_LEVELS: &[(&str, &str, u8)] = &[
    ("phd", r"\bphd\b", 5),
    ("doctorate", r"\bdoctorate\b", 5),
    ("doctoral", r"\bdoctoral\b", 5),
    ("ph.d", r"\bph\.d\b", 5),
    ("master", r"\bmaster\b", 4),
    ("master's", r"\bmaster's\b", 4),
    ("mba", r"\bmba\b", 4),
    ("ms", r"\bm\.s\b|\bms\s+(?:in|of|degree)\b", 4),
    ("ma", r"\bm\.a\b|\bma\s+(?:in|of|degree)\b", 4),
    ("bachelor", r"\bbachelor\b", 3),
    ("bachelor's", r"\bbachelor's\b", 3),
    ("bs", r"\bb\.s\b|\bbs\s+(?:in|of|degree)\b", 3),
    ("ba", r"\bb\.a\b|\bba\s+(?:in|of|degree)\b", 3),
    ("bsc", r"\bbsc\b|\bb\.sc\b", 3),
    ("associate", r"\bassociate\b", 2),
    ("associate's", r"\bassociate's\b", 2),
    ("high school", r"\bhigh school\b", 1),
    ("diploma", r"\bdiploma\b", 1),
];

const FIELDS: &[(&str, &[&str])] = &[
    ("computer science", &["computer science", "cs degree", "computer engineering"]),
    ("engineering", &["engineering", "engineer"]),
    ("business", &["business", "mba", "business administration"]),
    ("finance", &["finance", "accounting", "economics"]),
    ("mathematics", &["mathematics", "math", "statistics"]),
    ("science", &["science", "biology", "chemistry", "physics"]),
];

fn compile(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("requirement regex is valid"))
        .collect()
}

lazy_static! {
    static ref DEGREE_KEYWORDS: Vec<(Regex, &'static str, u8)> = DEGREE_LEVELS
        .iter()
        .map(|(name, pattern, level)| (Regex::new(pattern).expect("degree regex is valid"), *name, *level))
        .collect();

    static ref REQUIRED_DEGREE: Vec<Regex> = compile(&[
        format!(r"({DEGREE_TERMS}).*?(?:required|mandatory)"),
        format!(r"(?:required|mandatory).*?({DEGREE_TERMS})"),
        format!(r"must have.*?({DEGREE_TERMS})"),
        format!(r"({DEGREE_TERMS}).*?(?:degree|education).*?(?:required|mandatory)"),
    ]);

    static ref PREFERRED_DEGREE: Vec<Regex> = compile(&[
        format!(r"({DEGREE_TERMS}).*?(?:preferred|desired|plus)"),
        format!(r"(?:preferred|desired).*?({DEGREE_TERMS})"),
    ]);

    static ref JD_GPA: Vec<Regex> = compile(&[
        r"(\d\.?\d+)\s*(?:\+)?\s*gpa".to_string(),
        r"gpa.*?(\d\.?\d+)".to_string(),
        r"minimum gpa.*?(\d\.?\d+)".to_string(),
    ]);

    static ref RESUME_GPA: Regex = Regex::new(r"gpa[:\s]*(\d\.?\d+)").expect("RESUME_GPA regex is valid");

    static ref YEARS_RANGE: Regex =
        Regex::new(r"(\d+)\s*(?:[-–—]|to)\s*(\d+)\s*(?:\+)?\s*years?").expect("YEARS_RANGE regex is valid");

    static ref YEARS_SINGLE: Vec<Regex> = compile(&[
        r"(\d+)\+\s*years?".to_string(),
        r"minimum\s+(?:of\s+)?(\d+)\s*years?".to_string(),
        r"at\s+least\s+(\d+)\s*years?".to_string(),
        r"(\d+)\s*years?\s+(?:of\s+)?(?:experience|exp)".to_string(),
    ]);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequirementSeverity {
    #[default]
    None,
    Warning,
    Dealbreaker,
}

impl fmt::Display for RequirementSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequirementSeverity::None => "NONE",
            RequirementSeverity::Warning => "WARNING",
            RequirementSeverity::Dealbreaker => "DEALBREAKER",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeGap {
    pub required: String,
    pub found: String,
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGap {
    pub required_field: String,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaGap {
    pub required: f64,
    pub found: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationValidation {
    pub degree_level_gap: Option<DegreeGap>,
    pub field_of_study_gap: Option<FieldGap>,
    pub gpa_gap: Option<GpaGap>,
    pub severity: RequirementSeverity,
}

impl EducationValidation {
    fn escalate(&mut self, severity: RequirementSeverity) {
        self.severity = self.severity.max(severity);
    }
}

fn degree_level(term: &str) -> Option<u8> {
    DEGREE_LEVELS
        .iter()
        .find(|(name, _, _)| *name == term)
        .map(|(_, _, level)| *level)
}

/// "m.s." and "ms in" both name the "ms" degree.
fn canonical_degree(capture: &str) -> String {
    capture
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .replace('.', "")
}

fn first_degree_capture(patterns: &[Regex], text: &str) -> Option<(String, u8)> {
    patterns.iter().find_map(|pattern| {
        let term = canonical_degree(pattern.captures(text)?.get(1)?.as_str());
        let level = degree_level(&term)?;
        Some((term, level))
    })
}

fn field_required(keyword: &str, jd_lower: &str) -> bool {
    let escaped = regex::escape(keyword);
    [
        format!(r"{escaped}.*?(?:required|mandatory|must have)"),
        format!(r"(?:required|mandatory|must have).*?{escaped}"),
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .any(|re| re.is_match(jd_lower))
}

fn capture_f64(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Degree level, field of study and GPA requirements of the jd checked
/// against the resume.
pub fn validate_education_requirements(resume_text: &str, jd_text: &str) -> EducationValidation {
    let resume_lower = resume_text.to_lowercase();
    let jd_lower = jd_text.to_lowercase();
    let mut validation = EducationValidation::default();

    let resume_degree = DEGREE_KEYWORDS
        .iter()
        .filter(|(re, _, _)| re.is_match(&resume_lower))
        .fold(None::<(&str, u8)>, |best, (_, name, level)| match best {
            Some((_, best_level)) if best_level >= *level => best,
            _ => Some((*name, *level)),
        });
    let resume_level = resume_degree.map_or(0, |(_, level)| level);

    let required = first_degree_capture(&REQUIRED_DEGREE, &jd_lower).map(|d| (d, true));
    let jd_degree = required.or_else(|| first_degree_capture(&PREFERRED_DEGREE, &jd_lower).map(|d| (d, false)));

    if let Some(((term, level), is_required)) = jd_degree
        && resume_level < level
    {
        validation.degree_level_gap = Some(DegreeGap {
            required: term,
            found: resume_degree.map_or_else(|| "None detected".to_string(), |(name, _)| name.to_string()),
            is_required,
        });
        validation.escalate(if is_required {
            RequirementSeverity::Dealbreaker
        } else {
            RequirementSeverity::Warning
        });
    }

    for (field, keywords) in FIELDS {
        if !keywords.iter().any(|k| jd_lower.contains(k)) {
            continue;
        }
        let required = keywords.iter().any(|k| field_required(k, &jd_lower));
        let resume_has_field = keywords.iter().any(|k| resume_lower.contains(k));
        if required && !resume_has_field {
            validation.field_of_study_gap = Some(FieldGap {
                required_field: field.to_string(),
                found: false,
            });
            validation.escalate(RequirementSeverity::Dealbreaker);
            break;
        }
    }

    if let Some(required_gpa) = JD_GPA.iter().find_map(|re| capture_f64(re, &jd_lower)) {
        match capture_f64(&RESUME_GPA, &resume_lower) {
            Some(found) if found >= required_gpa => {}
            found => {
                validation.gpa_gap = Some(GpaGap {
                    required: required_gpa,
                    found,
                });
                validation.escalate(RequirementSeverity::Warning);
            }
        }
    }

    validation
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceValidation {
    pub meets_minimum: bool,
    pub min_required: Option<u32>,
    pub resume_years: f64,
    pub overqualified: bool,
    pub severity: RequirementSeverity,
}

impl Default for ExperienceValidation {
    fn default() -> Self {
        Self {
            meets_minimum: true,
            min_required: None,
            resume_years: 0.0,
            overqualified: false,
            severity: RequirementSeverity::None,
        }
    }
}

impl ExperienceValidation {
    pub fn shortfall(&self) -> Option<f64> {
        self.min_required
            .map(|min| f64::from(min) - self.resume_years)
            .filter(|gap| *gap > 0.0)
    }
}

/// Minimum years the jd asks for: a range takes its lower bound, otherwise
/// the smallest single-value mention.
pub fn required_years(jd_text: &str) -> Option<u32> {
    let jd_lower = jd_text.to_lowercase();

    if let Some(caps) = YEARS_RANGE.captures(&jd_lower) {
        let low: Option<u32> = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let high: Option<u32> = caps.get(2).and_then(|m| m.as_str().parse().ok());
        if let (Some(low), Some(high)) = (low, high) {
            return Some(low.min(high));
        }
    }

    YEARS_SINGLE
        .iter()
        .flat_map(|re| re.captures_iter(&jd_lower))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .min()
}

pub fn validate_years_experience(resume_years: f64, jd_text: &str) -> ExperienceValidation {
    let mut validation = ExperienceValidation {
        resume_years,
        ..ExperienceValidation::default()
    };

    let Some(min_required) = required_years(jd_text).filter(|min| *min > 0) else {
        return validation;
    };
    validation.min_required = Some(min_required);
    let min = f64::from(min_required);

    if resume_years < min {
        validation.meets_minimum = false;
        validation.severity = if min - resume_years >= 3.0 {
            RequirementSeverity::Dealbreaker
        } else {
            RequirementSeverity::Warning
        };
    } else if resume_years >= min * 2.0 && min_required <= 3 {
        validation.overqualified = true;
        validation.severity = RequirementSeverity::Warning;
    }

    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_takes_minimum() {
        assert_eq!(
            required_years("Minimum of 5-7+ years of accounting/finance experience"),
            Some(5)
        );
        assert_eq!(required_years("3 to 5 years in a similar role"), Some(3));
    }

    #[test]
    fn test_single_values_take_smallest() {
        assert_eq!(
            required_years("8+ years preferred; at least 4 years of payroll experience"),
            Some(4)
        );
        assert_eq!(required_years("Great team, remote friendly"), None);
    }

    #[test]
    fn test_years_severity() {
        let jd = "Requires 8+ years of experience.";
        let far = validate_years_experience(4.0, jd);
        assert!(!far.meets_minimum);
        assert_eq!(far.severity, RequirementSeverity::Dealbreaker);
        assert_eq!(far.shortfall(), Some(4.0));

        let near = validate_years_experience(7.0, jd);
        assert_eq!(near.severity, RequirementSeverity::Warning);

        let junior = validate_years_experience(9.0, "2+ years of experience");
        assert!(junior.overqualified);
        assert!(junior.meets_minimum);
        assert_eq!(junior.severity, RequirementSeverity::Warning);

        let none = validate_years_experience(3.0, "no requirement stated");
        assert_eq!(none, ExperienceValidation { resume_years: 3.0, ..Default::default() });
    }

    #[test]
    fn test_required_degree_missing() {
        let validation = validate_education_requirements(
            "Associate degree in business, 2015.",
            "Bachelor's degree in accounting required.",
        );
        let gap = validation.degree_level_gap.unwrap();
        assert_eq!(gap.required, "bachelor");
        assert_eq!(gap.found, "associate");
        assert!(gap.is_required);
        assert_eq!(validation.severity, RequirementSeverity::Dealbreaker);
        assert_eq!(
            validation.field_of_study_gap,
            Some(FieldGap {
                required_field: "finance".to_string(),
                found: false
            })
        );
    }

    #[test]
    fn test_preferred_degree_is_warning() {
        let validation = validate_education_requirements(
            "BA in Economics.",
            "Master's in finance preferred.",
        );
        let gap = validation.degree_level_gap.unwrap();
        assert_eq!(gap.required, "master");
        assert_eq!(gap.found, "ba");
        assert!(!gap.is_required);
        assert_eq!(validation.severity, RequirementSeverity::Warning);
    }

    #[test]
    fn test_word_boundaries_avoid_false_degrees() {
        let validation = validate_education_requirements(
            "Managed teams and systems.",
            "Strong management skills are a plus.",
        );
        assert_eq!(validation, EducationValidation::default());
    }

    #[test]
    fn test_gpa_requirement() {
        let below = validate_education_requirements("BS in Accounting, GPA: 2.9", "Bachelor's degree, 3.0 GPA minimum.");
        assert_eq!(
            below.gpa_gap,
            Some(GpaGap {
                required: 3.0,
                found: Some(2.9)
            })
        );
        assert_eq!(below.severity, RequirementSeverity::Warning);

        let missing = validate_education_requirements("BS in Accounting", "3.5 GPA or higher.");
        assert_eq!(missing.gpa_gap.unwrap().found, None);
    }

    #[test]
    fn test_abbreviations_need_degree_context() {
        let validation = validate_education_requirements(
            "Advanced MS Excel user based in Boston, MA. Associate degree in business.",
            "Bachelor's degree in accounting or finance required. Accounting background.",
        );
        let gap = validation.degree_level_gap.unwrap();
        assert_eq!(gap.found, "associate");
        assert_eq!(validation.severity, RequirementSeverity::Dealbreaker);

        let office = validate_education_requirements(
            "Associate degree in accounting.",
            "MS Office proficiency required.",
        );
        assert_eq!(office.degree_level_gap, None);
    }

    #[test]
    fn test_dotted_and_in_forms_are_degrees() {
        let dotted = validate_education_requirements(
            "M.S. in Finance, 2019.",
            "Master's in finance preferred.",
        );
        assert_eq!(dotted.degree_level_gap, None);

        let jd_dotted = validate_education_requirements(
            "B.A. in Economics.",
            "Required: M.S. in accounting or finance.",
        );
        let gap = jd_dotted.degree_level_gap.unwrap();
        assert_eq!(gap.required, "ms");
        assert_eq!(gap.found, "ba");
        assert!(gap.is_required);
    }
}
