// file: src/analyzers/categorize.rs
// description: hard versus soft skill classification and complementary skill pairs
// reference: indicator vocabularies and finance skill pairings

use serde::{Deserialize, Serialize};

const HARD_INDICATORS: &[&str] = &[
    // tools and platforms
    "software", "system", "tool", "platform", "application", "excel", "python", "sql", "tableau",
    "quickbooks", "sap", "oracle", "erp", "salesforce", "netsuite", "sage", "aws", "azure", "api",
    // accounting and finance
    "gaap", "ifrs", "reconciliation", "ledger", "payroll", "ap", "ar", "gl", "financial statements",
    "balance sheet", "income statement", "cash flow", "budgeting", "forecasting", "variance analysis",
    "audit", "tax", "journal entries", "month-end close", "year-end close",
    // credentials
    "cpa", "cfa", "pmp", "certified", "certification",
    // technical processes
    "analysis", "reporting", "modeling", "programming", "coding",
];

const SOFT_INDICATORS: &[&str] = &[
    "leadership", "management", "communication", "collaboration", "teamwork", "problem solving",
    "critical thinking", "strategic thinking", "analytical thinking", "interpersonal", "negotiation",
    "presentation", "mentoring", "coaching", "stakeholder management", "relationship building",
    "influence", "persuasion", "adaptability", "flexibility", "time management", "organization",
    "attention to detail", "multitasking", "prioritization",
];

const SOFT_TIEBREAK_WORDS: &[&str] = &["manage", "lead", "communicate", "collaborate"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategories {
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    Hard,
    Soft,
}

/// Counts indicator substrings; ties go to hard for short acronyms, soft
/// for people-verbs and hard otherwise.
pub fn skill_kind(skill: &str) -> SkillKind {
    let lower = skill.to_lowercase();
    let hard = HARD_INDICATORS.iter().filter(|i| lower.contains(*i)).count();
    let soft = SOFT_INDICATORS.iter().filter(|i| lower.contains(*i)).count();

    match hard.cmp(&soft) {
        std::cmp::Ordering::Greater => SkillKind::Hard,
        std::cmp::Ordering::Less => SkillKind::Soft,
        std::cmp::Ordering::Equal => {
            let acronym = skill.chars().any(char::is_uppercase) && skill.chars().count() <= 6;
            if acronym {
                SkillKind::Hard
            } else if SOFT_TIEBREAK_WORDS.iter().any(|w| lower.contains(w)) {
                SkillKind::Soft
            } else {
                SkillKind::Hard
            }
        }
    }
}

pub fn classify_hard_vs_soft(skills: &[String]) -> SkillCategories {
    let mut categories = SkillCategories::default();
    for skill in skills {
        match skill_kind(skill) {
            SkillKind::Hard => categories.hard_skills.push(skill.clone()),
            SkillKind::Soft => categories.soft_skills.push(skill.clone()),
        }
    }
    categories
}

const SKILL_PAIRS: &[(&str, &[&str])] = &[
    ("accounts payable", &["accounts receivable", "ap", "ar"]),
    ("accounts receivable", &["accounts payable", "ap", "ar"]),
    ("budgeting", &["forecasting", "variance analysis", "financial planning"]),
    ("forecasting", &["budgeting", "variance analysis"]),
    ("financial statements", &["balance sheet", "income statement", "cash flow"]),
    ("balance sheet", &["income statement", "cash flow", "financial statements"]),
    ("month-end close", &["year-end close", "financial reporting"]),
    ("general ledger", &["journal entries", "reconciliation", "gl"]),
    ("gaap", &["ifrs", "financial reporting", "compliance"]),
    ("quickbooks", &["sage", "netsuite", "erp"]),
    ("variance analysis", &["budgeting", "forecasting", "financial analysis"]),
];

const MAX_COMPLEMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingComplement {
    pub has: String,
    pub missing: String,
    pub reason: String,
}

/// Skills the jd pairs with one the resume already has, where the partner is a gap.
pub fn analyze_skill_cooccurrence(
    resume_skills: &[String],
    jd_skills: &[String],
    gaps: &[String],
) -> Vec<MissingComplement> {
    let jd_lower: Vec<String> = jd_skills.iter().map(|s| s.to_lowercase()).collect();
    let gaps_lower: Vec<String> = gaps.iter().map(|s| s.to_lowercase()).collect();
    let mut missing = Vec::new();

    for resume_skill in resume_skills {
        let lower = resume_skill.to_lowercase();
        let Some((_, complements)) = SKILL_PAIRS.iter().find(|(skill, _)| *skill == lower) else {
            continue;
        };

        for complement in complements.iter() {
            let in_jd = jd_lower.iter().any(|s| s.contains(complement));
            let in_gaps = gaps_lower.iter().any(|g| g.contains(complement));
            if in_jd && in_gaps {
                missing.push(MissingComplement {
                    has: resume_skill.clone(),
                    missing: complement.to_string(),
                    reason: format!("You have '{}' but not '{}' - JD needs both", resume_skill, complement),
                });
            }
        }
    }

    missing.truncate(MAX_COMPLEMENTS);
    missing
}
