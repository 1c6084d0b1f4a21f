// file: src/analyzers/career.rs
// description: career progression, scope inference and resume consistency checks
// reference: title and date-range scanning over resume lines

use crate::extractor::patterns::{max_dollars_in_millions, max_team_size};
use crate::nlp::ParsedText;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref ROLE_DATES: Regex = Regex::new(r"(?i)(20\d{2})\s*[-–]\s*(20\d{2}|present|current)")
        .expect("ROLE_DATES regex is valid");
    static ref TEAM_MENTION: Regex = Regex::new(r"(?i)(?:team|managed|supervised|led|mentored)\s+\d+|team of")
        .expect("TEAM_MENTION regex is valid");
    static ref DOLLAR_FIGURE: Regex = Regex::new(r"\$\s*\d+").expect("DOLLAR_FIGURE regex is valid");
}

const TITLE_HINTS: &[&str] = &["manager", "director", "senior", "lead", "analyst", "controller"];
const TITLE_LADDER: &[&str] = &[
    "analyst", "associate", "specialist", "coordinator", "senior", "lead", "manager", "director", "vp",
    "chief",
];
const CONSISTENCY_TITLES: &[&str] = &[
    "manager", "director", "senior", "lead", "analyst", "controller", "supervisor", "coordinator",
];
const MANAGEMENT_TITLES: &[&str] = &["manager", "director", "supervisor", "lead"];
const MAX_CONSISTENCY_ISSUES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub title: String,
    pub start_year: i32,
    pub end_year: i32,
    pub duration: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionQuality {
    Strong,
    Moderate,
    Lateral,
    Unclear,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceProgression {
    pub total_roles: usize,
    pub promotions: usize,
    pub lateral_moves: usize,
    pub career_gaps: Vec<String>,
    pub avg_tenure: f64,
    pub progression_quality: ProgressionQuality,
}

fn resolve_end_year(raw: &str, current_year: i32) -> Option<i32> {
    match raw.to_lowercase().as_str() {
        "present" | "current" => Some(current_year),
        other => other.parse().ok(),
    }
}

fn looks_like_title(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() > 6 || !words.iter().any(|w| w.chars().next().is_some_and(char::is_uppercase)) {
        return false;
    }
    let lower = line.to_lowercase();
    TITLE_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Roles as title lines followed by a date range, in start-year order.
pub fn extract_roles(resume_text: &str, current_year: i32) -> Vec<RoleEntry> {
    let mut roles = Vec::new();
    let mut title: Option<String> = None;

    for line in resume_text.lines() {
        if looks_like_title(line) {
            title = Some(line.trim().to_string());
        }

        let Some(caps) = ROLE_DATES.captures(line) else {
            continue;
        };
        let (Some(start_year), Some(end_year)) = (
            caps[1].parse::<i32>().ok(),
            resolve_end_year(&caps[2], current_year),
        ) else {
            continue;
        };

        if let Some(title) = title.take() {
            roles.push(RoleEntry {
                title,
                start_year,
                end_year,
                duration: end_year - start_year,
            });
        }
    }

    roles.sort_by_key(|r| r.start_year);
    roles
}

fn ladder_rank(title: &str) -> usize {
    let lower = title.to_lowercase();
    TITLE_LADDER
        .iter()
        .enumerate()
        .filter(|(_, word)| lower.contains(*word))
        .map(|(rank, _)| rank)
        .max()
        .unwrap_or(0)
}

pub fn analyze_experience_progression(resume_text: &str, current_year: i32) -> ExperienceProgression {
    let roles = extract_roles(resume_text, current_year);
    let mut progression = ExperienceProgression {
        total_roles: roles.len(),
        ..ExperienceProgression::default()
    };
    if roles.len() < 2 {
        return progression;
    }

    let tenures: Vec<i32> = roles.iter().map(|r| r.duration).filter(|d| *d != 0).collect();
    if !tenures.is_empty() {
        progression.avg_tenure = tenures.iter().sum::<i32>() as f64 / tenures.len() as f64;
    }

    for pair in roles.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        let (previous_rank, current_rank) = (ladder_rank(&previous.title), ladder_rank(&current.title));

        if current_rank > previous_rank {
            progression.promotions += 1;
        } else if current_rank == previous_rank {
            progression.lateral_moves += 1;
        }

        if current.start_year - previous.end_year > 0 {
            progression
                .career_gaps
                .push(format!("{}-{}", previous.end_year, current.start_year));
        }
    }

    progression.progression_quality = if progression.promotions >= 2 {
        ProgressionQuality::Strong
    } else if progression.promotions >= 1 {
        ProgressionQuality::Moderate
    } else if progression.lateral_moves > progression.promotions {
        ProgressionQuality::Lateral
    } else {
        ProgressionQuality::Unclear
    };

    progression
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeLevel {
    #[default]
    Junior,
    Mid,
    Senior,
}

impl ScopeLevel {
    fn classify(budget_millions: f64, team: u32) -> Self {
        if budget_millions >= 10.0 || team >= 20 {
            ScopeLevel::Senior
        } else if budget_millions >= 2.0 || team >= 5 {
            ScopeLevel::Mid
        } else {
            ScopeLevel::Junior
        }
    }
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScopeLevel::Junior => "junior",
            ScopeLevel::Mid => "mid",
            ScopeLevel::Senior => "senior",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeAnalysis {
    pub resume_scope: ScopeLevel,
    pub jd_scope: ScopeLevel,
    pub scope_match: bool,
    /// Largest budget mentioned, in millions.
    pub resume_budget: f64,
    pub jd_budget: f64,
    pub resume_team: u32,
    pub jd_team: u32,
    pub recommendation: Option<String>,
}

/// Compares budget and team-size scope between resume and jd.
pub fn infer_scope_level(resume_text: &str, jd_text: &str) -> ScopeAnalysis {
    let resume_budget = max_dollars_in_millions(resume_text);
    let jd_budget = max_dollars_in_millions(jd_text);
    let resume_team = max_team_size(resume_text);
    let jd_team = max_team_size(jd_text);

    let resume_scope = ScopeLevel::classify(resume_budget, resume_team);
    let jd_scope = ScopeLevel::classify(jd_budget, jd_team);
    let scope_match = resume_scope == jd_scope;

    let recommendation = match (resume_scope, jd_scope) {
        (resume, ScopeLevel::Senior) if resume != ScopeLevel::Senior => Some(format!(
            "Resume shows {}-level scope (${:.1}M budget, {} people) but JD requires senior-level \
             (${:.1}M+, {}+ people). Add larger-scale examples.",
            resume, resume_budget, resume_team, jd_budget, jd_team
        )),
        (ScopeLevel::Junior, ScopeLevel::Mid) => Some(
            "Resume shows junior-level scope. JD requires mid-level responsibility. \
             Emphasize larger projects and team leadership."
                .to_string(),
        ),
        _ => None,
    };

    ScopeAnalysis {
        resume_scope,
        jd_scope,
        scope_match,
        resume_budget,
        jd_budget,
        resume_team,
        jd_team,
        recommendation,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyCheck {
    pub consistency_issues: Vec<String>,
}

/// Flags titles the rest of the resume does not back up.
pub fn check_consistency(parsed: &ParsedText, resume_text: &str, current_year: i32) -> ConsistencyCheck {
    let titles: Vec<&str> = parsed
        .sentences
        .iter()
        .filter_map(|sentence| {
            let lower = sentence.text.to_lowercase();
            CONSISTENCY_TITLES.iter().find(|k| lower.contains(*k)).copied()
        })
        .collect();

    let mut issues = Vec::new();

    let has_management_title = titles.iter().any(|t| MANAGEMENT_TITLES.contains(t));
    if has_management_title && !TEAM_MENTION.is_match(resume_text) {
        issues.push(
            "Title includes 'Manager/Director' but no team management mentioned. \
             Add team size or remove management title."
                .to_string(),
        );
    }

    let has_senior_title = titles.contains(&"senior");
    let total_years: i32 = ROLE_DATES
        .captures_iter(resume_text)
        .filter_map(|caps| {
            let start: i32 = caps[1].parse().ok()?;
            let end = resolve_end_year(&caps[2], current_year)?;
            Some(end - start)
        })
        .sum();
    if has_senior_title && total_years < 5 {
        issues.push(
            "Title includes 'Senior' but less than 5 years experience shown. \
             Add more experience or adjust title."
                .to_string(),
        );
    }

    if resume_text.to_lowercase().contains("budget") && !DOLLAR_FIGURE.is_match(resume_text) {
        issues.push(
            "'Budget' mentioned but no dollar amounts provided. Quantify budget responsibility.".to_string(),
        );
    }

    issues.truncate(MAX_CONSISTENCY_ISSUES);
    ConsistencyCheck {
        consistency_issues: issues,
    }
}
