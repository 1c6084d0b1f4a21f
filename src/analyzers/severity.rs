// file: src/analyzers/severity.rs
// description: 1-10 severity scoring of skill gaps from jd importance signals
// reference: frequency, position, requirement-section and credential signals

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE_SCORE: u8 = 5;
const MAX_SCORE: u8 = 10;
const REQUIREMENT_WINDOW_CHARS: usize = 500;
const REQUIREMENT_KEYWORDS: &[&str] = &["required", "must have", "qualifications", "requirements", "essential"];
const CREDENTIAL_KEYWORDS: &[&str] = &["cpa", "cfa", "certified", "license", "certification"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityBand {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            9.. => SeverityBand::Critical,
            7..=8 => SeverityBand::High,
            5..=6 => SeverityBand::Medium,
            _ => SeverityBand::Low,
        }
    }

    pub fn is_urgent(self) -> bool {
        matches!(self, SeverityBand::Critical | SeverityBand::High)
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeverityBand::Low => "LOW",
            SeverityBand::Medium => "MEDIUM",
            SeverityBand::High => "HIGH",
            SeverityBand::Critical => "CRITICAL",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSeverity {
    pub gap: String,
    pub score: u8,
    pub severity: SeverityBand,
    pub signals: Vec<String>,
    pub frequency: usize,
}

fn marked_as_required(jd_lower: &str, gap_lower: &str) -> bool {
    let gap = regex::escape(gap_lower);
    [
        format!(r"(?:required|must have|essential).*?{}", gap),
        format!(r"{}.*?(?:required|essential|critical)", gap),
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .any(|re| re.is_match(jd_lower))
}

fn score_gap(gap: &str, jd_lower: &str, jd_chars: usize) -> GapSeverity {
    let gap_lower = gap.to_lowercase();
    let mut score = BASE_SCORE;
    let mut signals = Vec::new();

    let frequency = if gap_lower.is_empty() {
        0
    } else {
        jd_lower.matches(gap_lower.as_str()).count()
    };
    if frequency >= 4 {
        score += 3;
        signals.push(format!("mentioned {}x in JD", frequency));
    } else if frequency >= 2 {
        score += 2;
        signals.push(format!("mentioned {}x", frequency));
    }

    if let Some(byte_index) = jd_lower.find(&gap_lower).filter(|_| frequency > 0) {
        let position_pct = jd_lower[..byte_index].chars().count() as f64 / jd_chars as f64 * 100.0;
        if position_pct <= 25.0 {
            score += 2;
            signals.push("appears early in JD".to_string());
        }
    }

    for keyword in REQUIREMENT_KEYWORDS {
        let Some(keyword_index) = jd_lower.find(keyword) else {
            continue;
        };
        let window: String = jd_lower[keyword_index..].chars().take(REQUIREMENT_WINDOW_CHARS).collect();
        if frequency > 0 && window.contains(&gap_lower) {
            score += 2;
            signals.push(format!("in {} section", keyword));
            break;
        }
    }

    if frequency > 0 && marked_as_required(jd_lower, &gap_lower) {
        score += 1;
        signals.push("marked as required".to_string());
    }

    if CREDENTIAL_KEYWORDS.iter().any(|c| gap_lower.contains(c)) {
        score += 1;
        signals.push("certification/credential".to_string());
    }

    let score = score.min(MAX_SCORE);
    GapSeverity {
        gap: gap.to_string(),
        score,
        severity: SeverityBand::from_score(score),
        signals,
        frequency,
    }
}

/// Scores every gap against the jd text, most severe first.
pub fn score_gap_severity(gaps: &[String], jd_text: &str) -> Vec<GapSeverity> {
    if gaps.is_empty() {
        return Vec::new();
    }

    let jd_lower = jd_text.to_lowercase();
    let jd_chars = jd_lower.chars().count().max(1);

    let mut scored: Vec<GapSeverity> = gaps.iter().map(|gap| score_gap(gap, &jd_lower, jd_chars)).collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}
