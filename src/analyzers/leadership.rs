// file: src/analyzers/leadership.rs
// description: leadership signal detection across team, decision, strategy and ownership language
// reference: regex signal families over lowercased text

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("leadership regex is valid"))
        .collect()
}

lazy_static! {
    static ref TEAM_PATTERNS: Vec<Regex> = compile(&[
        r"\b(?:supervised|managed|mentored|coached|trained|developed|led)\s+(?:team|staff|employees|people)",
        r"\bteam of \d+",
        r"\b(?:direct reports|indirect reports)",
        r"\bhiring|recruiting|onboarding\b",
    ]);

    static ref DECISION_PATTERNS: Vec<Regex> = compile(&[
        r"\b(?:decided|determined|approved|authorized|selected|chose)",
        r"\b(?:decision|approval|authorization)",
        r"\b(?:stakeholder|executive|leadership) (?:approval|buy-in|alignment)",
    ]);

    static ref STRATEGIC_PATTERNS: Vec<Regex> = compile(&[
        r"\b(?:strategy|strategic|roadmap|vision|planning)",
        r"\b(?:initiative|program|transformation)",
        r"\b(?:cross-functional|enterprise-wide|organization-wide)",
        r"\b(?:long-term|multi-year)",
    ]);

    static ref OWNERSHIP_PATTERNS: Vec<Regex> = compile(&[
        r"\b(?:owned|led|drove|delivered|spearheaded|established)",
        r"\b(?:responsible for|accountable for)",
        r"\bp&l|profit and loss|budget of",
        r"\bend-to-end|full-cycle|complete\b",
    ]);
}

const POINTS_PER_SIGNAL: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadershipSignalSet {
    pub team_management: Vec<String>,
    pub decision_making: Vec<String>,
    pub strategic: Vec<String>,
    pub ownership: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadershipSignals {
    pub signals: LeadershipSignalSet,
    pub total_count: usize,
    pub team_management_count: usize,
    pub decision_making_count: usize,
    pub strategic_count: usize,
    pub ownership_count: usize,
    /// Five points per signal, capped at 100.
    pub leadership_score: usize,
}

fn collect(patterns: &[Regex], text: &str) -> Vec<String> {
    patterns
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}

pub fn detect_leadership_signals(text: &str) -> LeadershipSignals {
    let lower = text.to_lowercase();

    let signals = LeadershipSignalSet {
        team_management: collect(&TEAM_PATTERNS, &lower),
        decision_making: collect(&DECISION_PATTERNS, &lower),
        strategic: collect(&STRATEGIC_PATTERNS, &lower),
        ownership: collect(&OWNERSHIP_PATTERNS, &lower),
    };

    let total_count = signals.team_management.len()
        + signals.decision_making.len()
        + signals.strategic.len()
        + signals.ownership.len();

    LeadershipSignals {
        team_management_count: signals.team_management.len(),
        decision_making_count: signals.decision_making.len(),
        strategic_count: signals.strategic.len(),
        ownership_count: signals.ownership.len(),
        total_count,
        leadership_score: (total_count * POINTS_PER_SIGNAL).min(100),
        signals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detects_each_family() {
        let result = detect_leadership_signals(
            "Led a team of 8 and owned the P&L. Approved the annual roadmap for a cross-functional program.",
        );

        assert_eq!(result.signals.team_management, vec!["team of 8".to_string()]);
        assert_eq!(result.decision_making_count, 1);
        assert_eq!(result.strategic_count, 3);
        assert_eq!(result.signals.ownership, vec![
            "led".to_string(),
            "owned".to_string(),
            "p&l".to_string()
        ]);
        assert_eq!(result.leadership_score, result.total_count * 5);
    }

    #[test]
    fn test_score_caps_at_100() {
        let text = "Led strategy. ".repeat(30);
        let result = detect_leadership_signals(&text);
        assert_eq!(result.leadership_score, 100);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(detect_leadership_signals(""), LeadershipSignals::default());
    }
}
