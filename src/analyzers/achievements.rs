// file: src/analyzers/achievements.rs
// description: quantified achievement extraction and task versus outcome classification
// reference: shared money, percentage, team and volume patterns

use crate::extractor::patterns::{DOLLAR_AMOUNT, PERCENTAGE, TEAM_SIZE, TIMEFRAME, VOLUME};
use crate::nlp::ParsedText;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

lazy_static! {
    static ref OUTCOME_INDICATORS: Vec<Regex> = [
        r"\d+%",
        r"\$\d+",
        r"(?:increased|decreased|reduced|improved|enhanced|optimized)",
        r"(?:resulting in|leading to|achieving)",
        r"(?:saved|generated|delivered)",
        r"(?:award|recognition|promotion)",
        r"by \d+(?:%|x)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("outcome indicator regex is valid"))
    .collect();

    static ref TASK_INDICATORS: Vec<Regex> = [
        r"^(?:prepared|processed|handled|managed|maintained)",
        r"(?:daily|weekly|monthly|quarterly) (?:tasks|duties|responsibilities)",
        r"(?:assisted|helped|supported|contributed)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("task indicator regex is valid"))
    .collect();
}

/// Metrics found in resume text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Achievements {
    pub dollar_amounts: Vec<String>,
    pub percentages: Vec<String>,
    pub team_sizes: Vec<String>,
    pub volumes: Vec<String>,
    pub timeframes: Vec<String>,
}

impl Achievements {
    /// True when any money, percentage or team-size figure was found.
    pub fn has_quantified_impact(&self) -> bool {
        !self.dollar_amounts.is_empty() || !self.percentages.is_empty() || !self.team_sizes.is_empty()
    }
}

pub fn extract_achievements(text: &str) -> Achievements {
    let dollar_amounts = DOLLAR_AMOUNT
        .captures_iter(text)
        .map(|caps| {
            let amount = caps.get(1).map(|m| m.as_str().replace(',', "")).unwrap_or_default();
            let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            format!("${}{}", amount, unit)
        })
        .collect();

    let percentages = PERCENTAGE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| format!("{}%", m.as_str())))
        .collect();

    let team_sizes = TEAM_SIZE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();

    let volumes = VOLUME.find_iter(text).map(|m| m.as_str().to_string()).collect();

    let timeframes: BTreeSet<String> = TIMEFRAME
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();

    Achievements {
        dollar_amounts,
        percentages,
        team_sizes,
        volumes,
        timeframes: timeframes.into_iter().collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletKind {
    Outcome,
    Task,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceClassification {
    pub sentence: String,
    pub kind: BulletKind,
    pub outcome_score: usize,
    pub task_score: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub classifications: Vec<SentenceClassification>,
    pub outcome_pct: f64,
    pub task_pct: f64,
    pub neutral_pct: f64,
    pub recommendations: Vec<String>,
}

fn classify_sentence(sentence: &str) -> SentenceClassification {
    let lower = sentence.to_lowercase();
    let outcome_score = OUTCOME_INDICATORS.iter().filter(|re| re.is_match(&lower)).count();
    let task_score = TASK_INDICATORS.iter().filter(|re| re.is_match(&lower)).count();

    let kind = match outcome_score.cmp(&task_score) {
        std::cmp::Ordering::Greater => BulletKind::Outcome,
        std::cmp::Ordering::Less => BulletKind::Task,
        std::cmp::Ordering::Equal => BulletKind::Neutral,
    };

    SentenceClassification {
        sentence: sentence.to_string(),
        kind,
        outcome_score,
        task_score,
    }
}

/// Labels every sentence as outcome, task or neutral by indicator counts.
pub fn classify_task_vs_outcome(parsed: &ParsedText) -> TaskOutcome {
    let classifications: Vec<SentenceClassification> = parsed
        .sentences
        .iter()
        .map(|s| classify_sentence(&s.text))
        .collect();

    if classifications.is_empty() {
        return TaskOutcome::default();
    }

    let total = classifications.len() as f64;
    let outcome_count = classifications.iter().filter(|c| c.kind == BulletKind::Outcome).count();
    let task_count = classifications.iter().filter(|c| c.kind == BulletKind::Task).count();

    let outcome_pct = outcome_count as f64 / total * 100.0;
    let task_pct = task_count as f64 / total * 100.0;

    let mut recommendations = Vec::new();
    if outcome_pct < 40.0 {
        recommendations.push(format!(
            "Only {:.0}% of bullets are outcome-oriented. Add metrics and results to {} task-based bullets.",
            outcome_pct,
            task_count.min(5)
        ));
    }

    TaskOutcome {
        classifications,
        outcome_pct,
        task_pct,
        neutral_pct: 100.0 - outcome_pct - task_pct,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LanguagePipeline, RuleBasedPipeline};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_achievements() {
        let text = "Managed a $1,200K budget and cut close time by 40%. \
                    Led 6 people processing 500+ invoices monthly and Monthly reporting.";
        let achievements = extract_achievements(text);

        assert_eq!(achievements.dollar_amounts, vec!["$1200K".to_string()]);
        assert_eq!(achievements.percentages, vec!["40%".to_string()]);
        assert_eq!(achievements.team_sizes, vec!["6".to_string()]);
        assert_eq!(achievements.volumes, vec!["500+ invoices".to_string()]);
        assert_eq!(achievements.timeframes, vec!["monthly".to_string()]);
        assert!(achievements.has_quantified_impact());
    }

    #[test]
    fn test_no_achievements() {
        let achievements = extract_achievements("");
        assert_eq!(achievements, Achievements::default());
        assert!(!achievements.has_quantified_impact());
    }

    #[test]
    fn test_task_vs_outcome() {
        let parsed = RuleBasedPipeline::new().parse(
            "Reduced invoice errors by 30% through new controls.\n\
             Prepared weekly vendor payments.\n\
             Attended team meetings.",
        );
        let result = classify_task_vs_outcome(&parsed);

        let kinds: Vec<BulletKind> = result.classifications.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![BulletKind::Outcome, BulletKind::Task, BulletKind::Neutral]);
        assert!(result.outcome_pct < 40.0);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].contains("Add metrics and results to 1 task-based bullets"));
    }

    #[test]
    fn test_task_vs_outcome_empty() {
        let result = classify_task_vs_outcome(&ParsedText::default());
        assert_eq!(result, TaskOutcome::default());
    }
}
