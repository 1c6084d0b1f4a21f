// file: src/analyzers/verbs.rs
// description: action verb strength breakdown over tagged resume text
// reference: lemma based verb tiers

use crate::nlp::{ParsedText, PartOfSpeech};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

lazy_static! {
    static ref WEAK_VERBS: HashSet<&'static str> = [
        "help", "assist", "support", "aid", "contribute", "participate", "work", "handle", "do",
        "perform",
    ]
    .into_iter()
    .collect();

    static ref MID_VERBS: HashSet<&'static str> = [
        "manage", "implement", "execute", "conduct", "process", "prepare", "create", "develop",
        "maintain", "coordinate", "organize", "review", "analyze", "resolve", "complete",
    ]
    .into_iter()
    .collect();

    static ref STRONG_VERBS: HashSet<&'static str> = [
        "lead", "own", "direct", "establish", "spearhead", "architect", "pioneer", "transform",
        "drive", "launch", "build", "design", "optimize", "streamline", "deliver", "orchestrate",
        "champion", "overhaul", "restructure",
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbTier {
    Weak,
    Mid,
    Strong,
}

pub fn verb_tier(lemma: &str) -> Option<VerbTier> {
    if WEAK_VERBS.contains(lemma) {
        Some(VerbTier::Weak)
    } else if MID_VERBS.contains(lemma) {
        Some(VerbTier::Mid)
    } else if STRONG_VERBS.contains(lemma) {
        Some(VerbTier::Strong)
    } else {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbBreakdown {
    pub weak: Vec<String>,
    pub mid: Vec<String>,
    pub strong: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbStrength {
    pub weak_pct: f64,
    pub mid_pct: f64,
    pub strong_pct: f64,
    pub total_verbs: usize,
    pub verb_breakdown: VerbBreakdown,
    pub recommendations: Vec<String>,
}

pub fn analyze_action_verbs(parsed: &ParsedText) -> VerbStrength {
    let mut breakdown = VerbBreakdown::default();

    for token in parsed.tokens().filter(|t| t.pos == PartOfSpeech::Verb) {
        match verb_tier(&token.lemma) {
            Some(VerbTier::Weak) => breakdown.weak.push(token.text.clone()),
            Some(VerbTier::Mid) => breakdown.mid.push(token.text.clone()),
            Some(VerbTier::Strong) => breakdown.strong.push(token.text.clone()),
            None => {}
        }
    }

    let total = breakdown.weak.len() + breakdown.mid.len() + breakdown.strong.len();
    if total == 0 {
        return VerbStrength {
            verb_breakdown: breakdown,
            ..VerbStrength::default()
        };
    }

    let pct = |count: usize| count as f64 / total as f64 * 100.0;
    let weak_pct = pct(breakdown.weak.len());
    let mid_pct = pct(breakdown.mid.len());
    let strong_pct = pct(breakdown.strong.len());

    let mut recommendations = Vec::new();
    if weak_pct > 30.0 {
        recommendations.push(format!(
            "High use of weak verbs ({:.0}%). Replace with stronger alternatives.",
            weak_pct
        ));
    }
    if strong_pct < 20.0 {
        recommendations.push(format!(
            "Low use of strong leadership verbs ({:.0}%). Add more ownership language.",
            strong_pct
        ));
    }

    VerbStrength {
        weak_pct,
        mid_pct,
        strong_pct,
        total_verbs: total,
        verb_breakdown: breakdown,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LanguagePipeline, RuleBasedPipeline};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verb_tiers() {
        assert_eq!(verb_tier("assist"), Some(VerbTier::Weak));
        assert_eq!(verb_tier("prepare"), Some(VerbTier::Mid));
        assert_eq!(verb_tier("spearhead"), Some(VerbTier::Strong));
        assert_eq!(verb_tier("attend"), None);
    }

    #[test]
    fn test_weak_heavy_resume() {
        let parsed = RuleBasedPipeline::new().parse(
            "Assisted the controller with audits.\nHelped vendors with questions.\nPrepared journal entries.",
        );
        let result = analyze_action_verbs(&parsed);

        assert_eq!(result.total_verbs, 3);
        assert_eq!(result.verb_breakdown.weak, vec!["Assisted".to_string(), "Helped".to_string()]);
        assert_eq!(result.verb_breakdown.mid, vec!["Prepared".to_string()]);
        assert_eq!(result.recommendations.len(), 2);
        assert!(result.recommendations[0].starts_with("High use of weak verbs (67%)"));
        assert!(result.recommendations[1].starts_with("Low use of strong leadership verbs (0%)"));
    }

    #[test]
    fn test_no_verbs() {
        let result = analyze_action_verbs(&ParsedText::default());
        assert_eq!(result, VerbStrength::default());
    }
}
