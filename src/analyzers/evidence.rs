// file: src/analyzers/evidence.rs
// description: evidence strength behind each claimed resume skill
// reference: metrics, outcome and leadership language around skill mentions

use crate::nlp::ParsedText;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EVIDENCE_METRIC: Regex = Regex::new(r"\d+%|\$\d+|\d+\s*(?:percent|million|thousand)")
        .expect("EVIDENCE_METRIC regex is valid");
}

const MAX_SKILLS: usize = 15;
const OUTCOME_VERBS: &[&str] = &["increased", "decreased", "improved", "reduced", "achieved", "delivered", "generated"];
const LEADERSHIP_WORDS: &[&str] = &["led", "managed", "directed", "owned", "established"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvidenceQuality {
    Weak,
    Moderate,
    Strong,
}

impl EvidenceQuality {
    fn from_score(score: u8) -> Self {
        match score {
            8.. => EvidenceQuality::Strong,
            5..=7 => EvidenceQuality::Moderate,
            _ => EvidenceQuality::Weak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEvidence {
    pub skill: String,
    pub evidence_score: u8,
    pub quality: EvidenceQuality,
    pub evidence_details: Vec<String>,
    pub mentions: usize,
}

fn assess(skill: &str, sentences: &[String]) -> SkillEvidence {
    let skill_lower = skill.to_lowercase();
    let relevant: Vec<String> = sentences
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| s.contains(&skill_lower))
        .collect();

    if relevant.is_empty() {
        return SkillEvidence {
            skill: skill.to_string(),
            evidence_score: 1,
            quality: EvidenceQuality::Weak,
            evidence_details: vec!["Only listed, no examples provided".to_string()],
            mentions: 0,
        };
    }

    let mut score: u8 = 3;
    let mut details = Vec::new();

    if relevant.iter().any(|s| EVIDENCE_METRIC.is_match(s)) {
        score += 2;
        details.push("Quantified with metrics".to_string());
    }
    if relevant.iter().any(|s| OUTCOME_VERBS.iter().any(|v| s.contains(v))) {
        score += 2;
        details.push("Shows outcomes/results".to_string());
    }
    if relevant.iter().any(|s| s.split_whitespace().count() > 15) {
        score += 1;
        details.push("Detailed examples provided".to_string());
    }
    let joined = relevant.join(" ");
    if LEADERSHIP_WORDS.iter().any(|w| joined.contains(w)) {
        score += 1;
        details.push("Leadership context".to_string());
    }
    if relevant.len() >= 3 {
        score += 1;
        details.push(format!("Mentioned {} times", relevant.len()));
    }

    let score = score.min(10);
    SkillEvidence {
        skill: skill.to_string(),
        evidence_score: score,
        quality: EvidenceQuality::from_score(score),
        evidence_details: details,
        mentions: relevant.len(),
    }
}

/// Evidence for the first fifteen resume skills, weakest first.
pub fn assess_skill_evidence(parsed: &ParsedText, resume_skills: &[String]) -> Vec<SkillEvidence> {
    if resume_skills.is_empty() {
        return Vec::new();
    }

    let sentences = parsed.sentence_texts();
    let mut scored: Vec<SkillEvidence> = resume_skills
        .iter()
        .take(MAX_SKILLS)
        .map(|skill| assess(skill, &sentences))
        .collect();
    scored.sort_by_key(|e| e.evidence_score);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LanguagePipeline, RuleBasedPipeline};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_evidence_levels() {
        let parsed = RuleBasedPipeline::new().parse(
            "Led payroll for 300 employees and reduced payroll errors by 40%.\n\
             Payroll audits passed every year.\n\
             Payroll tax filings in three states.\n\
             Used excel daily.",
        );
        let skills = vec!["payroll".to_string(), "excel".to_string(), "sql".to_string()];
        let evidence = assess_skill_evidence(&parsed, &skills);

        assert_eq!(evidence[0].skill, "sql");
        assert_eq!(evidence[0].evidence_score, 1);
        assert_eq!(evidence[0].quality, EvidenceQuality::Weak);

        assert_eq!(evidence[1].skill, "excel");
        assert_eq!(evidence[1].evidence_score, 3);

        let payroll = &evidence[2];
        assert_eq!(payroll.mentions, 3);
        assert_eq!(payroll.evidence_score, 9);
        assert!(payroll.evidence_details.contains(&"Leadership context".to_string()));
        assert_eq!(payroll.quality, EvidenceQuality::Strong);
    }

    #[test]
    fn test_no_skills() {
        assert!(assess_skill_evidence(&ParsedText::default(), &[]).is_empty());
    }
}
