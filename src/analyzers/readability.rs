// file: src/analyzers/readability.rs
// description: flesch reading ease, passive voice ratio and sentence length checks
// reference: vowel-group syllable estimate

use super::round1;
use crate::nlp::ParsedText;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub flesch_score: f64,
    pub passive_pct: f64,
    pub avg_sentence_length: f64,
    pub issues: Vec<String>,
}

/// Vowel groups, minus a trailing silent `e`, never below one.
pub fn count_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut count: isize = 0;
    let mut previous_was_vowel = false;

    for c in lower.chars() {
        let is_vowel = "aeiouy".contains(c);
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }
    if lower.ends_with('e') {
        count -= 1;
    }

    count.max(1) as usize
}

pub fn calculate_readability(parsed: &ParsedText) -> Readability {
    if parsed.is_empty() {
        return Readability::default();
    }

    let total_sentences = parsed.sentences.len() as f64;
    let total_words = parsed.tokens().filter(|t| !t.is_punct()).count() as f64;
    let avg_sentence_length = total_words / total_sentences;

    let passive_sentences = parsed
        .sentences
        .iter()
        .filter(|sentence| {
            sentence
                .tokens
                .windows(2)
                .any(|pair| pair[0].lemma == "be" && pair[1].past_participle)
        })
        .count() as f64;
    let passive_pct = passive_sentences / total_sentences * 100.0;

    let total_syllables: usize = parsed
        .tokens()
        .filter(|t| t.is_alpha())
        .map(|t| count_syllables(&t.text))
        .sum();

    let flesch_score = if total_words > 0.0 {
        206.835 - 1.015 * avg_sentence_length - 84.6 * (total_syllables as f64 / total_words)
    } else {
        0.0
    };
    let flesch_score = flesch_score.clamp(0.0, 100.0);

    let mut issues = Vec::new();
    if passive_pct > 30.0 {
        issues.push(format!(
            "High passive voice usage ({:.0}%). Use active voice for stronger impact.",
            passive_pct
        ));
    }
    if avg_sentence_length > 25.0 {
        issues.push(format!(
            "Sentences too long (avg {:.0} words). Aim for 15-20 words per sentence.",
            avg_sentence_length
        ));
    } else if avg_sentence_length < 10.0 {
        issues.push(format!(
            "Sentences too short (avg {:.0} words). Add more detail.",
            avg_sentence_length
        ));
    }
    if flesch_score < 50.0 {
        issues.push("Resume is difficult to read. Simplify language and shorten sentences.".to_string());
    }

    Readability {
        flesch_score: round1(flesch_score),
        passive_pct: round1(passive_pct),
        avg_sentence_length: round1(avg_sentence_length),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LanguagePipeline, RuleBasedPipeline};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("reconciliation"), 5);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("prepare"), 2);
        assert_eq!(count_syllables("tax"), 1);
    }

    #[test]
    fn test_passive_and_short_sentences() {
        let parsed = RuleBasedPipeline::new().parse(
            "Reports were reviewed by the controller.\nInvoices were processed weekly.\nBuilt a new close checklist.",
        );
        let readability = calculate_readability(&parsed);

        assert_eq!(readability.passive_pct, 66.7);
        assert!(readability.issues.iter().any(|i| i.starts_with("High passive voice usage (67%)")));
        assert!(readability.issues.iter().any(|i| i.starts_with("Sentences too short")));
        assert!((0.0..=100.0).contains(&readability.flesch_score));
    }

    #[test]
    fn test_empty() {
        assert_eq!(calculate_readability(&ParsedText::default()), Readability::default());
    }
}
