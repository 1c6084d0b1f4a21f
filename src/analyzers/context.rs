// file: src/analyzers/context.rs
// description: jd context and closest resume sentence for each skill gap
// reference: sentence embedding comparison between jd and resume

use crate::error::Result;
use crate::nlp::{Embedder, ParsedText, best_match};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MAX_GAPS: usize = 10;
const MAX_JD_MENTIONS: usize = 2;
const FALSE_POSITIVE_SIMILARITY: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdMention {
    pub sentence: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosestMatch {
    pub sentence: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapContext {
    pub jd_context: Vec<JdMention>,
    pub closest_resume_match: Option<ClosestMatch>,
    pub likely_false_positive: bool,
}

/// For the first ten gaps, the jd sentences that mention the gap and the
/// resume sentence closest to the first of them.
pub fn extract_gap_context(
    resume: &ParsedText,
    jd: &ParsedText,
    gaps: &[String],
    embedder: &dyn Embedder,
) -> Result<BTreeMap<String, GapContext>> {
    if gaps.is_empty() {
        return Ok(BTreeMap::new());
    }

    let resume_sentences = resume.sentence_texts();
    let jd_sentences = jd.sentence_texts();
    let resume_vectors = if resume_sentences.is_empty() {
        Vec::new()
    } else {
        embedder.embed(&resume_sentences)?
    };
    let jd_vectors = if jd_sentences.is_empty() {
        Vec::new()
    } else {
        embedder.embed(&jd_sentences)?
    };

    let mut contexts = BTreeMap::new();
    for gap in gaps.iter().take(MAX_GAPS) {
        let gap_lower = gap.to_lowercase();
        let mentions: Vec<JdMention> = jd_sentences
            .iter()
            .enumerate()
            .filter(|(_, sentence)| sentence.to_lowercase().contains(&gap_lower))
            .map(|(index, sentence)| JdMention {
                sentence: sentence.clone(),
                index,
            })
            .collect();

        let closest_resume_match = mentions
            .first()
            .and_then(|mention| best_match(&jd_vectors[mention.index], &resume_vectors))
            .map(|(index, similarity)| ClosestMatch {
                sentence: resume_sentences[index].clone(),
                similarity: (similarity * 1000.0).round() / 1000.0,
            });

        let likely_false_positive = closest_resume_match
            .as_ref()
            .is_some_and(|m| m.similarity > FALSE_POSITIVE_SIMILARITY);

        contexts.insert(
            gap.clone(),
            GapContext {
                jd_context: mentions.into_iter().take(MAX_JD_MENTIONS).collect(),
                closest_resume_match,
                likely_false_positive,
            },
        );
    }

    Ok(contexts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{HashingEmbedder, LanguagePipeline, RuleBasedPipeline};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gap_context() {
        let pipeline = RuleBasedPipeline::new();
        let resume = pipeline.parse("Prepared monthly bank reconciliation for operating accounts.\nAnswered phones.");
        let jd = pipeline.parse(
            "Prepare monthly bank reconciliation for operating accounts.\nPayroll experience a plus.\nPayroll audits twice a year.\nPayroll taxes.",
        );
        let embedder = HashingEmbedder::new(512);

        let contexts = extract_gap_context(
            &resume,
            &jd,
            &["bank reconciliation".to_string(), "payroll".to_string(), "treasury".to_string()],
            &embedder,
        )
        .unwrap();

        let reconciliation = &contexts["bank reconciliation"];
        assert_eq!(reconciliation.jd_context.len(), 1);
        let closest = reconciliation.closest_resume_match.as_ref().unwrap();
        assert!(closest.sentence.starts_with("Prepared monthly bank reconciliation"));
        assert!(reconciliation.likely_false_positive);

        assert_eq!(contexts["payroll"].jd_context.len(), 2);
        assert_eq!(contexts["payroll"].jd_context[0].index, 1);

        assert_eq!(contexts["treasury"], GapContext::default());
    }

    #[test]
    fn test_no_gaps() {
        let embedder = HashingEmbedder::new(64);
        let contexts = extract_gap_context(&ParsedText::default(), &ParsedText::default(), &[], &embedder).unwrap();
        assert!(contexts.is_empty());
    }
}
