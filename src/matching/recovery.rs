// file: src/matching/recovery.rs
// description: sentence-level recheck that recovers gaps the resume covers in other words
// reference: bullet embedding comparison between jd and resume

use crate::error::Result;
use crate::nlp::{Embedder, best_match};
use crate::parser::extract_bullets;
use std::collections::HashSet;
use tracing::debug;

pub struct SentenceRecovery<'a> {
    embedder: &'a dyn Embedder,
    threshold: f32,
    strong_threshold: f32,
}

impl<'a> SentenceRecovery<'a> {
    pub fn new(embedder: &'a dyn Embedder, threshold: f32, strong_threshold: f32) -> Self {
        Self {
            embedder,
            threshold,
            strong_threshold,
        }
    }

    /// Gaps that a jd bullet mentions and a resume bullet closely restates.
    /// A recovered gap either shares a word with the matching resume bullet
    /// or clears the strong threshold.
    pub fn recover(&self, resume_text: &str, jd_text: &str, gaps: &[String]) -> Result<Vec<String>> {
        if gaps.is_empty() {
            return Ok(Vec::new());
        }

        let resume_bullets = extract_bullets(resume_text);
        let jd_bullets = extract_bullets(jd_text);
        if resume_bullets.is_empty() || jd_bullets.is_empty() {
            return Ok(Vec::new());
        }

        let resume_vectors = self.embedder.embed(&resume_bullets)?;
        let jd_vectors = self.embedder.embed(&jd_bullets)?;

        let mut recovered = Vec::new();
        for gap in gaps {
            let gap_lower = gap.to_lowercase();
            let gap_words: HashSet<&str> = gap_lower.split_whitespace().collect();

            let restated = jd_bullets
                .iter()
                .zip(jd_vectors.iter())
                .filter(|(bullet, _)| bullet.contains(&gap_lower))
                .any(|(_, jd_vector)| {
                    let Some((index, similarity)) = best_match(jd_vector, &resume_vectors) else {
                        return false;
                    };
                    if similarity <= self.threshold {
                        return false;
                    }
                    let overlap = resume_bullets[index]
                        .split_whitespace()
                        .any(|w| gap_words.contains(w));
                    overlap || similarity > self.strong_threshold
                });

            if restated {
                recovered.push(gap.clone());
            }
        }

        debug!("Sentence-level recheck recovered {} of {} gaps", recovered.len(), gaps.len());
        Ok(recovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::HashingEmbedder;
    use pretty_assertions::assert_eq;

    const RESUME: &str = "- Prepared monthly bank reconciliation for all operating accounts\n\
                          - Processed vendor invoices and payments weekly\n\
                          - Built variance reports for the controller";

    const JD: &str = "- Prepare monthly bank reconciliation for all operating accounts\n\
                      - Experience with payroll systems is a plus\n\
                      - Partner with auditors during year end close";

    #[test]
    fn test_recovers_restated_gap() {
        let embedder = HashingEmbedder::new(512);
        let recovery = SentenceRecovery::new(&embedder, 0.65, 0.75);
        let recovered = recovery
            .recover(RESUME, JD, &["bank reconciliation".to_string(), "payroll".to_string()])
            .unwrap();
        assert_eq!(recovered, vec!["bank reconciliation".to_string()]);
    }

    #[test]
    fn test_no_gaps_or_text() {
        let embedder = HashingEmbedder::new(64);
        let recovery = SentenceRecovery::new(&embedder, 0.65, 0.75);
        assert!(recovery.recover(RESUME, JD, &[]).unwrap().is_empty());
        assert!(recovery.recover("", JD, &["payroll".to_string()]).unwrap().is_empty());
    }
}
