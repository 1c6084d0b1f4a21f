// file: src/matching/engine.rs
// description: four-pass resume to jd skill matcher
// reference: exact, word-subset, title-taxonomy and embedding passes

use crate::error::Result;
use crate::models::MatchResult;
use crate::nlp::{Embedder, cosine_similarity};
use crate::reference::JobTitleTaxonomy;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

pub struct MatchingEngine<'a> {
    embedder: &'a dyn Embedder,
    titles: &'a JobTitleTaxonomy,
    similar_threshold: f32,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(embedder: &'a dyn Embedder, titles: &'a JobTitleTaxonomy, similar_threshold: f32) -> Self {
        Self {
            embedder,
            titles,
            similar_threshold,
        }
    }

    pub fn match_skills(&self, resume: &[String], jd: &[String]) -> Result<MatchResult> {
        let resume: BTreeSet<&str> = resume.iter().map(String::as_str).collect();
        let jd: BTreeSet<&str> = jd.iter().map(String::as_str).collect();

        // Pass 1: exact
        let mut matches: BTreeSet<String> = resume.intersection(&jd).map(|s| s.to_string()).collect();
        let mut remaining_resume: BTreeSet<&str> = resume.difference(&jd).copied().collect();
        let remaining_jd: Vec<&str> = jd.difference(&resume).copied().collect();

        // Pass 2: word-set containment in either direction
        let mut partial = BTreeSet::new();
        for r_skill in &remaining_resume {
            let r_words: HashSet<&str> = r_skill.split_whitespace().collect();
            let hit = remaining_jd.iter().find(|j_skill| {
                let j_words: HashSet<&str> = j_skill.split_whitespace().collect();
                j_words.is_subset(&r_words) || r_words.is_subset(&j_words)
            });
            if let Some(j_skill) = hit {
                partial.insert(*r_skill);
                matches.insert(j_skill.to_string());
            }
        }
        remaining_resume.retain(|s| !partial.contains(s));

        let mut gaps: BTreeSet<String> = jd
            .iter()
            .filter(|s| !matches.contains(**s))
            .map(|s| s.to_string())
            .collect();

        // Pass 3: both sides are variations of the same canonical title
        let reconciled: Vec<String> = gaps
            .iter()
            .filter(|gap| {
                self.titles.canonical_of(gap).is_some_and(|gap_title| {
                    remaining_resume
                        .iter()
                        .any(|r| self.titles.canonical_of(r) == Some(gap_title))
                })
            })
            .cloned()
            .collect();
        for skill in reconciled {
            gaps.remove(&skill);
            matches.insert(skill);
        }

        // Pass 4: advisory near misses
        let similar = self.similar_to_gaps(&remaining_resume, &gaps, &matches)?;

        debug!(
            "Matched {} skills ({} partial), {} gaps, {} similar",
            matches.len(),
            partial.len(),
            gaps.len(),
            similar.len()
        );
        Ok(MatchResult::new(matches, gaps, similar))
    }

    fn similar_to_gaps(
        &self,
        candidates: &BTreeSet<&str>,
        gaps: &BTreeSet<String>,
        matches: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>> {
        let candidates: Vec<String> = candidates
            .iter()
            .filter(|s| !matches.contains(**s))
            .map(|s| s.to_string())
            .collect();
        if candidates.is_empty() || gaps.is_empty() {
            return Ok(BTreeSet::new());
        }

        let gap_labels: Vec<String> = gaps.iter().cloned().collect();
        let candidate_vectors = self.embedder.embed(&candidates)?;
        let gap_vectors = self.embedder.embed(&gap_labels)?;

        Ok(candidates
            .into_iter()
            .zip(candidate_vectors.iter())
            .filter(|(_, vector)| {
                gap_vectors
                    .iter()
                    .any(|gap| cosine_similarity(vector, gap) > self.similar_threshold)
            })
            .map(|(skill, _)| skill)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::HashingEmbedder;
    use pretty_assertions::assert_eq;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_accounting_example() {
        let embedder = HashingEmbedder::new(256);
        let titles = JobTitleTaxonomy::builtin();
        let engine = MatchingEngine::new(&embedder, &titles, 0.55);

        let result = engine
            .match_skills(
                &labels(&["accounts payable", "reconciliation"]),
                &labels(&["accounts payable", "accounts receivable", "budgeting"]),
            )
            .unwrap();

        assert!(result.matches.iter().any(|m| m == "accounts payable"));
        assert_eq!(result.gaps, labels(&["accounts receivable", "budgeting"]));
        assert!(result.is_disjoint());
    }

    #[test]
    fn test_word_subset_matches() {
        let embedder = HashingEmbedder::new(256);
        let titles = JobTitleTaxonomy::builtin();
        let engine = MatchingEngine::new(&embedder, &titles, 0.55);

        let result = engine
            .match_skills(&labels(&["bank reconciliation"]), &labels(&["reconciliation", "payroll"]))
            .unwrap();
        assert_eq!(result.matches, labels(&["reconciliation"]));
        assert_eq!(result.gaps, labels(&["payroll"]));
    }

    #[test]
    fn test_substring_is_not_word_containment() {
        let embedder = HashingEmbedder::new(256);
        let titles = JobTitleTaxonomy::builtin();
        let engine = MatchingEngine::new(&embedder, &titles, 0.99);

        let result = engine
            .match_skills(&labels(&["javascript"]), &labels(&["java"]))
            .unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.gaps, labels(&["java"]));
    }

    #[test]
    fn test_title_variations_reconcile() {
        let embedder = HashingEmbedder::new(256);
        let titles = JobTitleTaxonomy::builtin();
        let engine = MatchingEngine::new(&embedder, &titles, 0.99);

        let result = engine
            .match_skills(&labels(&["ap clerk"]), &labels(&["payables specialist"]))
            .unwrap();
        assert_eq!(result.matches, labels(&["payables specialist"]));
        assert!(result.gaps.is_empty());
    }

    #[test]
    fn test_similar_is_advisory() {
        let embedder = HashingEmbedder::new(512);
        let titles = JobTitleTaxonomy::builtin();
        let engine = MatchingEngine::new(&embedder, &titles, 0.3);

        let result = engine
            .match_skills(&labels(&["financial reports"]), &labels(&["financial reporting"]))
            .unwrap();
        assert_eq!(result.gaps, labels(&["financial reporting"]));
        assert_eq!(result.similar, vec!["financial reports".to_string()]);
    }

    #[test]
    fn test_matches_and_gaps_stay_disjoint() {
        let embedder = HashingEmbedder::new(128);
        let titles = JobTitleTaxonomy::builtin();
        let engine = MatchingEngine::new(&embedder, &titles, 0.55);

        let cases: &[(&[&str], &[&str])] = &[
            (&[], &["payroll"]),
            (&["payroll"], &[]),
            (&["sql", "excel", "excel macros"], &["excel", "sql server", "python"]),
            (&["ap clerk", "audit"], &["accounts payable clerk", "internal audit", "audit"]),
        ];
        for (resume, jd) in cases {
            let result = engine.match_skills(&labels(resume), &labels(jd)).unwrap();
            assert!(result.is_disjoint(), "{:?} vs {:?}", resume, jd);
        }
    }
}
