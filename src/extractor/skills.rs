// file: src/extractor/skills.rs
// description: candidate phrase generation, ontology matching and regex fallback for skills
// reference: noun chunks, entities and verb-object phrases scored against an ontology

use crate::config::MatchingConfig;
use crate::error::Result;
use crate::extractor::filter::is_non_skill_phrase;
use crate::extractor::patterns::{ACCOUNTING_SKILLS, SOFT_SKILLS, TECH_SKILLS};
use crate::models::{Skill, SkillSet, SkillSource};
use crate::nlp::{Embedder, LanguagePipeline, ParsedSentence, PartOfSpeech};
use crate::reference::SkillOntology;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

const ACTION_VERBS: &[&str] = &[
    "manage", "perform", "conduct", "execute", "handle", "process", "prepare", "create",
    "develop", "maintain", "implement", "oversee", "coordinate", "administer", "supervise",
    "reconcile", "analyze", "review", "ensure", "support", "assist", "complete", "generate",
];

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("ap", "accounts payable"),
    ("a/p", "accounts payable"),
    ("ar", "accounts receivable"),
    ("a/r", "accounts receivable"),
    ("gl", "general ledger"),
    ("g/l", "general ledger"),
    ("p&l", "profit and loss"),
    ("cpa", "certified public accountant"),
    ("gaap", "generally accepted accounting principles"),
    ("ifrs", "international financial reporting standards"),
];

const BACKFILL_WINDOW: usize = 10;
const MAX_CHUNK_WORDS: usize = 5;
const MAX_OBJECT_WORDS: usize = 3;

/// Full form of a known abbreviation.
pub fn expand_abbreviation(label: &str) -> Option<&'static str> {
    let label = label.trim();
    ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == label)
        .map(|(_, full)| *full)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub phrase: String,
    pub source: SkillSource,
}

pub struct SkillExtractor<'a> {
    pipeline: &'a dyn LanguagePipeline,
    embedder: &'a dyn Embedder,
    ontology: &'a SkillOntology,
    ontology_threshold: f32,
    regex_fallback_min: usize,
    min_skills: usize,
}

impl<'a> SkillExtractor<'a> {
    pub fn new(
        pipeline: &'a dyn LanguagePipeline,
        embedder: &'a dyn Embedder,
        ontology: &'a SkillOntology,
    ) -> Self {
        Self::with_config(pipeline, embedder, ontology, &MatchingConfig::default())
    }

    pub fn with_config(
        pipeline: &'a dyn LanguagePipeline,
        embedder: &'a dyn Embedder,
        ontology: &'a SkillOntology,
        config: &MatchingConfig,
    ) -> Self {
        Self {
            pipeline,
            embedder,
            ontology,
            ontology_threshold: config.ontology_threshold,
            regex_fallback_min: config.regex_fallback_min,
            min_skills: config.min_skills,
        }
    }

    pub fn extract(&self, text: &str) -> Result<SkillSet> {
        if text.trim().is_empty() {
            return Ok(SkillSet::new());
        }

        let candidates = self.candidates(text);
        let ontology_matched = self.match_ontology(&candidates)?;

        let regex_extracted = if ontology_matched.len() < self.regex_fallback_min {
            regex_skills(text)
        } else {
            BTreeSet::new()
        };

        let mut kept: Vec<Candidate> = ontology_matched
            .into_iter()
            .map(|phrase| Candidate {
                phrase,
                source: SkillSource::OntologyMatched,
            })
            .chain(regex_extracted.into_iter().map(|phrase| Candidate {
                phrase,
                source: SkillSource::RegexExtracted,
            }))
            .filter(|c| !is_non_skill_phrase(&c.phrase))
            .collect();

        let mut seen: HashSet<String> = kept.iter().map(|c| c.phrase.clone()).collect();
        if seen.len() < self.min_skills {
            for candidate in candidates.iter().take(BACKFILL_WINDOW) {
                let words = candidate.phrase.split_whitespace().count();
                if (2..=4).contains(&words)
                    && !seen.contains(&candidate.phrase)
                    && !is_non_skill_phrase(&candidate.phrase)
                {
                    seen.insert(candidate.phrase.clone());
                    kept.push(candidate.clone());
                }
            }
        }

        let mut skills = SkillSet::new();
        for candidate in kept {
            let label = candidate.phrase.trim().to_lowercase();
            let skill = match expand_abbreviation(&label) {
                Some(full) => Skill::new(label, candidate.source).with_canonical(full),
                None => Skill::new(label, candidate.source),
            };
            skills.insert(skill);
        }

        debug!(
            "Extracted {} skills from {} candidates",
            skills.len(),
            candidates.len()
        );
        Ok(skills)
    }

    /// Entity, noun-chunk and verb-object phrases that survive the exclusion
    /// rules, lowercased and deduplicated in first-seen order.
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        let parsed = self.pipeline.parse(text);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        let mut push = |phrase: &str, source: SkillSource| {
            if is_non_skill_phrase(phrase) {
                return;
            }
            let phrase = phrase.to_lowercase();
            if seen.insert(phrase.clone()) {
                candidates.push(Candidate { phrase, source });
            }
        };

        for entity in &parsed.entities {
            push(entity, SkillSource::CandidatePhrase);
        }

        for chunk in &parsed.noun_chunks {
            let words = chunk.split_whitespace().count();
            if words > 1 && words <= MAX_CHUNK_WORDS {
                push(chunk, SkillSource::CandidatePhrase);
            }
        }

        for sentence in &parsed.sentences {
            for object in verb_objects(sentence) {
                push(&object, SkillSource::VerbObjectDerived);
            }
        }

        candidates
    }

    fn match_ontology(&self, candidates: &[Candidate]) -> Result<Vec<String>> {
        if self.ontology.is_empty() || candidates.is_empty() {
            return Ok(Vec::new());
        }

        let phrases: Vec<String> = candidates.iter().map(|c| c.phrase.clone()).collect();
        let vectors = self.embedder.embed(&phrases)?;

        Ok(phrases
            .into_iter()
            .zip(vectors.iter())
            .filter(|(_, vector)| self.ontology.max_similarity(vector) > self.ontology_threshold)
            .map(|(phrase, _)| phrase)
            .collect())
    }
}

/// Objects of action verbs: the noun and adjective words of the phrase that
/// directly follows the verb.
fn verb_objects(sentence: &ParsedSentence) -> Vec<String> {
    let tokens = &sentence.tokens;
    let mut objects = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if token.pos != PartOfSpeech::Verb || !ACTION_VERBS.contains(&token.lemma.as_str()) {
            continue;
        }

        let words: Vec<&str> = tokens[i + 1..]
            .iter()
            .take_while(|t| {
                matches!(
                    t.pos,
                    PartOfSpeech::Determiner
                        | PartOfSpeech::Pronoun
                        | PartOfSpeech::Number
                        | PartOfSpeech::Adjective
                        | PartOfSpeech::Noun
                        | PartOfSpeech::ProperNoun
                )
            })
            .filter(|t| t.is_content())
            .map(|t| t.text.as_str())
            .collect();

        if !words.is_empty() && words.len() <= MAX_OBJECT_WORDS {
            objects.push(words.join(" "));
        }
    }

    objects
}

/// Hits from the technical, accounting and soft-skill regex families.
pub fn regex_skills(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    [&*TECH_SKILLS, &*ACCOUNTING_SKILLS, &*SOFT_SKILLS]
        .iter()
        .flat_map(|family| family.find_iter(&lower).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{HashingEmbedder, RuleBasedPipeline};
    use pretty_assertions::assert_eq;

    fn ontology(embedder: &HashingEmbedder) -> SkillOntology {
        SkillOntology::index(
            vec![
                "accounts payable".to_string(),
                "bank reconciliation".to_string(),
                "journal entries".to_string(),
                "payroll".to_string(),
            ],
            embedder,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let pipeline = RuleBasedPipeline::new();
        let embedder = HashingEmbedder::new(128);
        let ontology = ontology(&embedder);
        let extractor = SkillExtractor::new(&pipeline, &embedder, &ontology);
        assert!(extractor.extract("").unwrap().is_empty());
        assert!(extractor.extract("   \n ").unwrap().is_empty());
    }

    #[test]
    fn test_extracts_accounting_skills() {
        let pipeline = RuleBasedPipeline::new();
        let embedder = HashingEmbedder::new(256);
        let ontology = ontology(&embedder);
        let extractor = SkillExtractor::new(&pipeline, &embedder, &ontology);

        let skills = extractor
            .extract("Prepared the monthly bank reconciliation and journal entries. Processed AP invoices in QuickBooks.")
            .unwrap();

        assert!(skills.contains("bank reconciliation"));
        assert!(skills.contains("journal entries"));
        assert!(skills.contains("quickbooks"));
        assert!(skills.contains("accounts payable"));
    }

    #[test]
    fn test_no_returned_skill_is_excluded() {
        let pipeline = RuleBasedPipeline::new();
        let embedder = HashingEmbedder::new(128);
        let ontology = SkillOntology::empty();
        let extractor = SkillExtractor::new(&pipeline, &embedder, &ontology);

        let skills = extractor
            .extract("We offer competitive benefits and paid time off. Required: strong knowledge of Excel, payroll and the general ledger.")
            .unwrap();

        for skill in skills.iter() {
            assert!(!is_non_skill_phrase(&skill.label), "{} leaked", skill.label);
        }
        assert!(skills.contains("excel"));
        assert!(skills.contains("payroll"));
    }

    #[test]
    fn test_abbreviations_are_expanded() {
        assert_eq!(expand_abbreviation("a/r"), Some("accounts receivable"));
        assert_eq!(expand_abbreviation("gaap"), Some("generally accepted accounting principles"));
        assert_eq!(expand_abbreviation("sql"), None);

        let pipeline = RuleBasedPipeline::new();
        let embedder = HashingEmbedder::new(64);
        let ontology = SkillOntology::empty();
        let extractor = SkillExtractor::new(&pipeline, &embedder, &ontology);
        let skills = extractor.extract("Handled GL and AR for two entities").unwrap();
        assert_eq!(
            skills.get("general ledger").map(|s| s.label.as_str()),
            Some("gl")
        );
        assert!(skills.contains("accounts receivable"));
    }

    #[test]
    fn test_verb_objects() {
        let pipeline = RuleBasedPipeline::new();
        let parsed = pipeline.parse("Managed vendor payments and reconciled accounts.");
        let objects: Vec<String> = parsed.sentences.iter().flat_map(verb_objects).collect();
        assert_eq!(objects, vec!["vendor payments".to_string(), "accounts".to_string()]);
    }

    #[test]
    fn test_regex_skills() {
        let found = regex_skills("Built Power BI reports; month-end close; stakeholder management");
        assert!(found.contains("power bi"));
        assert!(found.contains("month-end close"));
        assert!(found.contains("stakeholder management"));
    }
}
