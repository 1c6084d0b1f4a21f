// file: src/models/skill.rs
// description: extracted skill with provenance and per-document skill set
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillSource {
    OntologyMatched,
    RegexExtracted,
    VerbObjectDerived,
    CandidatePhrase,
}

impl SkillSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillSource::OntologyMatched => "ontology-matched",
            SkillSource::RegexExtracted => "regex-extracted",
            SkillSource::VerbObjectDerived => "verb-object-derived",
            SkillSource::CandidatePhrase => "candidate-phrase",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub label: String,
    pub source: SkillSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

impl Skill {
    pub fn new(label: impl Into<String>, source: SkillSource) -> Self {
        Self {
            label: label.into(),
            source,
            canonical: None,
        }
    }

    pub fn with_canonical(mut self, canonical: impl Into<String>) -> Self {
        self.canonical = Some(canonical.into());
        self
    }

    /// Label used for set membership and matching.
    pub fn key(&self) -> &str {
        self.canonical.as_deref().unwrap_or(&self.label)
    }
}

/// Unique skills of one document, ordered by normalized label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    skills: BTreeMap<String, Skill>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a skill unless its key is already present; the first
    /// provenance wins.
    pub fn insert(&mut self, skill: Skill) -> bool {
        let key = skill.key().to_string();
        if key.is_empty() || self.skills.contains_key(&key) {
            return false;
        }
        self.skills.insert(key, skill);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.skills.contains_key(label)
    }

    pub fn get(&self, label: &str) -> Option<&Skill> {
        self.skills.get(label)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn labels(&self) -> Vec<String> {
        self.skills.keys().cloned().collect()
    }

    pub fn from_labels<I, S>(labels: I, source: SkillSource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for label in labels {
            set.insert(Skill::new(label, source));
        }
        set
    }
}
