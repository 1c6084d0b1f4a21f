// file: src/reference/ontology.rs
// description: canonical skill vocabulary with precomputed label embeddings
// reference: esco-style csv exports with a preferredLabel column

use crate::error::{AnalysisError, Result};
use crate::nlp::{Embedder, cosine_similarity};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_ONTOLOGY: &str = include_str!("../../data/skill_ontology.txt");
const LABEL_COLUMN: &str = "preferredLabel";

/// Skill labels plus one embedding per label, computed once at startup.
#[derive(Debug, Clone, Default)]
pub struct SkillOntology {
    labels: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

impl SkillOntology {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn index(labels: Vec<String>, embedder: &dyn Embedder) -> Result<Self> {
        let embeddings = if labels.is_empty() {
            Vec::new()
        } else {
            embedder.embed(&labels)?
        };

        if embeddings.len() != labels.len() {
            return Err(AnalysisError::Embedding(format!(
                "expected {} ontology vectors, got {}",
                labels.len(),
                embeddings.len()
            )));
        }

        debug!("Indexed {} ontology labels", labels.len());
        Ok(Self { labels, embeddings })
    }

    pub fn load(path: Option<&Path>, embedder: &dyn Embedder) -> Result<Self> {
        let labels = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    AnalysisError::Config(format!("Cannot read ontology {}: {}", path.display(), e))
                })?;
                info!("Loaded skill ontology from {}", path.display());
                parse_labels(&content)
            }
            None => parse_labels(BUILTIN_ONTOLOGY),
        };
        Self::index(labels, embedder)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Maximum cosine similarity of `vector` against every label.
    pub fn max_similarity(&self, vector: &[f32]) -> f32 {
        self.embeddings
            .iter()
            .map(|e| cosine_similarity(vector, e))
            .fold(f32::MIN, f32::max)
            .max(0.0)
    }
}

/// Reads labels from a csv with a `preferredLabel` header, or from a plain
/// list with one label per line.
pub fn parse_labels(content: &str) -> Vec<String> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let Some(first) = lines.next() else {
        return Vec::new();
    };

    let header = split_csv_line(first);
    match header.iter().position(|h| h.trim() == LABEL_COLUMN) {
        Some(column) => lines
            .filter_map(|line| split_csv_line(line).into_iter().nth(column))
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect(),
        None => std::iter::once(first)
            .chain(lines)
            .map(|line| line.trim().to_string())
            .collect(),
    }
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::HashingEmbedder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_csv_labels() {
        let csv = "conceptType,conceptUri,preferredLabel,altLabels\nSkill,uri:1,accounts payable,\"ap, a/p\"\nSkill,uri:2,\"budgeting, forecasting\",x\n";
        assert_eq!(
            parse_labels(csv),
            vec!["accounts payable", "budgeting, forecasting"]
        );
    }

    #[test]
    fn test_parse_plain_list() {
        assert_eq!(parse_labels("python\n\nsql\n"), vec!["python", "sql"]);
        assert!(parse_labels("").is_empty());
    }

    #[test]
    fn test_builtin_ontology_loads() {
        let embedder = HashingEmbedder::new(64);
        let ontology = SkillOntology::load(None, &embedder).unwrap();
        assert!(ontology.len() > 100);
        assert!(ontology.labels().iter().any(|l| l == "accounts payable"));
    }

    #[test]
    fn test_max_similarity() {
        let embedder = HashingEmbedder::new(256);
        let ontology =
            SkillOntology::index(vec!["payroll".into(), "python".into()], &embedder).unwrap();
        let query = embedder.embed_one("payroll").unwrap();
        assert!(ontology.max_similarity(&query) > 0.99);
        assert_eq!(SkillOntology::empty().max_similarity(&query), 0.0);
    }
}
