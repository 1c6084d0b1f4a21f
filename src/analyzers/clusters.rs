// file: src/analyzers/clusters.rs
// description: embedding based skill clustering and redundancy detection
// reference: greedy single-pass grouping under a similarity threshold

use crate::error::Result;
use crate::nlp::{Embedder, cosine_similarity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const CLUSTER_THRESHOLD: f32 = 0.75;
pub const REDUNDANCY_THRESHOLD: f32 = 0.85;

/// First of the longest labels.
fn longest(items: &[String]) -> String {
    items
        .iter()
        .fold(None::<&String>, |best, item| match best {
            Some(b) if b.chars().count() >= item.chars().count() => Some(b),
            _ => Some(item),
        })
        .cloned()
        .unwrap_or_default()
}

/// Groups skills whose embeddings exceed `threshold`, keyed by the longest
/// label in each group.
pub fn cluster_skills(
    skills: &[String],
    embedder: &dyn Embedder,
    threshold: f32,
) -> Result<BTreeMap<String, Vec<String>>> {
    if skills.len() < 2 {
        return Ok(skills.iter().map(|s| (s.clone(), vec![s.clone()])).collect());
    }

    let vectors = embedder.embed(skills)?;
    let mut clusters = BTreeMap::new();
    let mut processed: HashSet<&str> = HashSet::new();

    for (i, skill) in skills.iter().enumerate() {
        if processed.contains(skill.as_str()) {
            continue;
        }

        let mut similar = vec![skill.clone()];
        for (j, other) in skills.iter().enumerate() {
            if i == j || processed.contains(other.as_str()) {
                continue;
            }
            if cosine_similarity(&vectors[i], &vectors[j]) > threshold {
                similar.push(other.clone());
                processed.insert(other.as_str());
            }
        }

        clusters.insert(longest(&similar), similar);
        processed.insert(skill.as_str());
    }

    Ok(clusters)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redundancy {
    pub primary: String,
    pub duplicates: Vec<String>,
}

/// Skills listed more than once under different wording. Substring
/// containment counts as a duplicate regardless of similarity.
pub fn detect_skill_redundancies(
    skills: &[String],
    embedder: &dyn Embedder,
    threshold: f32,
) -> Result<Vec<Redundancy>> {
    if skills.len() < 2 {
        return Ok(Vec::new());
    }

    let vectors = embedder.embed(skills)?;
    let lowered: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
    let mut redundancies = Vec::new();
    let mut processed: HashSet<&str> = HashSet::new();

    for (i, skill) in skills.iter().enumerate() {
        if processed.contains(skill.as_str()) {
            continue;
        }

        let mut duplicates = vec![skill.clone()];
        for (j, other) in skills.iter().enumerate() {
            if i == j || processed.contains(other.as_str()) {
                continue;
            }
            let contained = lowered[j].contains(&lowered[i]) || lowered[i].contains(&lowered[j]);
            if contained || cosine_similarity(&vectors[i], &vectors[j]) > threshold {
                duplicates.push(other.clone());
                processed.insert(other.as_str());
            }
        }

        if duplicates.len() > 1 {
            let primary = longest(&duplicates);
            duplicates.retain(|d| *d != primary);
            redundancies.push(Redundancy { primary, duplicates });
        }
        processed.insert(skill.as_str());
    }

    Ok(redundancies)
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
    fn test_identical_embeddings_cluster() {
        let embedder = HashingEmbedder::new(256);
        let clusters = cluster_skills(&labels(&["Payroll", "payroll", "tax"]), &embedder, 0.75).unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters["Payroll"], labels(&["Payroll", "payroll"]));
        assert_eq!(clusters["tax"], labels(&["tax"]));
    }

    #[test]
    fn test_small_inputs_are_self_clusters() {
        let embedder = HashingEmbedder::new(64);
        assert!(cluster_skills(&[], &embedder, 0.75).unwrap().is_empty());
        let single = cluster_skills(&labels(&["audit"]), &embedder, 0.75).unwrap();
        assert_eq!(single["audit"], labels(&["audit"]));
    }

    #[test]
    fn test_substring_redundancy() {
        let embedder = HashingEmbedder::new(256);
        let redundancies = detect_skill_redundancies(
            &labels(&["reconciliation", "bank reconciliation", "payroll"]),
            &embedder,
            0.99,
        )
        .unwrap();

        assert_eq!(
            redundancies,
            vec![Redundancy {
                primary: "bank reconciliation".to_string(),
                duplicates: labels(&["reconciliation"]),
            }]
        );
    }

    #[test]
    fn test_no_redundancy() {
        let embedder = HashingEmbedder::new(256);
        assert!(detect_skill_redundancies(&labels(&["payroll"]), &embedder, 0.85).unwrap().is_empty());
        assert!(
            detect_skill_redundancies(&labels(&["payroll", "forecasting"]), &embedder, 0.99)
                .unwrap()
                .is_empty()
        );
    }
}
