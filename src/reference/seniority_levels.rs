// file: src/reference/seniority_levels.rs
// description: seniority level to title keyword map
// reference: json object of level name to keyword list

use crate::error::{AnalysisError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

const BUILTIN_LEVELS: &str = include_str!("../../data/seniority_levels.json");

/// Score assigned to a named level; unknown names count as mid.
pub fn level_score(level: &str) -> f64 {
    match level {
        "junior" => 1.0,
        "mid" => 2.0,
        "senior" => 3.0,
        "exec" => 4.0,
        _ => 2.0,
    }
}

/// Levels ordered from junior to exec so lookups are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeniorityLevels {
    levels: Vec<(String, Vec<String>)>,
}

impl SeniorityLevels {
    pub fn from_json(content: &str) -> Result<Self> {
        let map: HashMap<String, Vec<String>> = serde_json::from_str(content)?;
        let mut levels: Vec<(String, Vec<String>)> = map
            .into_iter()
            .map(|(name, keywords)| {
                let keywords = keywords.into_iter().map(|k| k.to_lowercase()).collect();
                (name.to_lowercase(), keywords)
            })
            .collect();
        levels.sort_by(|a, b| {
            level_score(&a.0)
                .total_cmp(&level_score(&b.0))
                .then_with(|| a.0.cmp(&b.0))
        });
        Ok(Self { levels })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    AnalysisError::Config(format!(
                        "Cannot read seniority levels {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                info!("Loaded seniority levels from {}", path.display());
                Self::from_json(&content)
            }
            None => Self::builtin(),
        }
    }

    /// First level with a keyword contained in `title_word`.
    pub fn level_for(&self, title_word: &str) -> Option<&str> {
        self.levels
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| title_word.contains(k.as_str())))
            .map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels() {
        let levels = SeniorityLevels::builtin().unwrap();
        assert_eq!(levels.level_for("senior"), Some("senior"));
        assert_eq!(levels.level_for("vice president"), Some("exec"));
        assert_eq!(levels.level_for("intern"), Some("junior"));
        assert_eq!(levels.level_for("freelance"), None);
    }

    #[test]
    fn test_levels_ordered_by_score() {
        let levels =
            SeniorityLevels::from_json(r#"{"exec": ["lead"], "senior": ["lead"]}"#).unwrap();
        assert_eq!(levels.level_for("lead"), Some("senior"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(SeniorityLevels::from_json("not json").is_err());
    }
}
