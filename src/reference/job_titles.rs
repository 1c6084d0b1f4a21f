// file: src/reference/job_titles.rs
// description: canonical job titles with known variations and level indicators
// reference: json taxonomy of canonical title to variations

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleEntry {
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub level_indicators: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleMatch {
    pub canonical: String,
    pub level: Option<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default)]
pub struct JobTitleTaxonomy {
    titles: BTreeMap<String, TitleEntry>,
    by_variation: HashMap<String, String>,
}

fn entry(variations: &[&str], levels: &[(&str, &[&str])]) -> TitleEntry {
    TitleEntry {
        variations: variations.iter().map(|v| v.to_string()).collect(),
        level_indicators: levels
            .iter()
            .map(|(level, keywords)| {
                (
                    level.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect(),
    }
}

const IC_LEVELS: &[(&str, &[&str])] = &[
    ("junior", &["junior", "jr", "entry", "associate"]),
    ("senior", &["senior", "sr"]),
    ("lead", &["lead", "principal", "staff"]),
];

const MANAGER_LEVELS: &[(&str, &[&str])] = &[
    ("mid", &["assistant", "associate"]),
    ("senior", &["senior", "sr"]),
    ("executive", &["vp", "chief", "head"]),
];

impl JobTitleTaxonomy {
    pub fn new(titles: BTreeMap<String, TitleEntry>) -> Self {
        let mut by_variation = HashMap::new();
        for (canonical, entry) in &titles {
            for variation in &entry.variations {
                by_variation
                    .entry(variation.to_lowercase())
                    .or_insert_with(|| canonical.clone());
            }
        }
        Self {
            titles,
            by_variation,
        }
    }

    pub fn builtin() -> Self {
        let titles: BTreeMap<String, TitleEntry> = [
            (
                "accountant",
                entry(
                    &["accountant", "staff accountant", "senior accountant", "general ledger accountant", "gl accountant", "cost accountant", "junior accountant"],
                    IC_LEVELS,
                ),
            ),
            (
                "accounts payable specialist",
                entry(
                    &["accounts payable specialist", "ap specialist", "accounts payable clerk", "ap clerk", "payables specialist", "accounts payable analyst"],
                    IC_LEVELS,
                ),
            ),
            (
                "accounts receivable specialist",
                entry(
                    &["accounts receivable specialist", "ar specialist", "accounts receivable clerk", "ar clerk", "collections specialist", "accounts receivable analyst"],
                    IC_LEVELS,
                ),
            ),
            (
                "bookkeeper",
                entry(&["bookkeeper", "full charge bookkeeper", "bookkeeping specialist"], IC_LEVELS),
            ),
            (
                "controller",
                entry(&["controller", "comptroller", "financial controller", "assistant controller"], MANAGER_LEVELS),
            ),
            (
                "financial analyst",
                entry(
                    &["financial analyst", "finance analyst", "fp&a analyst", "financial planning analyst", "budget analyst"],
                    IC_LEVELS,
                ),
            ),
            (
                "payroll specialist",
                entry(&["payroll specialist", "payroll administrator", "payroll clerk", "payroll coordinator"], IC_LEVELS),
            ),
            (
                "data analyst",
                entry(&["data analyst", "business intelligence analyst", "bi analyst", "reporting analyst"], IC_LEVELS),
            ),
            (
                "software engineer",
                entry(
                    &["software engineer", "software developer", "programmer", "application developer", "backend engineer", "frontend engineer"],
                    IC_LEVELS,
                ),
            ),
            (
                "project manager",
                entry(&["project manager", "program manager", "project lead", "delivery manager"], MANAGER_LEVELS),
            ),
            (
                "marketing manager",
                entry(&["marketing manager", "brand manager", "digital marketing manager", "growth marketing manager"], MANAGER_LEVELS),
            ),
            (
                "sales representative",
                entry(&["sales representative", "account executive", "sales associate", "business development representative"], IC_LEVELS),
            ),
            (
                "hr generalist",
                entry(&["hr generalist", "human resources generalist", "hr specialist", "people operations specialist"], IC_LEVELS),
            ),
        ]
        .into_iter()
        .map(|(canonical, entry)| (canonical.to_string(), entry))
        .collect();

        Self::new(titles)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let titles: BTreeMap<String, TitleEntry> = serde_json::from_str(content)?;
        Ok(Self::new(titles))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    AnalysisError::Config(format!("Cannot read job titles {}: {}", path.display(), e))
                })?;
                info!("Loaded job title taxonomy from {}", path.display());
                Self::from_json(&content)
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Canonical title for an exact (case-insensitive) variation.
    pub fn canonical_of(&self, variation: &str) -> Option<&str> {
        self.by_variation
            .get(&variation.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Best canonical title contained in `text`, scored by how much of the
    /// text the variation covers.
    pub fn normalize_title(&self, text: &str) -> Option<TitleMatch> {
        let title = text.trim().to_lowercase();
        if title.is_empty() {
            return None;
        }

        let mut best: Option<TitleMatch> = None;
        for (canonical, entry) in &self.titles {
            for variation in &entry.variations {
                let variation = variation.to_lowercase();
                if !title.contains(&variation) {
                    continue;
                }
                let confidence = variation.len() as f64 / title.len() as f64;
                if best.as_ref().is_none_or(|b| confidence > b.confidence) {
                    let level = entry
                        .level_indicators
                        .iter()
                        .find(|(_, keywords)| keywords.iter().any(|k| title.contains(k.as_str())))
                        .map(|(level, _)| level.clone());
                    best = Some(TitleMatch {
                        canonical: canonical.clone(),
                        level,
                        confidence,
                    });
                }
            }
        }

        best
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_of() {
        let taxonomy = JobTitleTaxonomy::builtin();
        assert_eq!(taxonomy.canonical_of("AP Clerk"), Some("accounts payable specialist"));
        assert_eq!(taxonomy.canonical_of("payables specialist"), Some("accounts payable specialist"));
        assert_eq!(taxonomy.canonical_of("astronaut"), None);
    }

    #[test]
    fn test_normalize_title_with_level() {
        let taxonomy = JobTitleTaxonomy::builtin();
        let matched = taxonomy.normalize_title("Senior Staff Accountant").unwrap();
        assert_eq!(matched.canonical, "accountant");
        assert_eq!(matched.level.as_deref(), Some("lead"));
        assert!(matched.confidence > 0.5);
    }

    #[test]
    fn test_normalize_title_none() {
        let taxonomy = JobTitleTaxonomy::builtin();
        assert!(taxonomy.normalize_title("").is_none());
        assert!(taxonomy.normalize_title("chef").is_none());
    }

    #[test]
    fn test_from_json() {
        let taxonomy = JobTitleTaxonomy::from_json(
            r#"{"nurse": {"variations": ["rn", "registered nurse"], "level_indicators": {}}}"#,
        )
        .unwrap();
        assert_eq!(taxonomy.canonical_of("RN"), Some("nurse"));
        assert_eq!(taxonomy.len(), 1);
    }
}
