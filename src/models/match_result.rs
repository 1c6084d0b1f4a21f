// file: src/models/match_result.rs
// description: matched, missing and near-miss skill lists produced by the matching engine
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<String>,
    pub gaps: Vec<String>,
    /// Resume skills semantically close to a gap. Advisory only.
    pub similar: Vec<String>,
}

impl MatchResult {
    pub fn new(matches: BTreeSet<String>, gaps: BTreeSet<String>, similar: BTreeSet<String>) -> Self {
        let gaps: Vec<String> = gaps.into_iter().filter(|g| !matches.contains(g)).collect();
        Self {
            matches: matches.into_iter().collect(),
            gaps,
            similar: similar.into_iter().collect(),
        }
    }

    /// Moves recovered gaps into `matches`. Labels that are not current gaps
    /// are ignored. Returns how many gaps were recovered.
    pub fn recover(&mut self, recovered: &[String]) -> usize {
        let recovered: BTreeSet<&str> = recovered.iter().map(String::as_str).collect();
        let before = self.gaps.len();

        let mut moved = Vec::new();
        self.gaps.retain(|gap| {
            if recovered.contains(gap.as_str()) {
                moved.push(gap.clone());
                false
            } else {
                true
            }
        });

        for label in moved {
            if !self.matches.contains(&label) {
                self.matches.push(label);
            }
        }
        self.matches.sort();

        before - self.gaps.len()
    }

    pub fn is_disjoint(&self) -> bool {
        let matches: BTreeSet<&String> = self.matches.iter().collect();
        self.gaps.iter().all(|g| !matches.contains(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_keeps_matches_and_gaps_disjoint() {
        let result = MatchResult::new(set(&["sql"]), set(&["sql", "budgeting"]), set(&[]));
        assert_eq!(result.gaps, vec!["budgeting"]);
        assert!(result.is_disjoint());
    }

    #[test]
    fn test_recover_moves_only_current_gaps() {
        let mut result = MatchResult::new(
            set(&["accounts payable"]),
            set(&["accounts receivable", "budgeting"]),
            set(&[]),
        );
        let moved = result.recover(&["budgeting".to_string(), "forecasting".to_string()]);

        assert_eq!(moved, 1);
        assert_eq!(result.matches, vec!["accounts payable", "budgeting"]);
        assert_eq!(result.gaps, vec!["accounts receivable"]);
        assert!(result.is_disjoint());
    }
}
