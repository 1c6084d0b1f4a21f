// file: src/models/recommendation.rs
// description: prioritized improvement recommendations and executive summary
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub priority: Priority,
}

impl Recommendation {
    pub fn critical(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: Priority::Critical,
        }
    }

    pub fn standard(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: Priority::Standard,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.priority == Priority::Critical
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub summary: String,
    /// Critical items first, then standard ones, capped.
    pub items: Vec<Recommendation>,
}

impl Recommendations {
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn critical_count(&self) -> usize {
        self.items.iter().filter(|r| r.is_critical()).count()
    }
}
