// file: src/reference/industry.rs
// description: keyword-count industry detection for resumes and job descriptions
// reference: fixed industry keyword table

use serde::{Deserialize, Serialize};

const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "software", "engineer", "developer", "programming", "coding", "ai", "ml",
            "data science", "cloud", "devops", "api", "saas", "tech stack",
        ],
    ),
    (
        "finance",
        &[
            "finance", "banking", "investment", "portfolio", "trading", "financial analysis",
            "accounting", "cfa", "cfp", "audit", "compliance", "treasury", "controller",
            "accounts payable", "accounts receivable", "ap", "ar", "reconciliation",
            "journal entries", "general ledger", "gaap", "financial reporting", "payroll",
            "bookkeeping", "cpa", "quickbooks", "balance sheet", "income statement",
            "cash flow", "budgeting", "forecasting",
        ],
    ),
    (
        "healthcare",
        &[
            "healthcare", "medical", "clinical", "patient", "hospital", "nursing", "physician",
            "pharma", "biotech", "health systems",
        ],
    ),
    (
        "marketing",
        &[
            "marketing", "brand", "advertising", "campaign", "digital marketing", "seo", "sem",
            "content marketing", "social media", "growth",
        ],
    ),
    (
        "sales",
        &[
            "sales", "business development", "account management", "revenue", "quota",
            "pipeline", "crm", "b2b", "b2c", "enterprise sales",
        ],
    ),
    (
        "hr",
        &[
            "human resources", "hr", "talent acquisition", "recruiting", "compensation",
            "benefits", "employee relations", "hris", "people operations",
        ],
    ),
    (
        "operations",
        &[
            "operations", "supply chain", "logistics", "procurement", "inventory",
            "manufacturing", "process improvement", "six sigma", "lean",
        ],
    ),
    (
        "creative",
        &[
            "design", "creative", "ux", "ui", "graphic design", "art direction", "branding",
            "portfolio", "adobe", "figma", "sketch",
        ],
    ),
    (
        "legal",
        &[
            "legal", "attorney", "lawyer", "compliance", "regulatory", "contracts", "litigation",
            "corporate law", "intellectual property",
        ],
    ),
    (
        "education",
        &[
            "education", "teaching", "training", "curriculum", "instruction", "academic",
            "professor", "educator", "learning",
        ],
    ),
];

pub const GENERAL_INDUSTRY: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryScore {
    pub industry: String,
    pub score: usize,
}

/// Top two industries by keyword hits (substring containment, one hit per
/// keyword). Falls back to `general` with score 0.
pub fn detect_industry(text: &str) -> Vec<IndustryScore> {
    let lower = text.to_lowercase();

    let mut scores: Vec<IndustryScore> = INDUSTRY_KEYWORDS
        .iter()
        .map(|(industry, keywords)| IndustryScore {
            industry: (*industry).to_string(),
            score: keywords.iter().filter(|k| lower.contains(*k)).count(),
        })
        .filter(|s| s.score > 0)
        .collect();

    if scores.is_empty() {
        return vec![IndustryScore {
            industry: GENERAL_INDUSTRY.to_string(),
            score: 0,
        }];
    }

    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(2);
    scores
}
