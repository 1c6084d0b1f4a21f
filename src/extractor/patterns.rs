// file: src/extractor/patterns.rs
// description: compiled regex patterns shared by extractors and analyzers
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Money and percentages
    pub static ref DOLLAR_AMOUNT: Regex = Regex::new(
        r"(?i)\$\s*(\d+(?:,\d{3})*(?:\.\d+)?)\s*(million|billion|thousand|[kmb]\b)?"
    ).expect("DOLLAR_AMOUNT regex is valid");

    pub static ref PERCENTAGE: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(?:%|percent)"
    ).expect("PERCENTAGE regex is valid");

    pub static ref DOLLAR_OR_PERCENT: Regex = Regex::new(
        r"\d+%|\$\d+"
    ).expect("DOLLAR_OR_PERCENT regex is valid");

    pub static ref ANY_NUMBER: Regex = Regex::new(r"\d+").expect("ANY_NUMBER regex is valid");

    // Team and volume metrics
    pub static ref TEAM_SIZE: Regex = Regex::new(
        r"(?i)(?:team of|managed|supervised|led|mentored|coached)\s+(\d+)\s*(?:people|staff|employees|direct reports|members)?"
    ).expect("TEAM_SIZE regex is valid");

    pub static ref VOLUME: Regex = Regex::new(
        r"(?i)(\d+)\s*\+?\s*(?:invoices|accounts|transactions|clients|customers|reports|entries)"
    ).expect("VOLUME regex is valid");

    pub static ref TIMEFRAME: Regex = Regex::new(
        r"(?i)\b(daily|weekly|monthly|quarterly|annual|yearly)\b"
    ).expect("TIMEFRAME regex is valid");

    // Dates and durations
    pub static ref DATE_RANGE: Regex = Regex::new(
        r"(?i)\b(?:([a-z]{3,9})\.?\s+)?(\d{4})\s*(?:–|—|-|to|through)\s*(?:([a-z]{3,9})\.?\s+)?(\d{4}|present|current|now|to date|date)\b"
    ).expect("DATE_RANGE regex is valid");

    pub static ref YEAR_SPAN: Regex = Regex::new(
        r"(?i)\b((?:19|20)\d{2})\s*[-–—]\s*((?:19|20)\d{2}|present|current)\b"
    ).expect("YEAR_SPAN regex is valid");

    pub static ref YEARS_MENTION: Regex = Regex::new(
        r"(?i)\b(\d+)\+?\s*(?:years?|yrs?)\b"
    ).expect("YEARS_MENTION regex is valid");

    pub static ref FOUR_DIGIT_YEAR: Regex = Regex::new(
        r"\b(19\d{2}|20\d{2})\b"
    ).expect("FOUR_DIGIT_YEAR regex is valid");

    // Title words that signal a seniority level
    pub static ref TITLE_WORD: Regex = Regex::new(
        r"(?i)\b(junior|entry-level|entry|associate|intern|trainee|assistant|mid-level|intermediate|specialist|analyst|consultant|engineer|developer|designer|coordinator|senior|sr|lead|principal|staff|distinguished|fellow|expert|architect|manager|head of|director|vp|vice president|c-level|ceo|cto|cfo|coo|cmo|president|freelance|contractor|co-founder|founder|owner|partner)\b"
    ).expect("TITLE_WORD regex is valid");

    // Regex skill families
    pub static ref TECH_SKILLS: Regex = Regex::new(
        r"(?i)\b(?:python|java|javascript|react|aws|azure|gcp|sql|tableau|power bi|salesforce|sap|oracle|docker|kubernetes|ai|ml|machine learning|deep learning|nlp|data science|agile|scrum|jira|git|ci/cd|api|rest|graphql|tensorflow|pytorch|excel|vba|r)\b"
    ).expect("TECH_SKILLS regex is valid");

    pub static ref ACCOUNTING_SKILLS: Regex = Regex::new(
        r"(?i)\b(?:general ledger accounting|general ledger reconciliation|accounts payable|accounts receivable|bank reconciliation|account reconciliation|month[- ]end close|year[- ]end close|financial reporting|financial statements|balance sheet|income statement|cash flow|variance analysis|cost accounting|tax preparation|general ledger|ap|ar|gl|reconciliation|journal entries|gaap|ifrs|budgeting|forecasting|payroll|bookkeeping|quickbooks|sage|netsuite|erp|cpa|audit|1099|w-2)\b"
    ).expect("ACCOUNTING_SKILLS regex is valid");

    pub static ref SOFT_SKILLS: Regex = Regex::new(
        r"(?i)\b(?:leadership|management|communication|collaboration|problem solving|critical thinking|strategic planning|project management|stakeholder management|negotiation|mentoring|coaching|budget management|financial analysis|market research|sales|marketing|customer service|operations|process improvement|change management|risk management)\b"
    ).expect("SOFT_SKILLS regex is valid");
}

/// Parses a dollar match into millions of dollars.
pub fn dollars_in_millions(amount: &str, unit: Option<&str>) -> Option<f64> {
    let value: f64 = amount.replace(',', "").parse().ok()?;
    let millions = match unit.map(|u| u.to_lowercase()).as_deref() {
        Some("b") | Some("billion") => value * 1_000.0,
        Some("m") | Some("million") => value,
        Some("k") | Some("thousand") => value / 1_000.0,
        _ => value / 1_000_000.0,
    };
    Some(millions)
}

/// Largest dollar figure in `text`, in millions.
pub fn max_dollars_in_millions(text: &str) -> f64 {
    DOLLAR_AMOUNT
        .captures_iter(text)
        .filter_map(|caps| {
            let amount = caps.get(1)?.as_str();
            dollars_in_millions(amount, caps.get(2).map(|m| m.as_str()))
        })
        .fold(0.0, f64::max)
}

/// Largest team size mentioned in `text`.
pub fn max_team_size(text: &str) -> u32 {
    TEAM_SIZE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

pub fn has_dollar_or_percent(text: &str) -> bool {
    DOLLAR_OR_PERCENT.is_match(text)
}
