// file: src/analyzers/bullet_quality.rs
// description: per-bullet scoring on verb, quantification, outcome and specificity
// reference: resume bullet rubric scored out of ten

use super::round1;
use crate::nlp::{ParsedSentence, ParsedText, PartOfSpeech};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref METRIC: Regex = Regex::new(r"\d+%|\$\d+").expect("METRIC regex is valid");
    static ref NUMBER: Regex = Regex::new(r"\d+").expect("NUMBER regex is valid");
    static ref SPECIFIC_FIGURE: Regex =
        Regex::new(r"(?:by|to|for|with)\s+\d+").expect("SPECIFIC_FIGURE regex is valid");
}

const MIN_WORDS: usize = 5;
const MAX_BULLETS: usize = 25;
const PREVIEW_CHARS: usize = 100;
const WEAK_BULLET_SCORE: u8 = 5;

const STRONG_LEMMAS: &[&str] = &[
    "lead", "own", "direct", "establish", "spearhead", "architect", "pioneer", "transform", "drive",
    "launch", "build", "design", "optimize", "streamline", "deliver",
];
const WEAK_LEMMAS: &[&str] = &[
    "help", "assist", "support", "work", "handle", "participate", "contribute", "do", "perform",
];
const OUTCOME_WORDS: &[&str] = &[
    "increased", "decreased", "reduced", "improved", "achieved", "delivered", "generated", "saved",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BulletGrade {
    Weak,
    Fair,
    Good,
    Excellent,
}

impl BulletGrade {
    fn from_score(score: u8) -> Self {
        match score {
            8.. => BulletGrade::Excellent,
            6..=7 => BulletGrade::Good,
            4..=5 => BulletGrade::Fair,
            _ => BulletGrade::Weak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletScore {
    pub text: String,
    pub score: u8,
    pub quality: BulletGrade,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletQuality {
    pub bullet_scores: Vec<BulletScore>,
    pub avg_score: f64,
    pub weak_count: usize,
    pub total_analyzed: usize,
}

fn score_bullet(sentence: &ParsedSentence) -> BulletScore {
    let text = sentence.text.as_str();
    let lower = text.to_lowercase();
    let word_count = text.split_whitespace().count();
    let mut score: u8 = 0;
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    match sentence.tokens.iter().find(|t| t.pos == PartOfSpeech::Verb) {
        Some(verb) if STRONG_LEMMAS.contains(&verb.lemma.as_str()) => {
            score += 3;
            strengths.push(format!("Strong verb: '{}'", verb.lower));
        }
        Some(verb) if WEAK_LEMMAS.contains(&verb.lemma.as_str()) => {
            score += 1;
            issues.push(format!("Weak verb: '{}' - replace with led/owned/drove", verb.lower));
        }
        Some(_) => score += 2,
        None => issues.push("No clear action verb - start with strong verb".to_string()),
    }

    if METRIC.is_match(text) {
        score += 3;
        strengths.push("Specific metrics included".to_string());
    } else if NUMBER.is_match(text) {
        score += 2;
        strengths.push("Numbers included".to_string());
    } else {
        issues.push("Add quantified results (%, $, or numbers)".to_string());
    }

    if OUTCOME_WORDS.iter().any(|w| lower.contains(w)) {
        score += 2;
        strengths.push("Shows outcome/impact".to_string());
    } else {
        issues.push("Add outcome language (increased, reduced, achieved)".to_string());
    }

    if word_count >= 15 && SPECIFIC_FIGURE.is_match(&lower) {
        score += 2;
        strengths.push("Specific and detailed".to_string());
    } else if word_count >= 10 {
        score += 1;
    } else {
        issues.push("Too vague - add specific details".to_string());
    }

    let score = score.min(10);
    BulletScore {
        text: text.chars().take(PREVIEW_CHARS).collect(),
        score,
        quality: BulletGrade::from_score(score),
        issues,
        strengths,
    }
}

/// Scores up to twenty-five sentences of five or more words, weakest first.
pub fn score_resume_bullets(parsed: &ParsedText) -> BulletQuality {
    let mut bullet_scores: Vec<BulletScore> = parsed
        .sentences
        .iter()
        .filter(|s| s.text.split_whitespace().count() >= MIN_WORDS)
        .take(MAX_BULLETS)
        .map(score_bullet)
        .collect();

    if bullet_scores.is_empty() {
        return BulletQuality::default();
    }

    bullet_scores.sort_by_key(|b| b.score);
    let total = bullet_scores.len();
    let sum: u32 = bullet_scores.iter().map(|b| u32::from(b.score)).sum();

    BulletQuality {
        avg_score: round1(f64::from(sum) / total as f64),
        weak_count: bullet_scores.iter().filter(|b| b.score < WEAK_BULLET_SCORE).count(),
        total_analyzed: total,
        bullet_scores,
    }
}
