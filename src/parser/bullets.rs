// file: src/parser/bullets.rs
// description: bullet and sentence extraction for sentence-level comparisons
// reference: line-oriented list parsing

use crate::parser::sections::split_sentences;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BULLET_GLYPH: Regex =
        Regex::new(r"^[•\-\*\+►▪→●○]\s*").expect("BULLET_GLYPH regex is valid");
    static ref NUMBERED: Regex = Regex::new(r"^\d+\.\s*").expect("NUMBERED regex is valid");
}

const MIN_WORDS: usize = 4;
const MIN_BULLETS: usize = 3;

fn looks_like_header(line: &str) -> bool {
    let has_letters = line.chars().any(|c| c.is_alphabetic());
    let all_upper = has_letters && !line.chars().any(|c| c.is_lowercase());
    all_upper || line.ends_with(':')
}

/// Lowercased bullets of at least four words. Falls back to plain sentences
/// when the text carries fewer than three usable bullet lines.
pub fn extract_bullets(text: &str) -> Vec<String> {
    let mut bullets = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let line = BULLET_GLYPH.replace(line, "");
        let line = NUMBERED.replace(&line, "");
        let line = line.trim();

        if line.split_whitespace().count() < MIN_WORDS || looks_like_header(line) {
            continue;
        }

        bullets.push(line.to_lowercase());
    }

    if bullets.len() < MIN_BULLETS {
        bullets = split_sentences(text)
            .into_iter()
            .filter(|s| s.split_whitespace().count() >= MIN_WORDS)
            .map(|s| s.to_lowercase())
            .collect();
    }

    bullets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_bullets_strips_markers() {
        let text = "PROFESSIONAL EXPERIENCE\nKey duties:\n• Managed accounts payable for 3 entities\n- Reconciled bank statements every month\n1. Prepared quarterly variance analysis reports\nShort line";
        assert_eq!(
            extract_bullets(text),
            vec![
                "managed accounts payable for 3 entities",
                "reconciled bank statements every month",
                "prepared quarterly variance analysis reports",
            ]
        );
    }

    #[test]
    fn test_extract_bullets_falls_back_to_sentences() {
        let text = "Owned the month end close. Built forecasting models in Excel. Ok.";
        assert_eq!(
            extract_bullets(text),
            vec![
                "owned the month end close.",
                "built forecasting models in excel.",
            ]
        );
    }

    #[test]
    fn test_extract_bullets_empty() {
        assert!(extract_bullets("").is_empty());
    }
}
