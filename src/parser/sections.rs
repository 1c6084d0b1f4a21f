// file: src/parser/sections.rs
// description: sentence splitting and keyword-header section segmentation
// reference: line-oriented header detection

use crate::models::{SectionKind, Sections};
use lazy_static::lazy_static;
use regex::Regex;

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "professional background",
    "work experience",
    "career history",
    "employment history",
];

const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technical skills",
    "core competencies",
    "qualifications",
    "expertise",
    "proficiencies",
    "capabilities",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "academic background",
    "academic credentials",
    "degrees",
    "certifications",
    "training",
];

lazy_static! {
    static ref SENTENCE_BREAK: Regex =
        Regex::new(r"[.!?;]+(?:\s+|$)").expect("SENTENCE_BREAK regex is valid");
    static ref LEADING_BULLET: Regex =
        Regex::new(r"^(?:[•\-\*\+►▪→●○·◦]+\s*|\d{1,2}[.)]\s+)").expect("LEADING_BULLET regex is valid");
}

/// Splits text into sentences on line breaks and on terminal punctuation
/// followed by whitespace. Bullet glyphs are stripped; empty pieces dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut start = 0;
        for m in SENTENCE_BREAK.find_iter(line) {
            push_sentence(&mut sentences, &line[start..m.end()]);
            start = m.end();
        }
        if start < line.len() {
            push_sentence(&mut sentences, &line[start..]);
        }
    }

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, piece: &str) {
    let stripped = LEADING_BULLET.replace(piece.trim(), "");
    let sentence = stripped.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

fn header_kind(sentence: &str) -> Option<SectionKind> {
    let lower = sentence.to_lowercase();
    if EXPERIENCE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Some(SectionKind::Experience)
    } else if SKILLS_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Some(SectionKind::Skills)
    } else if EDUCATION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Some(SectionKind::Education)
    } else {
        None
    }
}

/// Buckets sentences under the most recent keyword header. Header sentences
/// are not content. When no experience content is found, every sentence is
/// treated as experience.
pub fn segment(text: &str) -> Sections {
    let sentences = split_sentences(text);
    let mut sections = Sections::default();
    let mut current = SectionKind::Other;

    for sentence in &sentences {
        match header_kind(sentence) {
            Some(kind) => current = kind,
            None => sections.push(current, sentence.clone()),
        }
    }

    if sections.experience.is_empty() {
        sections.experience = sentences;
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_sentences() {
        let text = "• Reconciled 40 accounts monthly. Reduced close time by 20%!\n\n- Prepared journal entries; managed AP";
        assert_eq!(
            split_sentences(text),
            vec![
                "Reconciled 40 accounts monthly.",
                "Reduced close time by 20%!",
                "Prepared journal entries;",
                "managed AP",
            ]
        );
    }

    #[test]
    fn test_decimal_points_do_not_split() {
        assert_eq!(
            split_sentences("GPA 3.8 with honors"),
            vec!["GPA 3.8 with honors"]
        );
    }

    #[test]
    fn test_segment_with_headers() {
        let text = "Jane Doe\nWork Experience\nSenior Accountant at Acme 2018 - 2022\nSkills\nPython, SQL\nEducation\nBS Accounting, State University";
        let sections = segment(text);
        assert_eq!(sections.other, vec!["Jane Doe"]);
        assert_eq!(sections.experience, vec!["Senior Accountant at Acme 2018 - 2022"]);
        assert_eq!(sections.skills, vec!["Python, SQL"]);
        assert_eq!(sections.education, vec!["BS Accounting, State University"]);
    }

    #[test]
    fn test_segment_without_headers_falls_back_to_experience() {
        let text = "Reconciled bank statements monthly.\nPrepared payroll for 200 staff.";
        let sections = segment(text);
        assert_eq!(sections.experience, split_sentences(text));
        assert!(sections.skills.is_empty());
        assert!(sections.education.is_empty());
    }

    #[test]
    fn test_segment_empty_input() {
        let sections = segment("");
        assert!(sections.is_empty());
    }
}
