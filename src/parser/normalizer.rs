// file: src/parser/normalizer.rs
// description: text normalization for matching and for structure-preserving analysis
// reference: unicode-aware regex normalization

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s\-+]").expect("NON_WORD regex is valid");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("WHITESPACE regex is valid");
    static ref INLINE_SPACE: Regex =
        Regex::new(r"[ \t\u{00A0}\u{2000}-\u{200B}]+").expect("INLINE_SPACE regex is valid");
    static ref BLANK_RUNS: Regex = Regex::new(r"\n{3,}").expect("BLANK_RUNS regex is valid");
}

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercases, drops punctuation other than `-` and `+`, collapses
    /// whitespace and trims. Ranges such as `5-7+` survive intact.
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = NON_WORD.replace_all(&lowered, "");
        WHITESPACE.replace_all(&stripped, " ").trim().to_string()
    }

    /// Keeps case, punctuation and line structure; only unifies line endings
    /// and spacing so sentence and bullet detection see consistent input.
    pub fn tidy(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");
        let lines: Vec<String> = unified
            .lines()
            .map(|line| INLINE_SPACE.replace_all(line, " ").trim_end().to_string())
            .collect();
        BLANK_RUNS
            .replace_all(&lines.join("\n"), "\n\n")
            .trim()
            .to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn clean(text: &str) -> String {
    TextNormalizer::new().clean(text)
}
