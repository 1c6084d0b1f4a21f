// file: src/models/document.rs
// description: per-request document model with normalized text and section buckets
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Experience,
    Skills,
    Education,
    Other,
}

impl SectionKind {
    /// Order used when embedding sections for the weighted match score.
    pub const SCORING_ORDER: [SectionKind; 4] = [
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Other,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub other: Vec<String>,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> &[String] {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Skills => &self.skills,
            SectionKind::Education => &self.education,
            SectionKind::Other => &self.other,
        }
    }

    pub fn push(&mut self, kind: SectionKind, sentence: String) {
        match kind {
            SectionKind::Experience => self.experience.push(sentence),
            SectionKind::Skills => self.skills.push(sentence),
            SectionKind::Education => self.education.push(sentence),
            SectionKind::Other => self.other.push(sentence),
        }
    }

    pub fn joined(&self, kind: SectionKind) -> String {
        self.get(kind).join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.experience.is_empty()
            && self.skills.is_empty()
            && self.education.is_empty()
            && self.other.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Text with case, punctuation and line structure preserved.
    pub raw: String,
    /// Lowercased, punctuation-stripped form used for matching.
    pub clean: String,
    pub sections: Sections,
    pub content_hash: String,
}

impl Document {
    pub fn new(raw: String, clean: String, sections: Sections) -> Self {
        let content_hash = Self::compute_hash(&clean);
        Self {
            raw,
            clean,
            sections,
            content_hash,
        }
    }

    pub(crate) fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn char_count(&self) -> usize {
        self.clean.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(
            "Senior Accountant".to_string(),
            "senior accountant".to_string(),
            Sections::default(),
        );

        assert_eq!(doc.char_count(), 17);
        assert_eq!(doc.content_hash.len(), 64);
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_hash_consistency() {
        let content = "Test content";
        let hash1 = Document::compute_hash(content);
        let hash2 = Document::compute_hash(content);
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_sections_push_and_join() {
        let mut sections = Sections::default();
        sections.push(SectionKind::Skills, "python".to_string());
        sections.push(SectionKind::Skills, "sql".to_string());
        assert_eq!(sections.joined(SectionKind::Skills), "python sql");
        assert!(sections.get(SectionKind::Education).is_empty());
    }
}
