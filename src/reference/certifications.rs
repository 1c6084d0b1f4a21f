// file: src/reference/certifications.rs
// description: per-industry certification catalog, detection and gap finding
// reference: json catalog of industry to critical and valuable credentials

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Certification {
    fn new(name: &str, full_name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            full_name: full_name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn mentioned_in(&self, text_lower: &str) -> bool {
        std::iter::once(&self.name)
            .chain(std::iter::once(&self.full_name))
            .chain(self.aliases.iter())
            .any(|term| contains_term(text_lower, &term.to_lowercase()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustryCertifications {
    #[serde(default)]
    pub critical: Vec<Certification>,
    #[serde(default)]
    pub valuable: Vec<Certification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationHit {
    pub name: String,
    pub full_name: String,
    pub industry: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedCertifications {
    pub critical: Vec<CertificationHit>,
    pub valuable: Vec<CertificationHit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationGaps {
    pub missing_critical: Vec<CertificationHit>,
    pub missing_valuable: Vec<CertificationHit>,
    pub has_certifications: bool,
}

/// Whole-word containment; `term` must not be glued to letters or digits.
fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[derive(Debug, Clone, Default)]
pub struct CertificationCatalog {
    industries: BTreeMap<String, IndustryCertifications>,
}

impl CertificationCatalog {
    pub fn new(industries: BTreeMap<String, IndustryCertifications>) -> Self {
        Self { industries }
    }

    pub fn builtin() -> Self {
        let mut industries = BTreeMap::new();
        industries.insert(
            "finance".to_string(),
            IndustryCertifications {
                critical: vec![
                    Certification::new("CPA", "Certified Public Accountant", &["c.p.a."]),
                    Certification::new("CFA", "Chartered Financial Analyst", &["cfa charterholder"]),
                ],
                valuable: vec![
                    Certification::new("CMA", "Certified Management Accountant", &[]),
                    Certification::new("CIA", "Certified Internal Auditor", &[]),
                    Certification::new("CFP", "Certified Financial Planner", &[]),
                    Certification::new("EA", "Enrolled Agent", &[]),
                ],
            },
        );
        industries.insert(
            "technology".to_string(),
            IndustryCertifications {
                critical: vec![],
                valuable: vec![
                    Certification::new("AWS Certified", "AWS Certified Solutions Architect", &["aws solutions architect"]),
                    Certification::new("CISSP", "Certified Information Systems Security Professional", &[]),
                    Certification::new("CKA", "Certified Kubernetes Administrator", &[]),
                ],
            },
        );
        industries.insert(
            "healthcare".to_string(),
            IndustryCertifications {
                critical: vec![Certification::new("RN", "Registered Nurse", &[])],
                valuable: vec![
                    Certification::new("BLS", "Basic Life Support", &[]),
                    Certification::new("CPHIMS", "Certified Professional in Healthcare Information and Management Systems", &[]),
                ],
            },
        );
        industries.insert(
            "hr".to_string(),
            IndustryCertifications {
                critical: vec![],
                valuable: vec![
                    Certification::new("SHRM-CP", "SHRM Certified Professional", &["shrm-scp"]),
                    Certification::new("PHR", "Professional in Human Resources", &["sphr"]),
                ],
            },
        );
        industries.insert(
            "operations".to_string(),
            IndustryCertifications {
                critical: vec![],
                valuable: vec![
                    Certification::new("PMP", "Project Management Professional", &[]),
                    Certification::new("Six Sigma", "Lean Six Sigma Green Belt", &["green belt", "black belt"]),
                    Certification::new("CSCP", "Certified Supply Chain Professional", &[]),
                ],
            },
        );
        industries.insert(
            "legal".to_string(),
            IndustryCertifications {
                critical: vec![Certification::new("Bar Admission", "State Bar Admission", &["admitted to the bar", "member of the bar"])],
                valuable: vec![Certification::new("CIPP", "Certified Information Privacy Professional", &[])],
            },
        );
        industries.insert(
            "marketing".to_string(),
            IndustryCertifications {
                critical: vec![],
                valuable: vec![Certification::new("GAIQ", "Google Analytics Individual Qualification", &["google analytics certification"])],
            },
        );
        Self::new(industries)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    AnalysisError::Config(format!(
                        "Cannot read certifications {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                info!("Loaded certification catalog from {}", path.display());
                Self::from_json(&content)
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Certifications mentioned in `text`, restricted to `industry` when
    /// given. Unknown industries yield nothing.
    pub fn detect(&self, text: &str, industry: Option<&str>) -> DetectedCertifications {
        let mut found = DetectedCertifications::default();
        if text.is_empty() {
            return found;
        }
        let lower = text.to_lowercase();

        let industries: Vec<(&String, &IndustryCertifications)> = match industry {
            Some(name) => self.industries.get_key_value(name).into_iter().collect(),
            None => self.industries.iter().collect(),
        };

        for (name, certs) in industries {
            let hit = |cert: &Certification| CertificationHit {
                name: cert.name.clone(),
                full_name: cert.full_name.clone(),
                industry: name.clone(),
            };
            found
                .critical
                .extend(certs.critical.iter().filter(|c| c.mentioned_in(&lower)).map(hit));
            found
                .valuable
                .extend(certs.valuable.iter().filter(|c| c.mentioned_in(&lower)).map(hit));
        }

        dedupe(&mut found.critical);
        dedupe(&mut found.valuable);
        found
    }

    /// Credentials the JD mentions that the resume does not.
    pub fn certification_gaps(&self, resume: &str, jd: &str, industry: Option<&str>) -> CertificationGaps {
        let resume_certs = self.detect(resume, industry);
        let jd_certs = self.detect(jd, industry);

        let held: BTreeSet<&str> = resume_certs
            .critical
            .iter()
            .chain(resume_certs.valuable.iter())
            .map(|c| c.name.as_str())
            .collect();

        let missing = |certs: &[CertificationHit]| -> Vec<CertificationHit> {
            certs
                .iter()
                .filter(|c| !held.contains(c.name.as_str()))
                .cloned()
                .collect()
        };

        CertificationGaps {
            missing_critical: missing(&jd_certs.critical),
            missing_valuable: missing(&jd_certs.valuable),
            has_certifications: !held.is_empty(),
        }
    }
}

fn dedupe(hits: &mut Vec<CertificationHit>) {
    let mut seen = BTreeSet::new();
    hits.retain(|h| seen.insert(h.name.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_term_respects_word_boundaries() {
        assert!(contains_term("licensed cpa, 2019", "cpa"));
        assert!(!contains_term("draws on laws", "aws"));
        assert!(contains_term("shrm-cp certified", "shrm-cp"));
    }

    #[test]
    fn test_detect_by_industry() {
        let catalog = CertificationCatalog::builtin();
        let found = catalog.detect("Active CPA license; pursuing CMA", Some("finance"));
        assert_eq!(found.critical.len(), 1);
        assert_eq!(found.critical[0].name, "CPA");
        assert_eq!(found.valuable[0].name, "CMA");

        assert!(catalog.detect("Active CPA license", Some("general")).critical.is_empty());
    }

    #[test]
    fn test_certification_gaps() {
        let catalog = CertificationCatalog::builtin();
        let gaps = catalog.certification_gaps(
            "Staff accountant, Certified Management Accountant",
            "CPA required. CMA a plus.",
            Some("finance"),
        );
        assert_eq!(gaps.missing_critical.len(), 1);
        assert_eq!(gaps.missing_critical[0].full_name, "Certified Public Accountant");
        assert!(gaps.missing_valuable.is_empty());
        assert!(gaps.has_certifications);
    }

    #[test]
    fn test_from_json() {
        let catalog = CertificationCatalog::from_json(
            r#"{"finance": {"critical": [{"name": "CPA", "full_name": "Certified Public Accountant"}]}}"#,
        )
        .unwrap();
        assert_eq!(catalog.detect("cpa", None).critical.len(), 1);
    }
}
