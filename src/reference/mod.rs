// file: src/reference/mod.rs
// description: reference datasets loaded once and shared across analyses
// reference: internal module structure

pub mod certifications;
pub mod industry;
pub mod job_titles;
pub mod ontology;
pub mod seniority_levels;

pub use certifications::{
    CertificationCatalog, CertificationGaps, CertificationHit, DetectedCertifications,
};
pub use industry::{GENERAL_INDUSTRY, IndustryScore, detect_industry};
pub use job_titles::{JobTitleTaxonomy, TitleMatch};
pub use ontology::SkillOntology;
pub use seniority_levels::{SeniorityLevels, level_score};

use crate::config::ReferenceConfig;
use crate::error::Result;
use crate::nlp::Embedder;
use tracing::info;

/// Read-only reference data. Built once, then shared by every request.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub ontology: SkillOntology,
    pub seniority_levels: SeniorityLevels,
    pub job_titles: JobTitleTaxonomy,
    pub certifications: CertificationCatalog,
}

impl ReferenceData {
    pub fn load(config: &ReferenceConfig, embedder: &dyn Embedder) -> Result<Self> {
        let ontology = SkillOntology::load(config.ontology_path.as_deref(), embedder)?;
        let seniority_levels = SeniorityLevels::load(config.seniority_levels_path.as_deref())?;
        let job_titles = JobTitleTaxonomy::load(config.job_titles_path.as_deref())?;
        let certifications = CertificationCatalog::load(config.certifications_path.as_deref())?;

        info!(
            "Reference data ready: {} ontology labels, {} canonical titles",
            ontology.len(),
            job_titles.len()
        );

        Ok(Self {
            ontology,
            seniority_levels,
            job_titles,
            certifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::HashingEmbedder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_builtins() {
        let embedder = HashingEmbedder::new(64);
        let data = ReferenceData::load(&ReferenceConfig::default(), &embedder).unwrap();
        assert!(!data.ontology.is_empty());
        assert!(!data.seniority_levels.is_empty());
        assert!(!data.job_titles.is_empty());
    }

    #[test]
    fn test_load_custom_ontology() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("skills.txt");
        fs::write(&path, "payroll\nforecasting\n").unwrap();

        let config = ReferenceConfig {
            ontology_path: Some(path),
            ..ReferenceConfig::default()
        };
        let embedder = HashingEmbedder::new(64);
        let data = ReferenceData::load(&config, &embedder).unwrap();
        assert_eq!(data.ontology.len(), 2);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let config = ReferenceConfig {
            job_titles_path: Some("/nonexistent/titles.json".into()),
            ..ReferenceConfig::default()
        };
        let embedder = HashingEmbedder::new(64);
        let err = ReferenceData::load(&config, &embedder).unwrap_err();
        assert!(matches!(err, crate::error::AnalysisError::Config(_)));
    }
}
