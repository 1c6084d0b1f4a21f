// file: src/exporter/json.rs
// description: json export of analysis responses with a run manifest
// reference: one file per analysis plus manifest.json

use crate::error::Result;
use crate::models::AnalysisResponse;
use crate::utils::Validator;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

/// One exported file as listed in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub source: String,
    pub file: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub run_id: String,
    pub exported_at: String,
    pub total_results: usize,
    pub successful: usize,
    pub failed: usize,
    pub files: Vec<ExportEntry>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `<name>.json` and returns its manifest entry.
    pub fn export_result(&self, name: &str, response: &AnalysisResponse, pretty: bool) -> Result<ExportEntry> {
        let file = format!("{}.json", Validator::sanitize_file_stem(name));
        let path = self.output_dir.join(&file);

        let json = if pretty {
            serde_json::to_string_pretty(response)?
        } else {
            serde_json::to_string(response)?
        };
        fs::write(&path, json)?;
        debug!("Exported {}", path.display());

        let entry = match response {
            AnalysisResponse::Success(result) => ExportEntry {
                source: name.to_string(),
                file,
                success: true,
                analysis_id: Some(result.analysis_id.clone()),
                score: Some(result.score),
                error: None,
            },
            AnalysisResponse::Failure(report) => ExportEntry {
                source: name.to_string(),
                file,
                success: false,
                analysis_id: None,
                score: None,
                error: Some(report.error.clone()),
            },
        };

        Ok(entry)
    }

    pub fn write_manifest(&self, entries: Vec<ExportEntry>) -> Result<ExportManifest> {
        let successful = entries.iter().filter(|e| e.success).count();
        let manifest = ExportManifest {
            run_id: uuid::Uuid::new_v4().to_string(),
            exported_at: Utc::now().to_rfc3339(),
            total_results: entries.len(),
            successful,
            failed: entries.len() - successful,
            files: entries,
        };

        let path = self.output_dir.join(MANIFEST_FILE);
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;

        info!(
            "Export complete: {} results ({} failed) written to {}",
            manifest.total_results,
            manifest.failed,
            self.output_dir.display()
        );
        Ok(manifest)
    }
}
