// file: src/input/scanner.rs
// description: directory walking and resume discovery for batch analysis
// reference: https://docs.rs/walkdir

use crate::config::BatchConfig;
use crate::error::Result;
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct FileScanner {
    config: BatchConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

impl ScannedFile {
    /// Relative path without its extension, used to name exported results.
    pub fn stem(&self) -> String {
        let without_ext = Path::new(&self.relative_path).with_extension("");
        Validator::sanitize_file_stem(&without_ext.to_string_lossy())
    }
}

impl FileScanner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Files under `root` with a configured extension, sorted by relative path.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        Validator::validate_directory(root)?;
        info!("Scanning directory: {}", root.display());

        let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            if self.should_skip(&relative_path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if !self.has_known_extension(path) {
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                let size = metadata.len();
                if size > max_size {
                    debug!(
                        "Skipping large file ({} MB): {}",
                        size / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }

                files.push(ScannedFile {
                    path: path.to_path_buf(),
                    relative_path,
                    size,
                });
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        info!("Found {} resume files", files.len());
        Ok(files)
    }

    fn has_known_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.config.extensions.iter().any(|known| known.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }

    /// `*.ext` matches a suffix, `dir/*` a leading directory, anything else a substring.
    fn should_skip(&self, relative_path: &str) -> bool {
        self.config.skip_patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                relative_path.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix("/*") {
                relative_path.starts_with(&format!("{}/", prefix))
                    || relative_path.contains(&format!("/{}/", prefix))
            } else {
                relative_path.contains(pattern.as_str())
            }
        })
    }
}
