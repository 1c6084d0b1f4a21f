// file: src/pipeline/orchestrator.rs
// description: coordinates normalization, extraction, matching, analyzers and recommendations
// reference: one engine instance serves single requests and concurrent batches

use crate::analyzers::{AnalyzerInput, EnhancedAnalysis};
use crate::config::{Config, ValidatorConfig};
use crate::error::{AnalysisError, Result};
use crate::extractor::{SeniorityExtractor, SkillExtractor};
use crate::input::ScannedFile;
use crate::matching::{
    GapValidator, LlmGapValidator, MatchingEngine, NoopValidator, SentenceRecovery, validate_or_passthrough,
};
use crate::models::{
    AnalysisResponse, AnalysisResult, Document, IndustryComparison, SeniorityComparison, SeniorityProfile,
    SkillSet,
};
use crate::nlp::{Embedder, LanguagePipeline, RuleBasedPipeline, build_embedder};
use crate::parser::{DocumentLoader, TextDocumentLoader, TextNormalizer, segment};
use crate::pipeline::progress::ProgressTracker;
use crate::recommend::{
    CompositionInput, RecommendationComposer, competency_points, compute_score, context_points, seniority_points,
};
use crate::reference::{GENERAL_INDUSTRY, ReferenceData, detect_industry};
use crate::utils::{OperationTimer, PerformanceMetrics, Validator};
use chrono::{Datelike, Local, Utc};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

const SLOW_ANALYSIS: Duration = Duration::from_secs(10);

/// One batch entry: the source file and its outcome.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub source: ScannedFile,
    pub response: AnalysisResponse,
}

pub struct AnalysisEngine {
    config: Config,
    embedder: Box<dyn Embedder>,
    pipeline: Box<dyn LanguagePipeline>,
    reference: ReferenceData,
    validator: Box<dyn GapValidator>,
    loader: Box<dyn DocumentLoader>,
    normalizer: TextNormalizer,
    composer: RecommendationComposer,
    current_year: Option<i32>,
}

impl AnalysisEngine {
    /// Builds the local collaborators and loads reference data once.
    pub fn from_config(config: Config) -> Result<Self> {
        let embedder = build_embedder(&config.embedding);
        let reference = ReferenceData::load(&config.reference, embedder.as_ref())?;
        let validator = build_validator(&config.validator)?;

        let engine = Self::new(config, embedder, Box::new(RuleBasedPipeline::new()), reference)
            .with_validator(validator);

        Ok(engine)
    }

    /// Engine over injected collaborators, with a no-op validator and the
    /// plain-text loader.
    pub fn new(
        config: Config,
        embedder: Box<dyn Embedder>,
        pipeline: Box<dyn LanguagePipeline>,
        reference: ReferenceData,
    ) -> Self {
        let loader = TextDocumentLoader::with_extensions(&config.batch.extensions);
        let composer = RecommendationComposer::new(config.analysis.max_recommendations);

        Self {
            config,
            embedder,
            pipeline,
            reference,
            validator: Box::new(NoopValidator),
            loader: Box::new(loader),
            normalizer: TextNormalizer::new(),
            composer,
            current_year: None,
        }
    }

    pub fn with_validator(mut self, validator: Box<dyn GapValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_loader(mut self, loader: Box<dyn DocumentLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Pins the year used for "present" ranges and date checks.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    fn year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| Local::now().year())
    }

    pub fn load_document(&self, path: &Path) -> Result<String> {
        self.loader.load(path)
    }

    /// Skills of one document with provenance.
    pub fn extract_skills(&self, text: &str) -> Result<SkillSet> {
        let tidy = self.normalizer.tidy(text);
        self.skill_extractor().extract(&tidy)
    }

    /// Seniority of the experience section of one document.
    pub fn extract_seniority(&self, text: &str) -> SeniorityProfile {
        let sections = segment(&self.normalizer.tidy(text));
        SeniorityExtractor::new(&self.reference.seniority_levels)
            .with_current_year(self.year())
            .extract(&sections.experience)
    }

    fn skill_extractor(&self) -> SkillExtractor<'_> {
        SkillExtractor::with_config(
            self.pipeline.as_ref(),
            self.embedder.as_ref(),
            &self.reference.ontology,
            &self.config.matching,
        )
    }

    fn prepare(&self, text: &str, label: &str) -> Result<Document> {
        let clean = self.normalizer.clean(text);
        Validator::validate_document_text(
            &clean,
            label,
            self.config.analysis.min_text_chars,
            self.config.analysis.long_text_warning_chars,
        )?;

        let raw = self.normalizer.tidy(text);
        let sections = segment(&raw);
        Ok(Document::new(raw, clean, sections))
    }

    /// Runs the full analysis. Returns a complete result or an error, never
    /// a partial result.
    pub async fn analyze(&self, resume_text: &str, jd_text: &str) -> Result<AnalysisResult> {
        let timer = OperationTimer::new("analysis");
        let mut metrics = PerformanceMetrics::new("analysis");
        let current_year = self.year();

        let (resume, jd) = metrics.time("normalize", || -> Result<(Document, Document)> {
            Ok((self.prepare(resume_text, "Resume")?, self.prepare(jd_text, "Job description")?))
        })?;

        let industries = metrics.time("industry", || IndustryComparison {
            resume: detect_industry(&resume.raw),
            jd: detect_industry(&jd.raw),
        });

        let (resume_skills, jd_skills) = metrics.time("skills", || -> Result<(Vec<String>, Vec<String>)> {
            let extractor = self.skill_extractor();
            Ok((extractor.extract(&resume.raw)?.labels(), extractor.extract(&jd.raw)?.labels()))
        })?;
        debug!(
            "Extracted {} resume skills and {} jd skills",
            resume_skills.len(),
            jd_skills.len()
        );

        let seniority = metrics.time("seniority", || {
            let extractor =
                SeniorityExtractor::new(&self.reference.seniority_levels).with_current_year(current_year);
            SeniorityComparison {
                resume: extractor.extract(&resume.sections.experience),
                jd: extractor.extract(&jd.sections.experience),
            }
        });

        let score = metrics.time("score", || {
            compute_score(&resume.sections, &jd.sections, self.embedder.as_ref())
        })?;
        let seniority_narrative = seniority_points(&seniority);

        let mut comp_details = metrics.time("matching", || {
            MatchingEngine::new(
                self.embedder.as_ref(),
                &self.reference.job_titles,
                self.config.matching.similar_threshold,
            )
            .match_skills(&resume_skills, &jd_skills)
        })?;

        let recovered = metrics.time("recovery", || {
            SentenceRecovery::new(
                self.embedder.as_ref(),
                self.config.matching.recovery_threshold,
                self.config.matching.recovery_strong_threshold,
            )
            .recover(&resume.raw, &jd.raw, &comp_details.gaps)
        })?;
        let recovered_count = comp_details.recover(&recovered);
        debug!("Sentence recovery moved {} gaps to matches", recovered_count);

        let validation_start = Instant::now();
        let outcome = validate_or_passthrough(
            self.validator.as_ref(),
            Duration::from_secs(self.config.validator.timeout_secs),
            &resume.raw,
            &jd.raw,
            &comp_details.gaps,
            &comp_details.matches,
        )
        .await;
        comp_details.recover(&outcome.recovered);
        metrics.record("validation", validation_start.elapsed());

        let competency_narrative = competency_points(&comp_details);

        let (resume_parsed, jd_parsed) =
            metrics.time("parse", || (self.pipeline.parse(&resume.raw), self.pipeline.parse(&jd.raw)));

        let context_narrative = metrics.time("context", || {
            context_points(&resume.raw, &jd.raw, &resume_parsed, &jd_parsed, self.embedder.as_ref())
        })?;

        let jd_industry = industries
            .jd
            .first()
            .map(|top| top.industry.as_str())
            .filter(|industry| *industry != GENERAL_INDUSTRY);

        let enhanced_analysis = metrics.time("analyzers", || {
            let input = AnalyzerInput {
                resume_text: &resume.raw,
                jd_text: &jd.raw,
                resume_parsed: &resume_parsed,
                jd_parsed: &jd_parsed,
                resume_sections: &resume.sections,
                resume_skills: &resume_skills,
                jd_skills: &jd_skills,
                gaps: &comp_details.gaps,
                resume_years: seniority.resume.years,
                jd_industry,
                current_year,
            };
            EnhancedAnalysis::compute(
                &input,
                self.embedder.as_ref(),
                self.pipeline.as_ref(),
                &self.reference.certifications,
            )
        });

        let recommendations = metrics.time("recommendations", || {
            self.composer.compose(&CompositionInput {
                score,
                comp_details: &comp_details,
                industries: &industries,
                analysis: &enhanced_analysis,
            })
        });

        let seniority_analysis = seniority_narrative.join(" ");
        let comp_analysis = competency_narrative.join("\n");
        let role_fit_points: Vec<String> = seniority_narrative
            .into_iter()
            .chain(competency_narrative)
            .chain(context_narrative)
            .collect();

        info!(
            "Analysis complete: score {:.1}, {} matches, {} gaps, {} recommendations ({} critical)",
            score,
            comp_details.matches.len(),
            comp_details.gaps.len(),
            recommendations.items.len(),
            recommendations.critical_count()
        );
        timer.warn_if_slow(SLOW_ANALYSIS, "full analysis");
        timer.finish();

        Ok(AnalysisResult {
            analysis_id: uuid::Uuid::new_v4().to_string(),
            analyzed_at: Utc::now().to_rfc3339(),
            score,
            role_fit_points,
            comp_details,
            seniority,
            seniority_analysis,
            comp_analysis,
            industries,
            enhanced_analysis,
            recommendations,
            resume_hash: resume.content_hash,
            jd_hash: jd.content_hash,
            timings_ms: metrics.into_timings(),
        })
    }

    /// `analyze` folded into the success-or-error envelope.
    pub async fn respond(&self, resume_text: &str, jd_text: &str) -> AnalysisResponse {
        let result = self.analyze(resume_text, jd_text).await;
        if let Err(e) = &result {
            warn!("Analysis failed: {}", e);
        }
        AnalysisResponse::from(result)
    }

    /// Loads both documents through the loader, then analyzes them.
    pub async fn analyze_files(&self, resume_path: &Path, jd_path: &Path) -> Result<AnalysisResult> {
        let resume = self.load_document(resume_path)?;
        let jd = self.load_document(jd_path)?;
        self.analyze(&resume, &jd).await
    }

    /// Analyzes every resume against one job description with bounded
    /// concurrency. Per-file failures become `Failure` entries.
    pub async fn analyze_batch(
        self: &Arc<Self>,
        files: Vec<ScannedFile>,
        jd_text: Arc<str>,
        progress: Arc<ProgressTracker>,
    ) -> Vec<BatchItem> {
        let timer = OperationTimer::new("batch analysis");
        let max_concurrent_tasks = self.config.batch.parallel_workers.max(1);
        let semaphore = Arc::new(Semaphore::new(max_concurrent_tasks));

        info!(
            "Analyzing {} resumes with {} concurrent tasks...",
            files.len(),
            max_concurrent_tasks
        );

        let tasks = files.into_iter().map(|file| {
            let semaphore = semaphore.clone();
            let engine = Arc::clone(self);
            let progress = progress.clone();
            let jd_text = jd_text.clone();

            async move {
                let permit = semaphore.acquire_owned().await.ok()?;
                progress.set_message(format!("Analyzing {}", file.relative_path));

                let path: PathBuf = file.path.clone();
                let handle = tokio::spawn(async move {
                    match engine.load_document(&path) {
                        Ok(resume) => engine.respond(&resume, &jd_text).await,
                        Err(e) => {
                            warn!("Failed to load {}: {}", path.display(), e);
                            AnalysisResponse::from(e)
                        }
                    }
                });
                let joined = handle.await;

                drop(permit);

                let response = match joined {
                    Ok(response) => response,
                    Err(e) => {
                        error!("Analysis task panicked: {}", e);
                        AnalysisResponse::from(AnalysisError::Processing(format!(
                            "Analysis task failed: {}",
                            e
                        )))
                    }
                };

                progress.add_bytes_processed(file.size);
                progress.record(&response);

                Some(BatchItem { source: file, response })
            }
        });

        let mut items: Vec<BatchItem> = stream::iter(tasks)
            .buffer_unordered(max_concurrent_tasks)
            .filter_map(|item| async move { item })
            .collect()
            .await;

        items.sort_by(|a, b| a.source.relative_path.cmp(&b.source.relative_path));
        timer.finish_with_count(items.len());
        items
    }
}

/// The LLM validator when enabled and keyed; otherwise the no-op.
fn build_validator(config: &ValidatorConfig) -> Result<Box<dyn GapValidator>> {
    if !config.enabled {
        return Ok(Box::new(NoopValidator));
    }

    match config.api_key.as_deref().filter(|key| !key.trim().is_empty()) {
        Some(key) => {
            info!("Gap validation enabled with {}", config.model);
            Ok(Box::new(LlmGapValidator::new(config, key.to_string())?))
        }
        None => {
            warn!("Gap validation enabled but no api key configured; skipping validation");
            Ok(Box::new(NoopValidator))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddingProvider;
    use crate::error::ErrorType;
    use crate::matching::ValidationOutcome;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const RESUME: &str = "Jane Doe\n\
        Experience\n\
        Senior Accountant, Acme Corp, 2018 - 2023\n\
        Managed accounts payable for 200 vendors and reduced processing time by 30%.\n\
        Reconciled bank statements monthly and prepared journal entries.\n\
        Led a team of 4 clerks through the ERP migration.\n\
        Skills\n\
        Excel, QuickBooks, reconciliation, accounts payable\n\
        Education\n\
        Bachelor of Science in Accounting, State University, 2017";

    const JD: &str = "Staff Accountant\n\
        Requirements\n\
        Minimum of 3+ years of accounting experience.\n\
        Experience with accounts payable, accounts receivable and budgeting is required.\n\
        Bachelor's degree in accounting or finance required.\n\
        Responsibilities\n\
        Prepare journal entries and reconcile accounts each month.";

    fn engine() -> AnalysisEngine {
        let mut config = Config::default_config();
        config.embedding.provider = EmbeddingProvider::Hashing;
        AnalysisEngine::from_config(config)
            .unwrap()
            .with_current_year(2025)
    }

    struct RecoverAll;

    #[async_trait]
    impl GapValidator for RecoverAll {
        async fn validate(
            &self,
            _resume: &str,
            _jd: &str,
            gaps: &[String],
            _matches: &[String],
        ) -> Result<ValidationOutcome> {
            Ok(ValidationOutcome {
                gaps: vec![],
                recovered: gaps.to_vec(),
            })
        }
    }

    #[tokio::test]
    async fn test_analyze_produces_complete_result() {
        let result = engine().analyze(RESUME, JD).await.unwrap();

        assert!((0.0..=100.0).contains(&result.score));
        assert!(result.comp_details.is_disjoint());
        assert_eq!(result.role_fit_points.len(), 9);
        assert!(result.seniority_analysis.starts_with("Experience years: Resume"));
        assert!(result.recommendations.items.len() <= 8);
        assert!(!result.recommendations.summary.is_empty());
        assert_eq!(result.resume_hash.len(), 64);
        assert!(result.timings_ms.contains_key("total"));
        assert!(result.timings_ms.contains_key("analyzers"));
        assert_eq!(result.enhanced_analysis.experience_validation.min_required, Some(3));
    }

    #[tokio::test]
    async fn test_hash_ignores_formatting() {
        let engine = engine();
        let a = engine.analyze(RESUME, JD).await.unwrap();
        let b = engine.analyze(&RESUME.replace('\n', "\r\n"), JD).await.unwrap();
        assert_eq!(a.resume_hash, b.resume_hash);
        assert_ne!(a.analysis_id, b.analysis_id);
    }

    #[tokio::test]
    async fn test_short_resume_is_validation_error() {
        let err = engine().analyze("Too short.", JD).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::ValidationError);
        assert!(err.to_string().contains("Resume is too short or empty"));

        let err = engine().analyze(RESUME, "   ").await.unwrap_err();
        assert!(err.to_string().contains("Job description is too short or empty"));
    }

    #[tokio::test]
    async fn test_respond_wraps_errors() {
        let response = engine().respond("", JD).await;
        assert!(!response.is_success());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error_type"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_validator_recovery_empties_gaps() {
        let engine = engine().with_validator(Box::new(RecoverAll));
        let result = engine.analyze(RESUME, JD).await.unwrap();

        assert!(result.comp_details.gaps.is_empty());
        assert!(result.enhanced_analysis.gap_severity.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let resume = temp.path().join("resume.pdf");
        let jd = temp.path().join("jd.txt");
        fs::write(&resume, b"%PDF-1.7").unwrap();
        fs::write(&jd, JD).unwrap();

        let err = engine().analyze_files(&resume, &jd).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::ParseError);
    }

    #[tokio::test]
    async fn test_analyze_batch_keeps_failures() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), RESUME).unwrap();
        fs::write(temp.path().join("b.txt"), "tiny").unwrap();

        let engine = Arc::new(engine());
        let files = crate::input::FileScanner::new(engine.config().batch.clone())
            .scan_directory(temp.path())
            .unwrap();
        let progress = Arc::new(ProgressTracker::hidden(files.len()));

        let items = engine.analyze_batch(files, Arc::from(JD), progress.clone()).await;

        assert_eq!(items.len(), 2);
        assert!(items[0].response.is_success());
        assert!(!items[1].response.is_success());

        let stats = progress.get_stats();
        assert_eq!(stats.resumes_analyzed, 1);
        assert_eq!(stats.resumes_failed, 1);
    }

    #[test]
    fn test_extract_helpers() {
        let engine = engine();
        let skills = engine.extract_skills(RESUME).unwrap();
        assert!(!skills.is_empty());
        assert!(skills.labels().iter().all(|label| *label == label.to_lowercase()));

        let profile = engine.extract_seniority(RESUME);
        assert!(profile.years >= 5.0);
    }

    #[test]
    fn test_disabled_validator_without_key_builds() {
        let mut config = Config::default_config().validator;
        config.enabled = true;
        config.api_key = None;
        assert!(build_validator(&config).is_ok());
    }

    #[test]
    fn test_engine_uses_configured_embedding_provider() {
        let mut config = Config::default_config();
        config.embedding.provider = EmbeddingProvider::Hashing;
        config.embedding.dimensions = 128;
        let engine = AnalysisEngine::from_config(config).unwrap();
        assert_eq!(engine.embedder.dimensions(), 128);
        assert!(!engine.reference().ontology.is_empty());
    }
}
