// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod analyzers;
pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod input;
pub mod matching;
pub mod models;
pub mod nlp;
pub mod parser;
pub mod pipeline;
pub mod recommend;
pub mod reference;
pub mod utils;

pub use analyzers::{AnalyzerInput, EnhancedAnalysis};
pub use config::{
    AnalysisConfig, BatchConfig, Config, EmbeddingConfig, EmbeddingModelKind, EmbeddingProvider, MatchingConfig, ReferenceConfig, ValidatorConfig,
};
pub use error::{AnalysisError, ErrorReport, ErrorType, Result};
pub use exporter::{ExportEntry, ExportManifest, JsonExporter};
pub use extractor::{SeniorityExtractor, SkillExtractor, is_non_skill_phrase};
pub use input::{FileScanner, ScannedFile};
pub use matching::{GapValidator, LlmGapValidator, MatchingEngine, NoopValidator, SentenceRecovery};
pub use models::{
    AnalysisResponse, AnalysisResult, Document, MatchResult, Recommendation, Recommendations, SeniorityProfile,
    Skill, SkillSet, SkillSource,
};
pub use nlp::{Embedder, FastEmbedder, HashingEmbedder, LanguagePipeline, RuleBasedPipeline, build_embedder};
pub use parser::{DocumentLoader, TextDocumentLoader, clean, segment};
pub use pipeline::{AnalysisEngine, BatchItem, BatchStats, ProgressTracker};
pub use recommend::RecommendationComposer;
pub use reference::ReferenceData;
pub use utils::{OperationTimer, PerformanceMetrics, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(clean("Hello,  World!"), "hello world");
    }
}
