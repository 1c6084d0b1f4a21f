// file: src/nlp/local_model.rs
// description: sentence-embedding encoder backed by a local fastembed model
// reference: https://docs.rs/fastembed

use crate::config::{EmbeddingConfig, EmbeddingModelKind, EmbeddingProvider};
use crate::error::{AnalysisError, Result};
use crate::nlp::{Embedder, HashingEmbedder};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, warn};

const MAX_CACHE_ENTRIES: usize = 10_000;

fn fastembed_model(kind: EmbeddingModelKind) -> EmbeddingModel {
    match kind {
        EmbeddingModelKind::AllMiniLML6V2 => EmbeddingModel::AllMiniLML6V2,
        EmbeddingModelKind::AllMiniLML6V2Q => EmbeddingModel::AllMiniLML6V2Q,
        EmbeddingModelKind::BGESmallENV15 => EmbeddingModel::BGESmallENV15,
        EmbeddingModelKind::BGESmallENV15Q => EmbeddingModel::BGESmallENV15Q,
        EmbeddingModelKind::EmbeddingGemma300M => EmbeddingModel::EmbeddingGemma300M,
    }
}

/// Vectors keyed by a digest of their text.
#[derive(Debug, Default)]
struct EmbeddingCache {
    entries: HashMap<u64, Vec<f32>>,
    hits: usize,
    misses: usize,
}

impl EmbeddingCache {
    fn key(text: &str) -> u64 {
        let digest = Sha256::digest(text.as_bytes());
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(raw)
    }

    fn get(&mut self, text: &str) -> Option<Vec<f32>> {
        match self.entries.get(&Self::key(text)) {
            Some(vector) => {
                self.hits += 1;
                Some(vector.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn insert(&mut self, text: &str, vector: Vec<f32>) {
        if self.entries.len() >= MAX_CACHE_ENTRIES {
            let evicted: Vec<u64> = self.entries.keys().take(MAX_CACHE_ENTRIES / 2).copied().collect();
            for key in evicted {
                self.entries.remove(&key);
            }
        }
        self.entries.insert(Self::key(text), vector);
    }
}

/// Sentence embeddings from a local transformer model. Paraphrases such as
/// "bookkeeping" and "accounting" land close together.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
    kind: EmbeddingModelKind,
    cache: Mutex<EmbeddingCache>,
}

impl FastEmbedder {
    /// Loads the configured model, downloading it into the cache directory
    /// on first use.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let mut options =
            InitOptions::new(fastembed_model(config.model)).with_show_download_progress(config.show_download_progress);
        if let Some(cache_dir) = &config.cache_dir {
            options = options.with_cache_dir(cache_dir.clone());
        }

        let model = TextEmbedding::try_new(options).map_err(|e| {
            AnalysisError::Embedding(format!(
                "Failed to initialize {}: {}",
                config.model.display_name(),
                e
            ))
        })?;
        info!("Loaded embedding model {}", config.model.display_name());

        Ok(Self {
            model: Mutex::new(model),
            kind: config.model,
            cache: Mutex::new(EmbeddingCache::default()),
        })
    }

    fn encode(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        let mut model = self
            .model
            .lock()
            .map_err(|e| AnalysisError::Embedding(format!("Failed to acquire model lock: {}", e)))?;
        model
            .embed(texts, None)
            .map_err(|e| AnalysisError::Embedding(format!("Embedding generation failed: {}", e)))
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut results: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut pending: Vec<usize> = Vec::new();
        {
            let mut cache = self
                .cache
                .lock()
                .map_err(|e| AnalysisError::Embedding(format!("Failed to acquire cache lock: {}", e)))?;
            for (i, text) in texts.iter().enumerate() {
                match cache.get(text) {
                    Some(vector) => results[i] = Some(vector),
                    None => pending.push(i),
                }
            }
        }

        if !pending.is_empty() {
            let batch: Vec<&str> = pending.iter().map(|&i| texts[i].as_str()).collect();
            let vectors = self.encode(batch)?;
            debug!("Encoded {} texts ({} cached)", vectors.len(), texts.len() - pending.len());

            let mut cache = self
                .cache
                .lock()
                .map_err(|e| AnalysisError::Embedding(format!("Failed to acquire cache lock: {}", e)))?;
            for (i, vector) in pending.into_iter().zip(vectors) {
                cache.insert(&texts[i], vector.clone());
                results[i] = Some(vector);
            }
        }

        results
            .into_iter()
            .enumerate()
            .map(|(i, vector)| {
                vector.ok_or_else(|| AnalysisError::Embedding(format!("Missing embedding for text at index {}", i)))
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.kind.dimension()
    }
}

/// Encoder for `config.provider`. A model that cannot be loaded falls back
/// to the hashing encoder.
pub fn build_embedder(config: &EmbeddingConfig) -> Box<dyn Embedder> {
    match config.provider {
        EmbeddingProvider::Hashing => Box::new(HashingEmbedder::new(config.dimensions)),
        EmbeddingProvider::FastEmbed => match FastEmbedder::new(config) {
            Ok(embedder) => Box::new(embedder),
            Err(e) => {
                warn!("{}; falling back to hashing embeddings", e);
                Box::new(HashingEmbedder::new(config.dimensions))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::cosine_similarity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cache_hits_and_misses() {
        let mut cache = EmbeddingCache::default();
        assert!(cache.get("payroll").is_none());
        cache.insert("payroll", vec![1.0, 0.0]);
        assert_eq!(cache.get("payroll"), Some(vec![1.0, 0.0]));
        assert!(cache.get("Payroll").is_none());
        assert_eq!((cache.hits, cache.misses), (1, 2));
    }

    #[test]
    fn test_cache_evicts_when_full() {
        let mut cache = EmbeddingCache::default();
        for i in 0..MAX_CACHE_ENTRIES {
            cache.insert(&format!("skill {}", i), vec![i as f32]);
        }
        cache.insert("one more", vec![0.5]);
        assert!(cache.entries.len() <= MAX_CACHE_ENTRIES / 2 + 1);
        assert_eq!(cache.get("one more"), Some(vec![0.5]));
    }

    #[test]
    fn test_hashing_provider() {
        let config = EmbeddingConfig {
            provider: EmbeddingProvider::Hashing,
            dimensions: 96,
            ..EmbeddingConfig::default()
        };
        let embedder = build_embedder(&config);
        assert_eq!(embedder.dimensions(), 96);
        assert_eq!(embedder.embed_one("general ledger").unwrap().len(), 96);
    }

    #[test]
    fn test_model_mapping() {
        assert!(matches!(
            fastembed_model(EmbeddingModelKind::AllMiniLML6V2),
            EmbeddingModel::AllMiniLML6V2
        ));
        assert!(matches!(
            fastembed_model(EmbeddingModelKind::BGESmallENV15Q),
            EmbeddingModel::BGESmallENV15Q
        ));
        assert_eq!(EmbeddingModelKind::EmbeddingGemma300M.dimension(), 768);
    }

    /// Needs the model files; run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn test_paraphrases_are_close() {
        let embedder = FastEmbedder::new(&EmbeddingConfig::default()).unwrap();
        let pair = |a: &str, b: &str| {
            let vectors = embedder.embed(&[a.to_string(), b.to_string()]).unwrap();
            cosine_similarity(&vectors[0], &vectors[1])
        };

        let hashing = HashingEmbedder::new(512);
        let hashed = |a: &str, b: &str| {
            let vectors = hashing.embed(&[a.to_string(), b.to_string()]).unwrap();
            cosine_similarity(&vectors[0], &vectors[1])
        };

        for (a, b) in [
            ("bookkeeping", "accounting"),
            ("team leadership", "managed staff"),
            ("financial forecasting", "budget projections"),
            ("excel", "spreadsheets"),
        ] {
            assert!(pair(a, b) > hashed(a, b), "{} ~ {}", a, b);
            assert!(pair(a, b) > pair(a, "kubernetes cluster networking"), "{} ~ {}", a, b);
        }
        assert_eq!(embedder.dimensions(), 384);
        assert_eq!(embedder.embed_one("excel").unwrap().len(), 384);
    }
}
