// file: src/nlp/mod.rs
// description: language collaborators injected into the analysis engine
// reference: internal module structure

pub mod embedder;
pub mod lexicon;
pub mod local_model;
pub mod pipeline;

pub use embedder::{Embedder, HashingEmbedder, best_match, cosine_similarity};
pub use local_model::{FastEmbedder, build_embedder};
pub use pipeline::{
    LanguagePipeline, ParsedSentence, ParsedText, PartOfSpeech, RuleBasedPipeline, Token,
};
