// file: src/parser/mod.rs
// description: text normalization, segmentation and loading module exports
// reference: internal module structure

pub mod bullets;
pub mod loader;
pub mod normalizer;
pub mod sections;

pub use bullets::extract_bullets;
pub use loader::{DocumentLoader, TextDocumentLoader};
pub use normalizer::{TextNormalizer, clean};
pub use sections::{segment, split_sentences};
