// file: src/input/mod.rs
// description: batch input discovery module exports
// reference: internal module structure

pub mod scanner;

pub use scanner::{FileScanner, ScannedFile};
