//! Vector storage.
//!
//! Research notes are stored as embedded chunks in a [`LocalVectorStore`]:
//! an embedded store with cosine-similarity search, persisted as JSON under
//! `[rag] persist_dir` (or kept in memory when unset).

#![allow(missing_docs)]

// Vector store abstraction layer
pub mod vectorstore;

// Re-exports
pub use vectorstore::{CollectionInfo, LocalVectorStore, VectorStore, cosine_similarity};
