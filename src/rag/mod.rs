//! Retrieval Augmented Generation (RAG) components
//!
//! Research notes are split into overlapping chunks, embedded, and stored in a
//! vector collection; the draft stage retrieves the chunks closest to the topic
//! as grounding context for the report.
//!
//! # Module Structure
//!
//! - [`rag::chunker`](crate::rag::chunker) - Character-bounded text chunking with overlap
//! - [`rag::embeddings`](crate::rag::embeddings) - Local ONNX embeddings, hashing vectors in builds without them
//! - [`rag::store`](crate::rag::store) - The [`RagStore`] collaborator used by the pipeline
//!
//! # Example
//!
//! ```ignore
//! use rival::rag::{RagStore, VectorRagStore};
//!
//! let store = VectorRagStore::from_config(&config.rag).await?;
//! store.add_texts(&notes, &[("topic".into(), topic.clone())].into()).await?;
//! let context = store.retrieve(&topic, 8).await?;
//! ```
//!
//! # Embedding Models
//!
//! With the `local-embeddings` feature (default):
//! - `sentence-transformers/all-MiniLM-L6-v2` - Lightweight (default)
//! - `BAAI/bge-small-en-v1.5` - Fast, good quality
//! - `BAAI/bge-base-en-v1.5` - Higher quality, slower

pub mod chunker;
pub mod embeddings;
pub mod store;

pub use chunker::TextChunker;
pub use embeddings::{Embedder, EmbeddingModelType, HashingEmbedder, create_embedder};
pub use store::{RagStore, VectorRagStore};

#[cfg(feature = "local-embeddings")]
pub use embeddings::FastEmbedder;
