//! Retrieval store used by the index and draft stages.

use crate::db::{LocalVectorStore, VectorStore};
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::{Embedder, create_embedder};
use crate::types::{AppError, ChunkMetadata, Document, DocumentMetadata, Result};
use crate::utils::toml_config::RagConfig;
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Vector store collaborator: write chunked text, read back relevant chunks
#[async_trait]
pub trait RagStore: Send + Sync {
    /// Chunk every text, tag each chunk with `metadata` and write them in one
    /// batch. Returns the number of chunks written.
    async fn add_texts(&self, texts: &[String], metadata: &ChunkMetadata) -> Result<usize>;

    /// Top-`k` stored chunks most relevant to `query`, most relevant first
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>>;
}

/// [`RagStore`] over a [`VectorStore`] collection and an [`Embedder`]
pub struct VectorRagStore {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    chunker: TextChunker,
    collection: String,
}

impl VectorRagStore {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        chunker: TextChunker,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedder,
            chunker,
            collection: collection.into(),
        }
    }

    /// Open the store described by `[rag]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk settings are invalid, a persisted
    /// snapshot cannot be loaded, the embedding model cannot be loaded, or the
    /// collection was indexed with a different embedding model.
    pub async fn from_config(config: &RagConfig) -> Result<Self> {
        let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap)?;
        let store = LocalVectorStore::open(config.persist_dir.as_ref().map(PathBuf::from)).await?;
        let embedder = create_embedder(config).await?;

        info!(
            provider = store.provider_name(),
            collection = %config.collection,
            embedder = %embedder.model_name(),
            "RAG store ready"
        );

        let rag_store = Self::new(
            Arc::new(store),
            embedder,
            chunker,
            config.collection.clone(),
        );
        rag_store.verify_embedder().await?;
        Ok(rag_store)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Number of stored chunks, zero before the first write
    pub async fn len(&self) -> Result<usize> {
        if !self.store.collection_exists(&self.collection).await? {
            return Ok(0);
        }
        self.store.count(&self.collection).await
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Fail if the collection already holds vectors from another embedder.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::VectorStore`] on a model or dimension mismatch.
    pub async fn verify_embedder(&self) -> Result<()> {
        let collections = self.store.list_collections().await?;
        let Some(info) = collections.iter().find(|c| c.name == self.collection) else {
            return Ok(());
        };

        let model = self.embedder.model_name();
        if info.embedder != model || info.dimensions != self.embedder.dimensions() {
            return Err(AppError::VectorStore(format!(
                "Collection '{}' holds {}-dimensional vectors from '{}'; refusing to mix in '{}'",
                self.collection, info.dimensions, info.embedder, model
            )));
        }
        Ok(())
    }

    async fn ensure_collection(&self) -> Result<()> {
        if self.store.collection_exists(&self.collection).await? {
            return self.verify_embedder().await;
        }

        let model = self.embedder.model_name();
        match self
            .store
            .create_collection(&self.collection, self.embedder.dimensions(), &model)
            .await
        {
            Ok(()) => Ok(()),
            // Another request created it first
            Err(_) if self.store.collection_exists(&self.collection).await? => {
                self.verify_embedder().await
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl RagStore for VectorRagStore {
    async fn add_texts(&self, texts: &[String], metadata: &ChunkMetadata) -> Result<usize> {
        let chunks: Vec<String> = texts
            .iter()
            .flat_map(|text| self.chunker.chunk(text))
            .collect();

        if chunks.is_empty() {
            return Ok(0);
        }

        let embeddings = self.embedder.embed(chunks.clone()).await?;
        if embeddings.len() != chunks.len() {
            return Err(AppError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let created_at = Utc::now();
        let documents: Vec<Document> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(content, embedding)| Document {
                id: uuid::Uuid::new_v4().to_string(),
                content,
                metadata: DocumentMetadata {
                    created_at,
                    attributes: metadata.clone(),
                },
                embedding: Some(embedding),
            })
            .collect();

        self.ensure_collection().await?;
        let written = self.store.upsert(&self.collection, &documents).await?;
        debug!(collection = %self.collection, chunks = written, "Indexed chunks");
        Ok(written)
    }

    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        if k == 0 || !self.store.collection_exists(&self.collection).await? {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed(vec![query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Embedding("No embedding returned for query".to_string()))?;

        let results = self
            .store
            .search(&self.collection, &query_embedding, k, -1.0)
            .await?;

        Ok(results.into_iter().map(|r| r.document.content).collect())
    }
}
