//! Vector Store Abstraction Layer
//!
//! [`VectorStore`] is the narrow interface the RAG layer needs: named
//! collections of embedded documents with cosine-similarity search.
//! [`LocalVectorStore`] is the embedded implementation, optionally persisted
//! as JSON under a data directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use rival::db::{LocalVectorStore, VectorStore};
//!
//! let store = LocalVectorStore::open(Some("./data/vectors".into())).await?;
//! store.create_collection("research_notes", 384, "hashing-384").await?;
//! store.upsert("research_notes", &documents).await?;
//! let results = store.search("research_notes", &query_embedding, 8, -1.0).await?;
//! ```

use crate::types::{AppError, Document, Result, SearchResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const COLLECTIONS_FILE: &str = "collections.json";
const COLLECTIONS_TMP_FILE: &str = "collections.json.tmp";

/// Information about a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Name of the collection.
    pub name: String,
    /// Number of documents in the collection.
    pub document_count: usize,
    /// Vector dimensions.
    pub dimensions: usize,
    /// Embedding model the vectors were produced with.
    pub embedder: String,
}

/// Abstract trait for vector database operations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Get the name of this vector store provider.
    fn provider_name(&self) -> &'static str;

    /// Create a new collection for vectors of `dimensions` produced by `embedder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection already exists.
    async fn create_collection(&self, name: &str, dimensions: usize, embedder: &str)
    -> Result<()>;

    /// List all collections in the vector store.
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    /// Check if a collection exists.
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Upsert documents with their embeddings into a collection.
    ///
    /// Documents are identified by their `id` field. Every document must carry
    /// an embedding of the collection's dimensionality. A batch that cannot be
    /// persisted is not applied.
    async fn upsert(&self, collection: &str, documents: &[Document]) -> Result<usize>;

    /// Search for similar vectors in a collection.
    ///
    /// Returns at most `limit` results with score >= `threshold`, sorted by
    /// similarity score (descending).
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
        threshold: f32,
    ) -> Result<Vec<SearchResult>>;

    /// Count documents in a collection.
    async fn count(&self, collection: &str) -> Result<usize>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LocalCollection {
    dimensions: usize,
    #[serde(default)]
    embedder: String,
    documents: HashMap<String, Document>,
}

type Collections = HashMap<String, LocalCollection>;

/// Embedded vector store with optional JSON persistence.
///
/// With a data directory, all collections are loaded on open and every write
/// replaces the snapshot atomically before it becomes visible to readers.
/// Without one, data lives only for the lifetime of the process.
pub struct LocalVectorStore {
    collections: Arc<RwLock<Collections>>,
    /// Serializes writers across snapshot, persist and commit
    write_lock: tokio::sync::Mutex<()>,
    path: Option<PathBuf>,
}

impl LocalVectorStore {
    /// Create an in-memory store.
    pub fn in_memory() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            write_lock: tokio::sync::Mutex::new(()),
            path: None,
        }
    }

    /// Open a store, loading any collections persisted under `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing snapshot cannot be read or parsed.
    pub async fn open(path: Option<PathBuf>) -> Result<Self> {
        let store = Self {
            path,
            ..Self::in_memory()
        };

        if let Some(ref path) = store.path {
            store.load_collections(path).await?;
        }

        Ok(store)
    }

    /// Data directory, if persistent
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn load_collections(&self, path: &Path) -> Result<()> {
        let file = path.join(COLLECTIONS_FILE);
        if !file.exists() {
            return Ok(());
        }

        let data = tokio::fs::read_to_string(&file).await.map_err(|e| {
            AppError::VectorStore(format!("Failed to read {}: {}", file.display(), e))
        })?;

        let loaded: Collections = serde_json::from_str(&data).map_err(|e| {
            AppError::VectorStore(format!("Failed to parse {}: {}", file.display(), e))
        })?;

        debug!(collections = loaded.len(), "Loaded vector store from {:?}", file);
        *self.collections.write() = loaded;
        Ok(())
    }

    /// Apply `mutate` to a copy of the collections, persist the copy, then
    /// publish it. Nothing changes in memory if `mutate` or the save fails.
    async fn commit<R>(&self, mutate: impl FnOnce(&mut Collections) -> Result<R>) -> Result<R> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.collections.read().clone();
        let value = mutate(&mut next)?;
        self.save_collections(&next).await?;
        *self.collections.write() = next;

        Ok(value)
    }

    async fn save_collections(&self, collections: &Collections) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        let data = serde_json::to_vec(collections).map_err(|e| {
            AppError::VectorStore(format!("Failed to serialize collections: {}", e))
        })?;

        tokio::fs::create_dir_all(path).await.map_err(|e| {
            AppError::VectorStore(format!("Failed to create {}: {}", path.display(), e))
        })?;

        // Write aside, then rename over the snapshot
        let tmp = path.join(COLLECTIONS_TMP_FILE);
        tokio::fs::write(&tmp, data).await.map_err(|e| {
            AppError::VectorStore(format!("Failed to write {}: {}", tmp.display(), e))
        })?;

        let file = path.join(COLLECTIONS_FILE);
        tokio::fs::rename(&tmp, &file).await.map_err(|e| {
            AppError::VectorStore(format!("Failed to replace {}: {}", file.display(), e))
        })?;

        Ok(())
    }
}

impl Default for LocalVectorStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Calculate cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

fn collection_not_found(name: &str) -> AppError {
    AppError::NotFound(format!("Collection '{}' not found", name))
}

#[async_trait]
impl VectorStore for LocalVectorStore {
    fn provider_name(&self) -> &'static str {
        if self.path.is_some() {
            "local-json"
        } else {
            "in-memory"
        }
    }

    async fn create_collection(
        &self,
        name: &str,
        dimensions: usize,
        embedder: &str,
    ) -> Result<()> {
        self.commit(|collections| {
            if collections.contains_key(name) {
                return Err(AppError::InvalidInput(format!(
                    "Collection '{}' already exists",
                    name
                )));
            }
            collections.insert(
                name.to_string(),
                LocalCollection {
                    dimensions,
                    embedder: embedder.to_string(),
                    documents: HashMap::new(),
                },
            );
            Ok(())
        })
        .await
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let collections = self.collections.read();
        let mut infos: Vec<CollectionInfo> = collections
            .iter()
            .map(|(name, col)| CollectionInfo {
                name: name.clone(),
                document_count: col.documents.len(),
                dimensions: col.dimensions,
                embedder: col.embedder.clone(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.read().contains_key(name))
    }

    async fn upsert(&self, collection: &str, documents: &[Document]) -> Result<usize> {
        self.commit(|collections| {
            let col = collections
                .get_mut(collection)
                .ok_or_else(|| collection_not_found(collection))?;

            // Validate the whole batch before touching the collection
            for doc in documents {
                match doc.embedding {
                    None => {
                        return Err(AppError::InvalidInput(format!(
                            "Document '{}' is missing embedding",
                            doc.id
                        )));
                    }
                    Some(ref e) if e.len() != col.dimensions => {
                        return Err(AppError::InvalidInput(format!(
                            "Document '{}' has {} dimensions, collection '{}' expects {}",
                            doc.id,
                            e.len(),
                            collection,
                            col.dimensions
                        )));
                    }
                    Some(_) => {}
                }
            }

            for doc in documents {
                col.documents.insert(doc.id.clone(), doc.clone());
            }
            Ok(documents.len())
        })
        .await
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
        threshold: f32,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read();
        let col = collections
            .get(collection)
            .ok_or_else(|| collection_not_found(collection))?;

        let mut results: Vec<SearchResult> = col
            .documents
            .values()
            .filter_map(|doc| {
                let doc_embedding = doc.embedding.as_ref()?;
                let score = cosine_similarity(embedding, doc_embedding);
                (score >= threshold).then(|| SearchResult {
                    document: Document {
                        embedding: None,
                        ..doc.clone()
                    },
                    score,
                })
            })
            .collect();

        // Highest score first; ties broken by insertion time, then id
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.document
                        .metadata
                        .created_at
                        .cmp(&b.document.metadata.created_at)
                })
                .then_with(|| a.document.id.cmp(&b.document.id))
        });
        results.truncate(limit);

        Ok(results)
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read();
        collections
            .get(collection)
            .map(|col| col.documents.len())
            .ok_or_else(|| collection_not_found(collection))
    }
}
