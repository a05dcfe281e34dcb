//! Dense text embeddings.
//!
//! [`FastEmbedder`] runs ONNX models locally via fastembed (feature
//! `local-embeddings`, on by default). [`HashingEmbedder`] is a deterministic
//! feature-hashed bag of words, used only in builds without that feature. Its
//! vectors carry their own model name, so a collection never mixes the two.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{AppError, Result};
use crate::utils::toml_config::RagConfig;

// ============================================================================
// Embedding Model Types
// ============================================================================

/// Supported embedding models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingModelType {
    /// sentence-transformers/all-MiniLM-L6-v2 - small and fast
    #[default]
    AllMiniLmL6V2,
    /// sentence-transformers/all-MiniLM-L12-v2
    AllMiniLmL12V2,
    /// BAAI/bge-small-en-v1.5
    BgeSmallEnV15,
    /// BAAI/bge-base-en-v1.5 - higher quality, slower
    BgeBaseEnV15,
}

impl EmbeddingModelType {
    /// Output vector dimensionality
    pub fn dimensions(&self) -> usize {
        match self {
            Self::AllMiniLmL6V2 | Self::AllMiniLmL12V2 | Self::BgeSmallEnV15 => 384,
            Self::BgeBaseEnV15 => 768,
        }
    }

    /// Convert to fastembed's EmbeddingModel enum
    #[cfg(feature = "local-embeddings")]
    pub fn to_fastembed_model(&self) -> fastembed::EmbeddingModel {
        use fastembed::EmbeddingModel;
        match self {
            Self::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            Self::AllMiniLmL12V2 => EmbeddingModel::AllMiniLML12V2,
            Self::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
            Self::BgeBaseEnV15 => EmbeddingModel::BGEBaseENV15,
        }
    }
}

impl FromStr for EmbeddingModelType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.rsplit('/').next().unwrap_or(s).to_lowercase();
        match name.as_str() {
            "all-minilm-l6-v2" => Ok(Self::AllMiniLmL6V2),
            "all-minilm-l12-v2" => Ok(Self::AllMiniLmL12V2),
            "bge-small-en-v1.5" | "bge-small-en-v15" => Ok(Self::BgeSmallEnV15),
            "bge-base-en-v1.5" | "bge-base-en-v15" => Ok(Self::BgeBaseEnV15),
            _ => Err(AppError::Configuration(format!(
                "Unknown embedding model: {}. Use one of: \
                 sentence-transformers/all-MiniLM-L6-v2, sentence-transformers/all-MiniLM-L12-v2, \
                 BAAI/bge-small-en-v1.5, BAAI/bge-base-en-v1.5",
                s
            ))),
        }
    }
}

impl std::fmt::Display for EmbeddingModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AllMiniLmL6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            Self::AllMiniLmL12V2 => "sentence-transformers/all-MiniLM-L12-v2",
            Self::BgeSmallEnV15 => "BAAI/bge-small-en-v1.5",
            Self::BgeBaseEnV15 => "BAAI/bge-base-en-v1.5",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Embedder Trait
// ============================================================================

/// Turns text into fixed-size vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts; the output has one vector per input, in order
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;

    /// Dimensionality of every returned vector
    fn dimensions(&self) -> usize;

    /// Identifier for logs
    fn model_name(&self) -> String;
}

// ============================================================================
// Hashing Embedder
// ============================================================================

/// Deterministic bag-of-words embedder based on SHA-256 feature hashing.
///
/// Each lowercase alphanumeric token adds ±1 to one bucket; the result is
/// L2-normalized. Identical text always yields identical vectors.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Embed one text synchronously
    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0f32; self.dimensions];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let digest = Sha256::digest(token.to_lowercase().as_bytes());
            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimensions as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in vector.iter_mut() {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> String {
        format!("hashing-{}", self.dimensions)
    }
}

// ============================================================================
// FastEmbed Embedder
// ============================================================================

/// Local ONNX embedding model
#[cfg(feature = "local-embeddings")]
pub struct FastEmbedder {
    model_type: EmbeddingModelType,
    model: Arc<tokio::sync::Mutex<fastembed::TextEmbedding>>,
}

#[cfg(feature = "local-embeddings")]
impl FastEmbedder {
    /// Load the model, downloading weights on first use
    pub async fn new(model_type: EmbeddingModelType) -> Result<Self> {
        let model = tokio::task::spawn_blocking(move || {
            let options = fastembed::InitOptions::new(model_type.to_fastembed_model())
                .with_show_download_progress(false);
            fastembed::TextEmbedding::try_new(options).map_err(|e| {
                AppError::Embedding(format!("Failed to load {}: {}", model_type, e))
            })
        })
        .await
        .map_err(|e| AppError::Internal(format!("Embedding model task failed: {}", e)))??;

        Ok(Self {
            model_type,
            model: Arc::new(tokio::sync::Mutex::new(model)),
        })
    }
}

#[cfg(feature = "local-embeddings")]
#[async_trait]
impl Embedder for FastEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        tokio::task::spawn_blocking(move || {
            let mut model = model.blocking_lock();
            model.embed(texts, None)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Embedding task failed: {}", e)))?
        .map_err(|e| AppError::Embedding(e.to_string()))
    }

    fn dimensions(&self) -> usize {
        self.model_type.dimensions()
    }

    fn model_name(&self) -> String {
        self.model_type.to_string()
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Build the embedder for `[rag] embedding_model`.
///
/// # Errors
///
/// Returns an error for an unknown model name, or if the model cannot be
/// loaded.
pub async fn create_embedder(config: &RagConfig) -> Result<Arc<dyn Embedder>> {
    let model_type = config.embedding_model.parse::<EmbeddingModelType>()?;

    #[cfg(feature = "local-embeddings")]
    {
        let embedder = FastEmbedder::new(model_type).await?;
        tracing::info!(model = %model_type, "Loaded local embedding model");
        Ok(Arc::new(embedder))
    }

    #[cfg(not(feature = "local-embeddings"))]
    {
        tracing::warn!(
            dimensions = model_type.dimensions(),
            "Built without 'local-embeddings'; using hashing embeddings instead of {}", model_type
        );
        Ok(Arc::new(HashingEmbedder::new(model_type.dimensions())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::cosine_similarity;
    use rstest::rstest;

    #[rstest]
    #[case("sentence-transformers/all-MiniLM-L6-v2", EmbeddingModelType::AllMiniLmL6V2)]
    #[case("all-minilm-l12-v2", EmbeddingModelType::AllMiniLmL12V2)]
    #[case("BAAI/bge-small-en-v1.5", EmbeddingModelType::BgeSmallEnV15)]
    #[case("BAAI/bge-base-en-v1.5", EmbeddingModelType::BgeBaseEnV15)]
    fn test_model_type_from_str(#[case] name: &str, #[case] expected: EmbeddingModelType) {
        assert_eq!(name.parse::<EmbeddingModelType>().unwrap(), expected);
    }

    #[test]
    fn test_model_type_display_round_trips() {
        for model in [
            EmbeddingModelType::AllMiniLmL6V2,
            EmbeddingModelType::AllMiniLmL12V2,
            EmbeddingModelType::BgeSmallEnV15,
            EmbeddingModelType::BgeBaseEnV15,
        ] {
            assert_eq!(model.to_string().parse::<EmbeddingModelType>().unwrap(), model);
        }
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!("gpt-embeddings-9000".parse::<EmbeddingModelType>().is_err());
    }

    #[test]
    fn test_hashing_is_deterministic_and_normalized() {
        let embedder = HashingEmbedder::new(384);
        let a = embedder.embed_one("Amazon Prime logistics network");
        let b = embedder.embed_one("amazon prime LOGISTICS network");

        assert_eq!(a.len(), 384);
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hashing_ranks_lexical_overlap_higher() {
        let embedder = HashingEmbedder::new(384);
        let query = embedder.embed_one("Walmart grocery pricing");
        let related = embedder.embed_one("Walmart undercuts grocery pricing in rural markets");
        let unrelated = embedder.embed_one("Flipkart expands two-wheeler delivery fleet");

        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[test]
    fn test_hashing_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(16);
        assert!(embedder.embed_one("  ").iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_create_embedder_rejects_unknown_model() {
        let config = RagConfig {
            embedding_model: "unknown/model".to_string(),
            ..RagConfig::default()
        };
        let result = create_embedder(&config).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[cfg(not(feature = "local-embeddings"))]
    #[tokio::test]
    async fn test_create_embedder_without_local_models_uses_hashing() {
        let embedder = create_embedder(&RagConfig::default()).await.unwrap();
        assert_eq!(embedder.dimensions(), 384);
        assert_eq!(embedder.model_name(), "hashing-384");
    }
}
