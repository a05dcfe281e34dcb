use crate::types::{AppError, Result};
use text_splitter::{ChunkConfig, TextSplitter};

/// Character-bounded splitter with overlap between consecutive chunks.
///
/// Splits on the largest semantic unit that fits (paragraphs, sentences,
/// words) so chunks rarely cut through a word.
pub struct TextChunker {
    splitter: TextSplitter<text_splitter::Characters>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// # Errors
    ///
    /// Returns an error if `chunk_overlap` is not smaller than `chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .map_err(|e| AppError::Configuration(format!("Invalid chunk settings: {}", e)))?;

        Ok(Self {
            splitter: TextSplitter::new(config),
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split `text` into chunks of at most `chunk_size` characters.
    ///
    /// Empty or whitespace-only text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.splitter.chunks(text).map(str::to_string).collect()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}
