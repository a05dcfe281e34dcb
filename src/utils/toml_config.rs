//! TOML-based configuration for rival
//!
//! Infrastructure and pipeline settings live in `rival.toml`. Secrets are never
//! written to the file: the config names the environment variable that holds
//! each API key, and the value is resolved at client construction time.
//!
//! Loading order:
//! 1. `.env` (first match next to the config file, its parent, or the working dir)
//! 2. `rival.toml` if present, built-in defaults otherwise
//! 3. Environment overrides (`EMBED_MODEL`, `CHROMA_DIR`, `MODEL_NAME`, `HOST`, `PORT`, `RIVAL_LOG`)
//!
//! The configuration is read once at process start and shared as `Arc<RivalConfig>`.

use crate::pipeline::ErrorPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Root configuration structure loaded from rival.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RivalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub rag: RagConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Maximum accepted request body size
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ============= Search Configuration =============

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProviderKind {
    #[default]
    Tavily,
    DuckDuckGo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub provider: SearchProviderKind,

    /// Environment variable containing the Tavily API key
    #[serde(default = "default_search_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_tavily_url")]
    pub base_url: String,

    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

fn default_search_key_env() -> String {
    "TAVILY_API_KEY".to_string()
}

fn default_tavily_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_search_timeout() -> u64 {
    30
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: SearchProviderKind::default(),
            api_key_env: default_search_key_env(),
            base_url: default_tavily_url(),
            timeout_secs: default_search_timeout(),
        }
    }
}

// ============= LLM Configuration =============

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    /// Any OpenAI-compatible chat completions endpoint (Groq by default)
    #[default]
    OpenAI,
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProviderKind,

    /// Environment variable containing the API key
    #[serde(default = "default_llm_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_llm_api_base")]
    pub api_base: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
}

fn default_llm_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_llm_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::default(),
            api_key_env: default_llm_key_env(),
            api_base: default_llm_api_base(),
            model: default_llm_model(),
            ollama_url: default_ollama_url(),
        }
    }
}

// ============= RAG Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// When false the pipeline runs without a vector store
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Directory for persisted vectors; `None` keeps them in memory
    #[serde(default = "default_persist_dir")]
    pub persist_dir: Option<String>,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_true() -> bool {
    true
}

fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_persist_dir() -> Option<String> {
    Some("./data/vectors".to_string())
}

fn default_collection() -> String {
    "research_notes".to_string()
}

fn default_chunk_size() -> usize {
    800
}

fn default_chunk_overlap() -> usize {
    120
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            embedding_model: default_embedding_model(),
            persist_dir: default_persist_dir(),
            collection: default_collection(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

// ============= Pipeline Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Appended to the topic to form the search query
    #[serde(default = "default_search_suffix")]
    pub search_suffix: String,

    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,

    #[serde(default = "default_retrieve_k")]
    pub retrieve_k: usize,

    #[serde(default)]
    pub summarize_temperature: f32,

    #[serde(default = "default_draft_temperature")]
    pub draft_temperature: f32,

    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

fn default_search_suffix() -> String {
    "ecommerce competitor analysis".to_string()
}

fn default_max_search_results() -> usize {
    6
}

fn default_retrieve_k() -> usize {
    8
}

fn default_draft_temperature() -> f32 {
    0.1
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_suffix: default_search_suffix(),
            max_search_results: default_max_search_results(),
            retrieve_k: default_retrieve_k(),
            summarize_temperature: 0.0,
            draft_temperature: default_draft_temperature(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Configuration warnings that don't prevent operation but may indicate issues
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarningKind {
    MissingApiKey,
    InMemoryStore,
    StoreDisabled,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' has an invalid value: {1}")]
    InvalidEnvOverride(String, String),
}

impl RivalConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist, then apply environment overrides and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            info!("Loaded configuration from {:?}", path);
            Self::from_toml_str(&content)?
        } else {
            info!("No configuration file at {:?}, using defaults", path);
            Self::default()
        };

        config.apply_overrides_from(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply the well-known environment overrides using `lookup` to resolve
    /// variable names.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("EMBED_MODEL") {
            self.rag.embedding_model = model;
        }
        if let Some(dir) = lookup("CHROMA_DIR") {
            self.rag.persist_dir = Some(dir);
        }
        if let Some(model) = lookup("MODEL_NAME") {
            self.llm.model = model;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnvOverride("PORT".to_string(), port))?;
        }
        if let Some(level) = lookup("RIVAL_LOG") {
            self.server.log_level = level;
        }
        Ok(())
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.rag.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "rag.chunk_size must be greater than zero".to_string(),
            ));
        }

        if self.rag.chunk_overlap >= self.rag.chunk_size {
            return Err(ConfigError::ValidationError(format!(
                "rag.chunk_overlap ({}) must be smaller than rag.chunk_size ({})",
                self.rag.chunk_overlap, self.rag.chunk_size
            )));
        }

        if self.pipeline.retrieve_k == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.retrieve_k must be greater than zero".to_string(),
            ));
        }

        for (name, value) in [
            ("pipeline.summarize_temperature", self.pipeline.summarize_temperature),
            ("pipeline.draft_temperature", self.pipeline.draft_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be between 0.0 and 2.0, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Validate configuration and collect warnings for degraded setups
    ///
    /// Missing API keys are not fatal: the search client returns no results and
    /// the model client fails per call, which the pipeline records as advisory
    /// errors.
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        if self.search.provider == SearchProviderKind::Tavily
            && self.resolve_env(&self.search.api_key_env).is_none()
        {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::MissingApiKey,
                message: format!(
                    "Search API key variable '{}' is not set; searches will return no results",
                    self.search.api_key_env
                ),
            });
        }

        if self.llm.provider == LlmProviderKind::OpenAI
            && self.resolve_env(&self.llm.api_key_env).is_none()
        {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::MissingApiKey,
                message: format!(
                    "LLM API key variable '{}' is not set; model calls will fail",
                    self.llm.api_key_env
                ),
            });
        }

        if !self.rag.enabled {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::StoreDisabled,
                message: "RAG store is disabled; every run will report 'RAG store not available'"
                    .to_string(),
            });
        } else if self.rag.persist_dir.is_none() {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::InMemoryStore,
                message: "rag.persist_dir is unset; indexed notes are lost on restart".to_string(),
            });
        }

        Ok(warnings)
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.is_empty())
    }

    /// Search provider API key, if set
    pub fn search_api_key(&self) -> Option<String> {
        self.resolve_env(&self.search.api_key_env)
    }

    /// LLM provider API key, if set
    pub fn llm_api_key(&self) -> Option<String> {
        self.resolve_env(&self.llm.api_key_env)
    }
}

/// Load the first `.env` file found near the configuration file.
///
/// Candidates, in order: the config directory's parent, the config directory,
/// then the working directory. Returns the path that was loaded.
pub fn load_dotenv(config_path: &Path) -> Option<PathBuf> {
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut candidates = Vec::new();
    if let Some(parent) = config_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        candidates.push(parent.join(".env"));
    }
    candidates.push(config_dir.join(".env"));
    candidates.push(PathBuf::from(".env"));

    for candidate in candidates {
        if candidate.exists() {
            match dotenvy::from_path(&candidate) {
                Ok(()) => {
                    debug!("Loaded environment from {:?}", candidate);
                    return Some(candidate);
                }
                Err(e) => warn!("Failed to load {:?}: {}", candidate, e),
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 9000
log_level = "debug"
log_format = "json"

[search]
provider = "duckduckgo"

[llm]
provider = "ollama"
model = "llama3.2"

[rag]
embedding_model = "BAAI/bge-small-en-v1.5"
chunk_size = 500
chunk_overlap = 50

[pipeline]
max_search_results = 3
error_policy = "first_wins"
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = RivalConfig::from_toml_str(&create_test_config()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.search.provider, SearchProviderKind::DuckDuckGo);
        assert_eq!(config.llm.provider, LlmProviderKind::Ollama);
        assert_eq!(config.rag.chunk_size, 500);
        assert_eq!(config.pipeline.max_search_results, 3);
        assert_eq!(config.pipeline.error_policy, ErrorPolicy::FirstWins);
        // Unspecified values keep their defaults
        assert_eq!(config.pipeline.retrieve_k, 8);
        assert_eq!(config.rag.collection, "research_notes");
    }

    #[test]
    fn test_defaults() {
        let config = RivalConfig::from_toml_str("").unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.search.api_key_env, "TAVILY_API_KEY");
        assert_eq!(config.llm.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(
            config.rag.embedding_model,
            "sentence-transformers/all-MiniLM-L6-v2"
        );
        assert_eq!(config.rag.chunk_size, 800);
        assert_eq!(config.rag.chunk_overlap, 120);
        assert_eq!(config.pipeline.max_search_results, 6);
        assert_eq!(config.pipeline.summarize_temperature, 0.0);
        assert_eq!(config.pipeline.draft_temperature, 0.1);
        assert_eq!(config.pipeline.error_policy, ErrorPolicy::LastWins);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("EMBED_MODEL", "BAAI/bge-base-en-v1.5"),
            ("CHROMA_DIR", "/tmp/vectors"),
            ("MODEL_NAME", "mixtral-8x7b"),
            ("PORT", "8123"),
        ]
        .into_iter()
        .collect();

        let mut config = RivalConfig::default();
        config
            .apply_overrides_from(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.rag.embedding_model, "BAAI/bge-base-en-v1.5");
        assert_eq!(config.rag.persist_dir.as_deref(), Some("/tmp/vectors"));
        assert_eq!(config.llm.model, "mixtral-8x7b");
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = RivalConfig::default();
        let result = config.apply_overrides_from(|name| {
            (name == "PORT").then(|| "not-a-port".to_string())
        });

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvOverride(ref var, _)) if var == "PORT"
        ));
    }

    #[test]
    fn test_validation_overlap_must_be_smaller_than_chunk() {
        let mut config = RivalConfig::default();
        config.rag.chunk_overlap = 800;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chunk_overlap"));
    }

    #[test]
    fn test_validation_temperature_range() {
        let mut config = RivalConfig::default();
        config.pipeline.draft_temperature = 3.5;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_warnings_for_disabled_store() {
        let mut config = RivalConfig::default();
        config.search.provider = SearchProviderKind::DuckDuckGo;
        config.llm.provider = LlmProviderKind::Ollama;
        config.rag.enabled = false;

        let warnings = config.validate_with_warnings().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ConfigWarningKind::StoreDisabled);
    }

    #[test]
    fn test_warn_on_missing_api_keys() {
        let mut config = RivalConfig::default();
        config.search.api_key_env = "RIVAL_TEST_UNSET_SEARCH_KEY".to_string();
        config.llm.api_key_env = "RIVAL_TEST_UNSET_LLM_KEY".to_string();

        let warnings = config.validate_with_warnings().unwrap();
        let missing = warnings
            .iter()
            .filter(|w| w.kind == ConfigWarningKind::MissingApiKey)
            .count();
        assert_eq!(missing, 2);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RivalConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.rag.chunk_size, 800);
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rival.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        assert!(matches!(
            RivalConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_dotenv_prefers_config_dir_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("backend");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(dir.path().join(".env"), "RIVAL_TEST_DOTENV_A=parent\n").unwrap();
        fs::write(config_dir.join(".env"), "RIVAL_TEST_DOTENV_A=local\n").unwrap();

        let loaded = load_dotenv(&config_dir.join("rival.toml"));
        assert_eq!(loaded, Some(dir.path().join(".env")));
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let example = RivalConfig::from_toml_str(include_str!("../../rival.toml.example")).unwrap();
        let defaults = RivalConfig::default();

        assert_eq!(example.server.address(), defaults.server.address());
        assert_eq!(example.search.provider, defaults.search.provider);
        assert_eq!(example.llm.provider, defaults.llm.provider);
        assert_eq!(example.llm.model, defaults.llm.model);
        assert_eq!(example.rag.persist_dir, defaults.rag.persist_dir);
        assert_eq!(example.rag.chunk_size, defaults.rag.chunk_size);
        assert_eq!(example.rag.chunk_overlap, defaults.rag.chunk_overlap);
        assert_eq!(example.pipeline.retrieve_k, defaults.pipeline.retrieve_k);
        assert_eq!(example.pipeline.error_policy, defaults.pipeline.error_policy);
        example.validate().unwrap();
    }
}
