//! `config` command: effective configuration and warnings

use super::output::Output;
use crate::utils::toml_config::{
    ConfigWarning, LlmProviderKind, RivalConfig, SearchProviderKind,
};

/// Describe a secret without revealing it
pub fn secret_status(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "set",
        _ => "unset",
    }
}

/// Print every section of the effective configuration
pub fn print_config(config: &RivalConfig, output: &Output) {
    output.header("Effective configuration");

    output.subheader("[server]");
    output.kv("address", &config.server.address());
    output.kv("log_level", &config.server.log_level);
    output.kv("log_format", &format!("{:?}", config.server.log_format).to_lowercase());
    output.kv("body_limit_bytes", &config.server.body_limit_bytes.to_string());

    output.subheader("[search]");
    match config.search.provider {
        SearchProviderKind::Tavily => {
            output.kv("provider", "tavily");
            output.kv("base_url", &config.search.base_url);
            output.kv(
                &config.search.api_key_env,
                secret_status(config.search_api_key().as_deref()),
            );
        }
        SearchProviderKind::DuckDuckGo => output.kv("provider", "duckduckgo"),
    }
    output.kv("timeout_secs", &config.search.timeout_secs.to_string());

    output.subheader("[llm]");
    output.kv("model", &config.llm.model);
    match config.llm.provider {
        LlmProviderKind::OpenAI => {
            output.kv("provider", "openai");
            output.kv("api_base", &config.llm.api_base);
            output.kv(
                &config.llm.api_key_env,
                secret_status(config.llm_api_key().as_deref()),
            );
        }
        LlmProviderKind::Ollama => {
            output.kv("provider", "ollama");
            output.kv("ollama_url", &config.llm.ollama_url);
        }
    }

    output.subheader("[rag]");
    output.kv("enabled", &config.rag.enabled.to_string());
    output.kv("embedding_model", &config.rag.embedding_model);
    output.kv(
        "persist_dir",
        config.rag.persist_dir.as_deref().unwrap_or("(in memory)"),
    );
    output.kv("collection", &config.rag.collection);
    output.kv(
        "chunking",
        &format!(
            "{} chars, {} overlap",
            config.rag.chunk_size, config.rag.chunk_overlap
        ),
    );

    output.subheader("[pipeline]");
    output.kv("search_suffix", &config.pipeline.search_suffix);
    output.kv(
        "max_search_results",
        &config.pipeline.max_search_results.to_string(),
    );
    output.kv("retrieve_k", &config.pipeline.retrieve_k.to_string());
    output.kv(
        "temperatures",
        &format!(
            "summarize {}, draft {}",
            config.pipeline.summarize_temperature, config.pipeline.draft_temperature
        ),
    );
    output.kv(
        "error_policy",
        &format!("{:?}", config.pipeline.error_policy),
    );
}

/// Print validation warnings, returning how many there were
pub fn print_warnings(warnings: &[ConfigWarning], output: &Output) -> usize {
    if warnings.is_empty() {
        output.success("Configuration is valid");
    } else {
        output.success("Configuration is valid, with warnings:");
        for warning in warnings {
            output.warning(&warning.message);
        }
    }
    warnings.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_status_never_echoes_value() {
        assert_eq!(secret_status(Some("gsk_live_123")), "set");
        assert_eq!(secret_status(Some("")), "unset");
        assert_eq!(secret_status(None), "unset");
    }

    #[test]
    fn test_print_config_for_each_provider() {
        let output = Output::no_color();
        let mut config = RivalConfig::default();
        print_config(&config, &output);

        config.search.provider = SearchProviderKind::DuckDuckGo;
        config.llm.provider = LlmProviderKind::Ollama;
        config.rag.persist_dir = None;
        print_config(&config, &output);
    }

    #[test]
    fn test_print_warnings_counts() {
        let output = Output::no_color();
        let mut config = RivalConfig::default();
        config.rag.enabled = false;
        let warnings = config.validate_with_warnings().unwrap();

        assert_eq!(print_warnings(&warnings, &output), warnings.len());
        assert!(!warnings.is_empty());
        assert_eq!(print_warnings(&[], &output), 0);
    }
}
