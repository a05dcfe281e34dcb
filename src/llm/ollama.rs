use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
    models::ModelOptions,
};

const DEFAULT_OLLAMA_PORT: u16 = 11434;

pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: String) -> Result<Self> {
        Ok(Self {
            client: Ollama::from_url(ollama_url(base_url)?),
            model,
        })
    }
}

/// Parse the server URL. A plain `http://host` gets Ollama's port; any other
/// scheme keeps its known default.
fn ollama_url(base_url: &str) -> Result<reqwest::Url> {
    let invalid = |reason: String| {
        AppError::Configuration(format!("Invalid Ollama URL '{}': {}", base_url, reason))
    };

    let mut url = reqwest::Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if url.host_str().is_none() {
        return Err(invalid("no host".to_string()));
    }

    if url.port().is_none() && url.scheme() == "http" {
        url.set_port(Some(DEFAULT_OLLAMA_PORT))
            .map_err(|_| invalid("cannot carry a port".to_string()))?;
    }
    Ok(url)
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        let messages = vec![
            ChatMessage::system(system.trim().to_string()),
            ChatMessage::user(user.trim().to_string()),
        ];

        let request = ChatMessageRequest::new(self.model.clone(), messages)
            .options(ModelOptions::default().temperature(temperature));

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::LLM(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
