use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// Client for OpenAI-compatible chat completion endpoints
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content(system.trim())
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build request: {}", e)))?;
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(user.trim())
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build request: {}", e)))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(temperature)
            .messages(vec![system_message.into(), user_message.into()])
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build request: {}", e)))?;

        debug!(model = %self.model, temperature, "Sending chat completion");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::LLM(format!("OpenAI API error: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::LLM("No response from OpenAI".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
