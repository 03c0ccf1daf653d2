use crate::llm::client::{GenerationParams, LLMClient};
use crate::types::{AppError, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Chat client for OpenAI-compatible `/chat/completions` endpoints
/// (OpenAI, Azure-style inference gateways, GitHub Models).
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
    params: GenerationParams,
}

impl OpenAIClient {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        params: GenerationParams,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: openai_client(api_key, &api_base, timeout)?,
            model,
            params,
        })
    }
}

/// Build an `async-openai` client with a request timeout on the HTTP layer.
pub(crate) fn openai_client(
    api_key: String,
    api_base: &str,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(api_base.trim_end_matches('/'));

    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Client::with_config(config).with_http_client(http))
}

/// Render a provider failure, calling out transport problems explicitly.
pub(crate) fn describe_openai_error(err: &OpenAIError) -> String {
    match err {
        OpenAIError::Reqwest(e) if e.is_timeout() => format!("request timed out: {}", e),
        OpenAIError::Reqwest(e) if e.is_connect() => format!("connection failed: {}", e),
        other => format!("request failed: {}", other),
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                    system.to_string(),
                )),
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                    prompt.to_string(),
                )),
            ])
            .temperature(self.params.temperature)
            .top_p(self.params.top_p)
            .build()
            .map_err(|e| AppError::ChatProvider(format!("Failed to build request: {}", e)))?;

        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending chat completion");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::ChatProvider(describe_openai_error(&e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::ChatProvider("No response from chat model".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
