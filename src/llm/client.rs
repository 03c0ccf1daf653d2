//! LLM client abstraction
//!
//! The Chat/Completion Provider is a leaf collaborator: given system
//! instructions and a user message, it returns generated text. Concrete
//! providers implement [`LLMClient`]; tests substitute mocks.

use crate::types::Result;
use async_trait::async_trait;

/// Sampling parameters applied to every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
        }
    }
}

/// Generic LLM client trait for provider abstraction
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion for `prompt` under the `system` instruction.
    ///
    /// Failures surface as [`AppError::ChatProvider`](crate::types::AppError::ChatProvider);
    /// no retries happen inside the client.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}
