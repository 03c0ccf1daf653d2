//! LLM Provider Clients
//!
//! [`LLMClient`] is the seam between the answering/persona code and the hosted
//! chat-completion model. [`OpenAIClient`] speaks the OpenAI-compatible wire
//! format, which covers OpenAI itself and the GitHub Models inference gateway.
//!
//! # Example
//!
//! ```ignore
//! use ragdoc::llm::{GenerationParams, LLMClient, OpenAIClient};
//! use std::time::Duration;
//!
//! let client = OpenAIClient::new(
//!     api_key,
//!     "https://models.github.ai/inference".to_string(),
//!     "openai/gpt-4.1".to_string(),
//!     GenerationParams::default(),
//!     Duration::from_secs(120),
//! )?;
//! let text = client.generate_with_system("You are a helpful assistant.", "Hi").await?;
//! ```

/// Core LLM client trait and generation parameters.
pub mod client;
/// OpenAI-compatible chat completion client.
pub mod openai;

pub use client::{GenerationParams, LLMClient};
pub use openai::OpenAIClient;
