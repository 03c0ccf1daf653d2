//! Persona chat.
//!
//! Routes a user message to one of the fixed [`personas`] and forwards it to
//! the chat model together with the persona's system prompt and guidance.

pub mod personas;

use crate::llm::LLMClient;
use crate::types::{AppError, Result};
use futures::future::try_join_all;
use personas::Persona;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Render the optional caller-supplied context for the prompt.
fn render_context(context: Option<&Value>) -> String {
    match context {
        None | Some(Value::Null) => "No additional context provided".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Build the user message sent on behalf of `persona`.
pub fn build_message(persona: &Persona, message: &str, context: Option<&Value>) -> String {
    format!(
        "Context: {}\nUser Query: {}\n\n{}\n",
        render_context(context),
        message,
        persona.guidance
    )
}

/// Chat front end over the persona table.
#[derive(Clone)]
pub struct PersonaChat {
    llm: Arc<dyn LLMClient>,
}

impl PersonaChat {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    pub fn personas(&self) -> impl Iterator<Item = &'static Persona> {
        personas::ALL.into_iter()
    }

    /// Resolve a persona by id.
    pub fn lookup(agent_id: &str) -> Result<&'static Persona> {
        personas::find(agent_id)
            .ok_or_else(|| AppError::NotFound(format!("Unknown agent '{}'", agent_id)))
    }

    /// Ask a single persona.
    pub async fn respond(
        &self,
        agent_id: &str,
        message: &str,
        context: Option<&Value>,
    ) -> Result<String> {
        let persona = Self::lookup(agent_id)?;
        let prompt = build_message(persona, message, context);
        let response = self
            .llm
            .generate_with_system(persona.system_prompt, &prompt)
            .await?;

        info!(agent_id = persona.id, model = %self.llm.model_name(), "Persona responded");
        Ok(response.trim().to_string())
    }

    /// Ask several personas concurrently. Any failure fails the whole request.
    pub async fn respond_all(
        &self,
        agent_ids: &[String],
        message: &str,
        context: Option<&Value>,
    ) -> Result<HashMap<String, String>> {
        // Resolve every id up front so an unknown one costs no provider calls.
        for id in agent_ids {
            Self::lookup(id)?;
        }

        let responses = try_join_all(agent_ids.iter().map(|id| async move {
            let text = self.respond(id, message, context).await?;
            Ok::<_, AppError>((id.clone(), text))
        }))
        .await?;

        Ok(responses.into_iter().collect())
    }
}
