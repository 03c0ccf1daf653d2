use crate::{
    AppState,
    agents::{PersonaChat, personas::Persona},
    types::{
        AgentToolsResponse, AppError, ChatRequest, ChatResponse, MultiAgentRequest,
        MultiAgentResponse, Result,
    },
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<&'static Persona>> {
    Json(state.personas.personas().collect())
}

pub async fn get_agent(Path(agent_id): Path<String>) -> Result<Json<&'static Persona>> {
    PersonaChat::lookup(&agent_id).map(Json)
}

pub async fn get_agent_tools(Path(agent_id): Path<String>) -> Result<Json<AgentToolsResponse>> {
    let persona = PersonaChat::lookup(&agent_id)?;
    Ok(Json(AgentToolsResponse {
        tools: persona.tools,
    }))
}

/// Chat with a single persona.
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(payload) = payload?;
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput("Message must not be empty".into()));
    }

    let response = state
        .personas
        .respond(&payload.agent_id, &payload.message, payload.context.as_ref())
        .await?;

    Ok(Json(ChatResponse {
        response,
        agent_id: payload.agent_id,
    }))
}

/// Fan a message out to several personas at once.
pub async fn chat_multi(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MultiAgentRequest>, JsonRejection>,
) -> Result<Json<MultiAgentResponse>> {
    let Json(payload) = payload?;
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput("Message must not be empty".into()));
    }
    if payload.agent_ids.is_empty() {
        return Err(AppError::InvalidInput("At least one agent_id is required".into()));
    }

    let responses = state
        .personas
        .respond_all(&payload.agent_ids, &payload.message, payload.context.as_ref())
        .await?;

    Ok(Json(MultiAgentResponse { responses }))
}
