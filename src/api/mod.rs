//! HTTP API Handlers and Routes
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Documents
//! - `POST /upload/` - Upload a PDF (multipart field `file`) and make it the active document
//! - `POST /ask/` - Ask a question about the active document (form field `question`)
//! - `GET /status` - Describe the active document
//!
//! ## Personas (`/api`)
//! - `GET /api/agents/` - List personas
//! - `GET /api/agents/{agent_id}` - Describe one persona
//! - `GET /api/agents/{agent_id}/tools` - List a persona's tools
//! - `POST /api/chat/` - Chat with one persona
//! - `POST /api/chat/multi-agent` - Ask several personas concurrently
//!
//! The list and chat routes also answer without the trailing slash.
//!
//! ## Health
//! - `GET /health` - Health check endpoint
//!
//! Errors are returned as `{"error": "<message>"}` with a matching status code.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
