//! API request handlers.

/// Persona listing and chat handlers.
pub mod agents;
/// Liveness endpoint.
pub mod health;
/// Document upload, question answering and status handlers.
pub mod rag;
