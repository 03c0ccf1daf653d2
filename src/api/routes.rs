use crate::AppState;
use crate::utils::config::ServerConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the CORS layer from configured origins.
///
/// A `"*"` entry allows any origin without credentials.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if server.cors_origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(origins).allow_credentials(true)
}

pub fn create_router(state: AppState) -> Router {
    // Frontends call the slash-terminated paths; axum does not redirect
    // between the two forms.
    let api_routes = Router::new()
        .route("/agents", get(crate::api::handlers::agents::list_agents))
        .route("/agents/", get(crate::api::handlers::agents::list_agents))
        .route("/agents/{agent_id}", get(crate::api::handlers::agents::get_agent))
        .route(
            "/agents/{agent_id}/tools",
            get(crate::api::handlers::agents::get_agent_tools),
        )
        .route("/chat", post(crate::api::handlers::agents::chat))
        .route("/chat/", post(crate::api::handlers::agents::chat))
        .route(
            "/chat/multi-agent",
            post(crate::api::handlers::agents::chat_multi),
        );

    Router::new()
        .route("/upload/", post(crate::api::handlers::rag::upload))
        .route("/ask/", post(crate::api::handlers::rag::ask))
        .route("/status", get(crate::api::handlers::rag::status))
        .route("/health", get(crate::api::handlers::health::health_check))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.server))
                .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes)),
        )
        .with_state(state)
}
