//! HTTP transport for the MCP handler

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, Method, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::mcp::{McpHandler, McpManifest, McpResponse, ToolRegistry};

/// Plaintext answer for non-POST probes of the RPC path
pub const MCP_GET_SENTINEL: &str = "OK. This is an MCP JSON-RPC endpoint. Use POST.";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    handler: Arc<McpHandler>,
    manifest: Arc<McpManifest>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);
        let manifest = McpManifest::new(&config.server_name, &config.description, &registry);
        let handler = McpHandler::new(
            registry,
            config.server_name.clone(),
            config.server_version.clone(),
        );

        Self {
            handler: Arc::new(handler),
            manifest: Arc::new(manifest),
            config: Arc::new(config),
        }
    }
}

/// MCP HTTP server
pub struct McpHttpServer {
    state: AppState,
    addr: SocketAddr,
}

impl McpHttpServer {
    pub fn new(config: ServerConfig, registry: ToolRegistry) -> Self {
        let addr = config.bind_addr;
        Self {
            state: AppState::new(config, registry),
            addr,
        }
    }

    /// Build the router
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(home_handler))
            .route("/health", get(health_handler))
            .route("/privacy", get(privacy_handler))
            .route("/terms", get(terms_handler))
            .route("/.well-known/openai-apps-challenge", get(challenge_handler))
            .route("/.well-known/mcp.json", get(manifest_handler))
            .route(
                "/mcp",
                get(mcp_get_handler)
                    .head(mcp_head_handler)
                    .post(mcp_post_handler),
            )
            .layer(cors_layer())
            .layer(map_response(options_no_content))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let app = Self::router(self.state);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("MCP HTTP server listening on {}", listener.local_addr()?);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Any origin, no credentials, the four verbs the RPC path answers.
///
/// The layer answers every OPTIONS request itself, body ignored.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS, Method::HEAD])
        .allow_headers(Any)
}

/// OPTIONS answers are empty, so report them as 204
async fn options_no_content(method: Method, mut response: Response) -> Response {
    if method == Method::OPTIONS && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

fn plain_text(body: String) -> Response {
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

async fn home_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "name": state.config.server_name, "ok": true }))
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn privacy_handler(State(state): State<AppState>) -> Response {
    plain_text(state.config.privacy_text.clone())
}

async fn terms_handler(State(state): State<AppState>) -> Response {
    plain_text(state.config.terms_text.clone())
}

async fn challenge_handler(State(state): State<AppState>) -> Response {
    match &state.config.verification_token {
        Some(token) => plain_text(token.clone()),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn manifest_handler(State(state): State<AppState>) -> Json<McpManifest> {
    Json(state.manifest.as_ref().clone())
}

async fn mcp_get_handler() -> Response {
    plain_text(MCP_GET_SENTINEL.to_string())
}

async fn mcp_head_handler() -> StatusCode {
    StatusCode::OK
}

/// JSON-RPC over POST. Always 200; protocol errors travel in the body.
async fn mcp_post_handler(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Json<McpResponse> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "could not read request body");
            Bytes::new()
        }
    };

    Json(state.handler.handle_body(&body).await)
}
