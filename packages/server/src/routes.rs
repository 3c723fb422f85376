//! HTTP Transport Routes
//!
//! The hosted server's surface: health check, the streamable session
//! transport, and the legacy event-stream transport with its side-channel
//! message endpoint.
//!
//! # Token Gate
//!
//! Both `/sse` styles require a `token` query parameter carrying a
//! Fastidious bearer token (prefix `fst_`). Requests failing the gate are
//! rejected with 401 before any session or remote work happens.

use crate::session::{EventStreamGuard, SessionRegistry};
use axum::{
    extract::rejection::JsonRejection,
    extract::{Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use fastidious_mcp_core::mcp::types::{MCPRequest, MCPResponse};
use fastidious_mcp_core::{ApiConfig, McpEngine};
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};

/// Required prefix of Fastidious bearer tokens
const TOKEN_PREFIX: &str = "fst_";

/// Header carrying the streamable session identifier
const MCP_SESSION_ID: &str = "mcp-session-id";

/// Keep-alive interval for legacy event streams
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Outbound channel depth per event-stream session
const EVENT_STREAM_BUFFER: usize = 32;

/// Application state shared across all endpoints
///
/// The registry is the process's session table; the base URL is where every
/// session's engine points its Fastidious client.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub base_url: String,
}

/// Query parameters for the token-gated endpoints
#[derive(Debug, Deserialize)]
struct TokenQuery {
    #[serde(default)]
    token: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthStatus {
    status: String,
    version: String,
}

/// Create the application router with both transports mounted
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/sse",
            post(streaming_request)
                .get(open_event_stream)
                .delete(close_streaming_session),
        )
        .route("/message", post(deliver_message))
        .layer(cors_layer())
        .with_state(state)
}

/// CORS layer for browser-based MCP clients
///
/// All origins are allowed; the session-id header must be both acceptable on
/// requests and exposed on responses so clients can carry the identifier
/// across calls.
fn cors_layer() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(MCP_SESSION_ID),
            HeaderName::from_static("session-id"),
        ])
        .expose_headers([HeaderName::from_static(MCP_SESSION_ID)])
}

/// Health check endpoint
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Validate the token query parameter before any session work
fn require_token(query: &TokenQuery) -> Result<&str, Response> {
    match query.token.as_deref() {
        Some(token) if !token.is_empty() && token.starts_with(TOKEN_PREFIX) => Ok(token),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Valid token required as query parameter"})),
        )
            .into_response()),
    }
}

/// Reject an unparseable JSON-RPC body
fn bad_request(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": format!("Invalid JSON-RPC body: {}", rejection)})),
    )
        .into_response()
}

/// Handle one streamable-transport request (POST /sse)
///
/// A request carrying a known `mcp-session-id` is delegated to that
/// session's engine; anything else - no header, or an identifier this
/// process no longer knows - establishes a fresh session bound to the
/// supplied token. The session identifier always comes back in the response
/// header so the client can reuse it.
async fn streaming_request(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
    body: Result<Json<MCPRequest>, JsonRejection>,
) -> Response {
    let token = match require_token(&query) {
        Ok(token) => token.to_string(),
        Err(rejection) => return rejection,
    };

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(rejection),
    };

    let reused = headers
        .get(MCP_SESSION_ID)
        .and_then(|value| value.to_str().ok())
        .and_then(|id| {
            state
                .registry
                .lookup_streaming(id)
                .map(|engine| (id.to_string(), engine))
        });

    let (session_id, engine) = match reused {
        Some(session) => session,
        None => {
            // absent -> establishing: the engine is bound to this token for
            // the whole session; the identifier is assigned during this
            // first exchange
            let engine = Arc::new(McpEngine::new(ApiConfig::new(
                state.base_url.clone(),
                token,
            )));
            let session_id = SessionRegistry::generate_session_id();
            state.registry.register_streaming(&session_id, engine.clone());
            (session_id, engine)
        }
    };

    let mut response = match engine.handle_request(request).await {
        Some(protocol_response) => (StatusCode::OK, Json(protocol_response)).into_response(),
        // Notifications produce no body
        None => StatusCode::ACCEPTED.into_response(),
    };

    if let Ok(value) = HeaderValue::from_str(&session_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(MCP_SESSION_ID), value);
    }

    response
}

/// Tear down a streamable session (DELETE /sse)
async fn close_streaming_session(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = require_token(&query) {
        return rejection;
    }

    let session_id = headers
        .get(MCP_SESSION_ID)
        .and_then(|value| value.to_str().ok());

    match session_id {
        Some(id) if state.registry.remove_streaming(id) => {
            Json(json!({"success": true})).into_response()
        }
        Some(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Unknown session"})),
        )
            .into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing mcp-session-id header"})),
        )
            .into_response(),
    }
}

/// Open a legacy event stream (GET /sse)
///
/// Announces the side channel in an initial `endpoint` event, then forwards
/// the session's JSON-RPC responses as `message` events. The session is
/// deregistered when the stream drops, whether the client closed it or the
/// connection failed.
async fn open_event_stream(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Response {
    let token = match require_token(&query) {
        Ok(token) => token.to_string(),
        Err(rejection) => return rejection,
    };

    let engine = Arc::new(McpEngine::new(ApiConfig::new(
        state.base_url.clone(),
        token,
    )));
    let (outbound, inbound) = mpsc::channel::<MCPResponse>(EVENT_STREAM_BUFFER);
    let session_id = state.registry.open_event_stream(engine, outbound);
    let guard = EventStreamGuard::new(state.registry.clone(), session_id.clone());

    info!("📻 Event stream connected: {}", session_id);

    let endpoint =
        Event::default()
            .event("endpoint")
            .data(format!("/message?sessionId={}", session_id));

    let responses = ReceiverStream::new(inbound).map(|response| {
        Event::default()
            .event("message")
            .data(serde_json::to_string(&response).unwrap_or_default())
    });

    let events = stream::once(async move { endpoint })
        .chain(responses)
        .map(Ok::<Event, Infallible>);

    Sse::new(SessionScopedStream::new(events, guard))
        .keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
        .into_response()
}

/// Deliver a protocol message to the newest event-stream session
/// (POST /message)
///
/// The legacy side channel carries no session identifier, so routing is
/// most-recent-wins. The JSON-RPC response travels back over the event
/// stream; this endpoint only acknowledges receipt.
async fn deliver_message(
    State(state): State<AppState>,
    body: Result<Json<MCPRequest>, JsonRejection>,
) -> Response {
    let Some(session) = state.registry.latest_event_stream() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No active SSE session"})),
        )
            .into_response();
    };

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(rejection),
    };

    if let Some(response) = session.engine.handle_request(request).await {
        // The stream's response headers went out when it opened, so a
        // failure here cannot become an HTTP status - log and move on
        if session.outbound.send(response).await.is_err() {
            warn!(
                "📻 Dropped response for closed event-stream session {}",
                session.id
            );
        }
    }

    (StatusCode::ACCEPTED, Json(json!({"status": "accepted"}))).into_response()
}

/// Event stream that deregisters its session when dropped
struct SessionScopedStream<S> {
    inner: Pin<Box<S>>,
    _guard: EventStreamGuard,
}

impl<S> SessionScopedStream<S> {
    fn new(inner: S, guard: EventStreamGuard) -> Self {
        Self {
            inner: Box::pin(inner),
            _guard: guard,
        }
    }
}

impl<S: Stream> Stream for SessionScopedStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.as_mut().poll_next(cx)
    }
}
