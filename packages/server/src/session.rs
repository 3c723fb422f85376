//! Session Registry
//!
//! The only shared mutable state in the hosted server: two independent
//! session tables, one per transport style, mutated only on connect,
//! disconnect, and lookup.
//!
//! # Session Model
//!
//! - **Streaming sessions** are keyed by a server-assigned identifier that
//!   the client echoes back in the `mcp-session-id` header. At most one
//!   engine is bound to an identifier at any time, and the bearer token an
//!   engine was created with never changes for the session's lifetime.
//! - **Legacy event-stream sessions** are keyed by connection. The side
//!   channel (`POST /message`) carries no session identifier, so inbound
//!   messages are routed to the most recently opened session. That is a
//!   deliberate single-active-client compromise inherited from the HTTP+SSE
//!   transport, not a bug to fix here.

use chrono::Utc;
use fastidious_mcp_core::mcp::types::MCPResponse;
use fastidious_mcp_core::McpEngine;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// One open legacy event-stream session
#[derive(Clone)]
pub struct EventStreamSession {
    /// Locally generated identifier, unique only within this process's table
    pub id: String,
    /// Protocol engine bound to the token supplied when the stream opened
    pub engine: Arc<McpEngine>,
    /// Outbound channel feeding the SSE response stream
    pub outbound: mpsc::Sender<MCPResponse>,
}

/// Per-process registry of live sessions for both transport styles
///
/// Owned by the server process and passed to handlers, so tests can exercise
/// transports against their own registry instance.
#[derive(Default)]
pub struct SessionRegistry {
    /// Streaming sessions: session identifier -> engine
    streaming: Mutex<HashMap<String, Arc<McpEngine>>>,
    /// Legacy event-stream sessions, oldest first
    event_streams: Mutex<Vec<EventStreamSession>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint an identifier for a new streaming session
    pub fn generate_session_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Look up the engine for a streaming session identifier
    pub fn lookup_streaming(&self, session_id: &str) -> Option<Arc<McpEngine>> {
        self.streaming.lock().unwrap().get(session_id).cloned()
    }

    /// Register a streaming session once its identifier is known
    pub fn register_streaming(&self, session_id: &str, engine: Arc<McpEngine>) {
        info!("🔑 Streaming session established: {}", session_id);
        self.streaming
            .lock()
            .unwrap()
            .insert(session_id.to_string(), engine);
    }

    /// Tear down a streaming session; returns whether it existed
    pub fn remove_streaming(&self, session_id: &str) -> bool {
        let removed = self.streaming.lock().unwrap().remove(session_id).is_some();
        if removed {
            info!("🔒 Streaming session closed: {}", session_id);
        }
        removed
    }

    /// Number of live streaming sessions
    pub fn streaming_count(&self) -> usize {
        self.streaming.lock().unwrap().len()
    }

    /// Open a legacy event-stream session and return its identifier
    ///
    /// The identifier is a millisecond timestamp plus a random suffix - not
    /// collision-proof, which is acceptable under the single-active-client
    /// assumption of the legacy transport.
    pub fn open_event_stream(
        &self,
        engine: Arc<McpEngine>,
        outbound: mpsc::Sender<MCPResponse>,
    ) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        let id = format!("{}-{}", Utc::now().timestamp_millis(), suffix);

        info!("📻 Event-stream session opened: {}", id);
        self.event_streams.lock().unwrap().push(EventStreamSession {
            id: id.clone(),
            engine,
            outbound,
        });
        id
    }

    /// The most recently opened event-stream session, if any
    ///
    /// This is the routing rule for `POST /message`: the side channel carries
    /// no session identifier, so the newest session wins.
    pub fn latest_event_stream(&self) -> Option<EventStreamSession> {
        self.event_streams.lock().unwrap().last().cloned()
    }

    /// Deregister an event-stream session after its stream closes
    pub fn close_event_stream(&self, session_id: &str) {
        let mut streams = self.event_streams.lock().unwrap();
        let before = streams.len();
        streams.retain(|session| session.id != session_id);
        if streams.len() != before {
            info!("📻 Event-stream session closed: {}", session_id);
        } else {
            debug!("Event-stream session {} already gone", session_id);
        }
    }

    /// Number of open event-stream sessions
    pub fn event_stream_count(&self) -> usize {
        self.event_streams.lock().unwrap().len()
    }
}

/// Deregisters an event-stream session when its SSE response stream drops
///
/// Client disconnects surface as the response stream being dropped, so tying
/// deregistration to `Drop` covers both clean and abrupt closes.
pub struct EventStreamGuard {
    registry: Arc<SessionRegistry>,
    session_id: String,
}

impl EventStreamGuard {
    pub fn new(registry: Arc<SessionRegistry>, session_id: String) -> Self {
        Self {
            registry,
            session_id,
        }
    }
}

impl Drop for EventStreamGuard {
    fn drop(&mut self) {
        self.registry.close_event_stream(&self.session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastidious_mcp_core::ApiConfig;

    fn engine() -> Arc<McpEngine> {
        Arc::new(McpEngine::new(ApiConfig::new(
            "http://127.0.0.1:9",
            "fst_test",
        )))
    }

    #[test]
    fn test_streaming_register_and_lookup_identity() {
        let registry = SessionRegistry::new();
        let engine = engine();
        registry.register_streaming("s1", engine.clone());

        // Two lookups resolve to the identical engine instance
        let first = registry.lookup_streaming("s1").unwrap();
        let second = registry.lookup_streaming("s1").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &engine));
    }

    #[test]
    fn test_streaming_remove() {
        let registry = SessionRegistry::new();
        registry.register_streaming("s1", engine());

        assert!(registry.remove_streaming("s1"));
        assert!(registry.lookup_streaming("s1").is_none());
        // Second removal is a no-op
        assert!(!registry.remove_streaming("s1"));
    }

    #[test]
    fn test_one_engine_per_session_id() {
        let registry = SessionRegistry::new();
        let first = engine();
        let second = engine();

        registry.register_streaming("s1", first);
        registry.register_streaming("s1", second.clone());

        // Re-registration replaces; there is never more than one engine
        assert_eq!(registry.streaming_count(), 1);
        assert!(Arc::ptr_eq(
            &registry.lookup_streaming("s1").unwrap(),
            &second
        ));
    }

    #[tokio::test]
    async fn test_latest_event_stream_wins() {
        let registry = SessionRegistry::new();
        let (tx_a, _rx_a) = mpsc::channel(1);
        let (tx_b, _rx_b) = mpsc::channel(1);

        let a = registry.open_event_stream(engine(), tx_a);
        let b = registry.open_event_stream(engine(), tx_b);
        assert_ne!(a, b);

        assert_eq!(registry.latest_event_stream().unwrap().id, b);

        // Closing the newest falls back to the older stream
        registry.close_event_stream(&b);
        assert_eq!(registry.latest_event_stream().unwrap().id, a);

        registry.close_event_stream(&a);
        assert!(registry.latest_event_stream().is_none());
    }

    #[tokio::test]
    async fn test_keyspaces_are_independent() {
        let registry = SessionRegistry::new();
        let (tx, _rx) = mpsc::channel(1);

        let stream_id = registry.open_event_stream(engine(), tx);
        registry.register_streaming("s1", engine());

        // An event-stream id never resolves in the streaming table and
        // vice versa
        assert!(registry.lookup_streaming(&stream_id).is_none());
        assert_eq!(registry.event_stream_count(), 1);
        assert_eq!(registry.streaming_count(), 1);

        registry.close_event_stream("s1");
        assert_eq!(registry.event_stream_count(), 1);
    }

    #[tokio::test]
    async fn test_guard_deregisters_on_drop() {
        let registry = Arc::new(SessionRegistry::new());
        let (tx, _rx) = mpsc::channel(1);
        let id = registry.open_event_stream(engine(), tx);

        {
            let _guard = EventStreamGuard::new(registry.clone(), id.clone());
        }

        assert_eq!(registry.event_stream_count(), 0);
    }
}
