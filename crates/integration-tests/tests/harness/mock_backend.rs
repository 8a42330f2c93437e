//! Mock LLM backend server for integration tests
//!
//! Serves canned responses on the wire routes of every supported
//! backend (OpenAI-compatible, Anthropic, Ollama) so a single server can
//! stand in for whichever provider a test selects.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

const DEFAULT_RESPONSE: &str = "Hello from the mock backend";

/// Mock backend that returns predictable responses
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    chat_count: AtomicU32,
    messages_count: AtomicU32,
    ollama_chat_count: AtomicU32,
    /// Body of the most recent POST, whichever route it hit
    last_request: Mutex<Option<Value>>,
    /// Custom response text (if set)
    response_text: Option<String>,
    /// Tool call arguments to return instead of text (if set)
    tool_arguments: Option<String>,
    /// Artificial latency applied to every route (if set)
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockOptions {
    response_text: Option<String>,
    tool_arguments: Option<String>,
    delay: Option<Duration>,
}

impl MockBackend {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(MockOptions::default()).await
    }

    /// Start a mock server with custom response text
    pub async fn start_with_response(text: &str) -> anyhow::Result<Self> {
        Self::start_inner(MockOptions {
            response_text: Some(text.to_owned()),
            ..MockOptions::default()
        })
        .await
    }

    /// Start a mock server whose chat route answers with a tool call
    ///
    /// The raw `arguments` string is returned verbatim, so tests can
    /// serve deliberately malformed JSON.
    pub async fn start_with_tool_call(arguments: &str) -> anyhow::Result<Self> {
        Self::start_inner(MockOptions {
            tool_arguments: Some(arguments.to_owned()),
            ..MockOptions::default()
        })
        .await
    }

    /// Start a mock server that delays every response
    pub async fn start_with_delay(delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(MockOptions {
            delay: Some(delay),
            ..MockOptions::default()
        })
        .await
    }

    async fn start_inner(options: MockOptions) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            chat_count: AtomicU32::new(0),
            messages_count: AtomicU32::new(0),
            ollama_chat_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
            response_text: options.response_text,
            tool_arguments: options.tool_arguments,
            delay: options.delay,
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/v1/models", routing::get(handle_models))
            .route("/v1/embeddings", routing::post(handle_embeddings))
            .route("/v1/messages", routing::post(handle_messages))
            .route("/api/chat", routing::post(handle_ollama_chat))
            .route("/api/tags", routing::get(handle_ollama_tags))
            .route("/api/embeddings", routing::post(handle_ollama_embeddings))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for the OpenAI and Anthropic providers
    ///
    /// Includes `/v1` since those providers append paths like
    /// `/chat/completions` and `/messages`.
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Host URL for the Ollama provider, which appends `/api/...` itself
    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of OpenAI chat completion requests received
    pub fn chat_count(&self) -> u32 {
        self.state.chat_count.load(Ordering::Relaxed)
    }

    /// Number of Anthropic messages requests received
    pub fn messages_count(&self) -> u32 {
        self.state.messages_count.load(Ordering::Relaxed)
    }

    /// Number of Ollama chat requests received
    pub fn ollama_chat_count(&self) -> u32 {
        self.state.ollama_chat_count.load(Ordering::Relaxed)
    }

    /// Body of the most recent request, if any
    pub fn last_request(&self) -> Option<Value> {
        self.state.last_request.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl MockState {
    fn text(&self) -> &str {
        self.response_text.as_deref().unwrap_or(DEFAULT_RESPONSE)
    }

    fn record(&self, body: Value) {
        *self.last_request.lock().unwrap() = Some(body);
    }

    async fn apply_delay(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

// -- Handlers --

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.apply_delay().await;
    state.chat_count.fetch_add(1, Ordering::Relaxed);
    state.record(body);

    let message = match &state.tool_arguments {
        Some(arguments) => json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_test_123",
                "type": "function",
                "function": {"name": "get_weather", "arguments": arguments}
            }]
        }),
        None => json!({"role": "assistant", "content": state.text()}),
    };

    Json(json!({
        "id": "chatcmpl-test-123",
        "object": "chat.completion",
        "created": 1_700_000_000u64,
        "model": "mock-model-1",
        "choices": [{"index": 0, "message": message, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
}

async fn handle_models(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.apply_delay().await;

    Json(json!({
        "object": "list",
        "data": [{"id": "mock-model-1", "object": "model", "created": 1_700_000_000u64, "owned_by": "mock"}]
    }))
}

async fn handle_embeddings(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.apply_delay().await;
    state.record(body);

    Json(json!({
        "object": "list",
        "data": [{"object": "embedding", "embedding": [0.1, 0.2, 0.3, 0.4, 0.5], "index": 0}],
        "model": "text-embedding-ada-002",
        "usage": {"prompt_tokens": 8, "total_tokens": 8}
    }))
}

async fn handle_messages(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.apply_delay().await;
    state.messages_count.fetch_add(1, Ordering::Relaxed);
    state.record(body);

    Json(json!({
        "id": "msg_test_123",
        "model": "mock-model-1",
        "content": [{"type": "text", "text": state.text()}],
        "stop_reason": "end_turn"
    }))
}

async fn handle_ollama_chat(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.apply_delay().await;
    state.ollama_chat_count.fetch_add(1, Ordering::Relaxed);

    let model = body.get("model").and_then(Value::as_str).unwrap_or("llama3").to_owned();
    state.record(body);

    Json(json!({
        "model": model,
        "message": {"role": "assistant", "content": state.text()},
        "done": true
    }))
}

async fn handle_ollama_tags(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.apply_delay().await;

    Json(json!({"models": [{"name": "llama3:latest"}, {"name": "mistral:latest"}]}))
}

async fn handle_ollama_embeddings(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.apply_delay().await;
    state.record(body);

    Json(json!({"embedding": [0.1, 0.2, 0.3, 0.4, 0.5]}))
}
