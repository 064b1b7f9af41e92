//! LLM chat client
//!
//! Single-flight wrapper around the backend's LLM routes. Every guarded
//! operation rejects overlapping calls, normalizes the response shape into
//! text and prefixes failures with the operation it was doing.

use crate::config::{RoutesConfig, Settings};
use crate::models::chat::{ChatHistory, ChatTurn, LlmRequest, ServerResponse, SmartChatReply};
use crate::services::single_flight::{FlightGuard, FlightState};
use crate::services::transport::{HttpTransport, Transport};
use crate::utils::error::{ClientError, ClientResult, ErrorContext};
use crate::utils::logging::create_request_log_summary;
use serde_json::Value;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

const SUGGESTION_CONTEXT: &str = "Failed to get AI suggestion";
const ENHANCED_SUGGESTION_CONTEXT: &str = "Failed to get enhanced AI suggestion";
const ROUTE_ANALYSIS_CONTEXT: &str = "Failed to get smart route analysis";
const SMART_CHAT_CONTEXT: &str = "Failed to get smart chat response";
const CHAT_CONTEXT: &str = "Failed to chat with AI";
const ENHANCED_CHAT_CONTEXT: &str = "Failed to chat with enhanced AI";

/// Single-flight LLM client
pub struct LlmClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    routes: RoutesConfig,
    history_window: usize,
    guard: FlightGuard,
    history: Mutex<ChatHistory>,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("base_url", &self.base_url)
            .field("routes", &self.routes)
            .field("history_window", &self.history_window)
            .field("state", &self.guard.state())
            .finish()
    }
}

impl LlmClient {
    /// Create a client backed by reqwest
    pub fn new(settings: &Settings, routes: RoutesConfig) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(settings.api.timeout)?;
        Ok(Self::with_transport(Arc::new(transport), settings, routes))
    }

    /// Create a client over an existing transport
    pub fn with_transport(transport: Arc<dyn Transport>, settings: &Settings, routes: RoutesConfig) -> Self {
        Self {
            transport,
            base_url: settings.api_base().to_string(),
            routes,
            history_window: settings.chat.history_window,
            guard: FlightGuard::new(),
            history: Mutex::new(ChatHistory::new()),
        }
    }

    /// Route suggestion for a free-form prompt
    pub async fn route_suggestion(&self, prompt: &str) -> ClientResult<String> {
        let request = LlmRequest::prompt(prompt);
        self.guarded(SUGGESTION_CONTEXT, self.request_text(&self.routes.route_suggest, &request))
            .await
    }

    /// Route suggestion augmented with free internet search
    pub async fn enhanced_suggestion(&self, prompt: &str, origin: &str, destination: &str) -> ClientResult<String> {
        let request = LlmRequest::prompt(prompt).with_places(origin, destination);
        self.guarded(
            ENHANCED_SUGGESTION_CONTEXT,
            self.request_text(&self.routes.search_free, &request),
        )
        .await
    }

    /// Structured analysis of a route, returned as the whole response body
    pub async fn smart_route_analysis(&self, start: &str, end: &str) -> ClientResult<Value> {
        let request = LlmRequest::default().with_span(start, end);
        self.guarded(
            ROUTE_ANALYSIS_CONTEXT,
            self.send(&self.routes.smart_route_analysis, &request),
        )
        .await
    }

    /// Chat about a route without touching the conversation history
    pub async fn smart_chat(&self, prompt: &str, start: &str, end: &str) -> ClientResult<SmartChatReply> {
        let request = LlmRequest::prompt(prompt).with_span(start, end);
        self.guarded(SMART_CHAT_CONTEXT, async {
            self.send(&self.routes.smart_chat, &request)
                .await
                .map(SmartChatReply::from_body)
        })
        .await
    }

    /// Chat turn carrying the recent conversation history
    pub async fn chat(&self, prompt: &str) -> ClientResult<String> {
        self.guarded(CHAT_CONTEXT, self.chat_turn(LlmRequest::prompt(prompt)))
            .await
    }

    /// Chat turn with trip endpoints and the recent conversation history
    pub async fn chat_enhanced(&self, prompt: &str, origin: &str, destination: &str) -> ClientResult<String> {
        let request = LlmRequest::prompt(prompt).with_places(origin, destination);
        self.guarded(ENHANCED_CHAT_CONTEXT, self.chat_turn(request)).await
    }

    /// Unguarded free-search call, the body is returned as received
    pub async fn ask_with_free_search(&self, prompt: &str, origin: &str, destination: &str) -> ClientResult<Value> {
        let request = LlmRequest::prompt(prompt).with_places(origin, destination);
        let url = self.url(&self.routes.search_free);
        let payload = serde_json::to_value(&request)?;
        let response = self
            .transport
            .post_json(&url, &payload, &Uuid::new_v4().to_string())
            .await?;

        serde_json::from_str(&response.body).map_err(|_| ClientError::MalformedResponse)
    }

    /// Snapshot of the conversation so far
    pub fn history(&self) -> Vec<ChatTurn> {
        self.lock_history().turns().to_vec()
    }

    pub fn clear_history(&self) {
        self.lock_history().clear();
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn state(&self) -> FlightState {
        self.guard.state()
    }

    /// Run `operation` while holding the guard
    ///
    /// A busy guard is reported as-is; every other failure is prefixed with `context`.
    async fn guarded<T, F>(&self, context: &str, operation: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let _permit = self.guard.try_acquire().map_err(|e| {
            debug!("Rejected overlapping request: {}", context);
            e
        })?;

        let result = operation.await.operation_context(context);
        if let Err(e) = &result {
            if e.should_log_details() {
                error!("{}", e);
            } else {
                warn!("{}", e);
            }
        }
        result
    }

    async fn chat_turn(&self, request: LlmRequest) -> ClientResult<String> {
        let prompt = request.prompt.clone().unwrap_or_default();

        let window = {
            let mut history = self.lock_history();
            history.push(ChatTurn::user(prompt));
            history.window(self.history_window).to_vec()
        };

        let request = request.with_history(&window);
        let text = self.request_text(&self.routes.chat, &request).await?;

        self.lock_history().push(ChatTurn::assistant(text.clone()));
        Ok(text)
    }

    async fn request_text(&self, route: &str, request: &LlmRequest) -> ClientResult<String> {
        let body = self.send(route, request).await?;
        ServerResponse::resolve(&body)
    }

    /// POST `request` and return the checked JSON body
    async fn send(&self, route: &str, request: &LlmRequest) -> ClientResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!("llm_request", request_id = %request_id, route = %route);

        self.post_checked(route, request, &request_id)
            .instrument(span)
            .await
    }

    async fn post_checked(&self, route: &str, request: &LlmRequest, request_id: &str) -> ClientResult<Value> {
        debug!("Sending LLM request: {}", create_request_log_summary(request));

        let url = self.url(route);
        let payload = serde_json::to_value(request)?;
        let response = self.transport.post_json(&url, &payload, request_id).await?;

        debug!("LLM response status: {}", response.status);
        response.into_checked_json()
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn lock_history(&self) -> MutexGuard<'_, ChatHistory> {
        // history stays consistent even if a holder panicked
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
