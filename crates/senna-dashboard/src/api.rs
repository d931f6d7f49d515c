//! HTTP API for the dashboard
//!
//! Read endpoints return slices of the feed; control endpoints drive the
//! simulator and the demo triggers. All JSON responses use the
//! [`ApiResponse`] envelope.

use crate::feed::{ChatMessage, ChatRole, DashboardFeed};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use senna_core::{
    AnomalyEvent, ChatTopic, NetworkStatus, PerformanceSnapshot, ThreatEvent, TrendSample,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Generic API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub topic: ChatTopic,
    pub reply: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStatus {
    pub is_running: bool,
    pub subscribers: usize,
    pub events_published: u64,
    pub high_confidence_anomalies: usize,
}

impl SimulationStatus {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            is_running: state.simulator.is_running(),
            subscribers: state.bus.subscriber_count(),
            events_published: state.bus.published_count(),
            high_confidence_anomalies: state.feed().high_confidence_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachResponse {
    pub threat: ThreatEvent,
    pub notice: ChatMessage,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/threats", get(get_threats))
        .route("/api/anomalies", get(get_anomalies))
        .route("/api/trends", get(get_trends))
        .route("/api/metrics", get(get_metrics))
        .route("/api/network", get(get_network))
        .route("/api/status", get(get_status))
        .route("/api/chat", post(post_chat))
        .route("/api/simulation/start", post(start_simulation))
        .route("/api/simulation/stop", post(stop_simulation))
        .route("/api/demo/threat", post(trigger_threat))
        .route("/api/demo/anomaly", post(trigger_anomaly))
        .route("/api/demo/breach", post(trigger_breach))
        .with_state(state)
}

/// API routes for the startup banner
pub fn api_routes() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("GET", "/health", "Liveness probe"),
        ("GET", "/api/dashboard", "Full dashboard feed"),
        ("GET", "/api/threats", "Recent threat alerts"),
        ("GET", "/api/anomalies", "User behavior anomalies"),
        ("GET", "/api/trends", "Severity trend window"),
        ("GET", "/api/metrics", "Performance counters"),
        ("GET", "/api/network", "Network link status"),
        ("GET", "/api/status", "Simulator status"),
        ("POST", "/api/chat", "Ask the assistant"),
        ("POST", "/api/simulation/start", "Start the generators"),
        ("POST", "/api/simulation/stop", "Stop the generators"),
        ("POST", "/api/demo/threat", "Trigger a critical threat"),
        ("POST", "/api/demo/anomaly", "Trigger a user anomaly"),
        ("POST", "/api/demo/breach", "Simulate a data breach"),
    ]
}

async fn get_dashboard(State(state): State<AppState>) -> ApiResponse<DashboardFeed> {
    ApiResponse::success(state.feed().clone())
}

async fn get_threats(State(state): State<AppState>) -> ApiResponse<Vec<ThreatEvent>> {
    ApiResponse::success(state.feed().threats.iter().cloned().collect())
}

async fn get_anomalies(State(state): State<AppState>) -> ApiResponse<Vec<AnomalyEvent>> {
    ApiResponse::success(state.feed().anomalies.clone())
}

async fn get_trends(State(state): State<AppState>) -> ApiResponse<Vec<TrendSample>> {
    ApiResponse::success(state.feed().trends.iter().cloned().collect())
}

async fn get_metrics(State(state): State<AppState>) -> ApiResponse<PerformanceSnapshot> {
    let metrics = state.feed().metrics.clone();
    ApiResponse::success(metrics.unwrap_or_else(|| state.performance.generate_metrics()))
}

async fn get_network(State(state): State<AppState>) -> ApiResponse<NetworkStatus> {
    let network = state.feed().network;
    ApiResponse::success(network.unwrap_or_else(|| state.network.get_status()))
}

async fn get_status(State(state): State<AppState>) -> ApiResponse<SimulationStatus> {
    ApiResponse::success(SimulationStatus::from_state(&state))
}

async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResponse<ChatReply> {
    let message = request.message.trim();
    if message.is_empty() {
        warn!("rejected empty chat message");
        return ApiResponse::error("message must not be empty");
    }

    state.feed().push_chat(ChatRole::User, message);
    tokio::time::sleep(state.chat_delay()).await;

    let topic = ChatTopic::classify(message);
    let text = state.chat.respond(message);
    let reply = state.feed().push_chat(ChatRole::Bot, text);
    ApiResponse::success(ChatReply { topic, reply })
}

async fn start_simulation(State(state): State<AppState>) -> ApiResponse<SimulationStatus> {
    if state.simulator.start() {
        info!("simulation resumed via API");
    }
    ApiResponse::success(SimulationStatus::from_state(&state))
}

async fn stop_simulation(State(state): State<AppState>) -> ApiResponse<SimulationStatus> {
    if state.simulator.stop() {
        info!("simulation paused via API");
    }
    ApiResponse::success(SimulationStatus::from_state(&state))
}

async fn trigger_threat(State(state): State<AppState>) -> ApiResponse<ThreatEvent> {
    ApiResponse::success(state.simulator.trigger_critical_threat())
}

async fn trigger_anomaly(State(state): State<AppState>) -> ApiResponse<AnomalyEvent> {
    ApiResponse::success(state.simulator.trigger_anomaly())
}

async fn trigger_breach(State(state): State<AppState>) -> ApiResponse<BreachResponse> {
    let (threat, notice) = state.simulator.trigger_breach();
    let notice = state.feed().push_chat(ChatRole::Bot, notice);
    ApiResponse::success(BreachResponse { threat, notice })
}
