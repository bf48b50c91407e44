use axum::Json;
use axum::extract::{ConnectInfo, State};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::GatewayError;
use crate::metrics::{RATE_LIMITED, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{GenerateRequest, GenerateResponse, QueuedRequest};
use crate::rate_limit::check_rate_limit;
use crate::state::AppState;

// post handler: reject bad input, check the quota, then queue for the worker
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, GatewayError> {
    REQUEST_TOTAL.inc();

    // an empty prompt never reaches the limiter or the cache
    let prompt = payload.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(GatewayError::EmptyPrompt);
    }

    let client_id = addr.ip().to_string();
    if !check_rate_limit(
        &state.rate_limiter,
        &client_id,
        state.rate_limit,
        state.rate_window,
    ) {
        RATE_LIMITED.inc();
        debug!(client = %client_id, "rate limit exceeded");
        return Err(GatewayError::RateLimited);
    }

    let start_time = Instant::now();

    let (response_tx, response_rx) = oneshot::channel();
    let queued = QueuedRequest {
        model: payload.model.unwrap_or_else(|| state.model.clone()),
        prompt,
        system: payload.system,
        response_tx,
    };

    state
        .queue_tx
        .send(queued)
        .await
        .map_err(|_| GatewayError::QueueClosed)?;

    // wait for the worker's answer
    let result = response_rx.await.map_err(|_| GatewayError::QueueClosed)?;

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    result.map(Json)
}
