use axum::{extract::State, http::StatusCode};

use reppay_core::health::readiness;

use crate::state::AppState;

/// 503 until the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    let ready = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe: database ping failed");
            false
        }
    };
    readiness(ready)
}
