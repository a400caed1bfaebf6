use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use reppay_core::error::route_not_found;
use reppay_core::health::healthz;
use reppay_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    escrow::{claim_escrow, create_escrow, escrow_balance, record_claim_transaction},
    health::readyz,
    otp::{send_otp, verify_otp},
    user::{connect_wallet, get_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Signup
        .route("/api/send-otp", post(send_otp))
        .route("/api/verify-otp", post(verify_otp))
        .route("/api/connect-wallet", post(connect_wallet))
        .route("/api/user/{email}", get(get_user))
        // Escrow
        .route("/api/escrow/create", post(create_escrow))
        .route("/api/escrow/balance/{email}", get(escrow_balance))
        .route("/api/escrow/claim/{id}", post(claim_escrow))
        .route(
            "/api/escrow/claim/{id}/transaction",
            post(record_claim_transaction),
        )
        .fallback(route_not_found)
        .with_state(state)
        // Layers run bottom-up: the request id is set before the trace span opens.
        .layer(CorsLayer::permissive())
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
