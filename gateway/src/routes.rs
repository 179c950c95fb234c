//! HTTP routes for the rewards ledger

use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use rewards_ledger::Ledger;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// The ledger service
    pub ledger: Arc<Ledger>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub wallet_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReceiptRequest {
    pub user_id: Uuid,
    pub receipt_hash: String,
    pub purchase_amount: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRewardRequest {
    pub user_id: Uuid,
    pub reward_type: String,
    pub drop_amount: u64,
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub limit: Option<usize>,
}

// POST /api/users - register a user with the welcome bonuses
async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = state.ledger.create_user(req.email, req.wallet_address)?;

    Ok(Json(json!({
        "success": true,
        "user": user,
    })))
}

// GET /api/users/:id/balance
async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let balance = state.ledger.get_balance(user_id)?;

    Ok(Json(json!({
        "success": true,
        "dropBalance": balance.drop_balance,
        "drfBalance": balance.drf_balance,
    })))
}

// GET /api/users/:id/events?limit=n - most recent first
async fn get_events(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Value>, ApiError> {
    let events = state.ledger.get_events(user_id, query.limit)?;

    Ok(Json(json!({
        "success": true,
        "events": events,
    })))
}

// POST /api/receipts/scan - credit DROP for a proof of purchase
async fn scan_receipt(
    State(state): State<AppState>,
    Json(req): Json<ScanReceiptRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state
        .ledger
        .scan_receipt(req.user_id, req.receipt_hash, req.purchase_amount)?;

    Ok(Json(json!({
        "success": true,
        "dropEarned": outcome.drop_earned,
        "receipt": outcome.receipt,
    })))
}

// POST /api/rewards/redeem - burn DROP for a reward
async fn redeem_reward(
    State(state): State<AppState>,
    Json(req): Json<RedeemRewardRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state
        .ledger
        .redeem_reward(req.user_id, req.reward_type, req.drop_amount)?;

    Ok(Json(json!({
        "success": true,
        "dropBurned": outcome.drop_burned,
        "rewardType": outcome.reward_type,
    })))
}

// GET /api/stats - platform-wide aggregate
async fn platform_stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "stats": state.ledger.platform_stats(),
    }))
}

// GET /health
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "rewards-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "users": state.ledger.user_count(),
    }))
}

// GET /metrics - Prometheus text exposition
async fn metrics_handler(State(state): State<AppState>) -> Result<String, ApiError> {
    state
        .ledger
        .metrics()
        .export()
        .map_err(|e| ApiError::Internal(format!("Failed to export metrics: {}", e)))
}

/// Build the gateway router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/users", post(create_user))
        .route("/api/users/:id/balance", get(get_balance))
        .route("/api/users/:id/events", get(get_events))
        .route("/api/receipts/scan", post(scan_receipt))
        .route("/api/rewards/redeem", post(redeem_reward))
        .route("/api/stats", get(platform_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
