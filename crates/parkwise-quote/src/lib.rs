//! # Parkwise Quote Service
//!
//! HTTP/JSON front for the Parkwise pricing engine.
//!
//! ## Endpoints
//!
//! - `GET  /health`
//! - `GET  /api/v1/version`
//! - `POST /api/v1/quote` - cost estimate, any start, zero durations allowed
//! - `POST /api/v1/booking-quote` - priced booking window for the payment flow

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use parkwise_common::ParkwiseError;
use parkwise_pricing::{Quote, QuoteInput, Quoter};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

/// Quote service version
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct AppState {
    pub quoter: Arc<Quoter>,
}

impl AppState {
    pub fn new(quoter: Quoter) -> Self {
        Self {
            quoter: Arc::new(quoter),
        }
    }
}

/// Error body returned by the quote endpoints
pub enum ApiError {
    /// Body missing, not JSON, or not shaped like a quote request
    InvalidBody(JsonRejection),
    Pricing(ParkwiseError),
}

impl From<ParkwiseError> for ApiError {
    fn from(err: ParkwiseError) -> Self {
        Self::Pricing(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidBody(rejection) => {
                let message = rejection.body_text();
                warn!(%message, "Rejected malformed quote body");
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::Pricing(ParkwiseError::Quote(err)) => {
                warn!(%err, "Rejected quote request");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Pricing(err) => {
                error!(%err, "Quote request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Create REST API routes for the quote service
pub fn create_router(state: AppState) -> Router {
    // CORS layer to allow frontend connections from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/version", get(version))
        .route("/api/v1/quote", post(estimate))
        .route("/api/v1/booking-quote", post(booking_quote))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "parkwise-quote",
        "version": SERVICE_VERSION,
        "description": "Dynamic parking cost estimation",
    }))
}

async fn estimate(
    State(state): State<AppState>,
    body: Result<Json<QuoteInput>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
    let Json(input) = body?;
    Ok(Json(state.quoter.estimate(&input, Utc::now())?))
}

async fn booking_quote(
    State(state): State<AppState>,
    body: Result<Json<QuoteInput>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
    let Json(input) = body?;
    Ok(Json(state.quoter.booking_quote(&input, Utc::now())?))
}
