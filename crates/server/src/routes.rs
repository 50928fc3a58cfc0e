use std::any::Any;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use reelmark_core::EnrichmentResult;
use reelmark_core::error::ApiError;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    with_middleware(
        Router::new()
            .route("/health", get(health))
            .route("/enrich", post(enrich).fallback(method_not_allowed))
            .fallback(not_found)
            .with_state(state),
    )
}

/// Tracing, open CORS, and a JSON 500 for handler panics.
fn with_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(detail = %detail, "handler panicked");
    AppError(ApiError::Internal(detail)).into_response()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// `POST /enrich` with `{ "url": "..." }`. Always `200` with a best-effort
/// result once the body is well formed.
///
/// The body is parsed regardless of `Content-Type`: browsers posting without
/// a preflight send JSON as `text/plain`.
async fn enrich(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EnrichmentResult>, AppError> {
    let body: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("body is not JSON: {e}")))?;
    let url = body
        .get("url")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ApiError::BadRequest("`url` must be a string".to_string()))?;

    let enrichment = state.resolver.enrich(url).await;
    Ok(Json(enrichment.result))
}

async fn method_not_allowed() -> AppError {
    AppError(ApiError::MethodNotAllowed)
}

async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError(ApiError::NotFound(uri.path().to_string()))
}
