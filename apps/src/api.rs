//! HTTP surface of the verifier.
//!
//! | Method | Path                | Description                          |
//! |--------|---------------------|--------------------------------------|
//! | GET    | `/health`           | Liveness probe, plain-text `OK`      |
//! | POST   | `/verify-signature` | Recover the signer of a personal message |

use axum::{
    body::Bytes,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use sigverify_common::{validate, verify, ValidationError, VerificationResult};

/// Error body for every non-200 answer.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Details stay in the server log.
    #[error("Internal Server Error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router. Only the given origins may call it from a browser.
pub fn create_router(allowed_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health_handler))
        .route("/verify-signature", post(verify_signature_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> &'static str {
    "OK"
}

/// The body is read whatever its content type; anything that is not JSON
/// counts as no body at all.
async fn verify_signature_handler(body: Bytes) -> Result<Json<VerificationResult>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let request = validate(&payload).inspect_err(|e| debug!(?e, "rejected verification request"))?;

    let result = tokio::task::spawn_blocking(move || verify(request))
        .await
        .map_err(|e| {
            error!("signature verification task failed: {e}");
            ApiError::Internal
        })?;

    debug!(is_valid = result.is_valid, signer = ?result.signer, "verification finished");
    Ok(Json(result))
}
