use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction timed out after {0}s")]
    Timeout(u64),

    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Timeout(secs) => {
                tracing::warn!("Extraction timed out after {secs}s");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "EXTRACTION_TIMEOUT",
                    format!("Extraction did not finish within {secs}s"),
                )
            }
            AppError::Worker(msg) => {
                tracing::error!("Extraction worker error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    "The extraction worker failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Construction-time errors for the ontology and extraction settings.
/// These are programmer/configuration errors and abort startup; they never occur per request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Ontology contains no terms")]
    EmptyOntology,

    #[error("Ontology surface is empty (canonical '{0}')")]
    EmptySurface(String),

    #[error("Ontology surface '{0}' must be lowercase with single spaces")]
    NotNormalized(String),

    #[error("Alias '{surface}' maps to both '{first}' and '{second}'")]
    ConflictingAlias {
        surface: String,
        first: String,
        second: String,
    },

    #[error("Alias '{alias}' of '{canonical}' is itself a canonical name")]
    AliasShadowsCanonical { alias: String, canonical: String },

    #[error("Ambiguous surface '{0}' is not an ontology term")]
    UnknownAmbiguousSurface(String),

    #[error("Invalid ontology file: {0}")]
    InvalidOntologyFile(#[from] serde_json::Error),

    #[error("Failed to build surface matcher: {0}")]
    Matcher(String),

    #[error("Invalid extraction config: {0}")]
    InvalidConfig(String),
}
