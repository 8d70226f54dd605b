use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RolodexError {
    #[error("Engine unreachable: {0}")]
    EngineUnreachable(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Document not found: {index}/{id}")]
    DocumentNotFound { index: String, id: String },

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RolodexError>;

impl From<std::io::Error> for RolodexError {
    fn from(e: std::io::Error) -> Self {
        RolodexError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RolodexError {
    fn from(e: serde_json::Error) -> Self {
        RolodexError::Json(e.to_string())
    }
}

impl From<csv::Error> for RolodexError {
    fn from(e: csv::Error) -> Self {
        RolodexError::Csv(e.to_string())
    }
}

impl From<reqwest::Error> for RolodexError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            RolodexError::EngineUnreachable(e.to_string())
        } else {
            RolodexError::Engine(e.to_string())
        }
    }
}

impl RolodexError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RolodexError::EngineUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RolodexError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RolodexError::DocumentNotFound { .. } => StatusCode::NOT_FOUND,
            RolodexError::MalformedDocument(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RolodexError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RolodexError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RolodexError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RolodexError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RolodexError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Axum IntoResponse implementation (feature-gated)
#[cfg(feature = "axum-support")]
use axum::response::{IntoResponse, Json, Response};
#[cfg(feature = "axum-support")]
use serde::Serialize;

#[cfg(feature = "axum-support")]
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub request_id: String,
}

#[cfg(feature = "axum-support")]
impl IntoResponse for RolodexError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            RolodexError::EngineUnreachable(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "engine_unreachable",
                format!("Search engine unreachable: {}", e),
            ),
            RolodexError::Engine(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "engine_error",
                format!("Search engine error: {}", e),
            ),
            RolodexError::DocumentNotFound { index, id } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Document '{}' not found in '{}'", id, index),
            ),
            RolodexError::MalformedDocument(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "malformed_document",
                msg.clone(),
            ),
            RolodexError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            RolodexError::Json(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "json_error",
                format!("JSON error: {}", e),
            ),
            RolodexError::Csv(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "csv_error",
                format!("CSV error: {}", e),
            ),
            RolodexError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                format!("IO error: {}", e),
            ),
            RolodexError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "config_error",
                format!("Configuration error: {}", e),
            ),
        };

        let error_response = ErrorResponse {
            error: error_code.to_string(),
            message,
            request_id: format!("req_rx_{}", uuid::Uuid::new_v4()),
        };

        (status, Json(error_response)).into_response()
    }
}
