use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unparseable response: {0}")]
    UnparseableResponse(String),
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ChartError::InvalidDate(_) => (StatusCode::BAD_REQUEST, "Invalid date format"),
            ChartError::InvalidPeriod(_) => (StatusCode::BAD_REQUEST, "Unknown chart period"),
            ChartError::InvalidConfig(e) => {
                tracing::error!("Configuration error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
            ChartError::Transport(e) => {
                tracing::error!("HTTP request error: {}", e);
                (StatusCode::BAD_GATEWAY, "Failed to fetch chart page")
            }
            ChartError::UnparseableResponse(e) => {
                tracing::error!("Unparseable chart page: {}", e);
                (StatusCode::BAD_GATEWAY, "Failed to parse chart page")
            }
        };

        let body = Json(json!({
            "error": message,
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
