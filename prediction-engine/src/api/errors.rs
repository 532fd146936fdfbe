use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to parse request: {0}")]
    RequestParsingError(#[from] serde_json::Error),
    #[error("No historical {} data available", .0.label())]
    NoData(Category),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("{0} store is unavailable after a failed write")]
    StorePoisoned(Category),
}

impl PredictionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictionError::InvalidInput(_)
            | PredictionError::RequestParsingError(_)
            | PredictionError::NoData(_) => StatusCode::BAD_REQUEST,

            PredictionError::UnknownCategory(_) => StatusCode::NOT_FOUND,

            PredictionError::StorePoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("internal error: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
