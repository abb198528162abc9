use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::repository::RepoError;

/// AppError
///
/// Every failure a handler or the gate can surface to a client. Expected access outcomes
/// (wrong role, foreign resource) arrive here as `Unauthorized`/`Forbidden`; faults that
/// should never happen in a healthy deployment (`Repository`, `RouteTable`) become a
/// generic 500 and are logged with their detail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthorized,

    #[error("access to this resource is forbidden")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("route table is invalid: {0}")]
    RouteTable(String),
}

/// ErrorBody
///
/// JSON body returned with every non-2xx API response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(_) | AppError::RouteTable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::Forbidden => "forbidden",
            AppError::NotFound => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Repository(_) | AppError::RouteTable(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Repository(_) | AppError::RouteTable(_) => {
                tracing::error!(error = %self, "request aborted");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: self.kind().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
