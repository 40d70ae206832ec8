mod categories;
mod questions;
mod quizzes;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::TriviaError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

/// What a client gets back when a request fails. Details stay in the logs.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Unprocessable,
    Internal,
}

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: u16,
    message: &'static str,
}

#[derive(Serialize)]
pub struct Success {
    success: bool,
}

impl Success {
    pub fn ok() -> Json<Self> {
        Json(Success { success: true })
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest => "Bad request",
            ApiError::NotFound => "Not found",
            ApiError::Unprocessable => "Request could not be processed",
            ApiError::Internal => "Server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorEnvelope {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<TriviaError> for ApiError {
    fn from(error: TriviaError) -> ApiError {
        match error {
            TriviaError::MissingField(field) => {
                tracing::info!("Rejected request without `{field}`");
                ApiError::BadRequest
            }
            TriviaError::NotFound => ApiError::NotFound,
            TriviaError::DeletionFailure(e) => {
                tracing::error!("Delete failed: {e}");
                ApiError::Unprocessable
            }
            TriviaError::PersistenceFailure(e) => {
                tracing::error!("Write failed: {e}");
                ApiError::Internal
            }
            TriviaError::Store(e) => {
                tracing::error!("Query failed: {e}");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> ApiError {
        tracing::info!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest
    }
}

// an id segment that is not an integer does not name any resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> ApiError {
        tracing::info!("Unmatched path: {}", rejection.body_text());
        ApiError::NotFound
    }
}
