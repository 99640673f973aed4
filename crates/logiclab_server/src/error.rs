//! Translation of service errors into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use logiclab_core::{EmployeeId, RepoError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error returned by every HTTP handler.
#[derive(Debug)]
pub enum ApiError {
    /// No employee exists under the requested key.
    NotFound(EmployeeId),
    Repo(RepoError),
    /// The blocking worker running the request died.
    Worker(tokio::task::JoinError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::Repo(RepoError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Repo(_) | Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Worker(err) => write!(f, "request worker failed: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Worker(err) => Some(err),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Worker(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_request module=http status=error http_status={} error={}",
                status.as_u16(),
                self
            );
        }

        let body = ErrorBody {
            status: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
