use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("'{0}'을 찾을 수 없습니다.")]
    NotFound(String),
    #[error("상장사 명단을 불러오는 데 실패했습니다: {0}")]
    DirectoryUnavailable(String),
    #[error("오류가 발생했습니다: {0}")]
    FetchFailure(String),
    #[error("엑셀 파일을 만드는 데 실패했습니다: {0}")]
    Export(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::DirectoryUnavailable(_) => "directory_unavailable",
            AppError::FetchFailure(_) => "fetch_failure",
            AppError::Export(_) => "export",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DirectoryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::FetchFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// An error together with the non-fatal notices gathered before it happened.
#[derive(Debug)]
pub struct LookupFailure {
    pub error: AppError,
    pub notices: Vec<String>,
}

impl LookupFailure {
    pub fn new(error: AppError, notices: Vec<String>) -> Self {
        Self { error, notices }
    }
}

impl From<AppError> for LookupFailure {
    fn from(error: AppError) -> Self {
        Self::new(error, Vec::new())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'a str,
    message: String,
    notices: &'a [String],
}

impl IntoResponse for LookupFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            kind: self.error.kind(),
            message: self.error.to_string(),
            notices: &self.notices,
        };
        (self.error.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        LookupFailure::from(self).into_response()
    }
}
