use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::consultation::ConsultationServiceError;
use crate::content::blog::BlogServiceError;
use crate::store::RepositoryError;
use crate::telemetry::TelemetryError;
use crate::tools::calculator::CalculatorValidationError;
use crate::tools::diagnosis::DiagnosisValidationError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Message returned for any failure the caller cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// Process-level failures surfaced by the service binary.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    /// Command-line input rejected before any work ran.
    Input(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Input(msg) => write!(f, "invalid input: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Input(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "application error");
        let body = Json(json!({ "error": INTERNAL_ERROR_MESSAGE }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CalculatorValidationError> for AppError {
    fn from(value: CalculatorValidationError) -> Self {
        Self::Input(value.to_string())
    }
}

impl From<DiagnosisValidationError> for AppError {
    fn from(value: DiagnosisValidationError) -> Self {
        Self::Input(value.to_string())
    }
}

/// Error type returned by every JSON route handler.
///
/// The body is always `{ "error": <message> }`. Internal failures are logged
/// and replaced by a generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "internal error while handling request");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        ApiError::BadRequest("요청 형식이 올바르지 않습니다.".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected query string");
        ApiError::BadRequest("조회 조건이 올바르지 않습니다.".to_string())
    }
}

impl From<CalculatorValidationError> for ApiError {
    fn from(value: CalculatorValidationError) -> Self {
        ApiError::BadRequest(value.to_string())
    }
}

impl From<DiagnosisValidationError> for ApiError {
    fn from(value: DiagnosisValidationError) -> Self {
        ApiError::BadRequest(value.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => {
                ApiError::NotFound("요청한 항목을 찾을 수 없습니다.".to_string())
            }
            RepositoryError::Conflict => ApiError::Conflict("이미 존재하는 항목입니다.".to_string()),
            RepositoryError::Unavailable(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<BlogServiceError> for ApiError {
    fn from(value: BlogServiceError) -> Self {
        match value {
            BlogServiceError::Validation(err) => ApiError::BadRequest(err.to_string()),
            BlogServiceError::DuplicateSlug(_) => ApiError::Conflict(value.to_string()),
            BlogServiceError::Repository(err) => err.into(),
        }
    }
}

impl From<ConsultationServiceError> for ApiError {
    fn from(value: ConsultationServiceError) -> Self {
        match value {
            ConsultationServiceError::Validation(err) => ApiError::BadRequest(err.to_string()),
            ConsultationServiceError::Transition(err) => ApiError::Conflict(err.to_string()),
            ConsultationServiceError::Repository(err) => err.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::MissingCredentials | AuthError::InvalidCredentials => {
                ApiError::Unauthorized(value.to_string())
            }
            AuthError::Forbidden => ApiError::Forbidden(value.to_string()),
            AuthError::Directory(detail) => ApiError::Internal(detail),
        }
    }
}
