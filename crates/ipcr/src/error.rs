use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::appraisal::router::status_for;
use crate::workflows::appraisal::AppraisalServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Appraisal(AppraisalServiceError),
    Decode(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Appraisal(err) => write!(f, "appraisal error: {}", err),
            AppError::Decode(err) => write!(f, "invalid appraisal document: {}", err),
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
            AppError::Appraisal(err) => Some(err),
            AppError::Decode(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Appraisal(err) => status_for(err),
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
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

impl From<AppraisalServiceError> for AppError {
    fn from(value: AppraisalServiceError) -> Self {
        Self::Appraisal(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::appraisal::{AccessDenied, RepositoryError, Role, ValidationError};

    #[test]
    fn appraisal_errors_keep_their_router_status() {
        let cases = [
            (
                AppError::from(AppraisalServiceError::Validation(
                    ValidationError::MissingPeriod,
                )),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(AppraisalServiceError::Access(AccessDenied::CannotCreate {
                    role: Role::Vp,
                })),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::from(AppraisalServiceError::Repository(RepositoryError::NotFound)),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(AppraisalServiceError::Repository(
                    RepositoryError::Unavailable("database offline".to_string()),
                )),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn malformed_documents_are_bad_requests() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            AppError::from(decode).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
