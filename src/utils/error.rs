use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use super::response::pretty_json;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    InvalidRequest(String),
    ConfigError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::InvalidRequest(format!("Document cannot be stored: {}", e))
    }
}

impl From<AppError> for std::io::Error {
    fn from(e: AppError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::DatabaseError(msg) = self {
            log::error!("❌ {}", msg);
        }

        pretty_json(
            self.status_code(),
            &serde_json::json!({
                "success": false,
                "error": self.to_string()
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_is_bad_request() {
        let err = AppError::InvalidRequest("missing id".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid request: missing id");
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = AppError::DatabaseError("connection refused".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
