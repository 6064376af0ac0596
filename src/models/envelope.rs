use actix_web::http::StatusCode;
use serde::Serialize;

/// Two-key result wrapper: `{"Success": msg}` or `{"Failure": msg}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub enum Envelope {
    Success(String),
    Failure(String),
}

impl Envelope {
    pub fn created() -> Self {
        Envelope::Success("User successfully created!".to_string())
    }

    pub fn updated() -> Self {
        Envelope::Success("User successfully updated!".to_string())
    }

    pub fn deleted(id: &str) -> Self {
        Envelope::Success(format!("User with id {} deleted from Mongo!", id))
    }

    pub fn already_exists(id: &str) -> Self {
        Envelope::Failure(format!("User with id {} already exists!", id))
    }

    pub fn not_found(id: &str) -> Self {
        Envelope::Failure(format!("User with id {} does not exists!", id))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    /// Failure always maps to 404, whatever caused it.
    pub fn status(&self) -> StatusCode {
        if self.is_success() {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        }
    }
}
