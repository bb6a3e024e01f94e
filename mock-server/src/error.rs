use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures the mock backend reports through the `{success:false, message}`
/// envelope.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Not authorized, no token")]
    MissingToken,

    #[error("Not authorized, token failed")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("Todo not found")]
    TodoNotFound,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::BadRequest(_) | ServerError::UserExists => StatusCode::BAD_REQUEST,
            ServerError::MissingToken
            | ServerError::InvalidToken
            | ServerError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServerError::TodoNotFound => StatusCode::NOT_FOUND,
        };

        tracing::debug!(%status, error = %self, "request rejected");
        let body = json!({ "success": false, "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}
