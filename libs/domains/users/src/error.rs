use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user {0}was nor found")]
    NotFound(Uuid),

    #[error("Mutation did not match exactly one user")]
    MutationRejected,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Error body returned when a single user lookup misses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub error_message: String,
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            // Clients depend on this exact body, wording included.
            UserError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorMessage {
                    error_message: self.to_string(),
                }),
            )
                .into_response(),
            UserError::MutationRejected => {
                tracing::info!("Rejected user mutation");
                StatusCode::BAD_REQUEST.into_response()
            }
            UserError::Internal(msg) => AppError::InternalServerError(msg).into_response(),
        }
    }
}
