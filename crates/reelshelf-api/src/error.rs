use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::pages;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Username '{0}' is already taken")]
    DuplicateUser(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Store unavailable: {0}")]
    Store(#[from] anyhow::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Errors the user caused and can fix by editing the form.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ApiError::DuplicateUser(_) | ApiError::InvalidInput(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::DuplicateUser(_) => (StatusCode::CONFLICT, self.to_string()),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Store(ref e) => {
                error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The video store is unavailable. Try again later.".to_string(),
                )
            }
            ApiError::Hashing(ref e) => {
                error!("Hashing error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ApiError::TaskJoin(ref e) => {
                error!("spawn_blocking join error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Html(pages::error_page(&message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
