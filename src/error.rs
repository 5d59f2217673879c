use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::profile::store::StoreError;
use crate::profile::PhotoError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Photo error: {0}")]
    Photo(#[from] PhotoError),

    #[error("Password hash error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                internal()
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                internal()
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                internal()
            }
            AppError::Photo(e) => match e.notice() {
                Some(notice) => (StatusCode::BAD_REQUEST, notice.message().to_string()),
                None => {
                    tracing::error!("Photo error: {}", e);
                    internal()
                }
            },
            AppError::Bcrypt(e) => {
                tracing::error!("Password hash error: {}", e);
                internal()
            }
        };

        (status, message).into_response()
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

pub type AppResult<T> = Result<T, AppError>;
