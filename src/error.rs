use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::error::GatewayError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidOrderData(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    UserNotFound(String),

    #[error("{0}")]
    OrderNotFound(String),

    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidOrderData(_) | AppError::InsufficientStock(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UserNotFound(_) | AppError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Gateway(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// The response body is the raw error message; downstream consumers match on
// the text, so no JSON envelope is added around it.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
