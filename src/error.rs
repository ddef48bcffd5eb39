// src/error.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Request-level failure, rendered as the uniform
/// `{success, message, error}` envelope with the mapped HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{error}")]
    BadRequest { message: String, error: String },
    #[error("{error}")]
    Unauthorized { message: String, error: String },
    #[error("{error}")]
    Forbidden { message: String, error: String },
    #[error("{error}")]
    NotFound { message: String, error: String },
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}

impl ApiError {
    pub fn bad_request(message: &str, error: &str) -> ApiError {
        ApiError::BadRequest {
            message: message.to_string(),
            error: error.to_string(),
        }
    }

    pub fn unauthorized(message: &str, error: &str) -> ApiError {
        ApiError::Unauthorized {
            message: message.to_string(),
            error: error.to_string(),
        }
    }

    pub fn forbidden(message: &str, error: &str) -> ApiError {
        ApiError::Forbidden {
            message: message.to_string(),
            error: error.to_string(),
        }
    }

    pub fn not_found(message: &str, error: &str) -> ApiError {
        ApiError::NotFound {
            message: message.to_string(),
            error: error.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_)
            | ApiError::Database(_)
            | ApiError::Hash(_)
            | ApiError::Token(_)
            | ApiError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {self}");
        }

        let (message, error) = match self {
            ApiError::BadRequest { message, error }
            | ApiError::Unauthorized { message, error }
            | ApiError::Forbidden { message, error }
            | ApiError::NotFound { message, error } => (message.clone(), error.clone()),
            other => ("Internal server error".to_string(), other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": message,
            "error": error,
        }))
    }
}
