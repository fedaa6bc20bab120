use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Store failure surfaced with a route-specific static message. The
    /// underlying driver error is logged, never sent to the caller.
    #[error("{message}")]
    Database {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Authentication required")]
    Unauthorized,

    // Token issuance failures keep the legacy 401 contract.
    #[error("Failed to issue token")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("'{0}' is not a valid skill id")]
    InvalidId(String),

    #[error("Request body must not be empty")]
    EmptyBody,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Wraps a store error with the static message this route reports.
    pub fn database(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Database { message, source }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Token(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptyBody => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Database { message, source } = self {
            log::error!("{}: {}", message, source);
        }

        let error_response = ErrorResponse {
            success: false,
            error: self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
