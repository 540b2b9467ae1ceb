//! HTTP error type for the API handlers.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::domain::aggregates::{OrderError, ProductError};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Field-level form errors; nothing was submitted.
    #[error("Validation failed")]
    Validation(BTreeMap<String, Vec<String>>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }

        let body = match self {
            Self::Validation(fields) => json!({ "error": "Validation failed", "fields": fields }),
            Self::Internal(_) => json!({ "error": "Internal server error" }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidTransition { .. } => Self::Conflict(err.to_string()),
            OrderError::UnknownStatus(_) | OrderError::NoItems | OrderError::InvalidTotal(_) | OrderError::InvalidItem(_) => {
                Self::BadRequest(err.to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err { StoreError::Order(e) => e.into() }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self { Self::BadRequest(err.to_string()) }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Invalid(_) => Self::Validation(err.field_messages()),
            CheckoutError::EmptyCart | CheckoutError::InvalidItem(_) | CheckoutError::AmountOverflow => Self::BadRequest(err.to_string()),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
