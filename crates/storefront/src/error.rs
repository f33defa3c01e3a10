//! Unified error handling for the HTTP surface.
//!
//! The store itself has no failure modes (inputs are clamped or
//! ignored), so errors exist only at the boundaries: unknown ids,
//! out-of-stock additions, malformed requests, and checkout failures.
//! All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use malisek_core::ProductId;
use serde::Serialize;
use thiserror::Error;

use crate::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Product cannot be added to the cart while out of stock.
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    /// Whether retrying the same request may succeed.
    retryable: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, retryable) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, false),
            Self::OutOfStock(_) => (StatusCode::CONFLICT, false),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, false),
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart | CheckoutError::InvalidForm { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, false)
                }
                CheckoutError::PaymentFailed => {
                    tracing::error!(error = %self, "Checkout submission failed");
                    (StatusCode::BAD_GATEWAY, true)
                }
            },
        };

        let body = ErrorBody {
            error: self.to_string(),
            retryable,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::OutOfStock(ProductId::new("6"));
        assert_eq!(err.to_string(), "Product 6 is out of stock");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::OutOfStock(ProductId::new("1"))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::PaymentFailed)),
            StatusCode::BAD_GATEWAY
        );
    }
}
