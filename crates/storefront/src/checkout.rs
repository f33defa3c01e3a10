//! Simulated checkout submission.
//!
//! Accepts a contact/address/payment form plus the current cart lines
//! and resolves after a fixed simulated delay; there is no payment
//! gateway behind it. The failure path is modeled in the `Result`: on
//! `Err` nothing has been charged, the caller's cart stays untouched,
//! and the error is retryable. Only a successful submission clears the
//! cart, and that is the caller's move.

use std::time::Duration;

use chrono::{DateTime, Utc};
use malisek_core::Price;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::store::CartLine;

/// Subtotals above this amount ship free.
const FREE_DELIVERY_THRESHOLD: i64 = 500;

/// Flat delivery fee charged at or below the threshold.
const DELIVERY_FEE: i64 = 25;

/// Delivery fee for a subtotal: free strictly above the threshold, the
/// flat fee otherwise.
#[must_use]
pub fn delivery_fee(subtotal: Price) -> Price {
    if subtotal > Price::from_major(FREE_DELIVERY_THRESHOLD) {
        Price::ZERO
    } else {
        Price::from_major(DELIVERY_FEE)
    }
}

/// Supported payment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Mpesa,
    Pesapay,
    Paystack,
}

impl PaymentMethod {
    /// Human-readable provider name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mpesa => "M-Pesa",
            Self::Pesapay => "PesaPay",
            Self::Paystack => "Paystack",
        }
    }
}

/// Contact, address, and payment details submitted at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Check that every field carries a usable value.
    fn validate(&self) -> Result<(), CheckoutError> {
        if !self.email.contains('@') {
            return Err(CheckoutError::InvalidForm { field: "email" });
        }
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutError::InvalidForm { field });
            }
        }
        Ok(())
    }
}

/// Errors surfaced by the checkout boundary. All of them leave the cart
/// unchanged and are safe to retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("invalid or missing {field}")]
    InvalidForm { field: &'static str },
    #[error("payment was not accepted")]
    PaymentFailed,
}

/// Receipt returned by a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub item_count: u32,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub payment_method: PaymentMethod,
}

/// Checkout submission boundary with a simulated processing delay.
///
/// A single outstanding submission at a time is the expected usage; the
/// service itself is stateless. There is no cancellation and no
/// timeout: once started, a submission always resolves after the
/// configured delay.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    delay: Duration,
}

impl CheckoutService {
    /// Create a service with the given simulated processing delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Submit an order for the given cart lines.
    ///
    /// Validates the form, prices the order, then resolves after the
    /// configured delay.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] for an empty cart or an invalid
    /// form. No partial state mutation occurs on failure.
    pub async fn submit(
        &self,
        form: &CheckoutForm,
        lines: &[CartLine],
    ) -> Result<OrderConfirmation, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        form.validate()?;

        let subtotal: Price = lines.iter().map(CartLine::line_total).sum();
        let item_count = lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity));
        let delivery = delivery_fee(subtotal);

        tokio::time::sleep(self.delay).await;

        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            item_count,
            subtotal,
            delivery_fee: delivery,
            total: subtotal + delivery,
            payment_method: form.payment_method,
        };
        tracing::info!(
            order_id = %confirmation.order_id,
            total = %confirmation.total,
            method = confirmation.payment_method.label(),
            "Order placed"
        );
        Ok(confirmation)
    }
}
