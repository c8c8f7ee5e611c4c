//! Final price arithmetic.

use serde::{Deserialize, Serialize};

use smilewidgets_core::Cents;

/// Breakdown of a quoted price.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub subtotal: Cents,
    pub discount: Cents,
    pub total: Cents,
}

impl PriceQuote {
    /// `total = max(0, subtotal - discount)`.
    pub fn new(subtotal: Cents, discount: Cents) -> Self {
        Self {
            subtotal,
            discount,
            total: subtotal.saturating_sub(discount),
        }
    }
}
