//! Price quoting: resolve a product's price for a day and apply gift cards.
//!
//! ```text
//! product code ─► product ─► schedules ─► resolved subtotal ─┐
//! gift card code ─► gift card rows ─► covering discount ─────┴─► max(0, subtotal - discount)
//! ```
//!
//! Contains no IO itself; it composes a `PricingStore`.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::instrument;

use smilewidgets_core::Cents;
use smilewidgets_products::{PriceQuote, gift_card_discount, resolve_price};

use crate::store::{PricingStore, StoreError};

#[derive(Debug, Error)]
pub enum QuoteError {
    /// No product carries the requested code.
    #[error("product '{0}' not found")]
    ProductNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Answers "what does this product cost on this day, after this gift card".
#[derive(Debug, Clone)]
pub struct PriceQuoter<S> {
    store: S,
}

impl<S> PriceQuoter<S>
where
    S: PricingStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Full breakdown of the quote.
    #[instrument(skip(self), err)]
    pub async fn quote(
        &self,
        product_code: &str,
        date: NaiveDate,
        gift_card_code: Option<&str>,
    ) -> Result<PriceQuote, QuoteError> {
        // Codes are stored trimmed.
        let product_code = product_code.trim();
        let gift_card_code = gift_card_code.map(str::trim).filter(|c| !c.is_empty());

        let product = self
            .store
            .product_by_code(product_code)
            .await?
            .ok_or_else(|| QuoteError::ProductNotFound(product_code.to_string()))?;

        let schedules = self.store.product_prices(product.id).await?;
        let subtotal = resolve_price(&product, &schedules, date);

        let discount = match gift_card_code {
            Some(code) => {
                let cards = self.store.gift_cards_by_code(code).await?;
                gift_card_discount(&cards, code, date)
            }
            None => Cents::ZERO,
        };

        let quote = PriceQuote::new(subtotal, discount);
        tracing::debug!(
            subtotal = quote.subtotal.get(),
            discount = quote.discount.get(),
            total = quote.total.get(),
            "price quoted"
        );
        Ok(quote)
    }

    /// Just the total, in cents.
    pub async fn price(
        &self,
        product_code: &str,
        date: NaiveDate,
        gift_card_code: Option<&str>,
    ) -> Result<Cents, QuoteError> {
        Ok(self.quote(product_code, date, gift_card_code).await?.total)
    }
}
