//! Persistence boundary for products, price schedules and gift cards.
//!
//! `PricingStore` is the only way to write a `ProductPrice`. Both
//! implementations run the overlap guard and the write under one lock or
//! transaction, so a schedule can never be stored without being checked against
//! its siblings.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use smilewidgets_core::{Cents, DateOverlapError, DomainError, ProductId, ProductPriceId};
use smilewidgets_products::{
    GiftCard, NewGiftCard, NewProduct, NewProductPrice, Product, ProductPrice,
};

#[cfg(test)]
mod contract;
pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryPricingStore;
pub use postgres::PostgresPricingStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed product, price or gift card does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was hit (e.g. duplicate product code).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The write was refused by a domain rule (validation, date overlap).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Opaque infrastructure failure.
    #[error("database error: {0}")]
    Database(String),
}

impl From<DateOverlapError> for StoreError {
    fn from(value: DateOverlapError) -> Self {
        StoreError::Domain(DomainError::DateOverlap(value))
    }
}

impl StoreError {
    /// The overlap reason, if this error is a rejected schedule.
    pub fn date_overlap(&self) -> Option<DateOverlapError> {
        match self {
            StoreError::Domain(DomainError::DateOverlap(reason)) => Some(*reason),
            _ => None,
        }
    }
}

#[async_trait]
pub trait PricingStore: Send + Sync {
    /// Create a product. Fails with `Conflict` when the code is taken.
    async fn create_product(&self, product: NewProduct) -> StoreResult<Product>;

    async fn product_by_code(&self, code: &str) -> StoreResult<Option<Product>>;

    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    async fn set_base_price(&self, product_id: ProductId, price: Cents) -> StoreResult<Product>;

    /// Delete a product together with all of its price schedules.
    async fn delete_product(&self, product_id: ProductId) -> StoreResult<()>;

    /// Schedules of a product, ordered by start date.
    async fn product_prices(&self, product_id: ProductId) -> StoreResult<Vec<ProductPrice>>;

    /// Guarded insert: validates against sibling schedules and writes atomically.
    async fn insert_product_price(
        &self,
        product_id: ProductId,
        price: NewProductPrice,
    ) -> StoreResult<ProductPrice>;

    /// Guarded update: the row is taken out of the sibling set, the new values are
    /// validated against the rest, then written. On rejection the row is unchanged.
    async fn update_product_price(
        &self,
        product_id: ProductId,
        price_id: ProductPriceId,
        price: NewProductPrice,
    ) -> StoreResult<ProductPrice>;

    async fn delete_product_price(
        &self,
        product_id: ProductId,
        price_id: ProductPriceId,
    ) -> StoreResult<()>;

    async fn create_gift_card(&self, card: NewGiftCard) -> StoreResult<GiftCard>;

    /// Every gift card row carrying `code`.
    async fn gift_cards_by_code(&self, code: &str) -> StoreResult<Vec<GiftCard>>;
}

#[async_trait]
impl<S> PricingStore for Arc<S>
where
    S: PricingStore + ?Sized,
{
    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        (**self).create_product(product).await
    }

    async fn product_by_code(&self, code: &str) -> StoreResult<Option<Product>> {
        (**self).product_by_code(code).await
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        (**self).list_products().await
    }

    async fn set_base_price(&self, product_id: ProductId, price: Cents) -> StoreResult<Product> {
        (**self).set_base_price(product_id, price).await
    }

    async fn delete_product(&self, product_id: ProductId) -> StoreResult<()> {
        (**self).delete_product(product_id).await
    }

    async fn product_prices(&self, product_id: ProductId) -> StoreResult<Vec<ProductPrice>> {
        (**self).product_prices(product_id).await
    }

    async fn insert_product_price(
        &self,
        product_id: ProductId,
        price: NewProductPrice,
    ) -> StoreResult<ProductPrice> {
        (**self).insert_product_price(product_id, price).await
    }

    async fn update_product_price(
        &self,
        product_id: ProductId,
        price_id: ProductPriceId,
        price: NewProductPrice,
    ) -> StoreResult<ProductPrice> {
        (**self).update_product_price(product_id, price_id, price).await
    }

    async fn delete_product_price(
        &self,
        product_id: ProductId,
        price_id: ProductPriceId,
    ) -> StoreResult<()> {
        (**self).delete_product_price(product_id, price_id).await
    }

    async fn create_gift_card(&self, card: NewGiftCard) -> StoreResult<GiftCard> {
        (**self).create_gift_card(card).await
    }

    async fn gift_cards_by_code(&self, code: &str) -> StoreResult<Vec<GiftCard>> {
        (**self).gift_cards_by_code(code).await
    }
}
