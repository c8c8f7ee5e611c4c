use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use smilewidgets_core::{Cents, Entity, GiftCardId, ProductId, ProductPriceId};
use smilewidgets_products::{
    GiftCard, NewGiftCard, NewProduct, NewProductPrice, Product, ProductPrice, check_no_overlap,
};

use super::{PricingStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct State {
    products: BTreeMap<ProductId, Product>,
    prices: BTreeMap<ProductPriceId, ProductPrice>,
    gift_cards: BTreeMap<GiftCardId, GiftCard>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn product(&self, product_id: ProductId) -> StoreResult<&Product> {
        self.products.get(&product_id).ok_or(StoreError::NotFound)
    }

    fn siblings(&self, product_id: ProductId, except: Option<ProductPriceId>) -> Vec<ProductPrice> {
        let mut out: Vec<ProductPrice> = self
            .prices
            .values()
            .filter(|p| p.product_id == product_id && Some(p.id) != except)
            .cloned()
            .collect();
        out.sort_by_key(|p| (p.range.start(), p.id));
        out
    }
}

fn owns_price(state: &State, product_id: ProductId, price_id: ProductPriceId) -> bool {
    state
        .prices
        .get(&price_id)
        .is_some_and(|p| p.product_id == product_id)
}

/// In-memory pricing store.
///
/// Intended for tests/dev. A single write lock covers the overlap check and the
/// insert, so concurrent writers for one product are serialized.
#[derive(Debug, Default)]
pub struct InMemoryPricingStore {
    state: RwLock<State>,
}

impl InMemoryPricingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| StoreError::Database("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| StoreError::Database("lock poisoned".to_string()))
    }
}

#[async_trait]
impl PricingStore for InMemoryPricingStore {
    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        let product = product.validate()?;
        let mut state = self.write()?;

        if state.products.values().any(|p| p.code == product.code) {
            return Err(StoreError::Conflict(format!(
                "product code '{}' already exists",
                product.code
            )));
        }

        let id = ProductId::new(state.next_id());
        let product = product.into_product(id);
        state.products.insert(product.id(), product.clone());
        Ok(product)
    }

    async fn product_by_code(&self, code: &str) -> StoreResult<Option<Product>> {
        let state = self.read()?;
        Ok(state.products.values().find(|p| p.code == code).cloned())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let state = self.read()?;
        Ok(state.products.values().cloned().collect())
    }

    async fn set_base_price(&self, product_id: ProductId, price: Cents) -> StoreResult<Product> {
        let mut state = self.write()?;
        let product = state
            .products
            .get_mut(&product_id)
            .ok_or(StoreError::NotFound)?;
        product.set_base_price(price);
        Ok(product.clone())
    }

    async fn delete_product(&self, product_id: ProductId) -> StoreResult<()> {
        let mut state = self.write()?;
        state
            .products
            .remove(&product_id)
            .ok_or(StoreError::NotFound)?;
        state.prices.retain(|_, p| p.product_id != product_id);
        Ok(())
    }

    async fn product_prices(&self, product_id: ProductId) -> StoreResult<Vec<ProductPrice>> {
        let state = self.read()?;
        state.product(product_id)?;
        Ok(state.siblings(product_id, None))
    }

    async fn insert_product_price(
        &self,
        product_id: ProductId,
        price: NewProductPrice,
    ) -> StoreResult<ProductPrice> {
        let mut state = self.write()?;
        state.product(product_id)?;

        let siblings = state.siblings(product_id, None);
        check_no_overlap(&siblings, &price.range)?;

        let id = ProductPriceId::new(state.next_id());
        let stored = price.into_stored(id, product_id);
        state.prices.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update_product_price(
        &self,
        product_id: ProductId,
        price_id: ProductPriceId,
        price: NewProductPrice,
    ) -> StoreResult<ProductPrice> {
        let mut state = self.write()?;
        state.product(product_id)?;
        if !owns_price(&state, product_id, price_id) {
            return Err(StoreError::NotFound);
        }

        let siblings = state.siblings(product_id, Some(price_id));
        check_no_overlap(&siblings, &price.range)?;

        let stored = price.into_stored(price_id, product_id);
        state.prices.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete_product_price(
        &self,
        product_id: ProductId,
        price_id: ProductPriceId,
    ) -> StoreResult<()> {
        let mut state = self.write()?;
        if !owns_price(&state, product_id, price_id) {
            return Err(StoreError::NotFound);
        }
        state.prices.remove(&price_id);
        Ok(())
    }

    async fn create_gift_card(&self, card: NewGiftCard) -> StoreResult<GiftCard> {
        let card = card.validate()?;
        let mut state = self.write()?;
        let id = GiftCardId::new(state.next_id());
        let stored = card.into_stored(id);
        state.gift_cards.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn gift_cards_by_code(&self, code: &str) -> StoreResult<Vec<GiftCard>> {
        let state = self.read()?;
        Ok(state
            .gift_cards
            .values()
            .filter(|c| c.code == code)
            .cloned()
            .collect())
    }
}
