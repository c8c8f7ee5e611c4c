use std::sync::Arc;

use smilewidgets_infra::{
    AppConfig, InMemoryPricingStore, PostgresPricingStore, PriceQuoter, PricingStore, StoreError,
};

/// Shared handler state: the store and the quoter built on top of it.
#[derive(Clone)]
pub struct AppServices {
    quoter: PriceQuoter<Arc<dyn PricingStore>>,
}

impl AppServices {
    pub fn new(store: Arc<dyn PricingStore>) -> Self {
        Self {
            quoter: PriceQuoter::new(store),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPricingStore::new()))
    }

    pub fn quoter(&self) -> &PriceQuoter<Arc<dyn PricingStore>> {
        &self.quoter
    }

    pub fn store(&self) -> &Arc<dyn PricingStore> {
        self.quoter.store()
    }
}

/// Pick the store from configuration: Postgres when `DATABASE_URL` is set,
/// otherwise in-memory.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    match &config.database_url {
        Some(url) => {
            let store = PostgresPricingStore::connect(url).await?;
            tracing::info!("using postgres pricing store");
            Ok(AppServices::new(Arc::new(store)))
        }
        None => {
            tracing::info!("DATABASE_URL not set; using in-memory pricing store");
            Ok(AppServices::in_memory())
        }
    }
}
