//! Infrastructure layer: storage, configuration and the price quoter.

pub mod config;
pub mod quote;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use quote::{PriceQuoter, QuoteError};
pub use store::{InMemoryPricingStore, PostgresPricingStore, PricingStore, StoreError, StoreResult};
