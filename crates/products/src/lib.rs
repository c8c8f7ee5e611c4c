//! Products & pricing domain module.
//!
//! This crate contains the business rules for product prices, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage):
//!
//! - `resolver`: which price applies to a product on a given day
//! - `overlap`: the write-time guard keeping a product's schedules disjoint
//! - `gift_card`: gift-card discounts for a day
//! - `quote`: combining the two into a final price

pub mod gift_card;
pub mod overlap;
pub mod product;
pub mod quote;
pub mod resolver;
pub mod schedule;

pub use gift_card::{GiftCard, NewGiftCard, gift_card_discount};
pub use overlap::check_no_overlap;
pub use product::{NewProduct, Product};
pub use quote::PriceQuote;
pub use resolver::{covering_schedule, resolve_price};
pub use schedule::{NewProductPrice, PriceSchedule, ProductPrice};
