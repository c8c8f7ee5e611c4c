//! `smilewidgets-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, money in cents, date ranges and the shared error model.

pub mod date_range;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use date_range::DateRange;
pub use entity::Entity;
pub use error::{DateOverlapError, DomainError, DomainResult};
pub use id::{GiftCardId, ProductId, ProductPriceId};
pub use money::Cents;
pub use value_object::ValueObject;
