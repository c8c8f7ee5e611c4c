use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use smilewidgets_core::{Cents, DateRange, Entity, ProductId, ProductPriceId};

/// Shape shared by every date-bounded amount (product prices, gift cards).
pub trait PriceSchedule {
    fn amount(&self) -> Cents;

    fn range(&self) -> &DateRange;

    /// Inclusive start, exclusive end.
    fn covers(&self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }

    /// Amount rendered as dollars, e.g. `$2.00`.
    fn formatted_amount(&self) -> String {
        self.amount().to_string()
    }
}

/// A persisted, date-bounded override of a product's base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPrice {
    pub id: ProductPriceId,
    pub product_id: ProductId,
    pub amount: Cents,
    pub range: DateRange,
}

impl PriceSchedule for ProductPrice {
    fn amount(&self) -> Cents {
        self.amount
    }

    fn range(&self) -> &DateRange {
        &self.range
    }
}

impl Entity for ProductPrice {
    type Id = ProductPriceId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A product price that has not been stored yet.
///
/// The range is already validated (non-empty) by `DateRange::new`; the overlap
/// check against sibling rows happens in the store's write path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductPrice {
    pub amount: Cents,
    pub range: DateRange,
}

impl NewProductPrice {
    pub fn new(amount: Cents, range: DateRange) -> Self {
        Self { amount, range }
    }

    pub fn into_stored(self, id: ProductPriceId, product_id: ProductId) -> ProductPrice {
        ProductPrice {
            id,
            product_id,
            amount: self.amount,
            range: self.range,
        }
    }
}

impl PriceSchedule for NewProductPrice {
    fn amount(&self) -> Cents {
        self.amount
    }

    fn range(&self) -> &DateRange {
        &self.range
    }
}
