//! Which price applies to a product on a given day.

use chrono::NaiveDate;

use smilewidgets_core::Cents;

use crate::product::Product;
use crate::schedule::{PriceSchedule, ProductPrice};

/// The schedule covering `date`, if any.
///
/// Siblings are kept disjoint by the overlap guard, so the first match is the
/// only match.
pub fn covering_schedule<'a, S, I>(schedules: I, date: NaiveDate) -> Option<&'a S>
where
    S: PriceSchedule + 'a,
    I: IntoIterator<Item = &'a S>,
{
    schedules.into_iter().find(|s| s.covers(date))
}

/// Effective price of `product` on `date`: the covering schedule's amount, or
/// the base price when nothing covers the day.
///
/// Schedules of other products are ignored.
pub fn resolve_price(product: &Product, schedules: &[ProductPrice], date: NaiveDate) -> Cents {
    let owned = schedules.iter().filter(|s| s.product_id == product.id);
    covering_schedule(owned, date).map_or(product.price, |schedule| {
        tracing::trace!(
            product = %product.code,
            schedule_id = %schedule.id,
            %date,
            "price schedule applies"
        );
        schedule.amount
    })
}
