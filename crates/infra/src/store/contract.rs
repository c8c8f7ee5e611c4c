//! Behaviour every `PricingStore` backend must share, run against each one.

use chrono::NaiveDate;

use smilewidgets_core::{Cents, DateRange, ProductPriceId};
use smilewidgets_products::{NewProduct, NewProductPrice};

use super::{PricingStore, StoreError};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn product(code: &str) -> NewProduct {
    NewProduct {
        name: "Widget".to_string(),
        code: code.to_string(),
        price: Cents::new(100),
    }
}

fn open_ended(amount: u64, start: NaiveDate) -> NewProductPrice {
    NewProductPrice::new(Cents::new(amount), DateRange::open_ended(start))
}

/// Updating a schedule through a product that does not own it is `NotFound`,
/// even when the new range would also overlap that product's schedules.
pub(crate) async fn foreign_price_update_is_not_found<S: PricingStore>(
    store: &S,
    code_a: &str,
    code_b: &str,
) {
    let a = store.create_product(product(code_a)).await.unwrap();
    let b = store.create_product(product(code_b)).await.unwrap();
    let owned_by_a = store
        .insert_product_price(a.id, open_ended(200, d(2018, 1, 1)))
        .await
        .unwrap();
    store
        .insert_product_price(b.id, open_ended(300, d(2018, 1, 1)))
        .await
        .unwrap();

    let err = store
        .update_product_price(b.id, owned_by_a.id, open_ended(400, d(2018, 6, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound), "got {err:?}");

    let err = store
        .update_product_price(b.id, ProductPriceId::new(i64::MAX), open_ended(400, d(2018, 6, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound), "got {err:?}");

    // Neither schedule moved.
    let a_prices = store.product_prices(a.id).await.unwrap();
    assert_eq!(a_prices, vec![owned_by_a]);
    assert_eq!(store.product_prices(b.id).await.unwrap()[0].amount, Cents::new(300));

    store.delete_product(a.id).await.unwrap();
    store.delete_product(b.id).await.unwrap();
}
