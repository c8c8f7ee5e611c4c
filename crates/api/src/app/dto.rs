use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;

use smilewidgets_core::{Cents, DateRange};
use smilewidgets_products::{
    GiftCard, NewGiftCard, NewProduct, NewProductPrice, PriceSchedule, Product, ProductPrice,
};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /get-price`.
///
/// Every field is optional here so that missing parameters produce our own 400
/// body instead of the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    #[serde(rename = "productCode")]
    pub product_code: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "giftCardCode")]
    pub gift_card_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub code: String,
    pub price: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub price: u64,
}

#[derive(Debug, Deserialize)]
pub struct SchedulePayload {
    pub amount: u64,
    pub date_start: NaiveDate,
    pub date_end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGiftCardRequest {
    pub code: String,
    pub amount: u64,
    pub date_start: NaiveDate,
    pub date_end: Option<NaiveDate>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            code: self.code,
            price: Cents::new(self.price),
        }
    }
}

impl SchedulePayload {
    pub fn into_new_price(self) -> Result<NewProductPrice, axum::response::Response> {
        let range = DateRange::new(self.date_start, self.date_end)
            .map_err(errors::domain_error_to_response)?;
        Ok(NewProductPrice::new(Cents::new(self.amount), range))
    }
}

impl CreateGiftCardRequest {
    pub fn into_new_gift_card(self) -> Result<NewGiftCard, axum::response::Response> {
        let range = DateRange::new(self.date_start, self.date_end)
            .map_err(errors::domain_error_to_response)?;
        Ok(NewGiftCard {
            code: self.code,
            amount: Cents::new(self.amount),
            range,
        })
    }
}

/// Parse a `YYYY-MM-DD` date from a query parameter.
pub fn parse_date(raw: &str) -> Result<NaiveDate, axum::response::Response> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_date",
            format!("date must be YYYY-MM-DD, got '{raw}'"),
        )
    })
}

// -------------------------
// Response mapping helpers
// -------------------------

pub fn product_to_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.get(),
        "name": product.name,
        "code": product.code,
        "price": product.price.get(),
        "display": product.to_string(),
    })
}

pub fn product_with_prices_to_json(product: &Product, prices: &[ProductPrice]) -> serde_json::Value {
    let mut body = product_to_json(product);
    body["prices"] = serde_json::Value::Array(prices.iter().map(price_to_json).collect());
    body
}

pub fn price_to_json(price: &ProductPrice) -> serde_json::Value {
    serde_json::json!({
        "id": price.id.get(),
        "product_id": price.product_id.get(),
        "amount": price.amount.get(),
        "formatted_amount": price.formatted_amount(),
        "date_start": price.range.start(),
        "date_end": price.range.end(),
    })
}

pub fn gift_card_to_json(card: &GiftCard) -> serde_json::Value {
    serde_json::json!({
        "id": card.id.get(),
        "code": card.code,
        "amount": card.amount.get(),
        "formatted_amount": card.formatted_amount(),
        "date_start": card.range.start(),
        "date_end": card.range.end(),
    })
}
