use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// `GET /get-price?productCode=..&date=YYYY-MM-DD[&giftCardCode=..]`
pub async fn get_price(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::PriceQuery>,
) -> axum::response::Response {
    let product_code = query.product_code.as_deref().map(str::trim);
    let Some(product_code) = product_code.filter(|c| !c.is_empty()) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "missing_parameter",
            "productCode is required",
        );
    };
    let Some(raw_date) = query.date.as_deref() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "missing_parameter", "date is required");
    };
    let date = match dto::parse_date(raw_date) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let gift_card_code = query.gift_card_code.as_deref().map(str::trim).filter(|c| !c.is_empty());

    match services.quoter().price(product_code, date, gift_card_code).await {
        Ok(total) => Json(serde_json::json!({ "price": total.get() })).into_response(),
        Err(e) => errors::quote_error_to_response(e),
    }
}
