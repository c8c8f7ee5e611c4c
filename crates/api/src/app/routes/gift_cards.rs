use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use smilewidgets_infra::PricingStore;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_gift_card))
        .route("/:code", get(gift_cards_by_code))
}

pub async fn create_gift_card(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateGiftCardRequest>,
) -> axum::response::Response {
    let card = match body.into_new_gift_card() {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services.store().create_gift_card(card).await {
        Ok(card) => (StatusCode::CREATED, Json(dto::gift_card_to_json(&card))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn gift_cards_by_code(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    match services.store().gift_cards_by_code(code.trim()).await {
        Ok(cards) => Json(serde_json::Value::Array(
            cards.iter().map(dto::gift_card_to_json).collect(),
        ))
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
