use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use smilewidgets_core::{Cents, ProductPriceId};
use smilewidgets_infra::PricingStore;
use smilewidgets_products::Product;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:code",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/:code/prices", get(list_prices).post(create_price))
        .route("/:code/prices/:price_id", put(update_price).delete(delete_price))
}

async fn find_product(services: &AppServices, code: &str) -> Result<Product, axum::response::Response> {
    let code = code.trim();
    match services.store().product_by_code(code).await {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(errors::json_error(
            StatusCode::NOT_FOUND,
            "product_not_found",
            format!("no product with code '{code}'"),
        )),
        Err(e) => Err(errors::store_error_to_response(e)),
    }
}

fn parse_price_id(raw: &str) -> Result<ProductPriceId, axum::response::Response> {
    raw.parse::<ProductPriceId>()
        .map_err(errors::domain_error_to_response)
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    match services.store().create_product(body.into_new_product()).await {
        Ok(product) => (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().list_products().await {
        Ok(products) => Json(serde_json::Value::Array(
            products.iter().map(dto::product_to_json).collect(),
        ))
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    let product = match find_product(&services, &code).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match services.store().product_prices(product.id).await {
        Ok(prices) => Json(dto::product_with_prices_to_json(&product, &prices)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let product = match find_product(&services, &code).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match services
        .store()
        .set_base_price(product.id, Cents::new(body.price))
        .await
    {
        Ok(product) => Json(dto::product_to_json(&product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    let product = match find_product(&services, &code).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match services.store().delete_product(product.id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_prices(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    let product = match find_product(&services, &code).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match services.store().product_prices(product.id).await {
        Ok(prices) => Json(serde_json::Value::Array(
            prices.iter().map(dto::price_to_json).collect(),
        ))
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_price(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
    Json(body): Json<dto::SchedulePayload>,
) -> axum::response::Response {
    let product = match find_product(&services, &code).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let price = match body.into_new_price() {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match services.store().insert_product_price(product.id, price).await {
        Ok(price) => (StatusCode::CREATED, Json(dto::price_to_json(&price))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_price(
    Extension(services): Extension<Arc<AppServices>>,
    Path((code, price_id)): Path<(String, String)>,
    Json(body): Json<dto::SchedulePayload>,
) -> axum::response::Response {
    let product = match find_product(&services, &code).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let price_id = match parse_price_id(&price_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let price = match body.into_new_price() {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match services
        .store()
        .update_product_price(product.id, price_id, price)
        .await
    {
        Ok(price) => Json(dto::price_to_json(&price)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_price(
    Extension(services): Extension<Arc<AppServices>>,
    Path((code, price_id)): Path<(String, String)>,
) -> axum::response::Response {
    let product = match find_product(&services, &code).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let price_id = match parse_price_id(&price_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store().delete_product_price(product.id, price_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
