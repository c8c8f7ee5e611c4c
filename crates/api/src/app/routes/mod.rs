use axum::{routing::get, Router};

pub mod gift_cards;
pub mod prices;
pub mod products;
pub mod system;

/// Unauthenticated endpoints.
pub fn public_router() -> Router {
    Router::new().route("/get-price", get(prices::get_price))
}

/// Catalogue administration; wrapped in the admin token check by `build_app`.
pub fn admin_router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/gift-cards", gift_cards::router())
}
