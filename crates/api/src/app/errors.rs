use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use smilewidgets_core::DomainError;
use smilewidgets_infra::{QuoteError, StoreError};

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Database(msg) => {
            tracing::error!(error = %msg, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::DateOverlap(reason) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "date_overlap",
            reason.to_string(),
        ),
    }
}

pub fn quote_error_to_response(err: QuoteError) -> axum::response::Response {
    match err {
        QuoteError::ProductNotFound(code) => json_error(
            StatusCode::NOT_FOUND,
            "product_not_found",
            format!("no product with code '{code}'"),
        ),
        QuoteError::Store(e) => store_error_to_response(e),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use smilewidgets_core::DateOverlapError;

    use super::*;

    #[test]
    fn overlap_maps_to_unprocessable_entity() {
        let resp = store_error_to_response(DateOverlapError::PartialOverlap.into());
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let resp = store_error_to_response(StoreError::Domain(DomainError::validation("bad")));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_id_maps_to_bad_request() {
        let resp = domain_error_to_response(DomainError::invalid_id("ProductPriceId: x"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_product_maps_to_not_found() {
        let resp = quote_error_to_response(QuoteError::ProductNotFound("x".to_string()));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_code_maps_to_conflict() {
        let resp = store_error_to_response(StoreError::Conflict("code taken".to_string()));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
