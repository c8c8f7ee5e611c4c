use reqwest::StatusCode;
use serde_json::json;

use smilewidgets_api::app::{build_app, AppServices};

const ADMIN_TOKEN: &str = "test-admin-token";

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory store, ephemeral port.
        let app = build_app(AppServices::in_memory(), Some(ADMIN_TOKEN.to_string()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn admin_post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(ADMIN_TOKEN)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn create_product(&self, code: &str, price: u64) {
        let res = self
            .admin_post("/products", json!({ "name": "Widget", "code": code, "price": price }))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    async fn add_schedule(
        &self,
        code: &str,
        amount: u64,
        start: &str,
        end: Option<&str>,
    ) -> reqwest::Response {
        self.admin_post(
            &format!("/products/{code}/prices"),
            json!({ "amount": amount, "date_start": start, "date_end": end }),
        )
        .await
    }

    async fn price(&self, query: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/get-price?{query}")))
            .send()
            .await
            .unwrap()
    }

    async fn price_of(&self, code: &str, date: &str) -> i64 {
        let res = self.price(&format!("productCode={code}&date={date}")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        body["price"].as_i64().unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_routes_require_token() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .post(srv.url("/products"))
        .json(&json!({ "name": "Widget", "code": "w", "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = srv
        .client
        .get(srv.url("/products"))
        .bearer_auth("wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn base_price_without_schedules() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    assert_eq!(srv.price_of("sm_widget", "2018-09-01").await, 100);
}

#[tokio::test]
async fn open_ended_schedule_overrides_base_price() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    let res = srv.add_schedule("sm_widget", 200, "2018-01-01", None).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(srv.price_of("sm_widget", "2018-09-01").await, 200);
    assert_eq!(srv.price_of("sm_widget", "2017-12-31").await, 100);
}

#[tokio::test]
async fn ended_schedule_falls_back_to_base_price() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    let res = srv
        .add_schedule("sm_widget", 200, "2017-01-01", Some("2018-01-01"))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(srv.price_of("sm_widget", "2018-09-01").await, 100);
    assert_eq!(srv.price_of("sm_widget", "2018-01-01").await, 100);
    assert_eq!(srv.price_of("sm_widget", "2017-01-01").await, 200);
}

#[tokio::test]
async fn partial_overlap_is_rejected() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    let res = srv
        .add_schedule("sm_widget", 300, "2018-06-01", Some("2018-07-01"))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = srv
        .add_schedule("sm_widget", 200, "2018-01-01", Some("2018-06-15"))
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "date_overlap");
    assert_eq!(body["message"], "partially overlaps with an existing range");

    let res = srv
        .client
        .get(srv.url("/products/sm_widget/prices"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    let prices: serde_json::Value = res.json().await.unwrap();
    assert_eq!(prices.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn open_ended_cannot_swallow_later_schedule() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    let res = srv.add_schedule("sm_widget", 300, "2018-06-01", None).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = srv.add_schedule("sm_widget", 200, "2018-01-01", None).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        "an open-ended range would overlap a later existing range"
    );
}

#[tokio::test]
async fn adjacent_schedules_are_accepted() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    let first = srv
        .add_schedule("sm_widget", 150, "2019-01-01", Some("2019-06-01"))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = srv.add_schedule("sm_widget", 250, "2019-06-01", None).await;
    assert_eq!(second.status(), StatusCode::CREATED);

    assert_eq!(srv.price_of("sm_widget", "2019-05-31").await, 150);
    assert_eq!(srv.price_of("sm_widget", "2019-06-01").await, 250);
}

#[tokio::test]
async fn gift_card_is_applied_and_clamped() {
    let srv = TestServer::spawn().await;
    srv.create_product("big_widget", 500).await;

    let res = srv
        .admin_post(
            "/gift-cards",
            json!({ "code": "150OFF", "amount": 150, "date_start": "2018-07-01" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let res = srv
        .admin_post(
            "/gift-cards",
            json!({ "code": "BIG", "amount": 5000, "date_start": "2018-07-01" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = srv
        .price("productCode=big_widget&date=2018-09-01&giftCardCode=150OFF")
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["price"], 350);

    let res = srv
        .price("productCode=big_widget&date=2018-09-01&giftCardCode=BIG")
        .await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["price"], 0);

    // Before the card becomes valid.
    let res = srv
        .price("productCode=big_widget&date=2018-06-30&giftCardCode=150OFF")
        .await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["price"], 500);
}

#[tokio::test]
async fn padded_codes_match_trimmed_records() {
    let srv = TestServer::spawn().await;
    srv.create_product(" big_widget ", 500).await;

    let res = srv
        .admin_post(
            "/gift-cards",
            json!({ "code": " 150OFF ", "amount": 150, "date_start": "2018-07-01" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let card: serde_json::Value = res.json().await.unwrap();
    assert_eq!(card["code"], "150OFF");

    let res = srv
        .price("productCode=%20big_widget%20&date=2018-09-01&giftCardCode=%20150OFF%20")
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["price"], 350);

    let res = srv
        .client
        .get(srv.url("/gift-cards/%20150OFF%20"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    let cards: serde_json::Value = res.json().await.unwrap();
    assert_eq!(cards.as_array().unwrap().len(), 1);

    let res = srv
        .client
        .get(srv.url("/products/%20big_widget%20"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_price_reports_bad_requests() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    let res = srv.price("date=2018-09-01").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv.price("productCode=sm_widget").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv.price("productCode=sm_widget&date=09/01/2018").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_date");

    let res = srv.price("productCode=nope&date=2018-09-01").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_product_code_conflicts() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    let res = srv
        .admin_post("/products", json!({ "name": "Other", "code": "sm_widget", "price": 1 }))
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn schedule_update_is_revalidated_and_delete_cascades() {
    let srv = TestServer::spawn().await;
    srv.create_product("sm_widget", 100).await;

    let res = srv
        .add_schedule("sm_widget", 200, "2018-01-01", Some("2018-02-01"))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let res = srv
        .add_schedule("sm_widget", 300, "2018-03-01", Some("2018-04-01"))
        .await;
    let second: serde_json::Value = res.json().await.unwrap();
    let second_id = second["id"].as_i64().unwrap();

    // Moving the second schedule onto the first is refused.
    let res = srv
        .client
        .put(srv.url(&format!("/products/sm_widget/prices/{second_id}")))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({ "amount": 300, "date_start": "2018-01-15", "date_end": "2018-04-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(srv.price_of("sm_widget", "2018-03-15").await, 300);

    // Reshaping it within its own slot is fine.
    let res = srv
        .client
        .put(srv.url(&format!("/products/sm_widget/prices/{second_id}")))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({ "amount": 350, "date_start": "2018-02-01", "date_end": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(srv.price_of("sm_widget", "2018-09-01").await, 350);

    let res = srv
        .client
        .delete(srv.url("/products/sm_widget"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = srv.price("productCode=sm_widget&date=2018-09-01").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
