//! End-to-end test: browse → cart → order over the HTTP API.
//!
//! Starts a throwaway Postgres container, runs the embedded migrations, then
//! drives the real server with reqwest. Requires Docker:
//!
//!   cargo test --test api_test -- --include-ignored

use std::time::Duration;

use oil_shop::{build_server, create_pool, run_migrations};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

#[path = "../src/infrastructure/test_postgres.rs"]
mod test_postgres;

use test_postgres::{free_port, start_postgres};

/// Wait until the server answers any HTTP request.
async fn wait_for_http(url: &str, timeout: Duration) {
    let client = Client::new();
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if tokio::time::Instant::now() > deadline {
            panic!("{} did not become ready within {:?}", url, timeout);
        }
        if client.get(url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
}

async fn send(request: reqwest::RequestBuilder, expected: StatusCode) -> Value {
    let resp = request.send().await.expect("request failed");
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(Value::Null);
    assert_eq!(status, expected, "unexpected status, body: {}", body);
    body
}

#[tokio::test]
#[ignore = "requires docker for the postgres testcontainer"]
async fn test_cart_to_order_flow() {
    let (_container, database_url) = start_postgres().await;
    let pool = create_pool(&database_url, 4).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");

    let app_port = free_port();
    let server = build_server(pool, "127.0.0.1", app_port).expect("Failed to bind the server");
    tokio::spawn(server);

    let app = format!("http://127.0.0.1:{}", app_port);
    wait_for_http(&format!("{}/categories", app), Duration::from_secs(10)).await;
    let http = Client::new();

    // ── 1. Catalog ───────────────────────────────────────────────────────────
    let category = send(
        http.post(format!("{}/categories", app)).json(&json!({
            "name": "Light motor oils",
            "slug": "light_motors"
        })),
        StatusCode::CREATED,
    )
    .await;

    for (slug, code, price) in [("castrol-edge", "A0001", "1500.00"), ("mobil-super", "A0002", "700.00")] {
        send(
            http.post(format!("{}/products", app)).json(&json!({
                "category_id": category["id"],
                "kind": "light_motor",
                "vendor_code": code,
                "title": slug,
                "slug": slug,
                "price": price,
                "product_group": "Motor oil",
                "viscosity": "5W-30",
                "volume": "4L"
            })),
            StatusCode::CREATED,
        )
        .await;
    }

    let detail = send(
        http.get(format!("{}/products/castrol-edge", app)),
        StatusCode::OK,
    )
    .await;
    assert_eq!(detail["product"]["price"], "1500.00");
    assert_eq!(detail["specification"].as_array().map(Vec::len), Some(7));

    // ── 2. Cart ──────────────────────────────────────────────────────────────
    let customer = send(
        http.post(format!("{}/customers", app))
            .json(&json!({ "identity": "ivan@example.com" })),
        StatusCode::OK,
    )
    .await;
    let customer_id = customer["id"].as_str().expect("customer id").to_string();

    let cart = send(
        http.get(format!("{}/customers/{}/cart", app, customer_id)),
        StatusCode::OK,
    )
    .await;
    let cart_id = cart["id"].as_str().expect("cart id").to_string();
    let items = format!("{}/carts/{}/items", app, cart_id);

    let cart = send(
        http.post(format!("{}/castrol-edge", items)).json(&json!({})),
        StatusCode::OK,
    )
    .await;
    assert_eq!(cart["total_price"], "1500.00");
    assert_eq!(cart["total_products"], 1);

    let cart = send(
        http.put(format!("{}/castrol-edge", items))
            .json(&json!({ "quantity": "3" })),
        StatusCode::OK,
    )
    .await;
    assert_eq!(cart["total_price"], "4500.00");

    send(
        http.put(format!("{}/castrol-edge", items))
            .json(&json!({ "quantity": "0" })),
        StatusCode::BAD_REQUEST,
    )
    .await;

    let cart = send(
        http.post(format!("{}/mobil-super", items)).json(&json!({ "quantity": 2 })),
        StatusCode::OK,
    )
    .await;
    assert_eq!(cart["total_price"], "5900.00");
    assert_eq!(cart["total_products"], 2);

    send(
        http.post(format!("{}/mobil-super", items)).json(&json!({ "quantity": "abc" })),
        StatusCode::BAD_REQUEST,
    )
    .await;
    // 100000 * 1500.00 does not fit NUMERIC(10, 2).
    send(
        http.put(format!("{}/castrol-edge", items))
            .json(&json!({ "quantity": 100000 })),
        StatusCode::BAD_REQUEST,
    )
    .await;
    let cart = send(http.get(format!("{}/carts/{}", app, cart_id)), StatusCode::OK).await;
    assert_eq!(cart["total_price"], "5900.00");

    // ── 3. Order ─────────────────────────────────────────────────────────────
    let checkout = json!({
        "customer_id": customer_id,
        "first_name": "Ivan",
        "last_name": "Petrov",
        "phone": "+79001234567",
        "address": "Lenina 1, Moscow",
        "buying_type": "delivery",
        "order_date": "2024-06-01"
    });

    let mut invalid = checkout.clone();
    invalid["phone"] = json!("");
    let rejected = send(
        http.post(format!("{}/carts/{}/order", app, cart_id)).json(&invalid),
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await;
    assert_eq!(rejected["fields"][0]["field"], "phone");

    let order = send(
        http.post(format!("{}/carts/{}/order", app, cart_id)).json(&checkout),
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(order["status"], "new");
    assert_eq!(order["cart_id"].as_str(), Some(cart_id.as_str()));

    send(
        http.post(format!("{}/carts/{}/order", app, cart_id)).json(&checkout),
        StatusCode::CONFLICT,
    )
    .await;
    send(
        http.post(format!("{}/castrol-edge", items)).json(&json!({})),
        StatusCode::CONFLICT,
    )
    .await;

    let history = send(
        http.get(format!("{}/customers/{}/orders", app, customer_id)),
        StatusCode::OK,
    )
    .await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));

    let next_cart = send(
        http.get(format!("{}/customers/{}/cart", app, customer_id)),
        StatusCode::OK,
    )
    .await;
    assert_ne!(next_cart["id"].as_str(), Some(cart_id.as_str()));
    assert_eq!(next_cart["total_price"], "0.00");

    // ── 4. Order administration ──────────────────────────────────────────────
    let order_id = order["id"].as_str().expect("order id");
    let advanced = send(
        http.patch(format!("{}/orders/{}/status", app, order_id))
            .json(&json!({ "status": "is_ready" })),
        StatusCode::OK,
    )
    .await;
    assert_eq!(advanced["status"], "is_ready");

    send(
        http.patch(format!("{}/orders/{}/status", app, order_id))
            .json(&json!({ "status": "new" })),
        StatusCode::CONFLICT,
    )
    .await;

    let page = send(
        http.get(format!("{}/orders?page=0&limit=500", app)),
        StatusCode::OK,
    )
    .await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 100);
}
