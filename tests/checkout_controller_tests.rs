use axum::{
    http::{header, Request, StatusCode},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use techmarket::{config, controllers::checkout_controller, services, AppState};
use tower::ServiceExt;

async fn test_state() -> AppState {
    let mut settings = config::load();
    settings.razorpay_key_id = String::new();
    settings.razorpay_key_secret = String::new();
    settings.smtp_host = String::new();
    settings.smtp_user = String::new();
    settings.gemini_api_key = String::new();

    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("sqlite pool");
    services::db_init::ensure_schema(&db).await.expect("schema");

    AppState {
        db,
        razorpay: services::razorpay::RazorpayClient::new(
            settings.razorpay_key_id.clone(),
            settings.razorpay_key_secret.clone(),
        ),
        gemini: services::gemini::GeminiClient::new(settings.gemini_api_key.clone()),
        mailer: services::mailer::Mailer::disabled(),
        settings,
    }
}

async fn response_body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

fn sample_callback(payment_id: &str) -> serde_json::Value {
    json!({
        "razorpay_order_id": "order_mock_1700000000000",
        "razorpay_payment_id": payment_id,
        "razorpay_signature": "mock_signature",
        "orderDetails": {
            "amount": 11498.0,
            "customerName": "Asha Verma",
            "customerEmail": "asha@example.com",
            "address": "14 MG Road, Bengaluru - 560001",
            "gps": { "latitude": 12.9716, "longitude": 77.5946 },
            "items": [
                {
                    "id": 1,
                    "title": "UltraCharge 20000mAh Power Bank",
                    "description": "High-capacity portable charger.",
                    "price": 2499.0,
                    "category": "Power Banks",
                    "image": "https://example.com/powerbank.jpg",
                    "seller_name": "TechGear Official",
                    "created_at": 1700000000000i64
                },
                {
                    "id": 2,
                    "title": "SonicBlast Pro Wireless Speaker",
                    "description": "360-degree sound.",
                    "price": 8999.0,
                    "category": "Speakers",
                    "image": "https://example.com/speaker.jpg",
                    "seller_name": "AudioMaster",
                    "created_at": 1700000000000i64
                }
            ]
        },
        "isMock": true
    })
}

#[tokio::test]
async fn create_order_without_gateway_keys_returns_mock() {
    let state = test_state().await;
    let app = Router::new()
        .route("/api/create-order", post(checkout_controller::post_create_order))
        .with_state(state);

    let res = app
        .oneshot(json_request("/api/create-order", json!({ "amount": 499.0 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_json(res).await;
    assert_eq!(body["mock"], json!(true));
    assert_eq!(body["currency"], json!("INR"));
    // Minor units: 100x the requested major-unit amount.
    assert_eq!(body["amount"], json!(49900));
    assert!(body["id"].as_str().unwrap().starts_with("order_mock_"));
}

#[tokio::test]
async fn create_order_accepts_zero_amount() {
    let state = test_state().await;
    let app = Router::new()
        .route("/api/create-order", post(checkout_controller::post_create_order))
        .with_state(state);

    let res = app
        .oneshot(json_request("/api/create-order", json!({ "amount": 0.0 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_json(res).await;
    assert_eq!(body["amount"], json!(0));
    assert_eq!(body["mock"], json!(true));
}

#[tokio::test]
async fn create_order_accepts_negative_amount() {
    // No amount validation exists anywhere on this path.
    let state = test_state().await;
    let app = Router::new()
        .route("/api/create-order", post(checkout_controller::post_create_order))
        .with_state(state);

    let res = app
        .oneshot(json_request("/api/create-order", json!({ "amount": -5.0 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_json(res).await;
    assert_eq!(body["amount"], json!(-500));
}

#[tokio::test]
async fn verify_payment_records_one_paid_order() {
    let state = test_state().await;
    let db = state.db.clone();
    let app = Router::new()
        .route("/api/verify-payment", post(checkout_controller::post_verify_payment))
        .with_state(state);

    let res = app
        .oneshot(json_request("/api/verify-payment", sample_callback("pay_mock_1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_json(res).await;
    assert_eq!(body["success"], json!(true));

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM orders")
        .fetch_one(&db)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let (status, currency, gps): (String, String, Option<String>) = sqlx::query_as(
        "SELECT status, currency, gps_coordinates FROM orders WHERE gateway_payment_id = 'pay_mock_1'",
    )
    .fetch_one(&db)
    .await
    .unwrap();
    assert_eq!(status, "PAID");
    assert_eq!(currency, "INR");
    assert!(gps.unwrap().contains("12.9716"));
}

#[tokio::test]
async fn verify_payment_accepts_any_signature() {
    // The signature is recorded as-is and never checked against the
    // gateway secret; a malformed value still yields success.
    let state = test_state().await;
    let db = state.db.clone();
    let app = Router::new()
        .route("/api/verify-payment", post(checkout_controller::post_verify_payment))
        .with_state(state);

    let mut callback = sample_callback("pay_mock_2");
    callback["razorpay_signature"] = json!("definitely-not-a-valid-signature");

    let res = app
        .oneshot(json_request("/api/verify-payment", callback))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_json(res).await;
    assert_eq!(body["success"], json!(true));

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM orders")
        .fetch_one(&db)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_payment_ids_insert_separate_rows() {
    // No uniqueness constraint on gateway_payment_id: a repeated callback
    // for the same payment is recorded twice.
    let state = test_state().await;
    let db = state.db.clone();
    let app = Router::new()
        .route("/api/verify-payment", post(checkout_controller::post_verify_payment))
        .with_state(state);

    for _ in 0..2 {
        let res = app
            .clone()
            .oneshot(json_request("/api/verify-payment", sample_callback("pay_mock_dup")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let count: i64 = sqlx::query_scalar(
        "SELECT count(*) FROM orders WHERE gateway_payment_id = 'pay_mock_dup'",
    )
    .fetch_one(&db)
    .await
    .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn verify_payment_without_gps_stores_null_coordinates() {
    let state = test_state().await;
    let db = state.db.clone();
    let app = Router::new()
        .route("/api/verify-payment", post(checkout_controller::post_verify_payment))
        .with_state(state);

    let mut callback = sample_callback("pay_mock_3");
    callback["orderDetails"]["gps"] = json!(null);

    let res = app
        .oneshot(json_request("/api/verify-payment", callback))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let gps: Option<String> = sqlx::query_scalar(
        "SELECT gps_coordinates FROM orders WHERE gateway_payment_id = 'pay_mock_3'",
    )
    .fetch_one(&db)
    .await
    .unwrap();
    assert!(gps.is_none());
}

#[tokio::test]
async fn order_items_are_stored_as_snapshot() {
    // Items are denormalized into the order row; later catalog changes
    // cannot affect it.
    let state = test_state().await;
    let db = state.db.clone();
    let app = Router::new()
        .route("/api/verify-payment", post(checkout_controller::post_verify_payment))
        .with_state(state);

    let res = app
        .oneshot(json_request("/api/verify-payment", sample_callback("pay_mock_4")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let items: String = sqlx::query_scalar(
        "SELECT items FROM orders WHERE gateway_payment_id = 'pay_mock_4'",
    )
    .fetch_one(&db)
    .await
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&items).unwrap();
    let snapshot = parsed.as_array().unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0]["title"], json!("UltraCharge 20000mAh Power Bank"));
    assert_eq!(snapshot[1]["seller_name"], json!("AudioMaster"));
}
