use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coursehub_rust::error::Error;
use coursehub_rust::orders::{CheckoutReturn, CheckoutSource, OrderStatus};
use coursehub_rust::session::{CheckoutStaging, StagedCourse};
use coursehub_rust::CourseHub;

fn customer() -> coursehub_rust::orders::CustomerInfo {
    coursehub_rust::orders::CustomerInfo {
        first_name: "Amina".to_string(),
        last_name: "Khan".to_string(),
        email: "amina@example.com".to_string(),
        phone: "9999999999".to_string(),
        address: "12 MG Road".to_string(),
        city: "Pune".to_string(),
        state: "MH".to_string(),
        pincode: "411001".to_string(),
    }
}

fn staged(price: f64) -> CheckoutStaging {
    CheckoutStaging {
        courses: vec![StagedCourse {
            course_id: "c1".to_string(),
            title: "Rust Basics".to_string(),
            instructor: "Omar".to_string(),
            price,
            quantity: 1,
        }],
    }
}

#[tokio::test]
async fn staged_buy_now_wins_over_the_cart() {
    let mock_server = MockServer::start().await;
    // No cart mock: the cart must not be consulted when a staging exists.
    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);
    hub.session().stage_checkout(staged(1000.0));

    let draft = hub.orders().build_checkout(customer()).await.unwrap();
    assert_eq!(draft.source, CheckoutSource::BuyNow);
    assert_eq!(draft.items.len(), 1);
    assert_eq!(draft.subtotal, 1000.0);
    assert_eq!(draft.tax, 180.0);
    assert_eq!(draft.shipping, 500.0);
    assert_eq!(draft.total, 1680.0);
}

#[tokio::test]
async fn cart_checkout_reads_the_server_cart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "course": { "_id": "c1", "title": "A", "price": 30000 } },
                { "course": { "_id": "c2", "title": "B", "price": 30000 } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let draft = hub.orders().build_checkout(customer()).await.unwrap();
    assert_eq!(draft.source, CheckoutSource::Cart);
    assert_eq!(draft.subtotal, 60000.0);
    // above the free-shipping threshold
    assert_eq!(draft.shipping, 0.0);
}

#[tokio::test]
async fn creating_a_buy_now_order_sends_items_and_clears_staging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/create"))
        .and(body_partial_json(json!({
            "paymentMethod": "card",
            "items": [{ "courseId": "c1", "quantity": 1, "price": 1000.0 }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": { "_id": "o1", "total": 1680, "status": "pending" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);
    hub.session().stage_checkout(staged(1000.0));

    let draft = hub.orders().build_checkout(customer()).await.unwrap();
    // Staging survives draft building so a page reload can rebuild it.
    assert!(hub.session().staged_checkout().is_some());

    let order = hub.orders().create_order(&draft).await.unwrap();
    assert_eq!(order.id, "o1");
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(hub.session().staged_checkout().is_none());
}

#[tokio::test]
async fn empty_draft_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let draft = hub.orders().build_checkout(customer()).await.unwrap();
    let result = hub.orders().create_order(&draft).await;
    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[tokio::test]
async fn checkout_session_yields_the_redirect_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/create-checkout-session"))
        .and(body_partial_json(json!({ "orderId": "o1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "url": "https://pay.example.com/session/abc"
        })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let url = hub.orders().create_checkout_session("o1").await.unwrap();
    assert_eq!(url, "https://pay.example.com/session/abc");
}

#[tokio::test]
async fn cancelled_return_never_calls_the_backend() {
    let mock_server = MockServer::start().await;
    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let outcome = hub.orders().confirm_return("?canceled=true").await.unwrap();
    assert!(matches!(outcome, CheckoutReturn::Cancelled));
}

#[tokio::test]
async fn verified_return_resolves_the_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/checkout-success"))
        .and(query_param("session_id", "sess_1"))
        .and(query_param("order_id", "o1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "order": { "_id": "o1", "total": 1680, "status": "confirmed" }
        })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let outcome = hub
        .orders()
        .confirm_return("session_id=sess_1&order_id=o1")
        .await
        .unwrap();
    match outcome {
        CheckoutReturn::Verified(order) => {
            assert_eq!(order.id, "o1");
            assert_eq!(order.status, OrderStatus::Confirmed);
        }
        other => panic!("expected verified, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_return_params_fail_validation() {
    let mock_server = MockServer::start().await;
    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let result = hub.orders().confirm_return("session_id=sess_1").await;
    match result {
        Err(Error::Validation { fields, .. }) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "order_id");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn verification_failure_mentions_support() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/checkout-success"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "signature mismatch"
        })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let err = hub
        .orders()
        .confirm_return("session_id=sess_1&order_id=o1")
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("contact support"), "got: {}", message);
}

#[tokio::test]
async fn user_orders_accepts_wrapped_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/user-orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [
                { "_id": "o1", "total": 500, "status": "delivered" },
                { "_id": "o2", "total": 900, "status": "weird-new-status" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let orders = hub.orders().user_orders().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].status, OrderStatus::Delivered);
    // unrecognized statuses degrade instead of failing the whole listing
    assert_eq!(orders[1].status, OrderStatus::Unknown);
}
