mod common;

use std::sync::atomic::Ordering;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{TestEnv, order_request};
use order_management_api::error::AppError;
use order_management_api::models::{Order, order_status};
use order_management_api::services::order_service;

#[tokio::test]
async fn create_order_snapshots_prices_and_computes_total() {
    let env = TestEnv::new();
    let user_id = env.known_user();
    let p1 = Uuid::new_v4();
    let p2 = Uuid::new_v4();
    env.products.add_product(p1, dec!(100.00), "Widget", true);
    env.products.add_product(p2, dec!(50.25), "Gadget", true);

    let response = order_service::create_order(
        &env.state,
        order_request(&user_id.to_string(), vec![(p1.to_string(), 2), (p2.to_string(), 1)]),
    )
    .await
    .expect("order should be created");

    assert_eq!(response.total_amount, dec!(250.25));
    assert_eq!(response.status, order_status::PENDING);

    // A later catalog price change must not affect the stored snapshot.
    env.products.add_product(p1, dec!(999.99), "Widget", true);
    let fetched = order_service::get_order_by_id(&env.state, &response.order_id.to_string())
        .await
        .expect("order should be fetched");
    assert_eq!(fetched.total_amount, dec!(250.25));
    let item = fetched
        .items
        .iter()
        .find(|i| i.product_id == p1)
        .expect("item for p1");
    assert_eq!(item.unit_price, dec!(100.00));
}

#[tokio::test]
async fn create_order_example_shape() {
    let env = TestEnv::new();
    let user_id = env.known_user();
    let p1 = Uuid::new_v4();
    env.products.add_product(p1, dec!(100.00), "Widget", true);

    let before = Utc::now();
    let response = order_service::create_order(
        &env.state,
        order_request(&user_id.to_string(), vec![(p1.to_string(), 2)]),
    )
    .await
    .expect("order should be created");

    assert_eq!(response.total_amount, dec!(200.00));
    assert_eq!(response.status, "PENDING");
    assert_eq!(response.shipment.status.as_deref(), Some("PREPARING"));

    let tracking = response.shipment.tracking_number.expect("tracking number");
    assert!(tracking.starts_with("TRK-"));
    assert_eq!(tracking.len(), 12);
    assert!(
        tracking[4..]
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())
    );

    let shipping_date = response.shipment.shipping_date.expect("shipping date");
    let expected = before + Duration::days(3);
    assert!((shipping_date - expected).num_minutes().abs() < 5);
}

#[tokio::test]
async fn empty_item_list_persists_nothing() {
    let env = TestEnv::new();
    let user_id = env.known_user();

    let err = order_service::create_order(&env.state, order_request(&user_id.to_string(), vec![]))
        .await
        .expect_err("empty order must be rejected");

    assert!(matches!(err, AppError::InvalidOrderData(_)));
    assert!(env.orders.rows.lock().unwrap().is_empty());
    assert!(env.order_items.rows.lock().unwrap().is_empty());
    assert!(env.shipments.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_skips_product_lookups() {
    let env = TestEnv::new();
    let p1 = Uuid::new_v4();
    env.products.add_product(p1, dec!(10.00), "Widget", true);

    let err = order_service::create_order(
        &env.state,
        order_request(&Uuid::new_v4().to_string(), vec![(p1.to_string(), 1)]),
    )
    .await
    .expect_err("unknown user must be rejected");

    assert!(matches!(err, AppError::UserNotFound(_)));
    assert_eq!(env.products.product_calls(), 0);
    assert!(env.orders.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_user_id_fails_before_any_network_call() {
    let env = TestEnv::new();

    let err = order_service::create_order(
        &env.state,
        order_request("not-a-uuid", vec![(Uuid::new_v4().to_string(), 1)]),
    )
    .await
    .expect_err("malformed user id must be rejected");

    assert!(matches!(err, AppError::InvalidOrderData(_)));
    assert_eq!(env.users.exists_calls.load(Ordering::SeqCst), 0);
    assert_eq!(env.products.product_calls(), 0);
}

#[tokio::test]
async fn malformed_product_id_persists_nothing() {
    let env = TestEnv::new();
    let user_id = env.known_user();

    let err = order_service::create_order(
        &env.state,
        order_request(&user_id.to_string(), vec![("not-a-uuid".to_string(), 1)]),
    )
    .await
    .expect_err("malformed product id must be rejected");

    assert!(matches!(err, AppError::InvalidOrderData(_)));
    assert!(env.orders.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn insufficient_stock_persists_nothing() {
    let env = TestEnv::new();
    let user_id = env.known_user();
    let p1 = Uuid::new_v4();
    env.products.add_product(p1, dec!(10.00), "Widget", false);

    let err = order_service::create_order(
        &env.state,
        order_request(&user_id.to_string(), vec![(p1.to_string(), 1)]),
    )
    .await
    .expect_err("out-of-stock order must be rejected");

    assert!(matches!(err, AppError::InsufficientStock(_)));
    assert!(env.orders.rows.lock().unwrap().is_empty());
    assert!(env.products.decrease_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn stock_decrease_follows_request_item_order() {
    let env = TestEnv::new();
    let user_id = env.known_user();
    let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    for id in &ids {
        env.products.add_product(*id, dec!(5.00), "Part", true);
    }

    order_service::create_order(
        &env.state,
        order_request(
            &user_id.to_string(),
            ids.iter().map(|id| (id.to_string(), 1)).collect(),
        ),
    )
    .await
    .expect("order should be created");

    let decreased: Vec<Uuid> = env
        .products
        .decrease_log
        .lock()
        .unwrap()
        .iter()
        .map(|(id, _)| *id)
        .collect();
    assert_eq!(decreased, ids);
}

#[tokio::test]
async fn cancel_restores_stock_once() {
    let env = TestEnv::new();
    let user_id = env.known_user();
    let p1 = Uuid::new_v4();
    env.products.add_product(p1, dec!(10.00), "Widget", true);

    let response = order_service::create_order(
        &env.state,
        order_request(&user_id.to_string(), vec![(p1.to_string(), 3)]),
    )
    .await
    .expect("order should be created");
    let order_id = response.order_id.to_string();

    order_service::cancel_order(&env.state, &order_id)
        .await
        .expect("cancel should succeed");
    assert_eq!(
        *env.products.increase_log.lock().unwrap(),
        vec![(p1, 3)]
    );
    let status = env.orders.rows.lock().unwrap()[&response.order_id]
        .status
        .clone();
    assert_eq!(status, order_status::CANCELLED);

    // Second cancel is a no-op: success, zero additional restoration calls.
    order_service::cancel_order(&env.state, &order_id)
        .await
        .expect("second cancel should be a no-op");
    assert_eq!(env.products.increase_log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn cancel_delivered_order_is_a_noop() {
    let env = TestEnv::new();
    let order = delivered_order();
    env.orders.rows.lock().unwrap().insert(order.id, order.clone());

    order_service::cancel_order(&env.state, &order.id.to_string())
        .await
        .expect("cancelling a delivered order is a no-op");

    let stored = env.orders.rows.lock().unwrap()[&order.id].clone();
    assert_eq!(stored.status, order_status::DELIVERED);
    assert_eq!(stored.updated_at, order.updated_at);
    assert!(env.products.increase_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cancel_missing_or_malformed_order_id() {
    let env = TestEnv::new();

    let err = order_service::cancel_order(&env.state, &Uuid::new_v4().to_string())
        .await
        .expect_err("missing order must be reported");
    assert!(matches!(err, AppError::OrderNotFound(_)));

    let err = order_service::cancel_order(&env.state, "not-a-uuid")
        .await
        .expect_err("malformed order id must be rejected");
    assert!(matches!(err, AppError::InvalidOrderData(_)));
}

#[tokio::test]
async fn missing_linked_rows_render_placeholders() {
    let env = TestEnv::new();
    // An order whose address and shipment rows were never written.
    let order = delivered_order();
    env.orders.rows.lock().unwrap().insert(order.id, order.clone());

    let view = order_service::get_order_by_id(&env.state, &order.id.to_string())
        .await
        .expect("assembly must tolerate missing rows");

    assert!(view.shipping_address.id.is_none());
    assert!(view.shipping_address.street.is_none());
    assert!(view.billing_address.id.is_none());
    assert!(view.shipment.id.is_none());
    assert!(view.shipment.tracking_number.is_none());
    assert!(view.items.is_empty());
}

#[tokio::test]
async fn product_name_degrades_per_item() {
    let env = TestEnv::new();
    let user_id = env.known_user();
    let p1 = Uuid::new_v4();
    let p2 = Uuid::new_v4();
    env.products.add_product(p1, dec!(10.00), "Widget", true);
    env.products.add_product(p2, dec!(20.00), "Gadget", true);

    let response = order_service::create_order(
        &env.state,
        order_request(&user_id.to_string(), vec![(p1.to_string(), 1), (p2.to_string(), 1)]),
    )
    .await
    .expect("order should be created");

    // p2 disappears from the catalog; its name degrades, the view survives.
    env.products.remove_product(&p2);
    let view = order_service::get_order_by_id(&env.state, &response.order_id.to_string())
        .await
        .expect("view must survive a missing product");

    let named: Vec<(&str, Uuid)> = view
        .items
        .iter()
        .map(|i| (i.product_name.as_str(), i.product_id))
        .collect();
    assert!(named.contains(&("Widget", p1)));
    assert!(named.contains(&("Product Name Unavailable", p2)));
    let degraded = view.items.iter().find(|i| i.product_id == p2).unwrap();
    assert_eq!(degraded.unit_price, dec!(20.00));
}

#[tokio::test]
async fn round_trip_returns_creation_snapshot() {
    let env = TestEnv::new();
    let user_id = env.known_user();
    let p1 = Uuid::new_v4();
    let p2 = Uuid::new_v4();
    env.products.add_product(p1, dec!(19.99), "Widget", true);
    env.products.add_product(p2, dec!(5.00), "Gadget", true);

    let created = order_service::create_order(
        &env.state,
        order_request(&user_id.to_string(), vec![(p1.to_string(), 2), (p2.to_string(), 4)]),
    )
    .await
    .expect("order should be created");

    let fetched = order_service::get_order_by_id(&env.state, &created.order_id.to_string())
        .await
        .expect("order should be fetched");

    assert_eq!(fetched.items.len(), 2);
    for (product_id, quantity, unit_price) in
        [(p1, 2, dec!(19.99)), (p2, 4, dec!(5.00))]
    {
        let item = fetched
            .items
            .iter()
            .find(|i| i.product_id == product_id)
            .expect("item present after round trip");
        assert_eq!(item.quantity, quantity);
        assert_eq!(item.unit_price, unit_price);
    }
}

#[tokio::test]
async fn update_status_accepts_any_non_blank_string() {
    let env = TestEnv::new();
    let order = delivered_order();
    env.orders.rows.lock().unwrap().insert(order.id, order.clone());

    let view = order_service::update_order_status(&env.state, &order.id.to_string(), "ON_HOLD")
        .await
        .expect("arbitrary status must be accepted");
    assert_eq!(view.status, "ON_HOLD");

    let err = order_service::update_order_status(&env.state, &order.id.to_string(), "  ")
        .await
        .expect_err("blank status must be rejected");
    assert!(matches!(err, AppError::InvalidOrderData(_)));

    let err = order_service::update_order_status(&env.state, &Uuid::new_v4().to_string(), "X")
        .await
        .expect_err("missing order must be reported");
    assert!(matches!(err, AppError::OrderNotFound(_)));
}

#[tokio::test]
async fn list_by_user_rejects_malformed_id() {
    let env = TestEnv::new();
    let err = order_service::get_orders_by_user(&env.state, "nope")
        .await
        .expect_err("malformed user id must be rejected");
    assert!(matches!(err, AppError::InvalidOrderData(_)));
}

fn delivered_order() -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::new_v4(),
        order_date: now,
        status: order_status::DELIVERED.to_string(),
        total_amount: rust_decimal::Decimal::ZERO,
        shipping_address_id: Uuid::new_v4(),
        billing_address_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}
