mod common;

use common::{cart_body, config, mocked};
use serde_json::json;
use std::sync::Arc;
use store_framework::mock::{create_mock_transport, expect_request};
use store_framework::{ApiError, Method, StaleResponsePolicy};
use storefront::lifecycle::Storefront;
use storefront::model::ProductId;

#[tokio::test]
async fn test_total_follows_last_server_response() {
    let (mock, storefront) = mocked();
    mock.expect(Method::Post, "/cart")
        .return_ok(cart_body(&[("A", 1000.0, 2)]));
    mock.expect(Method::Post, "/cart")
        .return_ok(cart_body(&[("A", 1000.0, 2), ("B", 500.0, 1)]));
    mock.expect(Method::Delete, "/cart/items/A")
        .return_ok(cart_body(&[("B", 500.0, 1)]));

    let a = ProductId::from("A");
    let b = ProductId::from("B");

    storefront.cart.add_item(&a, 2).await.unwrap();
    storefront.cart.add_item(&b, 1).await.unwrap();

    let state = storefront.cart.snapshot().await.unwrap();
    assert_eq!(state.total, 2500.0);
    assert_eq!(state.cart.as_ref().unwrap().computed_total(), 2500.0);

    storefront.cart.remove_item(&a).await.unwrap();

    let state = storefront.cart.snapshot().await.unwrap();
    assert_eq!(state.total, 500.0);
    assert_eq!(state.quantity_of(&a), 0);
    assert_eq!(state.quantity_of(&b), 1);
    assert_eq!(state.cart.unwrap().computed_total(), 500.0);
    mock.verify();
}

#[tokio::test]
async fn test_removing_absent_item_takes_server_cart_as_is() {
    let (mock, storefront) = mocked();
    mock.expect(Method::Get, "/cart")
        .return_ok(cart_body(&[("A", 1000.0, 1)]));
    mock.expect(Method::Delete, "/cart/items/Z")
        .return_ok(cart_body(&[("A", 1000.0, 1), ("B", 500.0, 2)]));

    storefront.cart.fetch().await.unwrap();
    let z = ProductId::from("Z");
    assert_eq!(storefront.cart.snapshot().await.unwrap().quantity_of(&z), 0);

    let view = storefront.cart.remove_item(&z).await.unwrap();
    assert_eq!(view.total, 2000.0);

    // Whatever the server returns replaces the mirror, even lines it never had.
    let state = storefront.cart.snapshot().await.unwrap();
    assert_eq!(state.total, 2000.0);
    assert_eq!(state.quantity_of(&"B".into()), 2);
    assert!(state.status.error.is_none());
    mock.verify();
}

#[tokio::test]
async fn test_removing_absent_item_rejected_keeps_cart() {
    let (mock, storefront) = mocked();
    mock.expect(Method::Get, "/cart")
        .return_ok(cart_body(&[("A", 1000.0, 1)]));
    mock.expect(Method::Delete, "/cart/items/Z")
        .return_err(ApiError::from_status(404, Some("Item not found in cart".into())));

    storefront.cart.fetch().await.unwrap();
    let err = storefront.cart.remove_item(&"Z".into()).await.unwrap_err();
    assert!(err.is_not_found());

    let state = storefront.cart.snapshot().await.unwrap();
    assert_eq!(state.total, 1000.0);
    assert_eq!(state.quantity_of(&"A".into()), 1);
    assert_eq!(state.status.error, Some(err));
    assert!(!state.status.loading);
    mock.verify();
}

#[tokio::test]
async fn test_update_below_one_never_reaches_the_server() {
    let (mock, storefront) = mocked();
    mock.expect(Method::Get, "/cart")
        .return_ok(cart_body(&[("A", 1000.0, 2)]));

    storefront.cart.fetch().await.unwrap();
    let before = storefront.cart.snapshot().await.unwrap();

    let result = storefront.cart.update_item(&"A".into(), 0).await;
    assert_eq!(result, Ok(None));

    assert_eq!(mock.call_count(), 1);
    assert_eq!(storefront.cart.snapshot().await.unwrap(), before);
}

#[tokio::test]
async fn test_clear_resets_cart_and_total() {
    let (mock, storefront) = mocked();
    mock.expect(Method::Get, "/cart")
        .return_ok(cart_body(&[("A", 1000.0, 2), ("B", 500.0, 3)]));
    mock.expect(Method::Delete, "/cart")
        .return_ok(json!({"message": "Cart cleared"}));

    storefront.cart.fetch().await.unwrap();
    storefront.cart.clear().await.unwrap();

    let state = storefront.cart.snapshot().await.unwrap();
    assert!(state.cart.is_none());
    assert_eq!(state.total, 0.0);
    assert!(state.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_keeps_stale_cart() {
    let (mock, storefront) = mocked();
    mock.expect(Method::Get, "/cart")
        .return_ok(cart_body(&[("A", 1000.0, 1)]));
    mock.expect(Method::Get, "/cart")
        .return_err(ApiError::Network("Network Error".into()));

    storefront.cart.fetch().await.unwrap();
    let err = storefront.cart.fetch().await.unwrap_err();
    assert_eq!(err.message(), "Network Error");

    let state = storefront.cart.snapshot().await.unwrap();
    assert_eq!(state.total, 1000.0);
    assert_eq!(state.quantity_of(&"A".into()), 1);
    assert!(!state.status.loading);
    assert_eq!(state.status.error, Some(err));

    storefront.cart.clear_error().await.unwrap();
    assert!(storefront.cart.snapshot().await.unwrap().status.error.is_none());
}

#[tokio::test]
async fn test_server_rejection_is_recorded_not_retried() {
    let (mock, storefront) = mocked();
    mock.expect(Method::Get, "/cart")
        .return_ok(cart_body(&[("A", 1000.0, 2)]));
    mock.expect(Method::Put, "/cart").return_err(ApiError::Rejected {
        status: 400,
        message: "Insufficient stock".into(),
    });

    storefront.cart.fetch().await.unwrap();
    assert!(storefront.cart.update_item(&"A".into(), 50).await.is_err());

    let state = storefront.cart.snapshot().await.unwrap();
    assert_eq!(state.quantity_of(&"A".into()), 2);
    assert_eq!(state.status.error.unwrap().message(), "Insufficient stock");
    assert_eq!(mock.call_count(), 2);
    mock.verify();
}

/// Two updates for the same product; the one dispatched second resolves first.
async fn race_two_updates(policy: StaleResponsePolicy) -> f64 {
    let (transport, mut requests) = create_mock_transport(8);
    let storefront = Storefront::with_transport(Arc::new(transport), config(policy));
    let product = ProductId::from("A");

    let first = tokio::spawn({
        let cart = storefront.cart.clone();
        let product = product.clone();
        async move { cart.update_item(&product, 3).await }
    });
    let (first_request, first_responder) = expect_request(&mut requests).await.unwrap();
    assert_eq!(first_request.body.as_ref().unwrap()["quantity"], 3);

    let second = tokio::spawn({
        let cart = storefront.cart.clone();
        async move { cart.update_item(&product, 5).await }
    });
    let (second_request, second_responder) = expect_request(&mut requests).await.unwrap();
    assert_eq!(second_request.body.as_ref().unwrap()["quantity"], 5);

    second_responder
        .send(Ok(cart_body(&[("A", 100.0, 5)])))
        .unwrap();
    second.await.unwrap().unwrap();

    first_responder
        .send(Ok(cart_body(&[("A", 100.0, 3)])))
        .unwrap();
    first.await.unwrap().unwrap();

    let state = storefront.cart.snapshot().await.unwrap();
    assert!(!state.status.loading);
    state.total
}

#[tokio::test]
async fn test_out_of_order_responses_last_arrival_wins() {
    let total = race_two_updates(StaleResponsePolicy::Apply).await;
    assert_eq!(total, 300.0);
}

#[tokio::test]
async fn test_sequence_guard_keeps_newest_dispatch() {
    let total = race_two_updates(StaleResponsePolicy::Discard).await;
    assert_eq!(total, 500.0);
}

#[tokio::test]
async fn test_loading_is_visible_while_in_flight() {
    let (transport, mut requests) = create_mock_transport(4);
    let storefront = Storefront::with_transport(
        Arc::new(transport),
        config(StaleResponsePolicy::Apply),
    );

    let fetch = tokio::spawn({
        let cart = storefront.cart.clone();
        async move { cart.fetch().await }
    });
    let (_, responder) = expect_request(&mut requests).await.unwrap();

    let state = storefront.cart.snapshot().await.unwrap();
    assert!(state.status.loading);

    responder.send(Ok(cart_body(&[]))).unwrap();
    fetch.await.unwrap().unwrap();
    assert!(!storefront.cart.snapshot().await.unwrap().status.loading);
}
