#![allow(dead_code)]

pub mod fake_backend;

use serde_json::{json, Value};
use std::sync::Arc;
use store_framework::mock::MockTransport;
use store_framework::{StaleResponsePolicy, Transport};
use storefront::lifecycle::Storefront;
use storefront::StorefrontConfig;

pub fn config(policy: StaleResponsePolicy) -> StorefrontConfig {
    StorefrontConfig {
        stale_responses: policy,
        channel_buffer: 16,
        ..Default::default()
    }
}

pub fn storefront_with(transport: Arc<dyn Transport>) -> Storefront {
    Storefront::with_transport(transport, config(StaleResponsePolicy::Apply))
}

pub fn mocked() -> (MockTransport, Storefront) {
    let mock = MockTransport::new();
    let storefront = storefront_with(Arc::new(mock.clone()));
    (mock, storefront)
}

pub fn product(id: &str, price: f64, stock: u32) -> Value {
    json!({"_id": id, "name": format!("Product {id}"), "price": price, "stock": stock, "category": "General"})
}

/// A `{cart, total}` body with the server-computed total.
pub fn cart_body(lines: &[(&str, f64, u32)]) -> Value {
    let items: Vec<Value> = lines
        .iter()
        .map(|(id, price, quantity)| json!({"product": product(id, *price, 100), "quantity": quantity}))
        .collect();
    let total: f64 = lines.iter().map(|(_, price, quantity)| price * f64::from(*quantity)).sum();
    json!({"cart": {"_id": "cart-1", "items": items}, "total": total})
}

pub fn saved_user() -> Value {
    json!({
        "_id": "u1",
        "name": "Hina",
        "email": "hina@shop.pk",
        "address": {
            "street": "12 Mall Road",
            "city": "Lahore",
            "state": "Punjab",
            "zipCode": "54000",
            "country": "Pakistan"
        }
    })
}
