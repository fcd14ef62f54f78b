//! An in-memory backend with the cart and order semantics the storefront relies on:
//! server-side upsert on add, stock checks, totals computed by the server and the cart
//! emptied as a side effect of placing an order.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use store_framework::{ApiError, ApiRequest, Method, Transport};

#[derive(Clone)]
struct StoredProduct {
    price: f64,
    stock: u32,
    body: Value,
}

#[derive(Default)]
struct Backend {
    products: HashMap<String, StoredProduct>,
    cart: Vec<(String, u32)>,
    orders: Vec<Value>,
    requests: Vec<(Method, String)>,
}

#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<Backend>,
}

fn rejected(message: &str) -> ApiError {
    ApiError::Rejected {
        status: 400,
        message: message.to_string(),
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, id: &str, price: f64, stock: u32) -> Self {
        let body = json!({"_id": id, "name": format!("Product {id}"), "price": price, "stock": stock});
        self.inner
            .lock()
            .products
            .insert(id.to_string(), StoredProduct { price, stock, body });
        self
    }

    pub fn set_price(&self, id: &str, price: f64) {
        if let Some(product) = self.inner.lock().products.get_mut(id) {
            product.price = price;
            product.body["price"] = json!(price);
        }
    }

    pub fn requests(&self, method: Method, path: &str) -> usize {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|(m, p)| *m == method && p == path)
            .count()
    }

    pub fn cart_len(&self) -> usize {
        self.inner.lock().cart.len()
    }

    fn line(request: &ApiRequest) -> Result<(String, u32), ApiError> {
        let body = request.body.as_ref().ok_or_else(|| rejected("Missing body"))?;
        let product_id = body["productId"]
            .as_str()
            .ok_or_else(|| rejected("productId is required"))?;
        let quantity = body["quantity"].as_u64().unwrap_or(0) as u32;
        if quantity < 1 {
            return Err(rejected("Quantity must be at least 1"));
        }
        Ok((product_id.to_string(), quantity))
    }
}

impl Backend {
    fn product(&self, id: &str) -> Result<&StoredProduct, ApiError> {
        self.products
            .get(id)
            .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))
    }

    fn cart_view(&self) -> Value {
        let mut total = 0.0;
        let items: Vec<Value> = self
            .cart
            .iter()
            .filter_map(|(id, quantity)| {
                let product = self.products.get(id)?;
                total += product.price * f64::from(*quantity);
                Some(json!({"product": product.body, "quantity": quantity}))
            })
            .collect();
        json!({"cart": {"_id": "cart-1", "items": items}, "total": total})
    }

    fn set_quantity(&mut self, id: &str, quantity: u32) -> Result<(), ApiError> {
        if quantity > self.product(id)?.stock {
            return Err(rejected("Insufficient stock"));
        }
        match self.cart.iter_mut().find(|(line, _)| line == id) {
            Some(line) => line.1 = quantity,
            None => self.cart.push((id.to_string(), quantity)),
        }
        Ok(())
    }

    fn place_order(&mut self, request: &ApiRequest) -> Result<Value, ApiError> {
        if self.cart.is_empty() {
            return Err(rejected("Cart is empty"));
        }
        let address = request
            .body
            .as_ref()
            .map(|body| body["address"].clone())
            .ok_or_else(|| rejected("Address is required"))?;

        let mut total = 0.0;
        let mut items = Vec::new();
        for (id, quantity) in &self.cart {
            let product = self.product(id)?;
            total += product.price * f64::from(*quantity);
            items.push(json!({
                "product": {"_id": id, "name": product.body["name"]},
                "quantity": quantity,
                "price": product.price
            }));
        }

        let order = json!({
            "_id": format!("order-{}", self.orders.len() + 1),
            "items": items,
            "address": address,
            "status": "Pending",
            "totalPrice": total,
            "paymentMethod": "COD",
            "createdAt": "2024-05-01T12:00:00.000Z"
        });
        self.orders.push(order.clone());
        self.cart.clear();
        Ok(order)
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let mut backend = self.inner.lock();
        backend
            .requests
            .push((request.method, request.path.clone()));

        match (request.method, request.path.as_str()) {
            (Method::Get, "/cart") => Ok(backend.cart_view()),
            (Method::Post, "/cart") => {
                let (id, quantity) = Self::line(&request)?;
                let current = backend
                    .cart
                    .iter()
                    .find(|(line, _)| *line == id)
                    .map_or(0, |(_, q)| *q);
                backend.set_quantity(&id, current + quantity)?;
                Ok(backend.cart_view())
            }
            (Method::Put, "/cart") => {
                let (id, quantity) = Self::line(&request)?;
                if !backend.cart.iter().any(|(line, _)| *line == id) {
                    return Err(ApiError::NotFound("Item not in cart".to_string()));
                }
                backend.set_quantity(&id, quantity)?;
                Ok(backend.cart_view())
            }
            (Method::Delete, "/cart") => {
                backend.cart.clear();
                Ok(json!({"message": "Cart cleared"}))
            }
            (Method::Delete, path) if path.starts_with("/cart/items/") => {
                let id = path.trim_start_matches("/cart/items/").to_string();
                backend.cart.retain(|(line, _)| *line != id);
                Ok(backend.cart_view())
            }
            (Method::Post, "/orders") => backend.place_order(&request),
            (Method::Get, "/orders/me") => Ok(Value::Array(backend.orders.clone())),
            (Method::Get, "/auth/me") => Ok(json!({"user": super::saved_user()})),
            (Method::Get, "/products") => {
                let products: Vec<Value> =
                    backend.products.values().map(|p| p.body.clone()).collect();
                let total = products.len();
                Ok(json!({
                    "products": products,
                    "pagination": {"page": 1, "limit": 12, "total": total, "totalPages": 1}
                }))
            }
            (method, path) => Err(ApiError::NotFound(format!("No route for {method} {path}"))),
        }
    }
}
