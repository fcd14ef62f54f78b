//! # Cart API
//!
//! Every cart mutation answers with the full `{cart, total}` so the caller can replace
//! its mirror without a follow-up fetch. Clearing is the exception: its body is
//! ignored and the caller resets locally.

use crate::api::decode;
use crate::model::{CartView, ProductId};
use serde::Serialize;
use std::sync::Arc;
use store_framework::{path_segment, ApiError, ApiRequest, Transport};
use tracing::{debug, instrument};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartLine<'a> {
    product_id: &'a ProductId,
    quantity: u32,
}

#[derive(Clone)]
pub struct CartApi {
    transport: Arc<dyn Transport>,
}

impl CartApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<CartView, ApiError> {
        debug!("Sending request");
        decode(self.transport.send(ApiRequest::get("/cart")).await?)
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartView, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::post("/cart").with_json(&CartLine {
            product_id,
            quantity,
        })?;
        decode(self.transport.send(request).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartView, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::put("/cart").with_json(&CartLine {
            product_id,
            quantity,
        })?;
        decode(self.transport.send(request).await?)
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, product_id: &ProductId) -> Result<CartView, ApiError> {
        debug!("Sending request");
        let path = format!("/cart/items/{}", path_segment(product_id.as_str()));
        decode(self.transport.send(ApiRequest::delete(path)).await?)
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        debug!("Sending request");
        self.transport.send(ApiRequest::delete("/cart")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store_framework::mock::MockTransport;
    use store_framework::Method;

    #[tokio::test]
    async fn test_add_item_sends_camel_case_body() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/cart")
            .return_ok(json!({"cart": {"items": []}, "total": 0}));

        let api = CartApi::new(Arc::new(mock.clone()));
        let view = api.add_item(&"p1".into(), 2).await.unwrap();
        assert!(view.is_empty());

        let calls = mock.calls();
        assert_eq!(calls[0].body, Some(json!({"productId": "p1", "quantity": 2})));
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_item_targets_line_path() {
        let mock = MockTransport::new();
        mock.expect(Method::Delete, "/cart/items/p7")
            .return_ok(json!({"cart": null, "total": 0}));

        let api = CartApi::new(Arc::new(mock.clone()));
        api.remove_item(&"p7".into()).await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_item_escapes_product_id() {
        let mock = MockTransport::new();
        mock.expect(Method::Delete, "/cart/items/p%2F7%20x")
            .return_ok(json!({"cart": null, "total": 0}));

        let api = CartApi::new(Arc::new(mock.clone()));
        api.remove_item(&"p/7 x".into()).await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_clear_ignores_body() {
        let mock = MockTransport::new();
        mock.expect(Method::Delete, "/cart").return_ok(json!({}));

        let api = CartApi::new(Arc::new(mock.clone()));
        assert_eq!(api.clear().await, Ok(()));
    }
}
