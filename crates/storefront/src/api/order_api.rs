use crate::api::{decode_entity, decode_list, ResourceApi};
use crate::model::{NewOrder, Order, OrderId, OrderStatus};
use serde_json::json;
use std::sync::Arc;
use store_framework::{path_segment, ApiError, ApiRequest, Transport};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrderApi {
    transport: Arc<dyn Transport>,
}

impl OrderApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Places an order from the caller's server-side cart.
    #[instrument(skip(self, order))]
    pub async fn create(&self, order: &NewOrder) -> Result<Order, ApiError> {
        debug!(address = ?order.address, "Sending request");
        let request = ApiRequest::post("/orders").with_json(order)?;
        decode_entity(self.transport.send(request).await?, "order")
    }

    #[instrument(skip(self))]
    pub async fn mine(&self) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        decode_list(self.transport.send(ApiRequest::get("/orders/me")).await?, "orders")
    }

    /// Every order in the store. Admin only.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        decode_list(self.transport.send(ApiRequest::get("/orders")).await?, "orders")
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        debug!("Sending request");
        let path = format!("/orders/{}/status", path_segment(id.as_str()));
        let request = ApiRequest::patch(path).with_body(json!({ "status": status }));
        decode_entity(self.transport.send(request).await?, "order")
    }
}

impl ResourceApi for OrderApi {
    type Entity = Order;
    type Id = OrderId;
    const COLLECTION: &'static str = "/orders";
    const ENTITY_KEY: &'static str = "order";

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Address;
    use store_framework::mock::MockTransport;
    use store_framework::Method;

    #[tokio::test]
    async fn test_create_sends_address_only() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/orders")
            .return_ok(json!({"_id": "o1", "status": "Pending", "totalPrice": 10}));

        let api = OrderApi::new(Arc::new(mock.clone()));
        let address = Address {
            city: "Karachi".into(),
            ..Default::default()
        };
        let order = api.create(&NewOrder { address }).await.unwrap();
        assert_eq!(order.id, OrderId::from("o1"));

        let body = mock.calls()[0].body.clone().unwrap();
        assert_eq!(body.as_object().unwrap().len(), 1);
        assert_eq!(body["address"]["city"], "Karachi");
    }

    #[tokio::test]
    async fn test_status_and_lookup_paths() {
        let mock = MockTransport::new();
        mock.expect(Method::Patch, "/orders/o1/status")
            .return_ok(json!({"_id": "o1", "status": "Shipped"}));
        mock.expect(Method::Get, "/orders/o1")
            .return_ok(json!({"order": {"_id": "o1", "status": "Shipped"}}));

        let api = OrderApi::new(Arc::new(mock.clone()));
        let updated = api
            .update_status(&"o1".into(), OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert_eq!(mock.calls()[0].body, Some(json!({"status": "Shipped"})));

        let fetched = api.get_by_id(&"o1".into()).await.unwrap();
        assert_eq!(fetched, updated);
        mock.verify();
    }
}
