use crate::api::{decode, decode_entity, ResourceApi};
use crate::model::{Product, ProductId, ProductInput, ProductPage, ProductQuery};
use std::sync::Arc;
use store_framework::{path_segment, ApiError, ApiRequest, Transport};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductApi {
    transport: Arc<dyn Transport>,
}

impl ProductApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::get("/products").with_query(query.to_query());
        decode(self.transport.send(request).await?)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ProductInput) -> Result<Product, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::post("/products").with_json(input)?;
        decode_entity(self.transport.send(request).await?, "product")
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &ProductId, input: &ProductInput) -> Result<Product, ApiError> {
        debug!("Sending request");
        let path = format!("/products/{}", path_segment(id.as_str()));
        let request = ApiRequest::put(path).with_json(input)?;
        decode_entity(self.transport.send(request).await?, "product")
    }
}

impl ResourceApi for ProductApi {
    type Entity = Product;
    type Id = ProductId;
    const COLLECTION: &'static str = "/products";
    const ENTITY_KEY: &'static str = "product";

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store_framework::mock::MockTransport;
    use store_framework::Method;

    #[tokio::test]
    async fn test_list_passes_query() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/products").return_ok(json!({
            "products": [{"_id": "p1", "name": "Lamp", "price": 1000, "stock": 3}],
            "pagination": {"page": 2, "limit": 12, "total": 13, "totalPages": 2}
        }));

        let api = ProductApi::new(Arc::new(mock.clone()));
        let page = api
            .list(&ProductQuery::default().page(2).category("Home"))
            .await
            .unwrap();
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.pagination.unwrap().total_pages, 2);

        let request = &mock.calls()[0];
        assert_eq!(request.query_param("page"), Some("2"));
        assert_eq!(request.query_param("category"), Some("Home"));
        assert_eq!(request.query_param("search"), None);
    }

    #[tokio::test]
    async fn test_delete_uses_resource_path() {
        let mock = MockTransport::new();
        mock.expect(Method::Delete, "/products/p1")
            .return_ok(json!({"message": "Product deleted"}));

        let api = ProductApi::new(Arc::new(mock.clone()));
        api.delete(&"p1".into()).await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_by_id_escapes_id() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/products/lamp%3Fblue")
            .return_ok(json!({"product": {"_id": "lamp?blue", "name": "Lamp", "price": 900}}));

        let api = ProductApi::new(Arc::new(mock.clone()));
        let product = api.get_by_id(&"lamp?blue".into()).await.unwrap();
        assert_eq!(product.id.as_str(), "lamp?blue");
        mock.verify();
    }
}
