use crate::api::{ProductApi, ResourceApi};
use crate::model::{Pagination, Product, ProductId, ProductInput, ProductPage, ProductQuery};
use store_framework::{ApiError, Slice, SliceClient, SliceStatus};
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsState {
    pub products: Vec<Product>,
    pub pagination: Option<Pagination>,
    /// The product shown on a detail view.
    pub current: Option<Product>,
    pub status: SliceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductOp {
    Fetch(ProductQuery),
    FetchById(ProductId),
    Create,
    Update(ProductId),
    Delete(ProductId),
}

#[derive(Debug)]
pub enum ProductsPayload {
    Page(ProductPage),
    One(Product),
    Done,
}

impl From<ProductPage> for ProductsPayload {
    fn from(page: ProductPage) -> Self {
        ProductsPayload::Page(page)
    }
}

impl From<Product> for ProductsPayload {
    fn from(product: Product) -> Self {
        ProductsPayload::One(product)
    }
}

impl From<()> for ProductsPayload {
    fn from(_: ()) -> Self {
        ProductsPayload::Done
    }
}

impl Slice for ProductsState {
    type Op = ProductOp;
    type Payload = ProductsPayload;
    const NAME: &'static str = "products";

    fn status(&self) -> &SliceStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut SliceStatus {
        &mut self.status
    }

    fn on_fulfilled(&mut self, op: ProductOp, payload: ProductsPayload) {
        match (op, payload) {
            (_, ProductsPayload::Page(page)) => {
                self.products = page.products;
                self.pagination = page.pagination;
            }
            (_, ProductsPayload::One(product)) => self.current = Some(product),
            (ProductOp::Delete(id), ProductsPayload::Done) => {
                self.products.retain(|product| product.id != id);
                if self.current.as_ref().is_some_and(|p| p.id == id) {
                    self.current = None;
                }
            }
            (_, ProductsPayload::Done) => {}
        }
    }
}

/// Catalog browsing plus the admin product mutations.
///
/// Admin mutations only record their result; the admin screen re-fetches the list.
#[derive(Clone)]
pub struct Products {
    api: ProductApi,
    client: SliceClient<ProductsState>,
}

impl Products {
    pub fn new(api: ProductApi, client: SliceClient<ProductsState>) -> Self {
        Self { api, client }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, query: ProductQuery) -> Result<ProductPage, ApiError> {
        self.client
            .track(ProductOp::Fetch(query.clone()), self.api.list(&query))
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.client
            .track(ProductOp::FetchById(id.clone()), self.api.get_by_id(id))
            .await
    }

    /// Leaves the detail view.
    pub async fn clear_current(&self) -> Result<(), ApiError> {
        self.client.apply(|state| state.current = None).await
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let product = self
            .client
            .track(ProductOp::Create, self.api.create(input))
            .await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &ProductId, input: &ProductInput) -> Result<Product, ApiError> {
        self.client
            .track(ProductOp::Update(id.clone()), self.api.update(id, input))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), ApiError> {
        self.client
            .track(ProductOp::Delete(id.clone()), self.api.delete(id))
            .await
    }

    pub async fn clear_error(&self) -> Result<(), ApiError> {
        self.client.clear_error().await
    }

    pub async fn snapshot(&self) -> Result<ProductsState, ApiError> {
        self.client.snapshot().await
    }
}
