use crate::api::{OrderApi, ResourceApi};
use crate::model::{Address, NewOrder, Order, OrderId, OrderStats, OrderStatus};
use store_framework::{ApiError, Slice, SliceClient, SliceStatus};
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersState {
    pub orders: Vec<Order>,
    /// The most recently created or looked-up order.
    pub current: Option<Order>,
    pub status: SliceStatus,
}

impl OrdersState {
    pub fn stats(&self) -> OrderStats {
        OrderStats::from_orders(&self.orders)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderOp {
    Create,
    FetchMine,
    FetchAll,
    FetchById(OrderId),
    UpdateStatus { id: OrderId, status: OrderStatus },
}

#[derive(Debug)]
pub enum OrdersPayload {
    One(Order),
    Many(Vec<Order>),
}

impl From<Order> for OrdersPayload {
    fn from(order: Order) -> Self {
        OrdersPayload::One(order)
    }
}

impl From<Vec<Order>> for OrdersPayload {
    fn from(orders: Vec<Order>) -> Self {
        OrdersPayload::Many(orders)
    }
}

impl Slice for OrdersState {
    type Op = OrderOp;
    type Payload = OrdersPayload;
    const NAME: &'static str = "orders";

    fn status(&self) -> &SliceStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut SliceStatus {
        &mut self.status
    }

    fn on_fulfilled(&mut self, op: OrderOp, payload: OrdersPayload) {
        match (op, payload) {
            (_, OrdersPayload::Many(orders)) => self.orders = orders,
            (OrderOp::Create, OrdersPayload::One(order)) => {
                self.orders.insert(0, order.clone());
                self.current = Some(order);
            }
            (OrderOp::UpdateStatus { .. }, OrdersPayload::One(order)) => {
                if let Some(existing) = self.orders.iter_mut().find(|o| o.id == order.id) {
                    *existing = order.clone();
                }
                if self.current.as_ref().is_some_and(|c| c.id == order.id) {
                    self.current = Some(order);
                }
            }
            (_, OrdersPayload::One(order)) => self.current = Some(order),
        }
    }
}

/// Order operations: history for customers, listing and status changes for admins.
#[derive(Clone)]
pub struct Orders {
    api: OrderApi,
    client: SliceClient<OrdersState>,
}

impl Orders {
    pub fn new(api: OrderApi, client: SliceClient<OrdersState>) -> Self {
        Self { api, client }
    }

    /// Places an order for the current server-side cart.
    #[instrument(skip(self, address))]
    pub async fn create(&self, address: Address) -> Result<Order, ApiError> {
        let order = NewOrder { address };
        let created = self
            .client
            .track(OrderOp::Create, self.api.create(&order))
            .await?;
        info!(order_id = %created.id, total = created.total_price, "Order created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn fetch_mine(&self) -> Result<Vec<Order>, ApiError> {
        self.client.track(OrderOp::FetchMine, self.api.mine()).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Order>, ApiError> {
        self.client.track(OrderOp::FetchAll, self.api.all()).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.client
            .track(OrderOp::FetchById(id.clone()), self.api.get_by_id(id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let op = OrderOp::UpdateStatus {
            id: id.clone(),
            status,
        };
        self.client
            .track(op, self.api.update_status(id, status))
            .await
    }

    pub async fn clear_error(&self) -> Result<(), ApiError> {
        self.client.clear_error().await
    }

    pub async fn snapshot(&self) -> Result<OrdersState, ApiError> {
        self.client.snapshot().await
    }
}
