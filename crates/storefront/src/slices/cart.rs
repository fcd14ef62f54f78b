use crate::model::{Cart, CartView, ProductId};
use store_framework::{Slice, SliceStatus};

/// The cart mirror plus its status flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub cart: Option<Cart>,
    pub total: f64,
    pub status: SliceStatus,
}

impl CartState {
    pub fn is_empty(&self) -> bool {
        self.cart.as_ref().map_or(true, Cart::is_empty)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.cart.as_ref().map_or(0, |cart| cart.quantity_of(product_id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartOp {
    Fetch,
    Add { product_id: ProductId, quantity: u32 },
    Update { product_id: ProductId, quantity: u32 },
    Remove { product_id: ProductId },
    Clear,
}

#[derive(Debug)]
pub enum CartPayload {
    /// An authoritative `{cart, total}` from the server.
    Snapshot(CartView),
    Cleared,
}

impl From<CartView> for CartPayload {
    fn from(view: CartView) -> Self {
        CartPayload::Snapshot(view)
    }
}

impl From<()> for CartPayload {
    fn from(_: ()) -> Self {
        CartPayload::Cleared
    }
}

impl Slice for CartState {
    type Op = CartOp;
    type Payload = CartPayload;
    const NAME: &'static str = "cart";

    fn status(&self) -> &SliceStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut SliceStatus {
        &mut self.status
    }

    fn on_fulfilled(&mut self, _op: CartOp, payload: CartPayload) {
        match payload {
            CartPayload::Snapshot(view) => {
                self.cart = view.cart;
                self.total = view.total;
            }
            CartPayload::Cleared => {
                self.cart = None;
                self.total = 0.0;
            }
        }
    }
}
