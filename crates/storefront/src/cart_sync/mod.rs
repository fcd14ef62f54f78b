//! # Cart Synchronizer
//!
//! Turns cart intents (add, update, remove, clear) into server calls and folds the
//! authoritative `{cart, total}` of each response back into the cart slice. The server
//! is the source of truth: the synchronizer never computes a total, never merges lines
//! and never re-fetches after a mutation.
//!
//! ## Concurrency
//!
//! Intents are dispatched independently. Nothing here queues, debounces or cancels an
//! in-flight call, so when two mutations overlap, whichever response arrives last
//! becomes the cart. A slow add resolving after a fast remove briefly shows the add's
//! view until the next response lands. The store can be configured to drop stale
//! completions instead (see [`StaleResponsePolicy`](store_framework::StaleResponsePolicy)).
//!
//! ## Failure
//!
//! A failed call records its [`ApiError`] on the slice and leaves the previous cart in
//! place. Nothing is retried; retrying means calling the same method again.

use crate::api::CartApi;
use crate::model::{CartView, ProductId};
use crate::slices::{CartOp, CartState};
use store_framework::{ApiError, SliceClient};
use tracing::{debug, info, instrument};

/// Smallest quantity `update_item` will send.
pub const MIN_QUANTITY: u32 = 1;

#[derive(Clone)]
pub struct CartSynchronizer {
    api: CartApi,
    client: SliceClient<CartState>,
}

impl CartSynchronizer {
    pub fn new(api: CartApi, client: SliceClient<CartState>) -> Self {
        Self { api, client }
    }

    /// Loads the signed-in user's cart, replacing the mirror wholesale.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<CartView, ApiError> {
        self.client.track(CartOp::Fetch, self.api.fetch()).await
    }

    /// Adds `quantity` of a product. Stock is checked by the server, not here.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartView, ApiError> {
        let op = CartOp::Add {
            product_id: product_id.clone(),
            quantity,
        };
        let view = self
            .client
            .track(op, self.api.add_item(product_id, quantity))
            .await?;
        info!(total = view.total, "Item added");
        Ok(view)
    }

    /// Sets a line's quantity.
    ///
    /// A quantity below one is dropped before dispatch: no request, no state change,
    /// `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Option<CartView>, ApiError> {
        if quantity < MIN_QUANTITY {
            debug!("Ignoring update below minimum quantity");
            return Ok(None);
        }
        let op = CartOp::Update {
            product_id: product_id.clone(),
            quantity,
        };
        let view = self
            .client
            .track(op, self.api.update_item(product_id, quantity))
            .await?;
        Ok(Some(view))
    }

    /// Removes a line. Removing an absent product is whatever the server says it is.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, product_id: &ProductId) -> Result<CartView, ApiError> {
        let op = CartOp::Remove {
            product_id: product_id.clone(),
        };
        let view = self.client.track(op, self.api.remove_item(product_id)).await?;
        info!(total = view.total, "Item removed");
        Ok(view)
    }

    /// Empties the cart. On success the mirror is reset locally to no cart and a zero total.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.client.track(CartOp::Clear, self.api.clear()).await?;
        info!("Cart cleared");
        Ok(())
    }

    /// Empties the mirror without contacting the server.
    ///
    /// Used after the server has emptied the cart on its own, as order creation does.
    pub async fn reset_local(&self) -> Result<(), ApiError> {
        self.client
            .apply(|state| {
                state.cart = None;
                state.total = 0.0;
            })
            .await
    }

    pub async fn clear_error(&self) -> Result<(), ApiError> {
        self.client.clear_error().await
    }

    pub async fn snapshot(&self) -> Result<CartState, ApiError> {
        self.client.snapshot().await
    }
}
