use crate::error::StorefrontError;
use crate::slices::{AuthState, CartState, OrdersState, ProductsState, UsersState};
use store_framework::{Slice, SliceActor, SliceClient, StaleResponsePolicy};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The client-side state container: one running actor per slice.
pub struct Store {
    pub cart: SliceClient<CartState>,
    pub orders: SliceClient<OrdersState>,
    pub products: SliceClient<ProductsState>,
    pub users: SliceClient<UsersState>,
    pub auth: SliceClient<AuthState>,

    /// Task handles for all running slice actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

fn spawn<S: Slice>(
    buffer_size: usize,
    policy: StaleResponsePolicy,
    handles: &mut Vec<JoinHandle<()>>,
) -> SliceClient<S> {
    let (actor, client) = SliceActor::<S>::new(buffer_size, policy);
    handles.push(tokio::spawn(actor.run()));
    client
}

impl Store {
    /// Spawns every slice actor. Must be called inside a Tokio runtime.
    pub fn new(buffer_size: usize, policy: StaleResponsePolicy) -> Self {
        let mut handles = Vec::with_capacity(5);
        let cart = spawn(buffer_size, policy, &mut handles);
        let orders = spawn(buffer_size, policy, &mut handles);
        let products = spawn(buffer_size, policy, &mut handles);
        let users = spawn(buffer_size, policy, &mut handles);
        let auth = spawn(buffer_size, policy, &mut handles);

        info!(slices = handles.len(), ?policy, "Store started");
        Self {
            cart,
            orders,
            products,
            users,
            auth,
            handles,
        }
    }

    /// Drops this store's clients and waits for every actor to finish.
    ///
    /// Clones held elsewhere keep their actor alive, so release them first.
    pub async fn shutdown(self) -> Result<(), StorefrontError> {
        info!("Shutting down store...");

        drop(self.cart);
        drop(self.orders);
        drop(self.products);
        drop(self.users);
        drop(self.auth);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Slice task failed: {:?}", e);
                return Err(StorefrontError::Shutdown(e.to_string()));
            }
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stores_are_isolated() {
        let first = Store::new(4, StaleResponsePolicy::Apply);
        let second = Store::new(4, StaleResponsePolicy::Apply);

        first
            .cart
            .apply(|state| state.total = 99.0)
            .await
            .unwrap();

        assert_eq!(first.cart.snapshot().await.unwrap().total, 99.0);
        assert_eq!(second.cart.snapshot().await.unwrap().total, 0.0);

        first.shutdown().await.unwrap();
        second.shutdown().await.unwrap();
    }
}
