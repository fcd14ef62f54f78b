use crate::api::{AuthApi, CartApi, OrderApi, ProductApi, UserApi};
use crate::cart_sync::CartSynchronizer;
use crate::checkout::CheckoutOrchestrator;
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::lifecycle::Store;
use crate::slices::{Auth, Orders, Products, Users};
use std::sync::Arc;
use store_framework::{ApiError, HttpTransport, Transport};
use tracing::{info, instrument};

/// A running storefront: one transport, one store and the components built on them.
///
/// # Example
///
/// ```ignore
/// let storefront = Storefront::new(StorefrontConfig::from_env()?)?;
///
/// storefront.cart.add_item(&product_id, 2).await?;
/// let mut checkout = storefront.begin_checkout().await?;
/// let order_id = checkout.submit().await?;
///
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    pub cart: CartSynchronizer,
    pub orders: Orders,
    pub products: Products,
    pub users: Users,
    pub auth: Auth,
    config: StorefrontConfig,
    store: Store,
}

impl Storefront {
    /// Connects to the configured backend over HTTP.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let transport = HttpTransport::new(&config.api_base, config.timeout)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Wires every component to `transport`.
    pub fn with_transport(transport: Arc<dyn Transport>, config: StorefrontConfig) -> Self {
        if config.api_token.is_some() {
            transport.set_token(config.api_token.clone());
        }

        let store = Store::new(config.channel_buffer, config.stale_responses);
        let cart = CartSynchronizer::new(CartApi::new(transport.clone()), store.cart.clone());
        let orders = Orders::new(OrderApi::new(transport.clone()), store.orders.clone());
        let products = Products::new(ProductApi::new(transport.clone()), store.products.clone());
        let users = Users::new(UserApi::new(transport.clone()), store.users.clone());
        let auth = Auth::new(AuthApi::new(transport), store.auth.clone());

        info!(api_base = %config.api_base, "Storefront ready");
        Self {
            cart,
            orders,
            products,
            users,
            auth,
            config,
            store,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// A fresh checkout with an empty form.
    pub fn checkout(&self) -> CheckoutOrchestrator {
        CheckoutOrchestrator::new(
            self.cart.clone(),
            self.orders.clone(),
            self.config.default_country.clone(),
        )
    }

    /// Loads the cart and the signed-in user, then opens a checkout pre-filled from the
    /// user's saved address.
    #[instrument(skip(self))]
    pub async fn begin_checkout(&self) -> Result<CheckoutOrchestrator, ApiError> {
        self.cart.fetch().await?;
        let user = self.auth.fetch_me().await?;
        let mut checkout = self.checkout();
        checkout.enter(Some(&user)).await?;
        Ok(checkout)
    }

    /// Releases every component and stops the store.
    pub async fn shutdown(self) -> Result<(), StorefrontError> {
        drop(self.cart);
        drop(self.orders);
        drop(self.products);
        drop(self.users);
        drop(self.auth);
        self.store.shutdown().await
    }
}
