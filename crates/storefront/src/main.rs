//! # Storefront Driver
//!
//! Walks one shopper flow against a live backend:
//! 1. Load configuration and connect.
//! 2. Browse the first catalog page.
//! 3. Put the first in-stock product in the cart.
//! 4. Check out with the saved address.
//!
//! Requires `STOREFRONT_API_TOKEN` for the cart and checkout steps.

use store_framework::tracing::setup_tracing;
use storefront::checkout::CheckoutError;
use storefront::lifecycle::Storefront;
use storefront::model::ProductQuery;
use storefront::{StorefrontConfig, StorefrontError};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), StorefrontError> {
    setup_tracing();

    let config = StorefrontConfig::from_env()?;
    let storefront = Storefront::new(config)?;

    let span = tracing::info_span!("browse");
    let page = storefront
        .products
        .fetch(ProductQuery::default())
        .instrument(span)
        .await?;
    info!(count = page.products.len(), "Catalog loaded");

    let Some(product) = page.products.iter().find(|p| p.in_stock()) else {
        warn!("Nothing in stock, stopping");
        return storefront.shutdown().await;
    };

    let span = tracing::info_span!("cart", product_id = %product.id);
    let outcome = async {
        let view = storefront.cart.add_item(&product.id, 1).await?;
        info!(total = view.total, "Cart updated");
        storefront.begin_checkout().await
    }
    .instrument(span)
    .await;

    match outcome {
        Ok(mut checkout) => match checkout.submit().await {
            Ok(order_id) => info!(
                order_id = %order_id,
                route = %checkout.confirmation_route().unwrap_or_default(),
                "Order placed"
            ),
            Err(CheckoutError::MissingFields(fields)) => {
                warn!(?fields, "Saved address incomplete, order not placed")
            }
            Err(e) => error!(error = %e, "Checkout failed"),
        },
        Err(e) if e.is_unauthorized() => warn!(error = %e, "Log in to use the cart"),
        Err(e) => error!(error = %e, "Cart flow failed"),
    }

    storefront.shutdown().await?;
    info!("Done");
    Ok(())
}
