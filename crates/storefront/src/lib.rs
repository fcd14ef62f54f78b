//! # Storefront
//!
//! The client-side state layer of a storefront: it keeps a local mirror of the
//! shopper's cart, orders, the catalog and the session consistent with the backend
//! under concurrent intents and unreliable networks.
//!
//! ## Module Tour
//!
//! ### 1. The Core ([`cart_sync`], [`checkout`])
//! - [`CartSynchronizer`](cart_sync::CartSynchronizer) sends cart intents to the server
//!   and folds each authoritative `{cart, total}` back into the store.
//! - [`CheckoutOrchestrator`](checkout::CheckoutOrchestrator) turns a non-empty cart and
//!   a shipping address into exactly one order.
//!
//! ### 2. The State ([`slices`])
//! Reducers for every collection plus the handles that drive them
//! ([`Orders`](slices::Orders), [`Products`](slices::Products), [`Users`](slices::Users),
//! [`Auth`](slices::Auth)).
//!
//! ### 3. The Wire ([`api`], [`model`])
//! Typed endpoint wrappers over a [`Transport`](store_framework::Transport) and the
//! serde models they decode into.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! [`Storefront`](lifecycle::Storefront) builds the store, wires the components and
//! shuts everything down.
//!
//! ## Testing
//!
//! Pass a [`MockTransport`](store_framework::mock::MockTransport) (or any other
//! transport) to [`Storefront::with_transport`](lifecycle::Storefront::with_transport);
//! no test needs a backend.

pub mod api;
pub mod cart_sync;
pub mod checkout;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod slices;

pub use config::StorefrontConfig;
pub use error::StorefrontError;
