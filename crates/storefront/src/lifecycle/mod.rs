//! # Store Lifecycle
//!
//! Starting, wiring and stopping the store.
//!
//! - [`Store`] spawns one slice actor per entity collection and owns their task
//!   handles. It is an explicit value, not a global: tests build as many isolated
//!   stores as they like.
//! - [`Storefront`] puts a transport in front of a store and hands out the components
//!   the view layer talks to (cart synchronizer, checkout, entity slices).
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - every slice channel closes
//! 2. **Actors detect closure** - `recv()` returns `None` and the loop exits
//! 3. **Await completion** - every actor task is joined
//!
//! Components hold clones of the slice clients, so they must be dropped (or consumed
//! by [`Storefront::shutdown`]) before the actors can stop.

pub mod store;
pub mod storefront;

pub use store::Store;
pub use storefront::Storefront;
