//! # Store Framework
//!
//! Building blocks for a client-side store that mirrors server-backed collections. Each
//! collection lives in a **slice** owned by its own actor, so state only ever changes at
//! well-defined points: when an operation starts and when its response arrives.
//!
//! ## Why actors for client state?
//!
//! A storefront fires requests concurrently (a quantity tweak while the cart is still
//! loading, a retry while the first attempt is in flight). If every component mutated
//! shared state from its own task, a half-applied response could be observed. Here:
//!
//! - **Isolation**: each slice is owned by one Tokio task, no locks around it
//! - **Atomic transitions**: a completed response replaces the slice data in one message
//! - **Deterministic ordering**: transitions apply in arrival order, which makes
//!   "last response wins" a property of the channel rather than of timing luck
//!
//! ## Architecture Overview
//!
//! 1. **Reducer Layer** ([`Slice`]) - how pending/fulfilled/rejected transitions change data
//! 2. **Runtime Layer** ([`SliceActor`]) - sequential application of transitions
//! 3. **Interface Layer** ([`SliceClient`]) - tracked operations, local reducers, snapshots
//! 4. **Transport Layer** ([`Transport`]) - the backend, real ([`HttpTransport`]) or mocked
//!
//! ## Example
//!
//! ```rust
//! use store_framework::{ApiError, Slice, SliceActor, SliceStatus, StaleResponsePolicy};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Greeting {
//!     text: Option<String>,
//!     status: SliceStatus,
//! }
//!
//! #[derive(Debug, Clone)]
//! enum GreetingOp { Fetch }
//!
//! impl Slice for Greeting {
//!     type Op = GreetingOp;
//!     type Payload = String;
//!     const NAME: &'static str = "greeting";
//!
//!     fn status(&self) -> &SliceStatus { &self.status }
//!     fn status_mut(&mut self) -> &mut SliceStatus { &mut self.status }
//!     fn on_fulfilled(&mut self, _op: GreetingOp, payload: String) { self.text = Some(payload); }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = SliceActor::<Greeting>::new(8, StaleResponsePolicy::Apply);
//!     tokio::spawn(actor.run());
//!
//!     client
//!         .track(GreetingOp::Fetch, async { Ok::<_, ApiError>("hello".to_string()) })
//!         .await
//!         .unwrap();
//!
//!     let state = client.snapshot().await.unwrap();
//!     assert_eq!(state.text.as_deref(), Some("hello"));
//!     assert!(!state.status.loading);
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides transports that never open a socket: a fluent
//! expectation queue and a channel-backed variant where the test decides when (and in
//! which order) each request resolves.

pub mod actor;
pub mod client;
pub mod error;
pub mod http;
pub mod message;
pub mod mock;
pub mod slice;
pub mod tracing;
pub mod transport;

pub use actor::{SliceActor, StaleResponsePolicy};
pub use client::SliceClient;
pub use error::ApiError;
pub use http::HttpTransport;
pub use message::{LocalUpdate, Response, SliceRequest};
pub use slice::{Slice, SliceStatus};
pub use transport::{path_segment, ApiRequest, Method, Transport};
