//! # Observability
//!
//! Structured logging for the store. Every slice logs its transitions with a `slice`
//! field, transports log method and path, and API wrappers open a span per call.
//!
//! ```bash
//! RUST_LOG=info cargo run      # applied transitions, rejections
//! RUST_LOG=debug cargo run     # payloads and every pending transition
//! RUST_LOG=storefront=debug,store_framework=info cargo run
//! ```
//!
//! With `RUST_LOG=debug` a cart update reads roughly like:
//!
//! ```text
//! DEBUG update_item: Sending request method=PUT path=/cart
//! DEBUG Pending slice="cart" op=Update { product_id: .., quantity: 3 } seq=4
//! DEBUG Fulfilled slice="cart" op=Update { .. } payload=Snapshot(..)
//! INFO  Applied slice="cart" seq=4
//! ```

/// Installs the global subscriber. Filtering comes from `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
