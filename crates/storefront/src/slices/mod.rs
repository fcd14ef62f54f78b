//! # Entity Slices
//!
//! One slice per server-backed collection. Each file holds the reducer state (a
//! [`Slice`](store_framework::Slice) implementation) and the handle the rest of the app
//! calls. Handles never mutate state directly: they run the API call inside
//! [`SliceClient::track`](store_framework::SliceClient::track) and the slice actor
//! applies the outcome.
//!
//! Every list fetch replaces prior data wholesale. There is no merge and no cache
//! beyond the last successful response.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

pub use auth::{Auth, AuthOp, AuthPayload, AuthState};
pub use cart::{CartOp, CartPayload, CartState};
pub use orders::{OrderOp, Orders, OrdersPayload, OrdersState};
pub use products::{ProductOp, Products, ProductsPayload, ProductsState};
pub use users::{UserOp, Users, UsersPayload, UsersState};
