//! # Domain Model
//!
//! Pure data mirrored from the backend. Field names follow the backend's JSON (`_id`,
//! camelCase) through serde attributes; everything else is plain Rust.

pub mod address;
pub mod cart;
pub mod ids;
pub mod order;
pub mod pagination;
pub mod product;
pub mod user;

pub use address::{Address, AddressField};
pub use cart::{Cart, CartItem, CartView};
pub use ids::{OrderId, ProductId, UserId};
pub use order::{
    CustomerRef, NewOrder, Order, OrderCustomer, OrderItem, OrderProduct, OrderStats,
    OrderStatus, ProductRef,
};
pub use pagination::Pagination;
pub use product::{Product, ProductInput, ProductPage, ProductQuery};
pub use user::{
    AuthSession, Credentials, NewUser, PasswordChange, ProfileUpdate, Role, User, UserPage,
    UserQuery,
};
