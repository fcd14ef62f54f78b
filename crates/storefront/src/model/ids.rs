//! Server-issued identifiers. The backend uses opaque string ids (`_id`), wrapped here so
//! a product id can never be passed where an order id is expected.

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

use serde::{Deserialize, Serialize};
use std::fmt::Display;

string_id!(
    /// Type-safe identifier for Products.
    ProductId
);
string_id!(
    /// Type-safe identifier for Orders.
    OrderId
);
string_id!(
    /// Type-safe identifier for Users.
    UserId
);
