//! The cart mirror: the client's cached copy of the server cart.

use crate::model::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// A (product, quantity) line. The server populates the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }

    /// Advisory stock check for the view. The server still decides.
    pub fn can_increment(&self) -> bool {
        self.quantity < self.product.stock
    }
}

/// Items in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.item(product_id).map_or(0, |item| item.quantity)
    }

    pub fn line_total(&self, product_id: &ProductId) -> Option<f64> {
        self.item(product_id).map(CartItem::line_total)
    }

    /// Sum of price × quantity over every line.
    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// The `{cart, total}` body every cart endpoint answers with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    #[serde(default)]
    pub cart: Option<Cart>,
    #[serde(default)]
    pub total: f64,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.cart.as_ref().map_or(true, Cart::is_empty)
    }
}
