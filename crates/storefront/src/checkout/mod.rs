//! # Checkout Orchestrator
//!
//! Turns a non-empty cart plus a shipping address into exactly one `POST /orders`.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──accepted──▶ Succeeded { order_id } (terminal)
//!  │                    └──────rejected───▶ Failed { error }
//!  └─ empty cart ─▶ CartEmpty   (no request)
//! ```
//!
//! The form is owned here and only changes through [`CheckoutOrchestrator::set_field`].
//! It is never reset, so a failed submission leaves every entered value in place.
//! Payment is always cash on delivery and is not part of the request.
//!
//! Order creation empties the cart on the server. The orchestrator never calls
//! `DELETE /cart`; it empties the cart mirror locally once the order is accepted.

use crate::cart_sync::CartSynchronizer;
use crate::model::{Address, AddressField, OrderId, User};
use crate::slices::Orders;
use store_framework::ApiError;
use tracing::{debug, info, instrument, warn};

/// Where a checkout attempt stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    CartEmpty,
    Submitting,
    Succeeded {
        order_id: OrderId,
    },
    Failed {
        error: ApiError,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    CartEmpty,

    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<AddressField>),

    #[error(transparent)]
    Api(#[from] ApiError),
}

fn join_fields(fields: &[AddressField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One checkout attempt: the shipping form and its submission state.
pub struct CheckoutOrchestrator {
    cart: CartSynchronizer,
    orders: Orders,
    form: Address,
    phase: CheckoutPhase,
    default_country: String,
}

impl CheckoutOrchestrator {
    pub fn new(cart: CartSynchronizer, orders: Orders, default_country: impl Into<String>) -> Self {
        let default_country = default_country.into();
        let form = Address {
            country: default_country.clone(),
            ..Default::default()
        };
        Self {
            cart,
            orders,
            form,
            phase: CheckoutPhase::Idle,
            default_country,
        }
    }

    /// Opens the form for `user`.
    ///
    /// A saved address pre-populates the form (blank parts stay blank, a blank country
    /// falls back to the default). The phase becomes `CartEmpty` when the cart mirror
    /// has nothing in it, `Idle` otherwise.
    #[instrument(skip(self, user))]
    pub async fn enter(&mut self, user: Option<&User>) -> Result<(), ApiError> {
        if let Some(saved) = user.and_then(User::saved_address) {
            self.form = saved.clone();
            if self.form.country.trim().is_empty() {
                self.form.country = self.default_country.clone();
            }
        }
        self.phase = if self.cart.snapshot().await?.is_empty() {
            CheckoutPhase::CartEmpty
        } else {
            CheckoutPhase::Idle
        };
        Ok(())
    }

    pub fn set_field(&mut self, field: AddressField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn form(&self) -> &Address {
        &self.form
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Places the order with the current form values.
    ///
    /// Returns the new order's id. An empty cart or an incomplete form is refused
    /// locally without contacting the server. Once an order has been placed, further
    /// calls return its id again without another request.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<OrderId, CheckoutError> {
        if let CheckoutPhase::Succeeded { order_id } = &self.phase {
            debug!(%order_id, "Order already placed");
            return Ok(order_id.clone());
        }

        if self.cart.snapshot().await?.is_empty() {
            warn!("Checkout attempted with an empty cart");
            self.phase = CheckoutPhase::CartEmpty;
            return Err(CheckoutError::CartEmpty);
        }

        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "Shipping address incomplete");
            self.phase = CheckoutPhase::Idle;
            return Err(CheckoutError::MissingFields(missing));
        }

        self.phase = CheckoutPhase::Submitting;
        match self.orders.create(self.form.clone()).await {
            Ok(order) => {
                info!(order_id = %order.id, "Checkout succeeded");
                if let Err(error) = self.cart.reset_local().await {
                    warn!(error = %error, "Could not reset cart mirror");
                }
                self.phase = CheckoutPhase::Succeeded {
                    order_id: order.id.clone(),
                };
                Ok(order.id)
            }
            Err(error) => {
                warn!(error = %error, "Checkout failed");
                self.phase = CheckoutPhase::Failed {
                    error: error.clone(),
                };
                Err(CheckoutError::Api(error))
            }
        }
    }

    /// The confirmation route once an order has been placed.
    pub fn confirmation_route(&self) -> Option<String> {
        match &self.phase {
            CheckoutPhase::Succeeded { order_id } => Some(format!("/order-success/{order_id}")),
            _ => None,
        }
    }
}
