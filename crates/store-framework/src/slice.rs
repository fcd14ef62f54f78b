//! # Slice Trait
//!
//! A `Slice` is the client-side mirror of one server-backed entity collection (the cart,
//! the order list, the product catalog page, ...). It is a plain reducer: it never performs
//! I/O itself. The [`SliceActor`](crate::SliceActor) feeds it transitions as operations
//! start and complete, and the slice decides how its data changes.
//!
//! Every operation follows the same shape:
//!
//! - **pending**: `loading = true`, `error = None`
//! - **fulfilled**: `loading = false`, data replaced through [`Slice::on_fulfilled`]
//! - **rejected**: `loading = false`, `error = Some(e)`, data left as it was
//!
//! The status bookkeeping is done by the actor. Implementors only describe how a
//! successful payload lands in their data.

use crate::error::ApiError;
use std::fmt::Debug;

/// Loading and error flags shared by every slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceStatus {
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl SliceStatus {
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self) {
        self.loading = false;
    }

    pub(crate) fn fail(&mut self, error: ApiError) {
        self.loading = false;
        self.error = Some(error);
    }
}

/// Contract for a piece of client state that mirrors a server collection.
///
/// # Associated Types
///
/// - `Op` names the operation that produced a transition (e.g. `CartOp::Remove`), so a
///   single payload type can be applied differently depending on what was asked.
/// - `Payload` is what a fulfilled operation hands back to the reducer.
///
/// # Provided Methods
///
/// [`Slice::on_pending`] and [`Slice::on_rejected`] default to doing nothing beyond the
/// status update the actor already performs.
pub trait Slice: Default + Clone + Send + Sync + 'static {
    /// Identifies which operation a transition belongs to.
    type Op: Clone + Send + Sync + Debug;

    /// Data delivered by a fulfilled operation.
    type Payload: Send + Debug;

    /// Short name used in logs.
    const NAME: &'static str;

    fn status(&self) -> &SliceStatus;

    fn status_mut(&mut self) -> &mut SliceStatus;

    /// Called after `loading` has been raised for `op`.
    fn on_pending(&mut self, _op: &Self::Op) {}

    /// Replaces data from a successful server response.
    fn on_fulfilled(&mut self, op: Self::Op, payload: Self::Payload);

    /// Called after the error has been recorded. Data must stay untouched.
    fn on_rejected(&mut self, _op: &Self::Op, _error: &ApiError) {}
}
