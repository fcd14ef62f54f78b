//! # Slice Messages
//!
//! The transitions a [`SliceClient`](crate::SliceClient) sends to a
//! [`SliceActor`](crate::SliceActor). Each carries a oneshot responder that fires once
//! the transition has been applied, so the sender knows the store reflects it.

use crate::error::ApiError;
use crate::slice::Slice;
use tokio::sync::oneshot;

/// Type alias for the one-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<T>;

/// A local reducer applied inside the actor without any network round-trip.
pub type LocalUpdate<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Messages understood by a slice actor.
///
/// `Pending`, `Fulfilled` and `Rejected` are the three phases of a tracked operation and
/// share its `seq`, the dispatch sequence number drawn by the client. `Local` covers
/// reducers that never touch the server (`clear_error`, `logout`, ...). `Snapshot`
/// reads the current state.
pub enum SliceRequest<S: Slice> {
    Pending {
        op: S::Op,
        seq: u64,
        respond_to: Response<()>,
    },
    Fulfilled {
        op: S::Op,
        seq: u64,
        payload: S::Payload,
        respond_to: Response<()>,
    },
    Rejected {
        op: S::Op,
        seq: u64,
        error: ApiError,
        respond_to: Response<()>,
    },
    Local {
        update: LocalUpdate<S>,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<S>,
    },
}

impl<S: Slice> std::fmt::Debug for SliceRequest<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending { op, seq, .. } => write!(f, "Pending({op:?}, seq={seq})"),
            Self::Fulfilled { op, seq, .. } => write!(f, "Fulfilled({op:?}, seq={seq})"),
            Self::Rejected { op, seq, error, .. } => {
                write!(f, "Rejected({op:?}, seq={seq}, error={error})")
            }
            Self::Local { .. } => write!(f, "Local"),
            Self::Snapshot { .. } => write!(f, "Snapshot"),
        }
    }
}
