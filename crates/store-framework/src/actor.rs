//! # Slice Actor
//!
//! The `SliceActor` is the single owner of one slice's state. It runs in its own Tokio
//! task and applies transitions strictly one at a time, in the order they arrive on its
//! channel. Operations suspend only while waiting for the network; the state itself is
//! mutated exclusively here, at completion points, so no locking is needed.
//!
//! ## Ordering
//!
//! Two operations on the same slice may be in flight at once. Nothing queues or cancels
//! them. Under [`StaleResponsePolicy::Apply`] the response that *arrives* last becomes the
//! state, regardless of dispatch order. [`StaleResponsePolicy::Discard`] instead drops
//! completions whose dispatch sequence is older than one already applied.

use crate::client::SliceClient;
use crate::message::SliceRequest;
use crate::slice::Slice;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What to do with a completion that was dispatched before one already applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaleResponsePolicy {
    /// Last response to arrive wins.
    #[default]
    Apply,
    /// Completions older than the newest applied one are ignored. The caller of
    /// [`SliceClient::track`] still receives its own result.
    Discard,
}

/// The server half of a slice: owns the state and the receiving end of the channel.
pub struct SliceActor<S: Slice> {
    receiver: mpsc::Receiver<SliceRequest<S>>,
    state: S,
    policy: StaleResponsePolicy,
    latest_applied: Option<u64>,
}

impl<S: Slice> SliceActor<S> {
    /// Creates a new actor with `S::default()` state and its client.
    ///
    /// `buffer_size` bounds the channel; senders wait when it is full.
    pub fn new(buffer_size: usize, policy: StaleResponsePolicy) -> (Self, SliceClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: S::default(),
            policy,
            latest_applied: None,
        };
        (actor, SliceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        let slice = S::NAME;
        info!(slice, policy = ?self.policy, "Slice started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SliceRequest::Pending { op, seq, respond_to } => {
                    debug!(slice, ?op, seq, "Pending");
                    self.state.status_mut().begin();
                    self.state.on_pending(&op);
                    let _ = respond_to.send(());
                }
                SliceRequest::Fulfilled {
                    op,
                    seq,
                    payload,
                    respond_to,
                } => {
                    if self.is_stale(seq) {
                        warn!(slice, ?op, seq, "Discarding stale response");
                    } else {
                        debug!(slice, ?op, ?payload, "Fulfilled");
                        self.mark_applied(seq);
                        self.state.status_mut().succeed();
                        self.state.on_fulfilled(op, payload);
                        info!(slice, seq, "Applied");
                    }
                    let _ = respond_to.send(());
                }
                SliceRequest::Rejected {
                    op,
                    seq,
                    error,
                    respond_to,
                } => {
                    if self.is_stale(seq) {
                        warn!(slice, ?op, seq, error = %error, "Discarding stale failure");
                    } else {
                        warn!(slice, ?op, seq, error = %error, "Rejected");
                        self.mark_applied(seq);
                        self.state.on_rejected(&op, &error);
                        self.state.status_mut().fail(error);
                    }
                    let _ = respond_to.send(());
                }
                SliceRequest::Local { update, respond_to } => {
                    debug!(slice, "Local update");
                    update(&mut self.state);
                    let _ = respond_to.send(());
                }
                SliceRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.state.clone());
                }
            }
        }

        info!(slice, "Shutdown");
    }

    fn is_stale(&self, seq: u64) -> bool {
        match (self.policy, self.latest_applied) {
            (StaleResponsePolicy::Discard, Some(latest)) => seq < latest,
            _ => false,
        }
    }

    fn mark_applied(&mut self, seq: u64) {
        self.latest_applied = Some(self.latest_applied.map_or(seq, |latest| latest.max(seq)));
    }
}
