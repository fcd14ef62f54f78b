//! # Slice Client
//!
//! The handle components hold to drive a slice. It is cheap to clone (a channel sender and
//! a shared sequence counter) and is the only way state changes reach a
//! [`SliceActor`](crate::SliceActor).

use crate::error::ApiError;
use crate::message::{Response, SliceRequest};
use crate::slice::Slice;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for one slice actor.
pub struct SliceClient<S: Slice> {
    sender: mpsc::Sender<SliceRequest<S>>,
    next_seq: Arc<AtomicU64>,
}

impl<S: Slice> Clone for SliceClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            next_seq: self.next_seq.clone(),
        }
    }
}

impl<S: Slice> SliceClient<S> {
    pub fn new(sender: mpsc::Sender<SliceRequest<S>>) -> Self {
        Self {
            sender,
            next_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Runs `operation` as a tracked async operation on this slice.
    ///
    /// The pending transition is applied before `operation` is polled. Once it resolves,
    /// the fulfilled or rejected transition is applied and only then is the result returned,
    /// so a snapshot taken after awaiting this call reflects it (or something newer).
    ///
    /// The returned value is always the operation's own outcome. Under
    /// [`StaleResponsePolicy::Discard`](crate::StaleResponsePolicy::Discard) a stale
    /// completion is still returned as `Ok` or `Err` even though the slice ignored it;
    /// read the slice with [`snapshot`](Self::snapshot) for what the store holds.
    pub async fn track<T, F>(&self, op: S::Op, operation: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
        T: Clone + Into<S::Payload>,
    {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.request(|respond_to| SliceRequest::Pending {
            op: op.clone(),
            seq,
            respond_to,
        })
        .await?;

        match operation.await {
            Ok(value) => {
                let payload = value.clone().into();
                self.request(|respond_to| SliceRequest::Fulfilled {
                    op,
                    seq,
                    payload,
                    respond_to,
                })
                .await?;
                Ok(value)
            }
            Err(error) => {
                self.request(|respond_to| SliceRequest::Rejected {
                    op,
                    seq,
                    error: error.clone(),
                    respond_to,
                })
                .await?;
                Err(error)
            }
        }
    }

    /// Applies a local reducer. No request is made and no status flag changes.
    pub async fn apply<F>(&self, update: F) -> Result<(), ApiError>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.request(|respond_to| SliceRequest::Local {
            update: Box::new(update),
            respond_to,
        })
        .await
    }

    /// Drops the recorded error, if any.
    pub async fn clear_error(&self) -> Result<(), ApiError> {
        self.apply(|state| state.status_mut().error = None).await
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> Result<S, ApiError> {
        self.request(|respond_to| SliceRequest::Snapshot { respond_to })
            .await
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> SliceRequest<S>,
    ) -> Result<R, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::StoreClosed)?;
        response.await.map_err(|_| ApiError::StoreClosed)
    }
}
