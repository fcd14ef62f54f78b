//! # Store Errors
//!
//! Every failure a slice can record is reduced to one [`ApiError`]. The transport
//! normalizes HTTP statuses and network faults into these variants before a slice
//! ever sees them, so the view layer only has to render a message and optionally
//! offer a retry.

/// Uniform failure value attached to a slice when an operation is rejected.
///
/// `Display` yields the message meant for the user. Nothing is retried
/// automatically; re-dispatching the same operation is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused, timeout, ...).
    #[error("{0}")]
    Network(String),
    /// The backend answered 401. The view is expected to redirect to login.
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    /// The backend refused the request (validation, insufficient stock, forbidden transition).
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// A local guard refused the input before any request was issued.
    #[error("{0}")]
    Invalid(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// The store task behind a slice is gone.
    #[error("Store closed")]
    StoreClosed,
}

impl ApiError {
    /// Builds the normalized error for a non-success HTTP status.
    ///
    /// `message` is whatever the backend put in its error body, if anything.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized(
                message.unwrap_or_else(|| "Not authorized, please log in".to_string()),
            ),
            404 => Self::NotFound(message.unwrap_or_else(|| "Resource not found".to_string())),
            _ => Self::Rejected {
                status,
                message: message.unwrap_or_else(|| format!("Request failed with status {status}")),
            },
        }
    }

    /// The opaque message stored for display.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
