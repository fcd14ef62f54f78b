use store_framework::ApiError;

/// Startup and shutdown failures. Per-operation failures stay as [`ApiError`].
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Slice task failed: {0}")]
    Shutdown(String),
}
