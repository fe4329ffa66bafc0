//! Error types specific to the HTTP scoring backend.

use thiserror::Error;

/// Convenient result alias returning [`HttpBackendError`] failures.
pub type HttpResult<T> = Result<T, HttpBackendError>;

/// Failures that can occur while setting up the HTTP scoring backend.
///
/// Call-time failures are mapped straight into [`crate::rpc::RpcError`] by
/// the client; only construction-time problems surface through this type.
#[derive(Debug, Error)]
pub enum HttpBackendError {
    /// Required environment variable is missing.
    #[error("missing scoring backend environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build scoring backend client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
}
