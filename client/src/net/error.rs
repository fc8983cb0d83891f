//! Error taxonomy for backend calls.
//!
//! DESIGN
//! ======
//! Every endpoint call returns a tagged result instead of a stringly error so
//! callers can route 401/403 to redirect-or-message handling and everything
//! else to generic surfaces. Nothing here is retried automatically; every
//! failure is terminal for the triggering action.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by [`crate::net::api::ApiClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected an authenticated-looking request (401 or 403).
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-2xx response, carrying whatever text the backend sent.
    #[error("server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    /// The request exceeded the client-side timeout.
    #[error("request timed out")]
    Timeout,

    /// The request never produced an HTTP response (connect, DNS, TLS,
    /// interrupted body).
    #[error("network error: {0}")]
    Network(String),

    /// A success response whose body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

/// Coarse bucket for user-facing treatment of an [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Access denied — message or redirect, view-dependent.
    Unauthorized,
    /// Generic backend failure, with detail when the backend supplied any.
    Server,
    /// Generic connectivity failure.
    Network,
}

impl ApiError {
    /// Classify a non-success HTTP status together with its response body.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status },
            _ => Self::Server { status, body },
        }
    }

    /// Map a transport-level `reqwest` failure, splitting out timeouts.
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(error.to_string())
        }
    }

    /// Bucket for user-facing treatment. Timeouts and unparseable success
    /// bodies surface like generic server failures.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized { .. } => ErrorCategory::Unauthorized,
            Self::Server { .. } | Self::Timeout | Self::Parse(_) => ErrorCategory::Server,
            Self::Network(_) => ErrorCategory::Network,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
