//! # cloud-credentials
//!
//! In-memory holders for cloud API credentials.
//!
//! A [`Credential`] is a fixed secret id / secret key pair. A
//! [`TokenCredential`] holds a temporary secret id, secret key and session
//! token, and renews them through a [`TokenFetcher`] once the token gets
//! within half of its validity of expiring.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloud_credentials::{AgentFetcher, CredentialSource, TokenCredential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cloud_credentials::Error> {
//!     let fetcher = AgentFetcher::from_env()?;
//!     let credential = TokenCredential::new("", "", "", fetcher);
//!
//!     // Fetches on first use, then only when the token nears expiry.
//!     let params = credential.params().await;
//!     println!("SecretId = {:?}", params.secret_id());
//!     Ok(())
//! }
//! ```
//!
//! Fetch failures during `params()` never reach the caller: the previous
//! values are returned and the failure is logged through `tracing` and
//! recorded in [`TokenCredential::metrics`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod credential;
pub mod fetcher;
pub mod prelude;

pub use credential::{
    Credential, CredentialParams, CredentialSource, DEFAULT_VALIDITY, RefreshMetrics,
    RefreshPolicy, TokenCredential,
};
pub use fetcher::{AgentConfig, AgentFetcher, TokenFetcher, TokenGrant};

/// Error type for cloud-credentials operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Credential could not be obtained.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Credential agent returned an error response.
    #[error("Agent error (HTTP {status}): {message}", status = status.map(|s| s.to_string()).unwrap_or_else(|| "unknown".into()))]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// Network connectivity or request failed.
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Response parsed but is missing required data.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required environment variable missing or invalid.
    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Credentials missing or rejected
    Authorization,
    /// Configuration or environment errors
    Configuration,
    /// Network or server errors that may succeed on retry
    Transient,
    /// Malformed responses and other unexpected states
    Internal,
}

impl Error {
    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Auth { .. } => ErrorCategory::Authorization,
            Error::Api {
                status: Some(401 | 403),
                ..
            } => ErrorCategory::Authorization,

            Error::Config(_) | Error::Env(_) => ErrorCategory::Configuration,

            Error::Network(_) => ErrorCategory::Transient,
            Error::Api {
                status: Some(429 | 500..=599),
                ..
            } => ErrorCategory::Transient,

            Error::Api { .. } | Error::Json(_) | Error::InvalidResponse(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn is_authorization_error(&self) -> bool {
        self.category() == ErrorCategory::Authorization
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type alias for cloud-credentials operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert!(Error::auth("denied").is_authorization_error());
        assert!(Error::config("bad window").is_configuration_error());

        let unavailable = Error::Api {
            message: "agent restarting".into(),
            status: Some(503),
        };
        assert!(unavailable.is_retryable());
        assert_eq!(unavailable.status_code(), Some(503));

        let forbidden = Error::Api {
            message: "role not bound".into(),
            status: Some(403),
        };
        assert!(forbidden.is_authorization_error());
        assert!(!forbidden.is_retryable());

        assert_eq!(
            Error::InvalidResponse("missing Token".into()).category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            message: "boom".into(),
            status: None,
        };
        assert_eq!(err.to_string(), "Agent error (HTTP unknown): boom");
    }
}
