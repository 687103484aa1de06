//! Token fetching.
//!
//! [`TokenFetcher`] is the seam between [`TokenCredential`](crate::TokenCredential)
//! and whatever mints temporary credentials. [`AgentFetcher`] asks a local
//! credential agent over HTTP; tests and embedders can plug in their own.

mod agent;

pub use agent::{AgentConfig, AgentFetcher};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::Result;

/// Temporary credentials returned by a [`TokenFetcher`].
#[derive(Clone)]
pub struct TokenGrant {
    pub secret_id: String,
    pub secret_key: SecretString,
    pub token: SecretString,
    /// Expiration timestamp (Unix seconds).
    pub expires_at: i64,
}

impl TokenGrant {
    pub fn new(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        token: impl Into<String>,
        expires_at: i64,
    ) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: SecretString::from(secret_key.into()),
            token: SecretString::from(token.into()),
            expires_at,
        }
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"[redacted]")
            .field("token", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Mints temporary credentials valid for the requested duration.
///
/// Timeouts and retries are the implementation's business; the caller
/// waits for whatever `fetch` returns.
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Fetcher name for debugging.
    fn name(&self) -> &str;

    async fn fetch(&self, duration: Duration) -> Result<TokenGrant>;
}

#[async_trait]
impl<T: TokenFetcher + ?Sized> TokenFetcher for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, duration: Duration) -> Result<TokenGrant> {
        (**self).fetch(duration).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_grant_debug_redacts_secrets() {
        let grant = TokenGrant::new("AK2", "SK2", "TK2", 1_700_000_000);
        let debug = format!("{:?}", grant);
        assert!(debug.contains("AK2"));
        assert!(debug.contains("1700000000"));
        assert!(!debug.contains("SK2"));
        assert!(!debug.contains("TK2"));
        assert_eq!(grant.token.expose_secret(), "TK2");
    }
}
