//! Temporary credential that renews itself before it expires.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};

use super::metrics::RefreshCounters;
use super::{CredentialParams, CredentialSource, RefreshMetrics, RefreshPolicy};
use crate::Result;
use crate::fetcher::{TokenFetcher, TokenGrant};

struct TokenState {
    secret_id: String,
    secret_key: SecretString,
    token: SecretString,
    expires_at: DateTime<Utc>,
}

/// Secret id, secret key and session token, refreshed lazily.
///
/// The token is renewed from the [`TokenFetcher`] when `params()` finds it
/// inside the policy's refresh window. A new credential starts with an
/// expiry at the Unix epoch, so the first `params()` call always fetches.
///
/// Concurrent callers that all observe a stale token each fetch on their
/// own; refreshes are not coalesced. The four fields are always swapped
/// together under one write lock, which is never held across a fetch.
pub struct TokenCredential {
    state: RwLock<TokenState>,
    fetcher: Arc<dyn TokenFetcher>,
    policy: RefreshPolicy,
    counters: RefreshCounters,
}

impl TokenCredential {
    pub fn new<F>(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        token: impl Into<String>,
        fetcher: F,
    ) -> Self
    where
        F: TokenFetcher + 'static,
    {
        Self {
            state: RwLock::new(TokenState {
                secret_id: secret_id.into(),
                secret_key: SecretString::from(secret_key.into()),
                token: SecretString::from(token.into()),
                expires_at: DateTime::<Utc>::UNIX_EPOCH,
            }),
            fetcher: Arc::new(fetcher),
            policy: RefreshPolicy::default(),
            counters: RefreshCounters::default(),
        }
    }

    /// Replace the refresh policy. Rejects policies that fail
    /// [`RefreshPolicy::validate`].
    pub fn with_policy(mut self, policy: RefreshPolicy) -> Result<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    /// Seed the expiry of the initial token when it is already known.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.state.get_mut().unwrap_or_else(|e| e.into_inner()).expires_at = expires_at;
        self
    }

    pub fn policy(&self) -> &RefreshPolicy {
        &self.policy
    }

    pub fn secret_id(&self) -> String {
        self.read_state().secret_id.clone()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.read_state().expires_at
    }

    /// True once `now + refresh_window >= expires_at`.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }

    fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        let expires_at = self.expires_at();
        TimeDelta::from_std(self.policy.window())
            .ok()
            .and_then(|window| now.checked_add_signed(window))
            .map(|threshold| threshold >= expires_at)
            .unwrap_or(true)
    }

    /// Fetch a new token now and swap it in, returning any fetch error.
    pub async fn refresh(&self) -> Result<()> {
        self.counters.record_attempt();

        match self.fetcher.fetch(self.policy.validity()).await {
            Ok(grant) => {
                self.apply(grant);
                self.counters.record_success();
                Ok(())
            }
            Err(e) => {
                self.counters.record_failure(&e);
                Err(e)
            }
        }
    }

    pub fn metrics(&self) -> RefreshMetrics {
        self.counters.snapshot()
    }

    fn apply(&self, grant: TokenGrant) {
        let expires_at = DateTime::from_timestamp(grant.expires_at, 0).unwrap_or_else(|| {
            tracing::warn!(
                expires_at = grant.expires_at,
                "Token expiry out of range, treating token as expired"
            );
            DateTime::<Utc>::UNIX_EPOCH
        });

        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.secret_id = grant.secret_id;
            state.secret_key = grant.secret_key;
            state.token = grant.token;
            state.expires_at = expires_at;
        }

        tracing::debug!(
            fetcher = self.fetcher.name(),
            expires_at = %expires_at,
            "Token credential refreshed"
        );
    }

    fn read_state(&self) -> RwLockReadGuard<'_, TokenState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for TokenCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        f.debug_struct("TokenCredential")
            .field("secret_id", &state.secret_id)
            .field("secret_key", &"[redacted]")
            .field("token", &"[redacted]")
            .field("expires_at", &state.expires_at)
            .field("fetcher", &self.fetcher.name())
            .field("policy", &self.policy)
            .finish()
    }
}

#[async_trait]
impl CredentialSource for TokenCredential {
    fn name(&self) -> &'static str {
        "token"
    }

    async fn params(&self) -> CredentialParams {
        if self.is_stale()
            && let Err(e) = self.refresh().await
        {
            tracing::warn!(
                fetcher = self.fetcher.name(),
                error = %e,
                "Token refresh failed, keeping cached credential"
            );
        }

        let state = self.read_state();
        CredentialParams::with_token(state.secret_id.clone(), state.token.expose_secret())
    }

    fn secret_key(&self) -> SecretString {
        self.read_state().secret_key.clone()
    }
}
