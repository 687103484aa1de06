//! Credential agent client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{TokenFetcher, TokenGrant};
use crate::{Error, Result};

const ENDPOINT_ENV_VAR: &str = "TENCENTCLOUD_AGENT_ENDPOINT";
const TIMEOUT_ENV_VAR: &str = "TENCENTCLOUD_AGENT_TIMEOUT_MS";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the credential agent listens and how long to wait for it.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

impl AgentConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn parse(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::config(format!("invalid agent endpoint {}: {}", endpoint, e)))?;
        Ok(Self::new(endpoint))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `TENCENTCLOUD_AGENT_ENDPOINT` and optional `TENCENTCLOUD_AGENT_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(ENDPOINT_ENV_VAR, TIMEOUT_ENV_VAR)
    }

    fn from_vars(endpoint_var: &str, timeout_var: &str) -> Result<Self> {
        let endpoint = match std::env::var(endpoint_var) {
            Ok(endpoint) => endpoint,
            Err(std::env::VarError::NotPresent) => {
                return Err(Error::config(format!("{} not set", endpoint_var)));
            }
            Err(e) => return Err(Error::Env(e)),
        };
        let mut config = Self::parse(&endpoint)?;

        match std::env::var(timeout_var) {
            Ok(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|e| {
                    Error::config(format!("{} is not a number of milliseconds: {}", timeout_var, e))
                })?;
                config.timeout = Duration::from_millis(ms);
            }
            Err(std::env::VarError::NotPresent) => {}
            Err(e) => return Err(Error::Env(e)),
        }

        Ok(config)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AgentRequest {
    duration: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AgentResponse {
    credentials: AgentCredentials,
    expired_time: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AgentCredentials {
    tmp_secret_id: String,
    tmp_secret_key: String,
    token: String,
}

/// Fetches temporary credentials from a local credential agent.
///
/// Sends `POST <endpoint>` with `{"Duration": <secs>}` and expects
/// `{"Credentials": {"TmpSecretId", "TmpSecretKey", "Token"}, "ExpiredTime"}`.
#[derive(Debug, Clone)]
pub struct AgentFetcher {
    http: reqwest::Client,
    config: AgentConfig,
}

impl AgentFetcher {
    pub fn new(config: AgentConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(AgentConfig::from_env()?)
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

#[async_trait]
impl TokenFetcher for AgentFetcher {
    fn name(&self) -> &str {
        "agent"
    }

    async fn fetch(&self, duration: Duration) -> Result<TokenGrant> {
        let response = self
            .http
            .post(self.config.endpoint.clone())
            .json(&AgentRequest {
                duration: duration.as_secs(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                message: body.trim().to_string(),
                status: Some(status.as_u16()),
            });
        }

        let parsed: AgentResponse = serde_json::from_str(&body)?;
        let creds = parsed.credentials;

        if creds.tmp_secret_id.is_empty() {
            return Err(Error::InvalidResponse("missing TmpSecretId".into()));
        }
        if creds.tmp_secret_key.is_empty() {
            return Err(Error::InvalidResponse("missing TmpSecretKey".into()));
        }
        if creds.token.is_empty() {
            return Err(Error::InvalidResponse("missing Token".into()));
        }

        tracing::debug!(
            fetcher = "agent",
            expires_at = parsed.expired_time,
            "Fetched temporary credential"
        );

        Ok(TokenGrant::new(
            creds.tmp_secret_id,
            creds.tmp_secret_key,
            creds.token,
            parsed.expired_time,
        ))
    }
}
