//! Long-lived secret id / secret key pair.

use std::fmt;

use async_trait::async_trait;
use secrecy::SecretString;

use super::{CredentialParams, CredentialSource};
use crate::{Error, Result};

const SECRET_ID_ENV_VAR: &str = "TENCENTCLOUD_SECRET_ID";
const SECRET_KEY_ENV_VAR: &str = "TENCENTCLOUD_SECRET_KEY";

/// Immutable secret id / secret key pair.
#[derive(Clone)]
pub struct Credential {
    secret_id: String,
    secret_key: SecretString,
}

impl Credential {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Read the pair from `TENCENTCLOUD_SECRET_ID` / `TENCENTCLOUD_SECRET_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(SECRET_ID_ENV_VAR, SECRET_KEY_ENV_VAR)
    }

    /// Read the pair from custom environment variables.
    pub fn from_vars(secret_id_var: &str, secret_key_var: &str) -> Result<Self> {
        let secret_id = read_var(secret_id_var)?;
        let secret_key = read_var(secret_key_var)?;
        Ok(Self::new(secret_id, secret_key))
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }
}

fn read_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::auth(format!("{} not set", name))),
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"[redacted]")
            .finish()
    }
}

#[async_trait]
impl CredentialSource for Credential {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn params(&self) -> CredentialParams {
        CredentialParams::secret_id_only(self.secret_id.clone())
    }

    fn secret_key(&self) -> SecretString {
        self.secret_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_params_contain_only_secret_id() {
        let cred = Credential::new("AK1", "SK1");
        let params = cred.params().await;
        assert_eq!(params.len(), 1);
        assert_eq!(params.secret_id(), Some("AK1"));
        assert_eq!(cred.secret_key().expose_secret(), "SK1");
    }

    #[tokio::test]
    async fn test_repeated_reads_are_stable() {
        let cred = Credential::new("AK1", "SK1");
        for _ in 0..5 {
            assert_eq!(cred.params().await.secret_id(), Some("AK1"));
            assert_eq!(cred.secret_key().expose_secret(), "SK1");
        }
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let cred = Credential::new("AK1", "super-secret");
        let debug = format!("{:?}", cred);
        assert!(debug.contains("AK1"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_from_vars_missing() {
        // SAFETY: Test-only environment setup, variables unique to this test
        unsafe {
            std::env::remove_var("TEST_CRED_ID_MISSING");
            std::env::remove_var("TEST_CRED_KEY_MISSING");
        }
        let err = Credential::from_vars("TEST_CRED_ID_MISSING", "TEST_CRED_KEY_MISSING")
            .unwrap_err();
        assert!(err.to_string().contains("TEST_CRED_ID_MISSING"));
    }

    #[test]
    fn test_from_vars_set() {
        // SAFETY: Test-only environment setup, variables unique to this test
        unsafe {
            std::env::set_var("TEST_CRED_ID_SET", "AK-env");
            std::env::set_var("TEST_CRED_KEY_SET", "SK-env");
        }
        let cred = Credential::from_vars("TEST_CRED_ID_SET", "TEST_CRED_KEY_SET").unwrap();
        assert_eq!(cred.secret_id(), "AK-env");
        assert_eq!(cred.secret_key().expose_secret(), "SK-env");
        unsafe {
            std::env::remove_var("TEST_CRED_ID_SET");
            std::env::remove_var("TEST_CRED_KEY_SET");
        }
    }
}
