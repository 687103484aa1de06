//! Token validity and refresh threshold.

use std::time::Duration;

use crate::{Error, Result};

/// Validity requested for each fetched token.
pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(7200);

const DURATION_ENV_VAR: &str = "TENCENTCLOUD_TOKEN_DURATION_SECS";
const WINDOW_ENV_VAR: &str = "TENCENTCLOUD_TOKEN_REFRESH_WINDOW_SECS";

/// When a cached token counts as stale.
///
/// A token is stale once `now + refresh_window >= expires_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshPolicy {
    validity: Duration,
    refresh_window: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VALIDITY)
    }
}

impl RefreshPolicy {
    /// Refresh window defaults to half of `validity`.
    pub fn new(validity: Duration) -> Self {
        Self {
            validity,
            refresh_window: validity / 2,
        }
    }

    pub fn refresh_window(mut self, window: Duration) -> Self {
        self.refresh_window = window;
        self
    }

    /// Read overrides from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut policy = match read_secs(DURATION_ENV_VAR)? {
            Some(validity) => Self::new(validity),
            None => Self::default(),
        };
        if let Some(window) = read_secs(WINDOW_ENV_VAR)? {
            policy = policy.refresh_window(window);
        }
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.validity.is_zero() {
            return Err(Error::config("token validity must be greater than zero"));
        }
        if self.refresh_window > self.validity {
            return Err(Error::config(format!(
                "refresh window ({}s) exceeds token validity ({}s)",
                self.refresh_window.as_secs(),
                self.validity.as_secs()
            )));
        }
        Ok(())
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    pub fn window(&self) -> Duration {
        self.refresh_window
    }
}

fn read_secs(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| Error::config(format!("{} is not a number of seconds: {}", name, e))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::Env(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RefreshPolicy::default();
        assert_eq!(policy.validity(), Duration::from_secs(7200));
        assert_eq!(policy.window(), Duration::from_secs(3600));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_window_is_half_validity() {
        let policy = RefreshPolicy::new(Duration::from_secs(900));
        assert_eq!(policy.window(), Duration::from_secs(450));
    }

    #[test]
    fn test_validate_rejects_bad_policies() {
        assert!(RefreshPolicy::new(Duration::ZERO).validate().is_err());

        let wide =
            RefreshPolicy::new(Duration::from_secs(60)).refresh_window(Duration::from_secs(61));
        let err = wide.validate().unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_from_env() {
        // SAFETY: Test-only environment setup; these variables are only touched here
        unsafe {
            std::env::set_var(DURATION_ENV_VAR, "1800");
            std::env::set_var(WINDOW_ENV_VAR, "600");
        }
        let policy = RefreshPolicy::from_env().unwrap();
        assert_eq!(policy.validity(), Duration::from_secs(1800));
        assert_eq!(policy.window(), Duration::from_secs(600));

        unsafe { std::env::set_var(WINDOW_ENV_VAR, "soon") };
        assert!(RefreshPolicy::from_env().is_err());

        unsafe {
            std::env::remove_var(DURATION_ENV_VAR);
            std::env::remove_var(WINDOW_ENV_VAR);
        }
        assert_eq!(RefreshPolicy::from_env().unwrap(), RefreshPolicy::default());
    }
}
