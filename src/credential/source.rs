//! Credential source trait.

use std::fmt::Debug;

use async_trait::async_trait;
use secrecy::SecretString;

use super::CredentialParams;

/// Common interface of every credential variant.
///
/// Object safe, so callers can hold an `Arc<dyn CredentialSource>` and pick
/// the variant at runtime.
#[async_trait]
pub trait CredentialSource: Send + Sync + Debug {
    /// Variant name for logging/debugging.
    fn name(&self) -> &'static str;

    /// Identity parameters to attach to a request.
    ///
    /// Never fails. Refreshable variants may renew themselves first.
    async fn params(&self) -> CredentialParams;

    /// Secret key used to sign requests. Never triggers a refresh.
    fn secret_key(&self) -> SecretString;
}
