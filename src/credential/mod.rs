//! Credential variants.
//!
//! - [`Credential`]: long-lived secret id / secret key pair
//! - [`TokenCredential`]: temporary token renewed through a [`TokenFetcher`](crate::TokenFetcher)
//!
//! Both implement [`CredentialSource`].

mod metrics;
mod params;
mod policy;
mod source;
mod static_credential;
mod token;

pub use metrics::RefreshMetrics;
pub use params::{CredentialParams, SECRET_ID, TOKEN};
pub use policy::{DEFAULT_VALIDITY, RefreshPolicy};
pub use source::CredentialSource;
pub use static_credential::Credential;
pub use token::TokenCredential;
