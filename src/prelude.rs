//! Prelude module for convenient imports.
//!
//! ```rust
//! use cloud_credentials::prelude::*;
//! ```

pub use crate::Error;
pub use crate::Result;

// Credentials
pub use crate::Credential;
pub use crate::CredentialParams;
pub use crate::CredentialSource;
pub use crate::RefreshPolicy;
pub use crate::TokenCredential;

// Fetching
pub use crate::AgentFetcher;
pub use crate::TokenFetcher;
pub use crate::TokenGrant;
