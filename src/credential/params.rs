//! Credential parameters attached to signed requests.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Parameter key carrying the secret id.
pub const SECRET_ID: &str = "SecretId";
/// Parameter key carrying the temporary session token.
pub const TOKEN: &str = "Token";

/// Identity fields sent with an authenticated request.
///
/// The secret key is never part of this mapping; it is only used locally
/// to compute request signatures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CredentialParams(BTreeMap<String, String>);

impl CredentialParams {
    pub(crate) fn secret_id_only(secret_id: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert(SECRET_ID.to_string(), secret_id.into());
        Self(params)
    }

    pub(crate) fn with_token(secret_id: impl Into<String>, token: impl Into<String>) -> Self {
        let mut params = Self::secret_id_only(secret_id);
        params.0.insert(TOKEN.to_string(), token.into());
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn secret_id(&self) -> Option<&str> {
        self.get(SECRET_ID)
    }

    pub fn token(&self) -> Option<&str> {
        self.get(TOKEN)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<CredentialParams> for BTreeMap<String, String> {
    fn from(params: CredentialParams) -> Self {
        params.0
    }
}

impl From<CredentialParams> for HashMap<String, String> {
    fn from(params: CredentialParams) -> Self {
        params.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a CredentialParams {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
