//! Credential bag: a flat key → value map loaded once at process start.
//!
//! Secrets live in a TOML file of plain string pairs:
//!
//! ```toml
//! api_key = "..."
//! api_secret = "..."
//! access_token = "..."
//! access_token_secret = "..."
//! image_provider_key = "..."
//! ```
//!
//! The core never reads credentials itself; collaborator adapters that need
//! them take the bag at construction time. The shipped local adapters need
//! none, so the file is optional at the CLI.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing credential key {0:?}")]
    Missing(String),
}

/// Well-known key names used by remote adapters.
pub const API_KEY: &str = "api_key";
pub const API_SECRET: &str = "api_secret";
pub const ACCESS_TOKEN: &str = "access_token";
pub const ACCESS_TOKEN_SECRET: &str = "access_token_secret";
pub const IMAGE_PROVIDER_KEY: &str = "image_provider_key";

/// Flat named-secret map.
#[derive(Debug, Clone, Default)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        Ok(Self(toml::from_str(raw)?))
    }

    /// Fetch a required key.
    pub fn get(&self, key: &str) -> Result<&str, CredentialError> {
        self.0
            .get(key)
            .map(|v| v.as_str())
            .ok_or_else(|| CredentialError::Missing(key.to_string()))
    }

    /// Fetch an optional key.
    pub fn try_get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    /// Number of entries in the bag.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_pairs() {
        let creds = Credentials::parse("api_key = \"k\"\naccess_token = \"t\"\n").unwrap();
        assert_eq!(creds.get(API_KEY).unwrap(), "k");
        assert_eq!(creds.get(ACCESS_TOKEN).unwrap(), "t");
        assert_eq!(creds.len(), 2);
        assert!(!creds.is_empty());
    }

    #[test]
    fn missing_key_names_the_key() {
        let creds = Credentials::parse("").unwrap();
        let err = creds.get(IMAGE_PROVIDER_KEY).unwrap_err();
        assert!(err.to_string().contains("image_provider_key"));
        assert!(creds.try_get(IMAGE_PROVIDER_KEY).is_none());
    }

    #[test]
    fn rejects_non_string_values() {
        assert!(Credentials::parse("api_key = 5\n").is_err());
    }
}
