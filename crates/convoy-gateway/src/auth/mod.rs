//! Identity verification boundary.
//!
//! The gateway consumes an external identity provider through
//! [`IdentityVerifier`]. A failed or missing credential rejects the handshake
//! before any event is read; there is no partial admission.

use async_trait::async_trait;

use convoy_core::error::{ConvoyError, Result};

/// Verified user identity plus the display claims carried by the credential.
#[derive(Debug, Clone)]
pub struct Identity {
    pub uid: String,
    pub name: Option<String>,
    pub photo: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: None,
            photo: None,
        }
    }
}

/// Credential verification (external collaborator).
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity>;
}

/// Development verifier: accepts `dev:<uid>` and `dev:<uid>:<name>` tokens.
/// Anything else fails verification.
#[derive(Default)]
pub struct DevVerifier;

impl DevVerifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityVerifier for DevVerifier {
    async fn verify(&self, token: &str) -> Result<Identity> {
        let rest = token
            .strip_prefix("dev:")
            .ok_or_else(|| ConvoyError::AuthFailed("unknown token scheme".into()))?;

        let (uid, name) = match rest.split_once(':') {
            Some((uid, name)) => (uid, Some(name.to_string())),
            None => (rest, None),
        };
        if uid.is_empty() {
            return Err(ConvoyError::AuthFailed("empty uid".into()));
        }

        Ok(Identity {
            uid: uid.to_string(),
            name,
            photo: None,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn dev_token_resolves_uid_and_name() {
        let v = DevVerifier::new();
        let id = v.verify("dev:u1:Ada").await.unwrap();
        assert_eq!(id.uid, "u1");
        assert_eq!(id.name.as_deref(), Some("Ada"));

        let id = v.verify("dev:u2").await.unwrap();
        assert_eq!(id.uid, "u2");
        assert!(id.name.is_none());
    }

    #[tokio::test]
    async fn bad_tokens_fail() {
        let v = DevVerifier::new();
        assert!(v.verify("bearer xyz").await.is_err());
        assert!(v.verify("dev:").await.is_err());
    }
}
