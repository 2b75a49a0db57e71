//! Upstream credentials and the per-request bearer token.

use std::fmt;

/// Application key and secret issued by the brokerage.
///
/// Both halves are required; there is no default.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    app_key: String,
    app_secret: String,
}

impl Credentials {
    /// Builds credentials, returning `None` when either half is missing or blank.
    pub fn from_parts(app_key: Option<&str>, app_secret: Option<&str>) -> Option<Self> {
        let app_key = app_key.map(str::trim).filter(|k| !k.is_empty())?;
        let app_secret = app_secret.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self {
            app_key: app_key.to_string(),
            app_secret: app_secret.to_string(),
        })
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn app_secret(&self) -> &str {
        &self.app_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"[REDACTED]")
            .finish()
    }
}

/// Opaque bearer token. Lives for exactly one inbound request.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}
