//! Vehicle data API authentication
//!
//! Requests are authorized with an OAuth bearer access token. Obtaining the
//! token (the authorization code flow) happens outside this crate; the token
//! is supplied directly, through the environment, or from the config file.

use std::fmt;
use std::sync::Arc;

/// Environment variable holding the access token
pub const ACCESS_TOKEN_ENV: &str = "MERCHE_ACCESS_TOKEN";

/// Bearer credentials attached to every request
#[derive(Clone)]
pub struct Credentials {
    token: Arc<str>,
}

impl Credentials {
    /// Wrap an access token obtained elsewhere
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    /// Read the access token from [`ACCESS_TOKEN_ENV`]
    pub fn from_env() -> Option<Self> {
        std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .and_then(|token| Self::from_optional(Some(token)))
    }

    /// Build credentials from a possibly missing or blank token
    pub fn from_optional(token: Option<String>) -> Option<Self> {
        token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(Self::new)
    }

    /// Raw token for the `Authorization` header
    pub fn token(&self) -> &str {
        &self.token
    }
}

// Security: never print the token itself
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}
