use crate::utils::error::{ImdbError, Result};
use crate::utils::validation::{validate_non_empty_secret, validate_url};
use reqwest::cookie::Jar;
use std::fmt;
use std::sync::Arc;
use url::Url;

pub const COOKIE_AT_MAIN: &str = "at-main";
pub const COOKIE_UBID_MAIN: &str = "ubid-main";

/// The two imdb session cookies copied out of a logged in browser.
#[derive(Clone)]
pub struct Credentials {
    session_token: String,
    secondary_token: String,
}

impl Credentials {
    pub fn new(session_token: impl Into<String>, secondary_token: impl Into<String>) -> Self {
        Self {
            session_token: session_token.into(),
            secondary_token: secondary_token.into(),
        }
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    pub fn secondary_token(&self) -> &str {
        &self.secondary_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("session_token", &"<redacted>")
            .field("secondary_token", &"<redacted>")
            .finish()
    }
}

/// Cookie jar seeded once with the session cookies for the imdb origin.
#[derive(Debug, Clone)]
pub struct SessionStore {
    origin: Url,
    jar: Arc<Jar>,
}

impl SessionStore {
    pub fn new(base_url: &str, credentials: &Credentials) -> Result<Self> {
        let origin = validate_url("base_url", base_url).map_err(|e| {
            ImdbError::configuration(format!("failure parsing {} as url: {}", base_url, e))
        })?;

        let cookies = [
            (COOKIE_AT_MAIN, credentials.session_token()),
            (COOKIE_UBID_MAIN, credentials.secondary_token()),
        ];

        let jar = Jar::default();
        for (name, value) in cookies {
            validate_non_empty_secret(name, value)?;
            if value.contains(';') || value.contains(char::is_whitespace) {
                return Err(ImdbError::configuration(format!(
                    "cookie {} contains characters that cannot be sent in a cookie header",
                    name
                )));
            }
            jar.add_cookie_str(&format!("{}={}", name, value), &origin);
        }

        tracing::debug!("Seeded session cookies for {}", origin);

        Ok(Self {
            origin,
            jar: Arc::new(jar),
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }
}
