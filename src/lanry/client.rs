//! # Remote Service Client
//!
//! Lanry talks to one remote service: the Lanry site, backed by Supabase. Two calls
//! matter, each in its own module:
//!
//! - [`crate::auth`]: email/password login → [`crate::auth::AuthSession`]
//! - [`crate::upload`]: chapter upload, which requires a session
//!
//! The client holds the service coordinates and an [`HttpTransport`]. It keeps no
//! login state of its own: the session is a value the caller owns and passes to
//! every call that needs it, and dropping it is logging out.

use crate::config::LanryConfig;
use crate::error::{LanryError, Result};
use crate::transport::{HttpTransport, UreqTransport};
use std::time::Duration;
use url::Url;

pub struct LanryClient<T: HttpTransport> {
    base_url: String,
    api_key: String,
    transport: T,
}

impl LanryClient<UreqTransport> {
    /// Client for the configured service, using the configured timeout.
    pub fn from_config(config: &LanryConfig) -> Result<Self> {
        let base_url = config.supabase_url.as_deref().unwrap_or("").trim();
        if base_url.is_empty() {
            return Err(LanryError::Config(
                "SUPABASE_URL is not set (lanry.json, .env or environment)".to_string(),
            ));
        }
        config.validate()?;
        let api_key = config.supabase_key.clone().unwrap_or_default();
        let transport = UreqTransport::new(Duration::from_secs(config.upload_timeout_secs));
        Ok(Self::new(base_url, api_key, transport))
    }
}

impl<T: HttpTransport> LanryClient<T> {
    pub fn new(base_url: &str, api_key: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Base URL plus path segments, each percent-encoded, so a `/`, `?` or `#`
    /// inside a segment cannot change the endpoint.
    pub(crate) fn segment_url(&self, segments: &[&str]) -> Result<String> {
        let invalid = || LanryError::Config(format!("invalid service URL: {}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }
}
