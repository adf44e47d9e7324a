use crate::client::LanryClient;
use crate::error::{LanryError, Result};
use crate::transport::HttpTransport;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const TOKEN_PATH: &str = "/auth/v1/token?grant_type=password";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    #[serde(default)]
    expires_in: i64,
    refresh_token: Option<String>,
}

/// Proof of a successful login, needed for uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    access_token: String,
    token_type: String,
    expires_at: Option<DateTime<Utc>>,
    refresh_token: Option<String>,
}

impl AuthSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
            expires_at: None,
            refresh_token: None,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    pub fn is_usable(&self) -> bool {
        !self.access_token.is_empty() && !self.is_expired(Utc::now())
    }
}

impl<T: HttpTransport> LanryClient<T> {
    /// Exchange email and password for an access token.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(LanryError::Auth(
                "Please enter both email and password.".to_string(),
            ));
        }

        let body = serde_json::to_value(LoginRequest { email, password })?;
        let headers = [("apikey", self.api_key().to_string())];
        debug!(email, "logging in");
        let response = self
            .transport()
            .post_json(&self.url(TOKEN_PATH), &headers, &body)?;

        if !response.is_success() {
            return Err(LanryError::Auth(format!(
                "{} - {}",
                response.status, response.body
            )));
        }

        let parsed: LoginResponse = serde_json::from_str(&response.body)?;
        let access_token = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| LanryError::Auth("response carried no access token".to_string()))?;

        let expires_at =
            (parsed.expires_in > 0).then(|| Utc::now() + Duration::seconds(parsed.expires_in));

        info!(email, "logged in");
        Ok(AuthSession {
            access_token,
            token_type: parsed.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_at,
            refresh_token: parsed.refresh_token,
        })
    }
}
