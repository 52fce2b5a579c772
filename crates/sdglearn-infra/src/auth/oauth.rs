//! OAuth authorization-code client for the hosted identity provider.
//!
//! The client secret is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output. The exchange is a single-shot
//! request: no retry, no token storage -- the caller receives the provider's
//! token response as-is.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use sdglearn_types::error::AuthError;

/// Environment variable names for OAuth credentials.
const ENV_CLIENT_ID: &str = "SDGLEARN_OAUTH_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "SDGLEARN_OAUTH_CLIENT_SECRET";
const ENV_AUTHORIZE_URL: &str = "SDGLEARN_OAUTH_AUTHORIZE_URL";
const ENV_TOKEN_URL: &str = "SDGLEARN_OAUTH_TOKEN_URL";
const ENV_REDIRECT_URL: &str = "SDGLEARN_OAUTH_REDIRECT_URL";

/// OAuth provider endpoints and credentials, loaded from the environment.
#[derive(Debug)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub authorize_url: String,
    pub token_url: String,
    pub redirect_url: String,
}

impl OAuthConfig {
    /// Load the configuration from environment variables.
    ///
    /// Returns `AuthError::NotConfigured` naming the first missing variable,
    /// so a deployment error is diagnosable from the message alone.
    pub fn from_env() -> Result<Self, AuthError> {
        fn require(name: &'static str) -> Result<String, AuthError> {
            std::env::var(name).map_err(|_| AuthError::NotConfigured(name))
        }

        Ok(Self {
            client_id: require(ENV_CLIENT_ID)?,
            client_secret: SecretString::from(require(ENV_CLIENT_SECRET)?),
            authorize_url: require(ENV_AUTHORIZE_URL)?,
            token_url: require(ENV_TOKEN_URL)?,
            redirect_url: require(ENV_REDIRECT_URL)?,
        })
    }
}

/// Token response from the provider, passed through to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Client for the provider's authorization-code flow.
pub struct OAuthClient {
    http: reqwest::Client,
    config: OAuthConfig,
}

impl OAuthClient {
    pub fn new(config: OAuthConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to create reqwest client");

        Self { http, config }
    }

    /// Build the provider authorization URL the browser is sent to.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&state={}",
            self.config.authorize_url,
            urlencode(&self.config.client_id),
            urlencode(&self.config.redirect_url),
            urlencode(state),
        )
    }

    /// Exchange a callback code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AuthError> {
        let basic = BASE64.encode(format!(
            "{}:{}",
            self.config.client_id,
            self.config.client_secret.expose_secret()
        ));

        let response = self
            .http
            .post(&self.config.token_url)
            .header("Authorization", format!("Basic {basic}"))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "oauth token exchange rejected");
            return Err(AuthError::Exchange(format!(
                "provider returned {status}: {body}"
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::Exchange(format!("invalid token response: {e}")))
    }
}

/// Minimal percent-encoding for query components (RFC 3986 unreserved set).
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OAuthConfig {
        OAuthConfig {
            client_id: "sdg client".to_string(),
            client_secret: SecretString::from("s3cret"),
            authorize_url: "https://auth.example.com/authorize".to_string(),
            token_url: "https://auth.example.com/token".to_string(),
            redirect_url: "https://app.example.com/api/v1/auth/callback".to_string(),
        }
    }

    #[test]
    fn test_authorize_url_encodes_params() {
        let client = OAuthClient::new(test_config());
        let url = client.authorize_url("abc123");
        assert!(url.starts_with("https://auth.example.com/authorize?response_type=code"));
        assert!(url.contains("client_id=sdg%20client"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fapi%2Fv1%2Fauth%2Fcallback"));
        assert!(url.contains("state=abc123"));
    }

    #[test]
    fn test_urlencode_passes_unreserved() {
        assert_eq!(urlencode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
        assert_eq!(urlencode("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn test_from_env_reports_missing_var() {
        // Only meaningful when the variable is absent in the test environment.
        unsafe { std::env::remove_var(ENV_CLIENT_ID) };
        let err = OAuthConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_CLIENT_ID));
    }
}
