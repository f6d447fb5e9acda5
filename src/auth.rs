//! OAuth2 client-credentials authentication for the MachineQ identity service.
//!
//! Tokens come from `https://identity{.env}.machineq.net/oauth/token` using the
//! client_credentials grant. The HTTP round trip itself lives in the async and
//! blocking clients; this module owns everything around it: the form body,
//! interpretation of the token endpoint's answer, and the cached token with
//! its expiry policy.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{MqError, Result};

/// A cached token is only handed out while `now + GRACE_PERIOD < expires_at`.
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Fixed timeout for token requests, independent of the API timeout.
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on the lifetime honoured for a single token.
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// MachineQ deployment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    #[default]
    #[serde(rename = "prod")]
    Production,
    #[serde(rename = "dev")]
    Development,
    #[serde(rename = "preview")]
    Preview,
}

impl Environment {
    /// Short name used in host names and accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "prod",
            Environment::Development => "dev",
            Environment::Preview => "preview",
        }
    }

    /// Host label inserted before `machineq.net`; production has none.
    pub fn host_label(&self) -> Option<&'static str> {
        match self {
            Environment::Production => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Environment::Production),
            "dev" | "development" => Ok(Environment::Development),
            "preview" => Ok(Environment::Preview),
            other => Err(format!("unknown MachineQ environment: {other}")),
        }
    }
}

/// Client credentials for one MachineQ application.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    environment: Environment,
}

impl Credentials {
    /// Credentials for the production environment.
    ///
    /// The secret is only ever sent in the token request form and is
    /// redacted from `Debug` output.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            environment: Environment::Production,
        }
    }

    /// Targets another deployment. The environment selects both the identity
    /// host and the API host, so a client never mixes the two.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub(crate) fn token_request(&self) -> TokenRequest<'_> {
        TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Form body sent to the token endpoint.
#[derive(Serialize)]
pub(crate) struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// The fields of the token response we use. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Interprets the token endpoint's answer.
///
/// Only an exact 200 counts as success. 429 gets a dedicated rate-limit
/// message; every other status embeds the numeric code and the body text.
pub(crate) fn parse_token_response(status: StatusCode, body: &str) -> Result<TokenResponse> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MqError::Auth {
            message: "failed to get an access token: rate limit exceeded, please try again later"
                .to_string(),
            status: Some(status),
            source: None,
        });
    }
    if status != StatusCode::OK {
        return Err(MqError::Auth {
            message: format!(
                "failed to get an access token (code {}): {}",
                status.as_u16(),
                body
            ),
            status: Some(status),
            source: None,
        });
    }

    serde_json::from_str(body).map_err(|err| MqError::Auth {
        message: "failed to parse token response".to_string(),
        status: Some(status),
        source: Some(Box::new(err)),
    })
}

/// Wraps a transport failure on the token endpoint as an authentication error.
pub(crate) fn token_transport_error(err: reqwest::Error) -> MqError {
    MqError::Auth {
        message: "failed to reach the token endpoint".to_string(),
        status: err.status(),
        source: Some(Box::new(err)),
    }
}

/// Source of the current time for expiry checks.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock backed by `Instant::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

/// The single cached bearer token of a client.
///
/// Invariants:
/// - `token` is `None` until the first successful refresh.
/// - A refresh replaces the token wholesale; there is no partial update.
/// - The cached value is never empty.
#[derive(Debug)]
pub(crate) struct TokenCache {
    clock: Arc<dyn Clock>,
    token: Option<AccessToken>,
}

impl TokenCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        TokenCache { clock, token: None }
    }

    /// Returns the cached token while it is outside the grace period.
    pub fn current(&self) -> Option<&str> {
        let token = self.token.as_ref()?;
        if self.clock.now() + GRACE_PERIOD < token.expires_at {
            Some(token.value.as_str())
        } else {
            None
        }
    }

    /// Installs a freshly issued token and returns it.
    ///
    /// The returned token is handed out even when `expires_in` is shorter
    /// than the grace period; the next call will simply refresh again.
    /// Lifetimes beyond [`MAX_TOKEN_LIFETIME`] are clamped to it.
    pub fn replace(&mut self, response: TokenResponse) -> Result<&str> {
        self.token = None;
        if response.access_token.is_empty() {
            return Err(MqError::auth("token endpoint returned an empty access token"));
        }
        let lifetime = Duration::from_secs(response.expires_in).min(MAX_TOKEN_LIFETIME);
        let expires_at = self
            .clock
            .now()
            .checked_add(lifetime)
            .ok_or_else(|| MqError::auth("token expiry is out of range"))?;
        let token = self.token.insert(AccessToken {
            value: response.access_token,
            expires_at,
        });
        Ok(token.value.as_str())
    }
}
