//! Async client for the MachineQ API.
//!
//! `MqClient` wraps a `reqwest::Client` and the token cache behind a
//! `tokio::sync::Mutex`, and implements [`Execute`] by returning boxed
//! futures, so every resource facade works with `.await`.
//!
//! Token lifecycle:
//! - Lazy acquisition: the first request finds no cached token and refreshes.
//! - Expiry-aware: a token inside the 5-second grace period is treated as
//!   absent and the next request refreshes it first.
//! - Serialized refresh: the lock is held across the token request, so a
//!   client never has more than one refresh in flight and concurrent callers
//!   wait for it instead of racing.
//! - No retries: a 401 from the API surfaces as an `Unauthorized` API error.

use futures::future::BoxFuture;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::{self, TOKEN_REQUEST_TIMEOUT, TokenCache};
use crate::call::{Call, Execute};
use crate::config::ClientConfig;
use crate::error::{MqError, Result};
use crate::response;

/// Async MachineQ client. See [`crate::ClientBuilder`].
#[derive(Debug)]
pub struct MqClient {
    http: Client,
    config: ClientConfig,
    token: Mutex<TokenCache>,
}

impl MqClient {
    pub(crate) fn from_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(MqClient {
            http: builder.build()?,
            token: Mutex::new(TokenCache::new(config.clock.clone())),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a valid bearer token, refreshing it first if none is cached
    /// or the cached one is inside the grace period.
    pub async fn access_token(&self) -> Result<String> {
        let mut cache = self.token.lock().await;
        if let Some(token) = cache.current() {
            return Ok(token.to_owned());
        }

        let response = self.request_token().await?;
        cache.replace(response).map(str::to_owned)
    }

    /// One client-credentials grant against the token endpoint.
    async fn request_token(&self) -> Result<auth::TokenResponse> {
        info!(environment = %self.config.environment(), "refreshing access token");

        let response = self
            .http
            .post(self.config.token_url())
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .form(&self.config.credentials.token_request())
            .send()
            .await
            .map_err(auth::token_transport_error)?;

        // Read the body before checking the status so the rejection reason
        // ends up in the error message.
        let status = response.status();
        let body = response.text().await.map_err(auth::token_transport_error)?;

        let token = auth::parse_token_response(status, &body).inspect_err(|_| {
            warn!(%status, "token request rejected");
        })?;
        debug!(expires_in = token.expires_in, "access token refreshed");
        Ok(token)
    }

    /// Sends one call: serialize, authenticate, round trip, classify, decode.
    pub async fn send<T: Send + 'static>(&self, call: Call<T>) -> Result<T> {
        let (parts, decode) = call.into_parts()?;
        let token = self.access_token().await?;

        let mut request = self
            .http
            .request(parts.method.clone(), &parts.url)
            .bearer_auth(&token)
            .header(CONTENT_TYPE, "application/json");
        if !parts.query.is_empty() {
            request = request.query(&parts.query);
        }
        if let Some(body) = parts.body {
            request = request.body(body);
        }

        debug!(method = %parts.method, url = %parts.url, "sending MachineQ request");
        let response = request.send().await.map_err(MqError::Network)?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(method = %parts.method, url = %parts.url, %status, "received MachineQ response");

        decode(response::classify(status, &body)?)
    }

    crate::resources::resource_accessors!();
}

impl Execute for MqClient {
    type Output<'a, T: 'static> = BoxFuture<'a, Result<T>>;

    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn execute<T: Send + 'static>(&self, call: Call<T>) -> Self::Output<'_, T> {
        Box::pin(self.send(call))
    }
}
