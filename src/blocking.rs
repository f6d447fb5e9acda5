//! Blocking client for the MachineQ API.
//!
//! Same pipeline as [`crate::MqClient`], run to completion on the calling
//! thread with `reqwest::blocking`. Facade methods return a plain `Result`.
//! Do not build or drop this client inside an async runtime.

use std::sync::{Mutex, PoisonError};

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use crate::auth::{self, TOKEN_REQUEST_TIMEOUT, TokenCache};
use crate::call::{Call, Execute};
use crate::config::ClientConfig;
use crate::error::{MqError, Result};
use crate::response;

/// Blocking MachineQ client. See [`crate::ClientBuilder::build_blocking`].
#[derive(Debug)]
pub struct MqClient {
    http: Client,
    config: ClientConfig,
    token: Mutex<TokenCache>,
}

impl MqClient {
    pub(crate) fn from_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        // The blocking client defaults to a 30s timeout; `None` disables it
        // so both clients behave the same when no timeout is configured.
        builder = builder.timeout(config.timeout);
        Ok(MqClient {
            http: builder.build()?,
            token: Mutex::new(TokenCache::new(config.clock.clone())),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a valid bearer token, refreshing it first if needed.
    pub fn access_token(&self) -> Result<String> {
        // The cache is only ever replaced wholesale, so a poisoned lock
        // still guards a consistent value.
        let mut cache = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = cache.current() {
            return Ok(token.to_owned());
        }

        let response = self.request_token()?;
        cache.replace(response).map(str::to_owned)
    }

    fn request_token(&self) -> Result<auth::TokenResponse> {
        info!(environment = %self.config.environment(), "refreshing access token");

        let response = self
            .http
            .post(self.config.token_url())
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .form(&self.config.credentials.token_request())
            .send()
            .map_err(auth::token_transport_error)?;

        let status = response.status();
        let body = response.text().map_err(auth::token_transport_error)?;

        let token = auth::parse_token_response(status, &body).inspect_err(|_| {
            warn!(%status, "token request rejected");
        })?;
        debug!(expires_in = token.expires_in, "access token refreshed");
        Ok(token)
    }

    pub fn send<T: Send + 'static>(&self, call: Call<T>) -> Result<T> {
        let (parts, decode) = call.into_parts()?;
        let token = self.access_token()?;

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
        let response = request.send().map_err(MqError::Network)?;
        let status = response.status();
        let body = response.bytes()?;
        debug!(method = %parts.method, url = %parts.url, %status, "received MachineQ response");

        decode(response::classify(status, &body)?)
    }

    crate::resources::resource_accessors!();
}

impl Execute for MqClient {
    type Output<'a, T: 'static> = Result<T>;

    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn execute<T: Send + 'static>(&self, call: Call<T>) -> Self::Output<'_, T> {
        self.send(call)
    }
}
