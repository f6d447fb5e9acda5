//! Client configuration and the builder shared by both calling modes.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Clock, Credentials, Environment, SystemClock};
use crate::blocking;
use crate::client::MqClient;
use crate::error::Result;

/// API version used by every resource unless it overrides it.
pub const DEFAULT_API_VERSION: &str = "v1";

/// User agent sent with every request, token requests included.
pub const USER_AGENT: &str = concat!("machineq-rs/", env!("CARGO_PKG_VERSION"));

/// Resolved settings of one client instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) credentials: Credentials,
    pub(crate) api_version: String,
    pub(crate) extra_prefix: String,
    pub(crate) api_root: Option<String>,
    pub(crate) token_url: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: String,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ClientConfig {
    pub fn environment(&self) -> Environment {
        self.credentials.environment()
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Scheme and host of the resource API, e.g. `https://api.dev.machineq.net`.
    pub fn api_root(&self) -> String {
        match &self.api_root {
            Some(root) => root.trim_end_matches('/').to_string(),
            None => match self.environment().host_label() {
                Some(label) => format!("https://api.{label}.machineq.net"),
                None => "https://api.machineq.net".to_string(),
            },
        }
    }

    /// Token endpoint, e.g. `https://identity.dev.machineq.net/oauth/token`.
    pub fn token_url(&self) -> String {
        match &self.token_url {
            Some(url) => url.clone(),
            None => match self.environment().host_label() {
                Some(label) => format!("https://identity.{label}.machineq.net/oauth/token"),
                None => "https://identity.machineq.net/oauth/token".to_string(),
            },
        }
    }

    /// `{api_root}/{version}{extra_prefix}`.
    pub fn base_url(&self, version: &str) -> String {
        format!("{}/{}{}", self.api_root(), version, self.extra_prefix)
    }
}

/// Builder for [`MqClient`] and [`blocking::MqClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        ClientBuilder {
            config: ClientConfig {
                credentials,
                api_version: DEFAULT_API_VERSION.to_string(),
                extra_prefix: String::new(),
                api_root: None,
                token_url: None,
                timeout: None,
                user_agent: USER_AGENT.to_string(),
                clock: Arc::new(SystemClock),
            },
        }
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Path appended after the version segment, e.g. `/subscriber`.
    pub fn extra_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.extra_prefix = prefix.into();
        self
    }

    /// Overrides the scheme and host of the resource API.
    pub fn api_root(mut self, root: impl Into<String>) -> Self {
        self.config.api_root = Some(root.into());
        self
    }

    /// Overrides the full token endpoint URL.
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.config.token_url = Some(url.into());
        self
    }

    /// Overall timeout for API calls. Token requests always use 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.config.clock = clock;
        self
    }

    #[cfg(test)]
    pub(crate) fn into_config(self) -> ClientConfig {
        self.config
    }

    pub fn build(self) -> Result<MqClient> {
        MqClient::from_config(self.config)
    }

    /// Builds the blocking client. Must not be called from within an async
    /// runtime, since reqwest's blocking client runs its own.
    pub fn build_blocking(self) -> Result<blocking::MqClient> {
        blocking::MqClient::from_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(env: Environment) -> ClientConfig {
        ClientBuilder::new(Credentials::new("id", "secret").with_environment(env)).config
    }

    #[test]
    fn production_hosts_have_no_label() {
        let cfg = config(Environment::Production);
        assert_eq!(cfg.api_root(), "https://api.machineq.net");
        assert_eq!(cfg.token_url(), "https://identity.machineq.net/oauth/token");
        assert_eq!(cfg.base_url("v1"), "https://api.machineq.net/v1");
    }

    #[test]
    fn non_production_hosts_carry_environment_label() {
        let cfg = config(Environment::Development);
        assert_eq!(cfg.api_root(), "https://api.dev.machineq.net");
        assert_eq!(cfg.token_url(), "https://identity.dev.machineq.net/oauth/token");

        let cfg = config(Environment::Preview);
        assert_eq!(cfg.base_url("v0"), "https://api.preview.machineq.net/v0");
    }

    #[test]
    fn extra_prefix_follows_version() {
        let cfg = ClientBuilder::new(Credentials::new("id", "secret"))
            .extra_prefix("/subscriber")
            .config;
        assert_eq!(cfg.base_url("v1"), "https://api.machineq.net/v1/subscriber");
    }

    #[test]
    fn overrides_take_precedence() {
        let cfg = ClientBuilder::new(Credentials::new("id", "secret"))
            .api_root("http://127.0.0.1:8080/")
            .token_url("http://127.0.0.1:8081/oauth/token")
            .api_version("v2")
            .config;
        assert_eq!(cfg.base_url(cfg.api_version()), "http://127.0.0.1:8080/v2");
        assert_eq!(cfg.token_url(), "http://127.0.0.1:8081/oauth/token");
    }

    #[test]
    fn user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("machineq-rs/"));
    }
}
