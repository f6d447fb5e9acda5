//! Rust client library for the MachineQ IoT device-management API.
//!
//! Provides OAuth2 client-credentials authentication with a cached,
//! expiry-aware token, a request pipeline that maps MachineQ error bodies
//! to a typed error taxonomy, and typed facades over the resource groups
//! (devices, gateways, groups, profiles, users, roles, logs, ...).
//!
//! Both an async client ([`MqClient`]) and a blocking one
//! ([`blocking::MqClient`]) are available. They share the same facades:
//! a facade method returns a future on the async client and a `Result` on
//! the blocking one.
//!
//! # Modules
//!
//! - [`auth`]: credentials, environments and the token cache.
//! - [`call`]: request descriptions and the [`Execute`] trait.
//! - [`client`] / [`blocking`]: the two executors.
//! - [`config`]: [`ClientBuilder`] and resolved hosts.
//! - [`error`]: [`MqError`] and the API error taxonomy.
//! - [`resources`]: one facade per resource group.
//! - [`response`]: status + body classification.
//!
//! # Quick Start
//!
//! ```no_run
//! use machineq::{ClientBuilder, Credentials, Environment};
//!
//! # async fn run() -> machineq::Result<()> {
//! let credentials = Credentials::new("client-id", "client-secret")
//!     .with_environment(Environment::Development);
//! let client = ClientBuilder::new(credentials).build()?;
//!
//! for device in client.devices().get_all().await? {
//!     println!("{} {}", device.deveui, device.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod blocking;
pub mod call;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod response;

pub use auth::{Clock, Credentials, Environment, SystemClock};
pub use call::{Call, Execute};
pub use client::MqClient;
pub use config::{ClientBuilder, ClientConfig};
pub use error::{ApiError, ApiErrorKind, MqError, Result};
pub use response::Payload;
