//! Typed facades over the MachineQ resource groups.
//!
//! Every facade is generic over [`Execute`], so `client.devices().get(eui)`
//! is a future on the async client and a `Result` on the blocking one.
//! Facades only build URLs, attach bodies and query parameters, and pick
//! the response shape; all I/O and error handling happens in the executor.
//!
//! Wire names are PascalCase with a few acronym exceptions (`DevEUI`,
//! `AverageRSSI`, ...) declared per field.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::call::{Call, Execute};
use crate::response::Payload;

pub mod account;
pub mod application;
pub mod decoder_type;
pub mod device;
pub mod device_group;
pub mod device_profile;
pub mod gateway;
pub mod gateway_group;
pub mod gateway_profile;
pub mod logs;
pub mod multicast_group;
pub mod output_profile;
pub mod rf_region;
pub mod role;
pub mod service_profile;
pub mod users;
pub mod version;

/// `{"Response": true}`, returned by many mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OkResponse {
    pub response: bool,
}

/// `{"Id": "..."}`, returned by most create endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IdResponse {
    pub id: String,
}

/// Base URL and path of one resource group, bound to a client.
pub(crate) struct Resource<'c, C> {
    client: &'c C,
    base_url: String,
    base_path: &'static str,
}

impl<'c, C: Execute> Resource<'c, C> {
    pub fn new(client: &'c C, base_path: &'static str) -> Self {
        let base_url = client.config().base_url(client.config().api_version());
        Resource {
            client,
            base_url,
            base_path,
        }
    }

    /// For resources served from a different API version than the client's.
    pub fn with_version(client: &'c C, base_path: &'static str, version: &str) -> Self {
        Resource {
            client,
            base_url: client.config().base_url(version),
            base_path,
        }
    }

    /// Joins a sub-path onto the resource. Paths starting with `/` are
    /// resolved against the API base instead of the resource.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else if path.is_empty() {
            format!("{}{}", self.base_url, self.base_path)
        } else {
            format!("{}{}/{}", self.base_url, self.base_path, path)
        }
    }

    pub fn get(&self, path: &str) -> Call<Payload> {
        Call::new(Method::GET, self.url(path))
    }

    pub fn post(&self, path: &str) -> Call<Payload> {
        Call::new(Method::POST, self.url(path))
    }

    pub fn put(&self, path: &str) -> Call<Payload> {
        Call::new(Method::PUT, self.url(path))
    }

    pub fn patch(&self, path: &str) -> Call<Payload> {
        Call::new(Method::PATCH, self.url(path))
    }

    pub fn delete(&self, path: &str) -> Call<Payload> {
        Call::new(Method::DELETE, self.url(path))
    }

    pub fn send<T: Send + 'static>(&self, call: Call<T>) -> C::Output<'c, T> {
        self.client.execute(call)
    }
}

/// Generates the resource accessors shared by the async and blocking clients.
macro_rules! resource_accessors {
    () => {
        /// Account details and permissions of the authenticated principal.
        pub fn account(&self) -> $crate::resources::account::Account<'_, Self> {
            $crate::resources::account::Account::new(self)
        }

        pub fn applications(&self) -> $crate::resources::application::Applications<'_, Self> {
            $crate::resources::application::Applications::new(self)
        }

        pub fn decoder_types(&self) -> $crate::resources::decoder_type::DecoderTypes<'_, Self> {
            $crate::resources::decoder_type::DecoderTypes::new(self)
        }

        pub fn devices(&self) -> $crate::resources::device::Devices<'_, Self> {
            $crate::resources::device::Devices::new(self)
        }

        pub fn device_groups(&self) -> $crate::resources::device_group::DeviceGroups<'_, Self> {
            $crate::resources::device_group::DeviceGroups::new(self)
        }

        pub fn device_profiles(
            &self,
        ) -> $crate::resources::device_profile::DeviceProfiles<'_, Self> {
            $crate::resources::device_profile::DeviceProfiles::new(self)
        }

        pub fn gateways(&self) -> $crate::resources::gateway::Gateways<'_, Self> {
            $crate::resources::gateway::Gateways::new(self)
        }

        pub fn gateway_groups(&self) -> $crate::resources::gateway_group::GatewayGroups<'_, Self> {
            $crate::resources::gateway_group::GatewayGroups::new(self)
        }

        pub fn gateway_profiles(
            &self,
        ) -> $crate::resources::gateway_profile::GatewayProfiles<'_, Self> {
            $crate::resources::gateway_profile::GatewayProfiles::new(self)
        }

        pub fn logs(&self) -> $crate::resources::logs::Logs<'_, Self> {
            $crate::resources::logs::Logs::new(self)
        }

        /// Multicast groups are served from API version `v0`.
        pub fn multicast_groups(
            &self,
        ) -> $crate::resources::multicast_group::MulticastGroups<'_, Self> {
            $crate::resources::multicast_group::MulticastGroups::new(self)
        }

        pub fn output_profiles(
            &self,
        ) -> $crate::resources::output_profile::OutputProfiles<'_, Self> {
            $crate::resources::output_profile::OutputProfiles::new(self)
        }

        pub fn rf_regions(&self) -> $crate::resources::rf_region::RfRegions<'_, Self> {
            $crate::resources::rf_region::RfRegions::new(self)
        }

        pub fn roles(&self) -> $crate::resources::role::Roles<'_, Self> {
            $crate::resources::role::Roles::new(self)
        }

        pub fn service_profiles(
            &self,
        ) -> $crate::resources::service_profile::ServiceProfiles<'_, Self> {
            $crate::resources::service_profile::ServiceProfiles::new(self)
        }

        pub fn users(&self) -> $crate::resources::users::Users<'_, Self> {
            $crate::resources::users::Users::new(self)
        }

        /// Version of the remote API, not of this crate.
        pub fn version(&self) -> $crate::resources::version::Version<'_, Self> {
            $crate::resources::version::Version::new(self)
        }
    };
}

pub(crate) use resource_accessors;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::auth::Credentials;
    use crate::call::{Call, Execute};
    use crate::config::{ClientBuilder, ClientConfig};

    /// Executor that hands the call back instead of sending it.
    pub struct Recorder {
        config: ClientConfig,
    }

    impl Recorder {
        pub fn new() -> Self {
            Recorder {
                config: ClientBuilder::new(Credentials::new("id", "secret")).into_config(),
            }
        }
    }

    impl Execute for Recorder {
        type Output<'a, T: 'static> = Call<T>;

        fn config(&self) -> &ClientConfig {
            &self.config
        }

        fn execute<T: Send + 'static>(&self, call: Call<T>) -> Self::Output<'_, T> {
            call
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::Recorder;
    use super::*;

    #[test]
    fn url_join_rules() {
        let client = Recorder::new();
        let devices = Resource::new(&client, "/devices");
        assert_eq!(devices.url(""), "https://api.machineq.net/v1/devices");
        assert_eq!(devices.url("0011"), "https://api.machineq.net/v1/devices/0011");
        assert_eq!(devices.url("/version"), "https://api.machineq.net/v1/version");
    }

    #[test]
    fn version_override_only_affects_that_resource() {
        let client = Recorder::new();
        let multicast = Resource::with_version(&client, "/multicastgroups", "v0");
        assert_eq!(multicast.url(""), "https://api.machineq.net/v0/multicastgroups");
        let roles = Resource::new(&client, "/roles");
        assert_eq!(roles.url(""), "https://api.machineq.net/v1/roles");
    }

    #[test]
    fn envelopes_use_pascal_case() {
        let ok: OkResponse = serde_json::from_str(r#"{"Response": true}"#).unwrap();
        assert!(ok.response);
        let id: IdResponse = serde_json::from_str(r#"{"Id": "abc"}"#).unwrap();
        assert_eq!(id.id, "abc");
    }
}
