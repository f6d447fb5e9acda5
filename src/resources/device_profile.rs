//! `/deviceprofiles`: LoRaWAN device profiles and their members.

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceProfileInstance {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceProfileResponse {
    pub device_profiles: Vec<DeviceProfileInstance>,
}

/// Outcome for one device of a bulk reassignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceProfileDevicesResponse {
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    pub response: bool,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceProfileDevicesUpdate {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceProfileDevicesUpdateResponse {
    pub responses: Vec<DeviceProfileDevicesResponse>,
}

pub struct DeviceProfiles<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> DeviceProfiles<'c, C> {
    pub fn new(client: &'c C) -> Self {
        DeviceProfiles {
            resource: Resource::new(client, "/deviceprofiles"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<DeviceProfileInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<DeviceProfileResponse>()
                .map(|r| r.device_profiles),
        )
    }

    /// Moves the listed devices onto the profile. Failures are reported per
    /// device rather than failing the call.
    pub fn update_devices(
        &self,
        profile_id: &str,
        data: &DeviceProfileDevicesUpdate,
    ) -> C::Output<'c, DeviceProfileDevicesUpdateResponse> {
        self.resource.send(
            self.resource
                .patch(&format!("{profile_id}/devices"))
                .body(data)
                .json::<DeviceProfileDevicesUpdateResponse>(),
        )
    }
}
