//! `/devices`: LoRaWAN end devices, their payloads and health.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{IdResponse, Resource};
use crate::call::Execute;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationType {
    #[default]
    #[serde(rename = "OTAA")]
    Otaa,
    #[serde(rename = "ABP")]
    Abp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceStatistics {
    pub health_state: String,
    pub spreading_factor: i64,
    #[serde(rename = "AverageRSSI")]
    pub average_rssi: f64,
    #[serde(rename = "AverageESP")]
    pub average_esp: f64,
    #[serde(rename = "AverageSNR")]
    pub average_snr: f64,
    pub packet_error_rate: f64,
    pub battery_level: i64,
    pub average_weekly_packets: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceInstance {
    pub name: String,
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    pub activation_type: String,
    pub service_profile: String,
    pub device_profile: String,
    pub decoder_type: String,
    pub output_profile: String,
    pub private_data: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: String,
    pub last_uplink: Option<DateTime<Utc>>,
    pub statistics: DeviceStatistics,
    pub payload_decoder: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceCreate {
    pub name: String,
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_skey: Option<String>,
    pub activation_type: ActivationType,
    #[serde(
        rename = "ApplicationEUI",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub application_eui: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
    #[serde(
        rename = "ApplicationSKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub application_s_key: Option<String>,
    pub service_profile: String,
    pub device_profile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoder_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_profile: Option<String>,
    #[serde(default)]
    pub private_data: bool,
    #[serde(
        rename = "NetworkSKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub network_s_key: Option<String>,
}

/// Downlink queued for a device. Either `payload` (hex) or
/// `application_payload` (encoded by the device's decoder) is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceMessage {
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flush_queue: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_payload: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DevicePatch {
    pub name: String,
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoder_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_data: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_output_profile: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceUpdate {
    pub name: String,
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    pub service_profile: String,
    pub device_profile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoder_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_data: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DevicePayload {
    pub time: String,
    pub data: Value,
    pub application_data: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DevicePayloadResponse {
    pub payloads: Vec<DevicePayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceResponse {
    pub devices: Vec<DeviceInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DevicesHealthResponse {
    pub good: Vec<DeviceInstance>,
    pub fair: Vec<DeviceInstance>,
    pub poor: Vec<DeviceInstance>,
    pub offline: Vec<DeviceInstance>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DevicesHealthCountResponse {
    pub good: u64,
    pub fair: u64,
    pub poor: u64,
    pub offline: u64,
}

pub struct Devices<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> Devices<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Devices {
            resource: Resource::new(client, "/devices"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<DeviceInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<DeviceResponse>()
                .map(|r| r.devices),
        )
    }

    pub fn get(&self, deveui: &str) -> C::Output<'c, DeviceInstance> {
        self.resource
            .send(self.resource.get(deveui).json::<DeviceInstance>())
    }

    /// Registers a device and returns its DevEUI.
    pub fn create(&self, data: &DeviceCreate) -> C::Output<'c, String> {
        self.resource.send(
            self.resource
                .post("")
                .body(data)
                .json::<IdResponse>()
                .map(|r| r.id),
        )
    }

    pub fn update(&self, deveui: &str, data: &DeviceUpdate) -> C::Output<'c, DeviceInstance> {
        self.resource
            .send(self.resource.put(deveui).body(data).json::<DeviceInstance>())
    }

    pub fn patch(&self, deveui: &str, data: &DevicePatch) -> C::Output<'c, DeviceInstance> {
        self.resource
            .send(self.resource.patch(deveui).body(data).json::<DeviceInstance>())
    }

    pub fn delete(&self, deveui: &str) -> C::Output<'c, ()> {
        self.resource.send(self.resource.delete(deveui).discard())
    }

    /// Queues a downlink for the device.
    pub fn send_message(&self, deveui: &str, data: &DeviceMessage) -> C::Output<'c, ()> {
        self.resource.send(
            self.resource
                .post(&format!("{deveui}/message"))
                .body(data)
                .discard(),
        )
    }

    /// Uplink payloads, optionally bounded by ISO 8601 timestamps.
    pub fn get_payloads(
        &self,
        deveui: &str,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> C::Output<'c, DevicePayloadResponse> {
        self.resource.send(
            self.resource
                .get(&format!("{deveui}/payloads"))
                .query_opt("StartTime", start_time)
                .query_opt("EndTime", end_time)
                .json::<DevicePayloadResponse>(),
        )
    }

    pub fn get_health(&self) -> C::Output<'c, DevicesHealthResponse> {
        self.resource
            .send(self.resource.get("health").json::<DevicesHealthResponse>())
    }

    pub fn get_health_count(&self) -> C::Output<'c, DevicesHealthCountResponse> {
        self.resource.send(
            self.resource
                .get("healthcount")
                .json::<DevicesHealthCountResponse>(),
        )
    }
}
