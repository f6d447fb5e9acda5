//! `/gateways`: LoRaWAN gateways, their radio statistics and event history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdResponse, Resource};
use crate::call::Execute;

/// Gateway position. Values are strings on the wire; `z` defaults to `"1"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "X", default)]
    pub x: String,
    #[serde(rename = "Y", default)]
    pub y: String,
    #[serde(rename = "Z", default = "default_altitude")]
    pub z: String,
}

fn default_altitude() -> String {
    "1".to_string()
}

impl Coordinates {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Coordinates {
            x: x.into(),
            y: y.into(),
            z: default_altitude(),
        }
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Coordinates::new("", "")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    #[default]
    Indoor,
    Outdoor,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventField {
    Backhaul,
    NsConnect,
    OnlineStatus,
    PacketForwarder,
    RebootTime,
    BackhaulConnected,
    BackhaulDisconnected,
    PacketForwarderConnected,
    PacketForwarderDisconnected,
    PushRfConfig,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GpsSyncStatus {
    LockingOrNoSignal,
    Locked,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSyncStatus {
    Local,
    Ntp,
    Gps,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayLocationType {
    LocationAdministratively,
    LocationGps,
    #[default]
    #[serde(other)]
    LocationUnknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IsmBand {
    Eu868,
    Eu433,
    Cn779,
    As923,
    Kr920,
    Sg920,
    Tw920,
    Us915,
    Au915,
    Cn470,
    In865,
    Ru864,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    #[serde(rename = "NEVERCNX")]
    NeverConnected,
    #[serde(rename = "CNX")]
    Connected,
    #[serde(rename = "DISC")]
    Disconnected,
    #[default]
    #[serde(rename = "CNX_UNKNOWN", other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthState {
    #[serde(rename = "INIT")]
    Initializing,
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "BACKHAUL_CNX_ERROR")]
    BackhaulConnectError,
    #[serde(rename = "RF_ERROR")]
    RfError,
    #[default]
    #[serde(rename = "HEALTH_UNKNOWN", other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Manufacturer {
    #[serde(rename = "COMCAST")]
    Comcast,
    #[serde(rename = "TEKTELIC")]
    Tektelic,
    #[serde(rename = "MULTITECH")]
    Multitech,
    #[default]
    #[serde(rename = "UNKNOWN_MFR", other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterfaceState {
    Down,
    UpLinkdown,
    UpNosignal,
    UpNoip,
    UpNetworkdown,
    UpRunning,
    UpRunningUsed,
    #[default]
    #[serde(rename = "IF_UNKNOWN", other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InterfaceStatistics {
    pub name: String,
    pub state: InterfaceState,
    #[serde(rename = "Type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayStatistics {
    pub connection_state: ConnectionState,
    pub health_state: HealthState,
    pub gps_sync_status: GpsSyncStatus,
    pub time_sync_status: TimeSyncStatus,
    pub last_reporting_time: Option<DateTime<Utc>>,
    pub last_uplink_time: Option<DateTime<Utc>>,
    pub last_downlink_time: Option<DateTime<Utc>>,
    pub location_type: GatewayLocationType,
    #[serde(rename = "RfRegionID")]
    pub rf_region_id: String,
    #[serde(rename = "IsRX2Activated")]
    pub is_rx2_activated: bool,
    pub ism_band: IsmBand,
    pub last_geo_latitude: f64,
    pub last_geo_longitude: f64,
    pub last_geo_altitude: f64,
    pub software_version: String,
    pub uplink_packet_per_hour: i64,
    pub downlink_packet_per_hour: i64,
    pub last_system_reboot: Option<DateTime<Utc>>,
    pub interface_statistics: Vec<InterfaceStatistics>,
    #[serde(rename = "CPUPercent")]
    pub cpu_percent: i64,
    #[serde(rename = "FreeMemKB")]
    pub free_mem_kb: i64,
    #[serde(rename = "CellRSSI")]
    pub cell_rssi: i64,
    pub cell_provider: String,
    #[serde(rename = "WiFiSSID")]
    pub wifi_ssid: String,
    pub radio_error: String,
    pub tx_power: i64,
    #[serde(rename = "VSWR", alias = "Vswr")]
    pub vswr: i64,
    pub last_geo_valid: bool,
    pub secure_backhaul_enabled: bool,
    pub secure_backhaul_active: bool,
    pub model: String,
    #[serde(rename = "LrrCNX")]
    pub lrr_cnx: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayInstance {
    pub id: String,
    pub gateway_profile: String,
    pub mac_address: String,
    pub node_id: String,
    pub name: String,
    pub antenna_gain: String,
    pub location_type: LocationType,
    #[serde(rename = "GPSEnabled")]
    pub gps_enabled: bool,
    pub coordinates: Coordinates,
    pub cellular_enabled: bool,
    #[serde(rename = "IMEI", alias = "Imei")]
    pub imei: String,
    #[serde(rename = "ICCID", alias = "Iccid")]
    pub iccid: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: String,
    pub manufacturer: Manufacturer,
    pub model: String,
    pub statistics: Option<GatewayStatistics>,
    pub rf_region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatewayCreate {
    pub gateway_profile: String,
    pub mac_address: String,
    pub node_id: String,
    pub name: String,
    #[serde(default = "default_antenna_gain")]
    pub antenna_gain: String,
    #[serde(default)]
    pub location_type: LocationType,
    #[serde(
        rename = "GPSEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gps_enabled: Option<bool>,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellular_enabled: Option<bool>,
    #[serde(rename = "IMEI", default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    #[serde(rename = "ICCID", default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,
}

fn default_antenna_gain() -> String {
    "0".to_string()
}

impl Default for GatewayCreate {
    fn default() -> Self {
        GatewayCreate {
            gateway_profile: String::new(),
            mac_address: String::new(),
            node_id: String::new(),
            name: String::new(),
            antenna_gain: default_antenna_gain(),
            location_type: LocationType::Indoor,
            gps_enabled: None,
            coordinates: Coordinates::default(),
            cellular_enabled: None,
            imei: None,
            iccid: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatewayPatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antenna_gain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_profile: Option<String>,
    #[serde(
        rename = "GPSEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gps_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellular_enabled: Option<bool>,
    #[serde(rename = "IMEI", default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    #[serde(rename = "ICCID", default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rf_region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatewayUpdate {
    pub id: String,
    pub name: String,
    pub antenna_gain: String,
    pub location_type: LocationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub gateway_profile: String,
    #[serde(
        rename = "GPSEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gps_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellular_enabled: Option<bool>,
    #[serde(rename = "IMEI", default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    #[serde(rename = "ICCID", default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,
}

/// A device heard by a gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayDevice {
    pub name: String,
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    pub statistics: String,
    pub last_uplink: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayDeviceResponse {
    pub devices: Vec<GatewayDevice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayEvent {
    pub time: String,
    pub field: GatewayEventField,
    pub old_value: String,
    pub new_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayEventsResponse {
    #[serde(rename = "NodeID")]
    pub node_id: String,
    pub events: Vec<GatewayEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewaysConnectionResponse {
    pub never_connected: Vec<GatewayInstance>,
    pub disconnected: Vec<GatewayInstance>,
    pub connected: Vec<GatewayInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewaysHealthResponse {
    pub initializing: Vec<GatewayInstance>,
    pub connect_error: Vec<GatewayInstance>,
    pub rf_error: Vec<GatewayInstance>,
    pub active: Vec<GatewayInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayResponse {
    pub gateways: Vec<GatewayInstance>,
}

pub struct Gateways<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> Gateways<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Gateways {
            resource: Resource::new(client, "/gateways"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<GatewayInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<GatewayResponse>()
                .map(|r| r.gateways),
        )
    }

    pub fn get(&self, gateway_id: &str) -> C::Output<'c, GatewayInstance> {
        self.resource
            .send(self.resource.get(gateway_id).json::<GatewayInstance>())
    }

    /// Registers a gateway and returns its id.
    pub fn create(&self, data: &GatewayCreate) -> C::Output<'c, String> {
        self.resource.send(
            self.resource
                .post("")
                .body(data)
                .json::<IdResponse>()
                .map(|r| r.id),
        )
    }

    pub fn update(&self, gateway_id: &str, data: &GatewayUpdate) -> C::Output<'c, GatewayInstance> {
        self.resource.send(
            self.resource
                .put(gateway_id)
                .body(data)
                .json::<GatewayInstance>(),
        )
    }

    pub fn patch(&self, gateway_id: &str, data: &GatewayPatch) -> C::Output<'c, GatewayInstance> {
        self.resource.send(
            self.resource
                .patch(gateway_id)
                .body(data)
                .json::<GatewayInstance>(),
        )
    }

    pub fn delete(&self, gateway_id: &str) -> C::Output<'c, ()> {
        self.resource.send(self.resource.delete(gateway_id).discard())
    }

    /// Devices heard by the gateway, optionally limited to the last `days`.
    pub fn get_devices(
        &self,
        gateway_id: &str,
        days: Option<u32>,
    ) -> C::Output<'c, GatewayDeviceResponse> {
        self.resource.send(
            self.resource
                .get(&format!("{gateway_id}/devices"))
                .query_opt("Days", days)
                .json::<GatewayDeviceResponse>(),
        )
    }

    pub fn get_statistics(&self, gateway_id: &str) -> C::Output<'c, GatewayStatistics> {
        self.resource.send(
            self.resource
                .get(&format!("{gateway_id}/statistics"))
                .json::<GatewayStatistics>(),
        )
    }

    /// State-change history, keyed by the gateway's node id rather than its id.
    pub fn get_events(
        &self,
        node_id: &str,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> C::Output<'c, GatewayEventsResponse> {
        self.resource.send(
            self.resource
                .get(&format!("{node_id}/events"))
                .query_opt("StartTime", start_time)
                .query_opt("EndTime", end_time)
                .json::<GatewayEventsResponse>(),
        )
    }

    pub fn get_connection_status(&self) -> C::Output<'c, GatewaysConnectionResponse> {
        self.resource.send(
            self.resource
                .get("connection")
                .json::<GatewaysConnectionResponse>(),
        )
    }

    pub fn get_health(&self) -> C::Output<'c, GatewaysHealthResponse> {
        self.resource
            .send(self.resource.get("health").json::<GatewaysHealthResponse>())
    }
}
