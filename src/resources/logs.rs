//! `/logs`: per-frame network logs for devices and gateways.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;
use crate::call::Execute;

macro_rules! frame_filter {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

frame_filter!(
    /// Direction of the frame.
    StreamFilter {
        NoFilter => "NOSTREAMFILTER",
        Upstream => "UPSTREAM",
        Downstream => "DOWNSTREAM",
    }
);

frame_filter!(MessageTypeFilter {
    NoFilter => "NOMESSAGETYPEFILTER",
    Mac => "MAC",
    MacData => "MACDATA",
    Data => "DATA",
    NoneType => "NONE",
});

frame_filter!(LateFilter {
    NoFilter => "NOLATEFILTER",
    NotLate => "LATEFALSE",
    Late => "LATETRUE",
});

frame_filter!(
    /// Join procedure frames.
    ActivationFilter {
        NoFilter => "NOACTIVATIONFILTER",
        JoinRequest => "JOINREQUEST",
        JoinAccept => "JOINACCEPT",
    }
);

frame_filter!(AckFilter {
    NoFilter => "NOACKFILTER",
    NotAcked => "ACKFALSE",
    Acked => "ACKTRUE",
});

/// Filters for [`Logs::get_all`]. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub deveui: Option<String>,
    pub gateway_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub stream: Option<StreamFilter>,
    pub message_type: Option<MessageTypeFilter>,
    pub late: Option<LateFilter>,
    pub activation: Option<ActivationFilter>,
    pub ack: Option<AckFilter>,
}

impl LogQuery {
    pub fn device(deveui: impl Into<String>) -> Self {
        LogQuery {
            deveui: Some(deveui.into()),
            ..Default::default()
        }
    }

    pub fn gateway(gateway_id: impl Into<String>) -> Self {
        LogQuery {
            gateway_id: Some(gateway_id.into()),
            ..Default::default()
        }
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(deveui) = self.deveui.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("DevEUI", deveui.to_string()));
        }
        if let Some(gateway_id) = self.gateway_id.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("GatewayID", gateway_id.to_string()));
        }
        if let Some(start) = self.start_time {
            pairs.push(("StartTime", utc_timestamp(start)));
        }
        if let Some(end) = self.end_time {
            pairs.push(("EndTime", utc_timestamp(end)));
        }
        if let Some(page) = self.page {
            pairs.push(("Page", page.to_string()));
        }
        if let Some(stream) = self.stream {
            pairs.push(("LogFrameFilter.Stream", stream.to_string()));
        }
        if let Some(message_type) = self.message_type {
            pairs.push(("LogFrameFilter.MessageType", message_type.to_string()));
        }
        if let Some(late) = self.late {
            pairs.push(("LogFrameFilter.Late", late.to_string()));
        }
        if let Some(activation) = self.activation {
            pairs.push(("LogFrameFilter.Activation", activation.to_string()));
        }
        if let Some(ack) = self.ack {
            pairs.push(("LogFrameFilter.Ack", ack.to_string()));
        }
        pairs
    }
}

/// RFC 3339 with a `Z` suffix, e.g. `2024-05-01T12:00:00Z`.
fn utc_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// One gateway that received the frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayList {
    pub gateway: String,
    #[serde(rename = "RSSI")]
    pub rssi: String,
    #[serde(rename = "SNR")]
    pub snr: String,
    #[serde(rename = "ESP")]
    pub esp: String,
    pub time: String,
    pub unowned: bool,
    #[serde(rename = "SubscriberID")]
    pub subscriber_id: String,
    #[serde(rename = "GatewayNodeID")]
    pub gateway_node_id: String,
}

/// A single LoRaWAN frame as logged by the network server. Radio metrics
/// are reported as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogInstance {
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    pub dev_addr: String,
    pub fport: String,
    pub f_cnt: String,
    pub message_type: String,
    pub message_type_text: String,
    pub payload_hex: String,
    #[serde(rename = "MICHex")]
    pub mic_hex: String,
    #[serde(rename = "PrimaryGatewayRSSI")]
    pub primary_gateway_rssi: String,
    #[serde(rename = "PrimaryGatewaySNR")]
    pub primary_gateway_snr: String,
    #[serde(rename = "PrimaryGatewayESP")]
    pub primary_gateway_esp: String,
    pub spreading_factor: String,
    pub airtime: String,
    pub sub_band: String,
    pub channel: String,
    #[serde(rename = "GatewayID")]
    pub gateway_id: String,
    #[serde(rename = "GatewayLatitide")]
    pub gateway_latitude: String,
    pub gateway_longitude: String,
    pub gateway_count: String,
    pub gateway_list: Vec<GatewayList>,
    pub device_latitude: String,
    pub device_longitude: String,
    pub device_location_radius: String,
    pub mac_commands: String,
    pub decoded_mac_commands: Vec<String>,
    #[serde(rename = "ADRbit")]
    pub adr_bit: String,
    #[serde(rename = "ADRAckReq")]
    pub adr_ack_req: String,
    pub ack_requested: String,
    #[serde(rename = "ACKbit")]
    pub ack_bit: String,
    pub f_pending: String,
    pub late: String,
    pub dev_nonce: String,
    #[serde(rename = "JoinEUI")]
    pub join_eui: String,
    pub gateway_unowned: bool,
    pub gateway_subscriber_id: String,
    /// The gateway's node id, or `"Not Owned"`.
    #[serde(rename = "GatewayNodeID")]
    pub gateway_node_id: String,
    pub payload_decoded: Option<Value>,
    pub multicast: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogResponse {
    pub logs: Vec<LogInstance>,
}

pub struct Logs<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> Logs<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Logs {
            resource: Resource::new(client, "/logs"),
        }
    }

    pub fn get_all(&self, query: &LogQuery) -> C::Output<'c, Vec<LogInstance>> {
        let call = query
            .pairs()
            .into_iter()
            .fold(self.resource.get(""), |call, (key, value)| {
                call.query(key, value)
            });
        self.resource
            .send(call.json::<LogResponse>().map(|r| r.logs))
    }
}
