//! `/multicastgroups`: LoRaWAN multicast groups. Served from API `v0`
//! regardless of the client's configured version.

use serde::{Deserialize, Serialize};

use super::{OkResponse, Resource};
use crate::call::Execute;

const API_VERSION: &str = "v0";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MulticastGroup {
    pub name: String,
    #[serde(rename = "MulticastDevEUI")]
    pub multicast_deveui: String,
    pub multicast_dev_addr: String,
    pub group_type: String,
    pub data_rate: i64,
    pub frequency: i64,
    pub ping_slot_period: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMulticastGroupRequest {
    pub name: String,
    #[serde(rename = "MulticastDevEUI")]
    pub multicast_deveui: String,
    pub multicast_dev_addr: String,
    pub group_type: String,
    pub multicast_nwk_s_key: String,
    pub multicast_app_s_key: String,
    pub data_rate: i64,
    pub frequency: i64,
    pub ping_slot_period: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateMulticastGroupRequest {
    #[serde(rename = "MulticastDevEUI")]
    pub multicast_deveui: String,
    pub name: String,
    pub data_rate: i64,
    pub frequency: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetMulticastGroupResponse {
    pub multicast_group: MulticastGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetMulticastGroupsResponse {
    pub multicast_groups: Vec<MulticastGroup>,
}

/// Device membership change; also used for removal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MulticastDevicesRequest {
    #[serde(rename = "MulticastDevEUI")]
    pub multicast_deveui: String,
    pub devices: Vec<String>,
}

/// Gateway membership change; also used for removal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MulticastGatewaysRequest {
    #[serde(rename = "MulticastDevEUI")]
    pub multicast_deveui: String,
    pub gateways: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AddDevicesResponse {
    pub devices_added: Vec<String>,
    pub devices_ignored: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RemoveDevicesResponse {
    pub devices_removed: Vec<String>,
    pub devices_ignored: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AddGatewaysResponse {
    pub gateways_added: Vec<String>,
    pub gateways_ignored: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RemoveGatewaysResponse {
    pub gateways_removed: Vec<String>,
    pub gateways_ignored: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MulticastGatewaysResponse {
    pub gateways: Vec<String>,
}

pub struct MulticastGroups<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> MulticastGroups<'c, C> {
    pub fn new(client: &'c C) -> Self {
        MulticastGroups {
            resource: Resource::with_version(client, "/multicastgroups", API_VERSION),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<MulticastGroup>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<GetMulticastGroupsResponse>()
                .map(|r| r.multicast_groups),
        )
    }

    pub fn get(&self, multicast_deveui: &str) -> C::Output<'c, MulticastGroup> {
        self.resource.send(
            self.resource
                .get(multicast_deveui)
                .json::<GetMulticastGroupResponse>()
                .map(|r| r.multicast_group),
        )
    }

    pub fn create(&self, data: &CreateMulticastGroupRequest) -> C::Output<'c, bool> {
        self.resource.send(
            self.resource
                .post("")
                .body(data)
                .json::<OkResponse>()
                .map(|r| r.response),
        )
    }

    pub fn update(
        &self,
        multicast_deveui: &str,
        data: &UpdateMulticastGroupRequest,
    ) -> C::Output<'c, bool> {
        self.resource.send(
            self.resource
                .put(multicast_deveui)
                .body(data)
                .json::<OkResponse>()
                .map(|r| r.response),
        )
    }

    /// Unlike other resources, deletion reports `{"Response": bool}`.
    pub fn delete(&self, multicast_deveui: &str) -> C::Output<'c, bool> {
        self.resource.send(
            self.resource
                .delete(multicast_deveui)
                .json::<OkResponse>()
                .map(|r| r.response),
        )
    }

    pub fn add_devices(
        &self,
        multicast_deveui: &str,
        data: &MulticastDevicesRequest,
    ) -> C::Output<'c, AddDevicesResponse> {
        self.resource.send(
            self.resource
                .post(&format!("{multicast_deveui}/devices/associate"))
                .body(data)
                .json::<AddDevicesResponse>(),
        )
    }

    pub fn remove_devices(
        &self,
        multicast_deveui: &str,
        data: &MulticastDevicesRequest,
    ) -> C::Output<'c, RemoveDevicesResponse> {
        self.resource.send(
            self.resource
                .post(&format!("{multicast_deveui}/devices/deassociate"))
                .body(data)
                .json::<RemoveDevicesResponse>(),
        )
    }

    pub fn add_gateways(
        &self,
        multicast_deveui: &str,
        data: &MulticastGatewaysRequest,
    ) -> C::Output<'c, AddGatewaysResponse> {
        self.resource.send(
            self.resource
                .post(&format!("{multicast_deveui}/gateways/associate"))
                .body(data)
                .json::<AddGatewaysResponse>(),
        )
    }

    pub fn remove_gateways(
        &self,
        multicast_deveui: &str,
        data: &MulticastGatewaysRequest,
    ) -> C::Output<'c, RemoveGatewaysResponse> {
        self.resource.send(
            self.resource
                .post(&format!("{multicast_deveui}/gateways/deassociate"))
                .body(data)
                .json::<RemoveGatewaysResponse>(),
        )
    }

    pub fn get_all_gateways(
        &self,
        multicast_deveui: &str,
    ) -> C::Output<'c, MulticastGatewaysResponse> {
        self.resource.send(
            self.resource
                .get(&format!("{multicast_deveui}/gateways"))
                .json::<MulticastGatewaysResponse>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::Recorder;
    use reqwest::Method;

    #[test]
    fn served_from_v0() {
        let client = Recorder::new();
        let call = MulticastGroups::new(&client).get_all();
        assert_eq!(call.url(), "https://api.machineq.net/v0/multicastgroups");
    }

    #[test]
    fn membership_changes_post_to_association_paths() {
        let client = Recorder::new();
        let groups = MulticastGroups::new(&client);
        let devices = MulticastDevicesRequest {
            multicast_deveui: "MC01".into(),
            devices: vec!["0011".into()],
        };

        let call = groups.add_devices("MC01", &devices);
        assert_eq!(call.method(), &Method::POST);
        assert_eq!(
            call.url(),
            "https://api.machineq.net/v0/multicastgroups/MC01/devices/associate"
        );
        assert_eq!(
            call.body_text(),
            Some(r#"{"MulticastDevEUI":"MC01","Devices":["0011"]}"#)
        );

        let call = groups.remove_gateways(
            "MC01",
            &MulticastGatewaysRequest {
                multicast_deveui: "MC01".into(),
                gateways: vec!["gw".into()],
            },
        );
        assert_eq!(
            call.url(),
            "https://api.machineq.net/v0/multicastgroups/MC01/gateways/deassociate"
        );
    }

    #[test]
    fn single_group_is_unwrapped() {
        let json = r#"{"MulticastGroup": {"Name": "lights", "MulticastDevEUI": "MC01", "DataRate": 3}}"#;
        let resp: GetMulticastGroupResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.multicast_group.multicast_deveui, "MC01");
        assert_eq!(resp.multicast_group.data_rate, 3);
    }
}
