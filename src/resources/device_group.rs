//! `/groups/devices`: named sets of devices.

use serde::{Deserialize, Serialize};

use super::device::DeviceInstance;
use super::{IdResponse, Resource};
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceGroupCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceGroupInstance {
    pub id: String,
    pub name: String,
    /// DevEUIs of the members.
    pub device_list: Vec<String>,
    pub devices: Vec<DeviceInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceGroupPatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceGroupUpdate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceGroupResponse {
    pub device_groups: Vec<DeviceGroupInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetDeviceGroupRecentResponse {
    pub device_list: Vec<String>,
}

pub struct DeviceGroups<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> DeviceGroups<'c, C> {
    pub fn new(client: &'c C) -> Self {
        DeviceGroups {
            resource: Resource::new(client, "/groups/devices"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<DeviceGroupInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<DeviceGroupResponse>()
                .map(|r| r.device_groups),
        )
    }

    pub fn get(&self, group_id: &str) -> C::Output<'c, DeviceGroupInstance> {
        self.resource
            .send(self.resource.get(group_id).json::<DeviceGroupInstance>())
    }

    /// Returns the id of the new group.
    pub fn create(&self, data: &DeviceGroupCreate) -> C::Output<'c, String> {
        self.resource.send(
            self.resource
                .post("")
                .body(data)
                .json::<IdResponse>()
                .map(|r| r.id),
        )
    }

    pub fn update(
        &self,
        group_id: &str,
        data: &DeviceGroupUpdate,
    ) -> C::Output<'c, DeviceGroupInstance> {
        self.resource.send(
            self.resource
                .put(group_id)
                .body(data)
                .json::<DeviceGroupInstance>(),
        )
    }

    pub fn patch(
        &self,
        group_id: &str,
        data: &DeviceGroupPatch,
    ) -> C::Output<'c, DeviceGroupInstance> {
        self.resource.send(
            self.resource
                .patch(group_id)
                .body(data)
                .json::<DeviceGroupInstance>(),
        )
    }

    pub fn delete(&self, group_id: &str) -> C::Output<'c, ()> {
        self.resource.send(self.resource.delete(group_id).discard())
    }

    /// Members of the group that reported within the window.
    pub fn get_recent(
        &self,
        group_id: &str,
        payload: Option<&str>,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> C::Output<'c, GetDeviceGroupRecentResponse> {
        self.resource.send(
            self.resource
                .get(&format!("{group_id}/recent"))
                .query_opt("Payload", payload)
                .query_opt("StartTime", start_time)
                .query_opt("EndTime", end_time)
                .json::<GetDeviceGroupRecentResponse>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::Recorder;

    #[test]
    fn groups_live_under_nested_path() {
        let client = Recorder::new();
        let call = DeviceGroups::new(&client).get("g-1");
        assert_eq!(call.url(), "https://api.machineq.net/v1/groups/devices/g-1");
    }

    #[test]
    fn recent_keeps_query_order() {
        let client = Recorder::new();
        let call = DeviceGroups::new(&client).get_recent(
            "g-1",
            Some("true"),
            Some("2024-01-01T00:00:00Z"),
            Some("2024-01-02T00:00:00Z"),
        );
        assert_eq!(
            call.url(),
            "https://api.machineq.net/v1/groups/devices/g-1/recent"
        );
        let keys: Vec<&str> = call.query_pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["Payload", "StartTime", "EndTime"]);
    }

    #[test]
    fn recent_drops_empty_filters() {
        let client = Recorder::new();
        let call = DeviceGroups::new(&client).get_recent("g-1", Some(""), Some(""), None);
        assert!(call.query_pairs().is_empty());
    }
}
