//! `/groups/gateways`: named sets of gateways.

use serde::{Deserialize, Serialize};

use super::gateway::GatewayInstance;
use super::{IdResponse, Resource};
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatewayGroupCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayGroupInstance {
    pub id: String,
    pub name: String,
    pub gateway_list: Vec<String>,
    pub gateways: Vec<GatewayInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatewayGroupPatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatewayGroupUpdate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayGroupResponse {
    pub gateway_groups: Vec<GatewayGroupInstance>,
}

pub struct GatewayGroups<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> GatewayGroups<'c, C> {
    pub fn new(client: &'c C) -> Self {
        GatewayGroups {
            resource: Resource::new(client, "/groups/gateways"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<GatewayGroupInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<GatewayGroupResponse>()
                .map(|r| r.gateway_groups),
        )
    }

    pub fn get(&self, group_id: &str) -> C::Output<'c, GatewayGroupInstance> {
        self.resource
            .send(self.resource.get(group_id).json::<GatewayGroupInstance>())
    }

    pub fn create(&self, data: &GatewayGroupCreate) -> C::Output<'c, String> {
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
        data: &GatewayGroupUpdate,
    ) -> C::Output<'c, GatewayGroupInstance> {
        self.resource.send(
            self.resource
                .put(group_id)
                .body(data)
                .json::<GatewayGroupInstance>(),
        )
    }

    pub fn patch(
        &self,
        group_id: &str,
        data: &GatewayGroupPatch,
    ) -> C::Output<'c, GatewayGroupInstance> {
        self.resource.send(
            self.resource
                .patch(group_id)
                .body(data)
                .json::<GatewayGroupInstance>(),
        )
    }

    pub fn delete(&self, group_id: &str) -> C::Output<'c, ()> {
        self.resource.send(self.resource.delete(group_id).discard())
    }
}
