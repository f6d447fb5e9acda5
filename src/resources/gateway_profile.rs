//! `/gatewayprofiles`

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayProfileInstance {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayProfileResponse {
    pub gateway_profiles: Vec<GatewayProfileInstance>,
}

pub struct GatewayProfiles<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> GatewayProfiles<'c, C> {
    pub fn new(client: &'c C) -> Self {
        GatewayProfiles {
            resource: Resource::new(client, "/gatewayprofiles"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<GatewayProfileInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<GatewayProfileResponse>()
                .map(|r| r.gateway_profiles),
        )
    }
}
