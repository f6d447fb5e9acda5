//! `/serviceprofiles`

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceProfileInstance {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceProfilesResponse {
    pub service_profiles: Vec<ServiceProfileInstance>,
}

pub struct ServiceProfiles<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> ServiceProfiles<'c, C> {
    pub fn new(client: &'c C) -> Self {
        ServiceProfiles {
            resource: Resource::new(client, "/serviceprofiles"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<ServiceProfileInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<ServiceProfilesResponse>()
                .map(|r| r.service_profiles),
        )
    }
}
