//! `/rfregions`: radio regions and the gateway models certified for them.

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RfRegionInstance {
    pub id: String,
    pub name: String,
    pub gateway_models: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListRfRegionsResponse {
    pub rf_regions: Vec<RfRegionInstance>,
}

pub struct RfRegions<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> RfRegions<'c, C> {
    pub fn new(client: &'c C) -> Self {
        RfRegions {
            resource: Resource::new(client, "/rfregions"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<RfRegionInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<ListRfRegionsResponse>()
                .map(|r| r.rf_regions),
        )
    }
}
