//! `/version`: build information of the remote API.

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VersionResponse {
    pub semantic: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub build_time: String,
}

pub struct Version<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> Version<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Version {
            resource: Resource::new(client, "/version"),
        }
    }

    pub fn get(&self) -> C::Output<'c, VersionResponse> {
        self.resource
            .send(self.resource.get("").json::<VersionResponse>())
    }
}
