//! `/roles`: permission sets assigned to users and applications.

use serde::{Deserialize, Serialize};

use super::account::PermissionObject;
use super::{IdResponse, Resource};
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<PermissionObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PermissionObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<PermissionObject>,
    /// User ids granted the role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    /// Application ids granted the role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RoleInstance {
    pub id: String,
    pub name: String,
    pub device: Option<PermissionObject>,
    pub user: Option<PermissionObject>,
    pub gateway: Option<PermissionObject>,
    pub users: Vec<String>,
    pub applications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RolePatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<PermissionObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PermissionObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<PermissionObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleUpdate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<PermissionObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PermissionObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<PermissionObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RoleResponse {
    pub roles: Vec<RoleInstance>,
}

pub struct Roles<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> Roles<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Roles {
            resource: Resource::new(client, "/roles"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<RoleInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<RoleResponse>()
                .map(|r| r.roles),
        )
    }

    pub fn get(&self, role_id: &str) -> C::Output<'c, RoleInstance> {
        self.resource
            .send(self.resource.get(role_id).json::<RoleInstance>())
    }

    pub fn create(&self, data: &RoleCreate) -> C::Output<'c, String> {
        self.resource.send(
            self.resource
                .post("")
                .body(data)
                .json::<IdResponse>()
                .map(|r| r.id),
        )
    }

    pub fn update(&self, role_id: &str, data: &RoleUpdate) -> C::Output<'c, RoleInstance> {
        self.resource
            .send(self.resource.put(role_id).body(data).json::<RoleInstance>())
    }

    pub fn patch(&self, role_id: &str, data: &RolePatch) -> C::Output<'c, RoleInstance> {
        self.resource
            .send(self.resource.patch(role_id).body(data).json::<RoleInstance>())
    }

    pub fn delete(&self, role_id: &str) -> C::Output<'c, ()> {
        self.resource.send(self.resource.delete(role_id).discard())
    }
}
