//! `/users`: human users of the subscriber.

use serde::{Deserialize, Serialize};

use super::{IdResponse, Resource};
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserInstance {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub admin_roles: Vec<String>,
    pub subscriber_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPatch {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserUpdate {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserResponse {
    pub users: Vec<UserInstance>,
}

pub struct Users<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> Users<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Users {
            resource: Resource::new(client, "/users"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<UserInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<UserResponse>()
                .map(|r| r.users),
        )
    }

    pub fn get(&self, user_id: &str) -> C::Output<'c, UserInstance> {
        self.resource
            .send(self.resource.get(user_id).json::<UserInstance>())
    }

    /// Returns the id of the new user.
    pub fn create(&self, data: &UserCreate) -> C::Output<'c, String> {
        self.resource.send(
            self.resource
                .post("")
                .body(data)
                .json::<IdResponse>()
                .map(|r| r.id),
        )
    }

    pub fn update(&self, user_id: &str, data: &UserUpdate) -> C::Output<'c, UserInstance> {
        self.resource
            .send(self.resource.put(user_id).body(data).json::<UserInstance>())
    }

    pub fn patch(&self, user_id: &str, data: &UserPatch) -> C::Output<'c, UserInstance> {
        self.resource
            .send(self.resource.patch(user_id).body(data).json::<UserInstance>())
    }

    pub fn delete(&self, user_id: &str) -> C::Output<'c, ()> {
        self.resource.send(self.resource.delete(user_id).discard())
    }
}
