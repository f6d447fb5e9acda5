//! `/account`: the principal behind the current credentials.

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::call::Execute;

/// CRUD flags for one permission area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PermissionObject {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl PermissionObject {
    pub fn all() -> Self {
        PermissionObject {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    pub fn read_only() -> Self {
        PermissionObject {
            read: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubscriberInfo {
    pub id: String,
    pub name: String,
    pub address: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfoPatch {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfoUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountPasswordReset {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccountPermissionResponse {
    pub device: PermissionObject,
    pub gateway: PermissionObject,
    pub user: PermissionObject,
    pub subscriber_admin: PermissionObject,
    pub network_operator: PermissionObject,
    pub sys_admin: PermissionObject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccountResponse {
    /// `None` when called with an application token.
    pub user_info: Option<UserInfo>,
    pub subscriber_info: SubscriberInfo,
}

pub struct Account<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> Account<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Account {
            resource: Resource::new(client, "/account"),
        }
    }

    pub fn get(&self) -> C::Output<'c, AccountResponse> {
        self.resource
            .send(self.resource.get("").json::<AccountResponse>())
    }

    pub fn get_permissions(&self) -> C::Output<'c, AccountPermissionResponse> {
        self.resource.send(
            self.resource
                .get("permissions")
                .json::<AccountPermissionResponse>(),
        )
    }

    pub fn patch_user_info(&self, data: &UserInfoPatch) -> C::Output<'c, AccountResponse> {
        self.resource.send(
            self.resource
                .patch("patchUserInfo")
                .body(data)
                .json::<AccountResponse>(),
        )
    }

    pub fn update_user_info(&self, data: &UserInfoUpdate) -> C::Output<'c, AccountResponse> {
        self.resource.send(
            self.resource
                .put("updateUserInfo")
                .body(data)
                .json::<AccountResponse>(),
        )
    }

    pub fn password_reset(&self, data: &AccountPasswordReset) -> C::Output<'c, AccountResponse> {
        self.resource.send(
            self.resource
                .put("passwordReset")
                .body(data)
                .json::<AccountResponse>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::Recorder;
    use reqwest::Method;

    #[test]
    fn application_token_account_has_no_user_info() {
        let json = r#"{
            "UserInfo": null,
            "SubscriberInfo": {"Id": "sub-1", "Name": "Acme", "PostalCode": "19103"}
        }"#;
        let account: AccountResponse = serde_json::from_str(json).unwrap();
        assert!(account.user_info.is_none());
        assert_eq!(account.subscriber_info.postal_code, "19103");
    }

    #[test]
    fn permissions_deserialize() {
        let json = r#"{
            "Device": {"Create": true, "Read": true, "Update": true, "Delete": false},
            "SysAdmin": {"Read": true}
        }"#;
        let perms: AccountPermissionResponse = serde_json::from_str(json).unwrap();
        assert!(perms.device.create);
        assert!(!perms.device.delete);
        assert_eq!(perms.sys_admin, PermissionObject::read_only());
        assert_eq!(perms.gateway, PermissionObject::default());
    }

    #[test]
    fn password_reset_is_a_put_with_pascal_case_body() {
        let client = Recorder::new();
        let call = Account::new(&client).password_reset(&AccountPasswordReset {
            current_password: "old".into(),
            new_password: "new".into(),
        });
        assert_eq!(call.method(), &Method::PUT);
        assert_eq!(call.url(), "https://api.machineq.net/v1/account/passwordReset");
        assert_eq!(
            call.body_text(),
            Some(r#"{"CurrentPassword":"old","NewPassword":"new"}"#)
        );
    }

    #[test]
    fn update_user_info_omits_unset_phone_number() {
        let client = Recorder::new();
        let call = Account::new(&client).update_user_info(&UserInfoUpdate {
            email: "a@b.c".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone_number: None,
        });
        assert_eq!(
            call.body_text(),
            Some(r#"{"Email":"a@b.c","FirstName":"Ada","LastName":"Lovelace"}"#)
        );
    }
}
