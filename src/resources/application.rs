//! `/applications`: OAuth applications (client credentials) of a subscriber.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{OkResponse, Resource};
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Returned once at creation; the secret cannot be read back later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApplicationCreateResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "UUID", alias = "Uuid")]
    pub uuid: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApplicationInstance {
    pub id: String,
    pub name: String,
    #[serde(rename = "UUID", alias = "Uuid")]
    pub uuid: String,
    pub roles: Vec<String>,
    pub subscriber_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationUpdate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApplicationResponse {
    pub applications: Vec<ApplicationInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RefreshApplicationResponse {
    pub client_secret: String,
}

pub struct Applications<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> Applications<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Applications {
            resource: Resource::new(client, "/applications"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<ApplicationInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<ApplicationResponse>()
                .map(|r| r.applications),
        )
    }

    pub fn get(&self, application_id: &str) -> C::Output<'c, ApplicationInstance> {
        self.resource
            .send(self.resource.get(application_id).json::<ApplicationInstance>())
    }

    pub fn create(&self, data: &ApplicationCreate) -> C::Output<'c, ApplicationCreateResponse> {
        self.resource.send(
            self.resource
                .post("")
                .body(data)
                .json::<ApplicationCreateResponse>(),
        )
    }

    pub fn update(&self, application_id: &str, data: &ApplicationUpdate) -> C::Output<'c, bool> {
        self.resource.send(
            self.resource
                .put(application_id)
                .body(data)
                .json::<OkResponse>()
                .map(|r| r.response),
        )
    }

    pub fn patch(&self, application_id: &str, data: &ApplicationPatch) -> C::Output<'c, bool> {
        self.resource.send(
            self.resource
                .patch(application_id)
                .body(data)
                .json::<OkResponse>()
                .map(|r| r.response),
        )
    }

    pub fn delete(&self, application_id: &str) -> C::Output<'c, ()> {
        self.resource
            .send(self.resource.delete(application_id).discard())
    }

    /// Rotates the application's client secret and returns the new one.
    pub fn refresh_token(&self, application_id: &str) -> C::Output<'c, String> {
        self.resource.send(
            self.resource
                .post(&format!("{application_id}/refreshToken"))
                .body(&json!({}))
                .json::<RefreshApplicationResponse>()
                .map(|r| r.client_secret),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::Recorder;
    use reqwest::Method;

    #[test]
    fn instance_reads_uppercase_uuid() {
        let json = r#"{"Id": "app-1", "Name": "ingest", "UUID": "9f0c", "Roles": ["r1"]}"#;
        let app: ApplicationInstance = serde_json::from_str(json).unwrap();
        assert_eq!(app.uuid, "9f0c");
        assert_eq!(app.roles, vec!["r1"]);
    }

    #[test]
    fn refresh_token_posts_empty_object() {
        let client = Recorder::new();
        let call = Applications::new(&client).refresh_token("app-1");
        assert_eq!(call.method(), &Method::POST);
        assert_eq!(
            call.url(),
            "https://api.machineq.net/v1/applications/app-1/refreshToken"
        );
        assert_eq!(call.body_text(), Some("{}"));
    }

    #[test]
    fn patch_sends_only_set_fields() {
        let client = Recorder::new();
        let call = Applications::new(&client).patch(
            "app-1",
            &ApplicationPatch {
                name: Some("renamed".into()),
                roles: None,
            },
        );
        assert_eq!(call.method(), &Method::PATCH);
        assert_eq!(call.body_text(), Some(r#"{"Name":"renamed"}"#));
    }
}
