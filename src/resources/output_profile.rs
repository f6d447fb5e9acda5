//! `/outputprofiles`: where uplinks are forwarded (MQTT, REST, Azure, AWS).

use serde::{Deserialize, Serialize};

use super::{IdResponse, Resource};
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MqttParams {
    pub host: String,
    pub username: String,
    pub password: String,
    pub topic: String,
    #[serde(
        rename = "SSL",
        alias = "Ssl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ssl: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestParams {
    #[serde(rename = "URL", alias = "Url")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_value: Option<String>,
    #[serde(default)]
    pub output_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AzureMqttParams {
    pub host: String,
    pub shared_access_policy_name: String,
    pub shared_access_key: String,
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwsParams {
    pub endpoint: String,
    pub x509_certificate: String,
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutputProfileInstance {
    pub id: String,
    pub name: String,
    pub mqtt_params: Vec<MqttParams>,
    pub rest_params: Vec<RestParams>,
    pub azure_params: Vec<AzureMqttParams>,
    #[serde(rename = "AWSParams")]
    pub aws_params: Vec<AwsParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputProfileCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_params: Option<Vec<MqttParams>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_params: Option<Vec<RestParams>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_params: Option<Vec<AzureMqttParams>>,
    #[serde(rename = "AWSParams", default, skip_serializing_if = "Option::is_none")]
    pub aws_params: Option<Vec<AwsParams>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputProfilePatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_params: Option<Vec<MqttParams>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_params: Option<Vec<RestParams>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_params: Option<Vec<AzureMqttParams>>,
    #[serde(rename = "AWSParams", default, skip_serializing_if = "Option::is_none")]
    pub aws_params: Option<Vec<AwsParams>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputProfileUpdate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_params: Option<Vec<MqttParams>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_params: Option<Vec<RestParams>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_params: Option<Vec<AzureMqttParams>>,
    #[serde(rename = "AWSParams", default, skip_serializing_if = "Option::is_none")]
    pub aws_params: Option<Vec<AwsParams>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutputProfileResponse {
    pub output_profiles: Vec<OutputProfileInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutputProfileDevicesResponse {
    #[serde(rename = "DevEUI")]
    pub deveui: String,
    pub response: bool,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputProfileDevicesUpdate {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutputProfileDevicesUpdateResponse {
    pub responses: Vec<OutputProfileDevicesResponse>,
}

pub struct OutputProfiles<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> OutputProfiles<'c, C> {
    pub fn new(client: &'c C) -> Self {
        OutputProfiles {
            resource: Resource::new(client, "/outputprofiles"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<OutputProfileInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<OutputProfileResponse>()
                .map(|r| r.output_profiles),
        )
    }

    pub fn get(&self, profile_id: &str) -> C::Output<'c, OutputProfileInstance> {
        self.resource
            .send(self.resource.get(profile_id).json::<OutputProfileInstance>())
    }

    pub fn create(&self, data: &OutputProfileCreate) -> C::Output<'c, String> {
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
        profile_id: &str,
        data: &OutputProfileUpdate,
    ) -> C::Output<'c, OutputProfileInstance> {
        self.resource.send(
            self.resource
                .put(profile_id)
                .body(data)
                .json::<OutputProfileInstance>(),
        )
    }

    pub fn patch(
        &self,
        profile_id: &str,
        data: &OutputProfilePatch,
    ) -> C::Output<'c, OutputProfileInstance> {
        self.resource.send(
            self.resource
                .patch(profile_id)
                .body(data)
                .json::<OutputProfileInstance>(),
        )
    }

    pub fn delete(&self, profile_id: &str) -> C::Output<'c, ()> {
        self.resource.send(self.resource.delete(profile_id).discard())
    }

    pub fn get_devices(&self, profile_id: &str) -> C::Output<'c, OutputProfileDevicesResponse> {
        self.resource.send(
            self.resource
                .get(&format!("{profile_id}/devices"))
                .json::<OutputProfileDevicesResponse>(),
        )
    }

    pub fn update_devices(
        &self,
        profile_id: &str,
        data: &OutputProfileDevicesUpdate,
    ) -> C::Output<'c, OutputProfileDevicesUpdateResponse> {
        self.resource.send(
            self.resource
                .put(&format!("{profile_id}/devices"))
                .body(data)
                .json::<OutputProfileDevicesUpdateResponse>(),
        )
    }
}
