//! `/decodertypes`: payload decoders that can be attached to devices.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;
use crate::call::Execute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DecoderTypeInstance {
    pub id: String,
    pub name: String,
    /// Decoder definition; its layout depends on the decoder kind.
    pub payload_decoder: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DecoderTypeResponse {
    pub decoder_types: Vec<DecoderTypeInstance>,
}

pub struct DecoderTypes<'c, C> {
    resource: Resource<'c, C>,
}

impl<'c, C: Execute> DecoderTypes<'c, C> {
    pub fn new(client: &'c C) -> Self {
        DecoderTypes {
            resource: Resource::new(client, "/decodertypes"),
        }
    }

    pub fn get_all(&self) -> C::Output<'c, Vec<DecoderTypeInstance>> {
        self.resource.send(
            self.resource
                .get("")
                .json::<DecoderTypeResponse>()
                .map(|r| r.decoder_types),
        )
    }

    pub fn get(&self, decoder_id: &str) -> C::Output<'c, DecoderTypeInstance> {
        self.resource
            .send(self.resource.get(decoder_id).json::<DecoderTypeInstance>())
    }
}
