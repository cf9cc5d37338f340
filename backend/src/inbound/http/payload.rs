//! Request body parsing for bird payloads.
//!
//! Bodies are read field by field so that an absent field, an explicit
//! `null` and a value of the wrong JSON type stay distinguishable. Only
//! string type checks happen here; value rules live in the domain.

use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::{BirdDraft, Error};

/// A single optional field of a JSON object body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PayloadField {
    /// The key was not present.
    #[default]
    Absent,
    /// The key was present with this value, including `null`.
    Present(Value),
}

impl<'de> Deserialize<'de> for PayloadField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::Present)
    }
}

/// Body accepted by bird create and update endpoints.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BirdRequestBody {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Robin")]
    pub name: PayloadField,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "A bird")]
    pub description: PayloadField,
}

fn string_field(field: PayloadField, name: &str, message: &str) -> Result<Option<String>, Error> {
    match field {
        PayloadField::Absent => Ok(None),
        PayloadField::Present(Value::String(value)) => Ok(Some(value)),
        PayloadField::Present(other) => {
            Err(Error::invalid_request(message).with_details(json!({
                "field": name,
                "code": "not_a_string",
                "reason": format!("{name} must be a string, got {}", json_type(&other)),
            })))
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl BirdRequestBody {
    /// Type-check the body and convert it into a domain draft.
    ///
    /// `message` is the operation-specific invalid-payload message.
    pub fn into_draft(self, message: &str) -> Result<BirdDraft, Error> {
        Ok(BirdDraft {
            name: string_field(self.name, "name", message)?,
            description: string_field(self.description, "description", message)?,
        })
    }
}
