// engine/schema.rs — response-schema declarations in the Gemini
// generateContent dialect.
//
// Only the subset the two operations need: OBJECT/ARRAY containers,
// STRING/NUMBER leaves, required lists, and enum constraints on closed
// string sets. Type tags are uppercase on the wire.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
enum SchemaType {
    Object,
    Array,
    String,
    Number,
}

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    required: Vec<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    allowed: Option<Vec<String>>,
}

impl Schema {
    fn leaf(kind: SchemaType) -> Self {
        Schema {
            kind,
            properties: None,
            items: None,
            required: Vec::new(),
            allowed: None,
        }
    }

    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::leaf(SchemaType::Number)
    }

    /// A string constrained to a closed set of values.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema {
            allowed: Some(values.into_iter().map(Into::into).collect()),
            ..Self::leaf(SchemaType::String)
        }
    }

    pub fn array(items: Schema) -> Self {
        Schema {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    pub fn object<I>(properties: I, required: &[&str]) -> Self
    where
        I: IntoIterator<Item = (&'static str, Schema)>,
    {
        Schema {
            kind: SchemaType::Object,
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.to_string(), schema))
                    .collect(),
            ),
            items: None,
            required: required.iter().map(|name| name.to_string()).collect(),
            allowed: None,
        }
    }
}
