//! # The Declarative Schema Tree
//!
//! A schema is a recursive tree of nodes, each tagged with one of exactly
//! four kinds: `object`, `array`, `string`, `integer`. The tree is modeled
//! as the [`FieldSchema`] enum so that each kind carries only the constraint
//! fields it may declare — the compiler, not a runtime mapping table, decides
//! which properties exist.
//!
//! ## Parsing Is the Trust Boundary
//!
//! Raw JSON enters the typed world only through the strict parser
//! ([`FieldSchema::from_value`], [`DocumentSchema::from_value`]). The parser
//! rejects what it cannot represent — an unrecognized `type`, a property
//! name outside the node kind's vocabulary, an ill-typed constraint value —
//! instead of skipping it. Every consumer (validator registration, dialect
//! projection) may therefore assume any reachable node is well-formed.
//!
//! `serde::Deserialize` for these types routes through the same parser, so
//! there is exactly one validation path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::message::LocalizedText;

/// Regular expression matching the canonical textual UUID form, for `_id`
/// fields and other unique identifiers.
pub const UNIQUE_ID_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// One node of the schema tree, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldSchema {
    /// A nested record with named, individually typed properties.
    Object(ObjectSchema),
    /// A homogeneous list.
    Array(ArraySchema),
    /// Text with optional length and pattern constraints.
    String(StringSchema),
    /// A whole number with optional lower bound or enumeration.
    Integer(IntegerSchema),
}

/// Constraints an `object` node may declare.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    /// Child node per property name.
    pub properties: BTreeMap<String, FieldSchema>,
    /// Property names that must be present (a subset of `properties`).
    pub required: Vec<String>,
    /// Whether undeclared properties are tolerated. Schema authors who want
    /// closed records set `false`; absent leaves the engine default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    /// Message reported when this node itself fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<LocalizedText>,
}

/// Constraints an `array` node may declare.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArraySchema {
    /// Schema every element must satisfy.
    pub items: Box<FieldSchema>,
    /// Whether duplicate elements are rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    /// Message reported when this node itself fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<LocalizedText>,
}

/// Constraints a `string` node may declare.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringSchema {
    /// Minimum length in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum length in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Regular expression the value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message reported when this node fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<LocalizedText>,
}

/// Constraints an `integer` node may declare.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegerSchema {
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    /// Exhaustive list of permitted values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<i64>>,
    /// Message reported when this node fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<LocalizedText>,
}

/// A root schema: a node tree plus the globally unique `$id` under which it
/// is registered with the validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSchema {
    /// Registration key. Serialized as `$id`.
    #[serde(rename = "$id")]
    pub id: String,
    /// The root node, flattened beside `$id`.
    #[serde(flatten)]
    pub root: FieldSchema,
}

impl FieldSchema {
    /// The author-declared message of this node, regardless of kind.
    pub fn message(&self) -> Option<&LocalizedText> {
        match self {
            FieldSchema::Object(node) => node.message.as_ref(),
            FieldSchema::Array(node) => node.message.as_ref(),
            FieldSchema::String(node) => node.message.as_ref(),
            FieldSchema::Integer(node) => node.message.as_ref(),
        }
    }

    /// Strictly parse one schema node from raw JSON.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnsupportedType`] for a `type` outside the four kinds,
    /// [`SchemaError::UnknownProperty`] for a property the kind does not
    /// declare, [`SchemaError::InvalidProperty`] for an ill-typed value.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let map = as_schema_map(value)?;
        Self::from_map(map, false)
    }

    fn from_map(map: &Map<String, Value>, root: bool) -> Result<Self, SchemaError> {
        let kind = map
            .get("type")
            .ok_or(SchemaError::MissingType)?
            .as_str()
            .ok_or(SchemaError::InvalidProperty {
                property: "type".to_string(),
                expected: "a string",
            })?;

        match kind {
            "object" => Ok(FieldSchema::Object(parse_object(map, root)?)),
            "array" => Ok(FieldSchema::Array(parse_array(map, root)?)),
            "string" => Ok(FieldSchema::String(parse_string(map, root)?)),
            "integer" => Ok(FieldSchema::Integer(parse_integer(map, root)?)),
            other => Err(SchemaError::UnsupportedType {
                found: other.to_string(),
            }),
        }
    }
}

impl DocumentSchema {
    /// Build a root schema from an id and a node tree.
    pub fn new(id: impl Into<String>, root: FieldSchema) -> Self {
        Self {
            id: id.into(),
            root,
        }
    }

    /// Strictly parse a root schema from raw JSON.
    ///
    /// Beyond the node vocabulary, the root accepts `$id` (mandatory — it is
    /// the registration key) and tolerates `$schema`, which carries no
    /// meaning here and is discarded.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let map = as_schema_map(value)?;
        let id = map
            .get("$id")
            .ok_or(SchemaError::MissingId)?
            .as_str()
            .ok_or(SchemaError::InvalidProperty {
                property: "$id".to_string(),
                expected: "a string",
            })?;
        let root = FieldSchema::from_map(map, true)?;
        Ok(Self::new(id, root))
    }

    /// Strictly parse a root schema from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for FieldSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        FieldSchema::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for DocumentSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        DocumentSchema::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn as_schema_map(value: &Value) -> Result<&Map<String, Value>, SchemaError> {
    value.as_object().ok_or(SchemaError::NotAnObject {
        found: json_type_name(value),
    })
}

/// JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// True for the keys every node shares, plus the root-only keys when `root`.
fn is_common_key(key: &str, root: bool) -> bool {
    key == "type" || (root && (key == "$id" || key == "$schema"))
}

fn parse_object(map: &Map<String, Value>, root: bool) -> Result<ObjectSchema, SchemaError> {
    let mut node = ObjectSchema::default();

    for (key, value) in map {
        if is_common_key(key, root) {
            continue;
        }
        match key.as_str() {
            "properties" => {
                let entries = value.as_object().ok_or(SchemaError::InvalidProperty {
                    property: "properties".to_string(),
                    expected: "an object of property schemas",
                })?;
                for (name, child) in entries {
                    node.properties
                        .insert(name.clone(), FieldSchema::from_value(child)?);
                }
            }
            "required" => node.required = parse_string_list(value, "required")?,
            "additionalProperties" => {
                node.additional_properties = Some(parse_bool(value, "additionalProperties")?)
            }
            "message" => node.message = Some(parse_message(value)?),
            _ => {
                return Err(SchemaError::UnknownProperty {
                    property: key.clone(),
                    node: "object",
                })
            }
        }
    }

    Ok(node)
}

fn parse_array(map: &Map<String, Value>, root: bool) -> Result<ArraySchema, SchemaError> {
    let mut items = None;
    let mut unique_items = None;
    let mut message = None;

    for (key, value) in map {
        if is_common_key(key, root) {
            continue;
        }
        match key.as_str() {
            "items" => items = Some(Box::new(FieldSchema::from_value(value)?)),
            "uniqueItems" => unique_items = Some(parse_bool(value, "uniqueItems")?),
            "message" => message = Some(parse_message(value)?),
            _ => {
                return Err(SchemaError::UnknownProperty {
                    property: key.clone(),
                    node: "array",
                })
            }
        }
    }

    let items = items.ok_or(SchemaError::InvalidProperty {
        property: "items".to_string(),
        expected: "an element schema on every array node",
    })?;

    Ok(ArraySchema {
        items,
        unique_items,
        message,
    })
}

fn parse_string(map: &Map<String, Value>, root: bool) -> Result<StringSchema, SchemaError> {
    let mut node = StringSchema::default();

    for (key, value) in map {
        if is_common_key(key, root) {
            continue;
        }
        match key.as_str() {
            "minLength" => node.min_length = Some(parse_u64(value, "minLength")?),
            "maxLength" => node.max_length = Some(parse_u64(value, "maxLength")?),
            "pattern" => {
                node.pattern = Some(
                    value
                        .as_str()
                        .ok_or(SchemaError::InvalidProperty {
                            property: "pattern".to_string(),
                            expected: "a regular expression string",
                        })?
                        .to_string(),
                )
            }
            "message" => node.message = Some(parse_message(value)?),
            _ => {
                return Err(SchemaError::UnknownProperty {
                    property: key.clone(),
                    node: "string",
                })
            }
        }
    }

    Ok(node)
}

fn parse_integer(map: &Map<String, Value>, root: bool) -> Result<IntegerSchema, SchemaError> {
    let mut node = IntegerSchema::default();

    for (key, value) in map {
        if is_common_key(key, root) {
            continue;
        }
        match key.as_str() {
            "minimum" => node.minimum = Some(parse_i64(value, "minimum")?),
            "enum" => node.allowed = Some(parse_int_list(value, "enum")?),
            "message" => node.message = Some(parse_message(value)?),
            _ => {
                return Err(SchemaError::UnknownProperty {
                    property: key.clone(),
                    node: "integer",
                })
            }
        }
    }

    Ok(node)
}

fn parse_message(value: &Value) -> Result<LocalizedText, SchemaError> {
    serde_json::from_value(value.clone()).map_err(|_| SchemaError::InvalidProperty {
        property: "message".to_string(),
        expected: "an object mapping language codes to texts",
    })
}

fn parse_bool(value: &Value, property: &str) -> Result<bool, SchemaError> {
    value.as_bool().ok_or(SchemaError::InvalidProperty {
        property: property.to_string(),
        expected: "a boolean",
    })
}

fn parse_u64(value: &Value, property: &str) -> Result<u64, SchemaError> {
    value.as_u64().ok_or(SchemaError::InvalidProperty {
        property: property.to_string(),
        expected: "a non-negative integer",
    })
}

fn parse_i64(value: &Value, property: &str) -> Result<i64, SchemaError> {
    value.as_i64().ok_or(SchemaError::InvalidProperty {
        property: property.to_string(),
        expected: "an integer",
    })
}

fn invalid_list(property: &str, expected: &'static str) -> SchemaError {
    SchemaError::InvalidProperty {
        property: property.to_string(),
        expected,
    }
}

fn parse_string_list(value: &Value, property: &str) -> Result<Vec<String>, SchemaError> {
    const EXPECTED: &str = "an array of strings";
    value
        .as_array()
        .ok_or_else(|| invalid_list(property, EXPECTED))?
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid_list(property, EXPECTED))
        })
        .collect()
}

fn parse_int_list(value: &Value, property: &str) -> Result<Vec<i64>, SchemaError> {
    const EXPECTED: &str = "an array of integers";
    value
        .as_array()
        .ok_or_else(|| invalid_list(property, EXPECTED))?
        .iter()
        .map(|entry| entry.as_i64().ok_or_else(|| invalid_list(property, EXPECTED)))
        .collect()
}
