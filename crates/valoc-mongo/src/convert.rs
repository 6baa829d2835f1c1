//! # The Dialect Conversion Walk
//!
//! One match arm per node kind; each arm emits exactly the sub-fields that
//! kind may carry, so the set of translatable schema features is checked by
//! the compiler rather than by a runtime mapping table. Raw JSON input goes
//! through the strict schema parser first and inherits its loud rejection of
//! anything unmappable.

use serde_json::{Map, Value};

use valoc_core::{DocumentSchema, FieldSchema, LanguagePreference, LocalizedText, SchemaError};

/// Project a root schema into the MongoDB `$jsonSchema` dialect.
///
/// The registration key (`$id`) is meaningless to the target store and is
/// dropped; everything else converts per [`convert_node`].
pub fn convert_schema(schema: &DocumentSchema, languages: &LanguagePreference) -> Value {
    convert_node(&schema.root, languages)
}

/// Project one schema node into the MongoDB `$jsonSchema` dialect.
///
/// Total over the typed tree: every representable node converts. Same input,
/// same output — the walk carries no state.
pub fn convert_node(node: &FieldSchema, languages: &LanguagePreference) -> Value {
    let mut target = Map::new();

    match node {
        FieldSchema::Object(object) => {
            target.insert("bsonType".to_string(), Value::from("object"));

            let mut properties = Map::new();
            for (name, child) in &object.properties {
                properties.insert(name.clone(), convert_node(child, languages));
            }
            target.insert("properties".to_string(), Value::Object(properties));
            target.insert(
                "required".to_string(),
                Value::Array(object.required.iter().cloned().map(Value::from).collect()),
            );
            if let Some(additional) = object.additional_properties {
                target.insert("additionalProperties".to_string(), Value::from(additional));
            }
            insert_description(&mut target, object.message.as_ref(), languages);
        }
        FieldSchema::Array(array) => {
            target.insert("bsonType".to_string(), Value::from("array"));
            target.insert("items".to_string(), convert_node(&array.items, languages));
            if let Some(unique) = array.unique_items {
                target.insert("uniqueItems".to_string(), Value::from(unique));
            }
            insert_description(&mut target, array.message.as_ref(), languages);
        }
        FieldSchema::String(string) => {
            target.insert("bsonType".to_string(), Value::from("string"));
            if let Some(min_length) = string.min_length {
                target.insert("minLength".to_string(), Value::from(min_length));
            }
            if let Some(max_length) = string.max_length {
                target.insert("maxLength".to_string(), Value::from(max_length));
            }
            if let Some(pattern) = &string.pattern {
                target.insert("pattern".to_string(), Value::from(pattern.clone()));
            }
            insert_description(&mut target, string.message.as_ref(), languages);
        }
        FieldSchema::Integer(integer) => {
            // MongoDB has no bare "integer"; the fixed-width 32-bit marker
            // is the dialect's counterpart.
            target.insert("bsonType".to_string(), Value::from("int"));
            if let Some(minimum) = integer.minimum {
                target.insert("minimum".to_string(), Value::from(minimum));
            }
            if let Some(allowed) = &integer.allowed {
                target.insert(
                    "enum".to_string(),
                    Value::Array(allowed.iter().copied().map(Value::from).collect()),
                );
            }
            insert_description(&mut target, integer.message.as_ref(), languages);
        }
    }

    Value::Object(target)
}

/// Project a raw JSON schema into the dialect, rejecting unmappable input.
///
/// # Errors
///
/// [`SchemaError::UnsupportedType`] for a `type` outside
/// `object`/`array`/`string`/`integer`, [`SchemaError::UnknownProperty`] for
/// a property name the node kind cannot carry, and the other strict-parse
/// failures for structurally broken schemas. Nothing is ever skipped
/// silently.
pub fn convert_value(schema: &Value, languages: &LanguagePreference) -> Result<Value, SchemaError> {
    let parsed = DocumentSchema::from_value(schema)?;
    Ok(convert_schema(&parsed, languages))
}

fn insert_description(
    target: &mut Map<String, Value>,
    message: Option<&LocalizedText>,
    languages: &LanguagePreference,
) {
    if let Some(message) = message {
        target.insert(
            "description".to_string(),
            Value::from(message.resolve(languages)),
        );
    }
}
