//! # End-to-End Violation Reporting
//!
//! Registers realistic schemas and checks the full contract of
//! `SchemaValidator::validate`: which constraints are reported, the exact
//! dotted/bracketed property paths, and the localized messages resolved
//! from the schema nodes that failed.

use serde_json::json;

use valoc_core::{Constraint, DocumentSchema, Violation, UNIQUE_ID_PATTERN};
use valoc_schema::SchemaValidator;

fn registered(schema_json: serde_json::Value) -> (SchemaValidator, String) {
    let schema = DocumentSchema::from_value(&schema_json).expect("test schema parses");
    let id = schema.id.clone();
    let mut registry = SchemaValidator::new();
    registry.register(schema).expect("test schema compiles");
    (registry, id)
}

fn by_property<'a>(violations: &'a [Violation], property: &str) -> Vec<&'a Violation> {
    violations
        .iter()
        .filter(|violation| violation.property == property)
        .collect()
}

#[test]
fn uuid_and_length_failures_report_per_field() {
    // A record keyed by UUID with a short display name.
    let (registry, id) = registered(json!({
        "$id": "http://valoc.test/schemas/entry.json",
        "type": "object",
        "additionalProperties": false,
        "message": {"de": "Objekt unvollständig"},
        "properties": {
            "_id": {
                "type": "string",
                "pattern": UNIQUE_ID_PATTERN,
                "message": {"de": "Kennung ungültig"}
            },
            "name": {
                "type": "string",
                "minLength": 1,
                "maxLength": 10,
                "message": {"de": "Name nicht angegeben oder zu lang"}
            }
        },
        "required": ["_id", "name"]
    }));

    let violations = registry
        .validate(
            &json!({"_id": "not-a-uuid", "name": "this name is far too long"}),
            &id,
        )
        .unwrap();

    assert_eq!(violations.len(), 2, "got: {violations:?}");

    let id_violations = by_property(&violations, "_id");
    assert_eq!(id_violations.len(), 1);
    assert_eq!(id_violations[0].constraint, Constraint::Pattern);
    assert_eq!(id_violations[0].message.get("de"), Some("Kennung ungültig"));

    let name_violations = by_property(&violations, "name");
    assert_eq!(name_violations.len(), 1);
    assert_eq!(name_violations[0].constraint, Constraint::MaxLength);
}

#[test]
fn enumerated_integer_reports_the_enum_constraint() {
    let (registry, id) = registered(json!({
        "$id": "http://valoc.test/schemas/kinds.json",
        "type": "object",
        "properties": {
            "type": {
                "type": "integer",
                "enum": [13, 17, 22],
                "message": {"de": "Art fehlt oder ist unzulässig"}
            }
        },
        "required": ["type"]
    }));

    let violations = registry.validate(&json!({"type": 42}), &id).unwrap();

    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].property, "type");
    assert_eq!(violations[0].constraint, Constraint::Enum);
    assert_eq!(
        violations[0].message.get("de"),
        Some("Art fehlt oder ist unzulässig")
    );
}

#[test]
fn conforming_documents_yield_no_violations() {
    let (registry, id) = registered(json!({
        "$id": "http://valoc.test/schemas/entry2.json",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "_id": {"type": "string", "pattern": UNIQUE_ID_PATTERN},
            "name": {"type": "string", "minLength": 1, "maxLength": 10}
        },
        "required": ["_id", "name"]
    }));

    let violations = registry
        .validate(
            &json!({
                "_id": "01234567-89ab-cdef-0123-456789abcdef",
                "name": "short"
            }),
            &id,
        )
        .unwrap();
    assert!(violations.is_empty(), "got: {violations:?}");
}

#[test]
fn missing_required_field_reports_exactly_that_field() {
    let (registry, id) = registered(json!({
        "$id": "http://valoc.test/schemas/entry3.json",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "_id": {"type": "string", "pattern": UNIQUE_ID_PATTERN},
            "name": {
                "type": "string",
                "minLength": 1,
                "message": {"de": "Name nicht angegeben"}
            }
        },
        "required": ["_id", "name"]
    }));

    let violations = registry
        .validate(&json!({"_id": "01234567-89ab-cdef-0123-456789abcdef"}), &id)
        .unwrap();

    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].constraint, Constraint::Required);
    assert_eq!(violations[0].property, "name");
    assert_eq!(violations[0].message.get("de"), Some("Name nicht angegeben"));
}

fn library_schema() -> serde_json::Value {
    json!({
        "$id": "http://valoc.test/schemas/library.json",
        "type": "object",
        "additionalProperties": false,
        "message": {"de": "Sammlung unvollständig"},
        "properties": {
            "name": {"type": "string", "minLength": 1},
            "albums": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "tracks": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "additionalProperties": false,
                                "properties": {
                                    "title": {
                                        "type": "string",
                                        "minLength": 1,
                                        "maxLength": 8,
                                        "message": {"de": "Titel zu lang"}
                                    }
                                },
                                "required": ["title"]
                            }
                        }
                    },
                    "required": ["tracks"]
                }
            },
            "genres": {
                "type": "array",
                "uniqueItems": true,
                "items": {"type": "string"},
                "message": {"de": "Genres doppelt"}
            }
        },
        "required": ["name"]
    })
}

#[test]
fn nested_array_failures_carry_bracket_qualified_paths() {
    let (registry, id) = registered(library_schema());

    let violations = registry
        .validate(
            &json!({
                "name": "library",
                "albums": [
                    {"tracks": [{"title": "ok"}, {"title": "much too long"}]}
                ]
            }),
            &id,
        )
        .unwrap();

    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].property, "albums[0].tracks[1].title");
    assert_eq!(violations[0].constraint, Constraint::MaxLength);
    assert_eq!(violations[0].message.get("de"), Some("Titel zu lang"));
}

#[test]
fn required_failure_inside_an_array_element_is_index_qualified() {
    let (registry, id) = registered(library_schema());

    let violations = registry
        .validate(
            &json!({
                "name": "library",
                "albums": [{"tracks": [{}]}]
            }),
            &id,
        )
        .unwrap();

    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].constraint, Constraint::Required);
    assert_eq!(violations[0].property, "albums[0].tracks[0].title");
    assert_eq!(violations[0].message.get("de"), Some("Titel zu lang"));
}

#[test]
fn duplicate_array_elements_report_unique_items_on_the_array() {
    let (registry, id) = registered(library_schema());

    let violations = registry
        .validate(
            &json!({"name": "library", "genres": ["rock", "rock"]}),
            &id,
        )
        .unwrap();

    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].constraint, Constraint::UniqueItems);
    assert_eq!(violations[0].property, "genres");
    assert_eq!(violations[0].message.get("de"), Some("Genres doppelt"));
}

#[test]
fn undeclared_properties_are_reported_by_name() {
    let (registry, id) = registered(library_schema());

    let violations = registry
        .validate(&json!({"name": "library", "color": "red"}), &id)
        .unwrap();

    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].constraint, Constraint::AdditionalProperties);
    assert_eq!(violations[0].property, "color");
    // No schema node exists for an undeclared property: generic message.
    assert_eq!(violations[0].message.get("en"), Some("failed"));
}

#[test]
fn root_level_type_failure_uses_the_wildcard_path() {
    let (registry, id) = registered(library_schema());

    let violations = registry.validate(&json!(42), &id).unwrap();

    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].constraint, Constraint::Type);
    assert_eq!(violations[0].property, "*");
    // The root node's own message applies to whole-document failures.
    assert_eq!(violations[0].message.get("de"), Some("Sammlung unvollständig"));
}

#[test]
fn integer_minimum_reports_the_minimum_constraint() {
    let (registry, id) = registered(json!({
        "$id": "http://valoc.test/schemas/aged.json",
        "type": "object",
        "properties": {
            "age": {
                "type": "integer",
                "minimum": 18,
                "message": {"en": "too young"}
            }
        },
        "required": ["age"]
    }));

    let violations = registry.validate(&json!({"age": 12}), &id).unwrap();

    assert_eq!(violations.len(), 1, "got: {violations:?}");
    assert_eq!(violations[0].constraint, Constraint::Minimum);
    assert_eq!(violations[0].property, "age");
    assert_eq!(violations[0].message.get("en"), Some("too young"));
}

/// Three independent failures in one document, each reported once, under
/// its own field, with its own declared German message.
#[test]
fn three_failures_report_three_localized_violations() {
    let (registry, id) = registered(json!({
        "$id": "http://valoc.test/schemas/simple.json",
        "type": "object",
        "additionalProperties": false,
        "message": {"de": "Objekt unvollständig"},
        "properties": {
            "_id": {
                "type": "string",
                "pattern": UNIQUE_ID_PATTERN,
                "message": {"de": "Kennung ungültig"}
            },
            "description": {
                "type": "string",
                "maxLength": 2000,
                "message": {"de": "Beschreibung ist zu lang"}
            },
            "name": {
                "type": "string",
                "minLength": 1,
                "maxLength": 50,
                "message": {"de": "Name nicht angegeben oder zu lang"}
            },
            "type": {
                "type": "integer",
                "enum": [13, 17, 22],
                "message": {"de": "Art fehlt oder ist unzulässig"}
            }
        },
        "required": ["_id", "name", "type"]
    }));

    let violations = registry
        .validate(
            &json!({
                "_id": "test",
                "description": "Jochen",
                "name": "Dieser Name ist einfach zu lang für das Schema und wird als fehlerhaft gemeldet.",
                "type": 42
            }),
            &id,
        )
        .unwrap();

    assert_eq!(violations.len(), 3, "got: {violations:?}");

    let id_violations = by_property(&violations, "_id");
    assert_eq!(id_violations.len(), 1);
    assert_eq!(id_violations[0].message.get("de"), Some("Kennung ungültig"));

    let type_violations = by_property(&violations, "type");
    assert_eq!(type_violations.len(), 1);
    assert_eq!(
        type_violations[0].message.get("de"),
        Some("Art fehlt oder ist unzulässig")
    );

    let name_violations = by_property(&violations, "name");
    assert_eq!(name_violations.len(), 1);
    assert_eq!(
        name_violations[0].message.get("de"),
        Some("Name nicht angegeben oder zu lang")
    );
}
