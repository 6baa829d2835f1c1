//! # The Compiled-Validator Registry
//!
//! Schemas are registered once under their `$id` and compiled into reusable
//! validators; documents are then validated against the registered id any
//! number of times. Each registry entry keeps the originating schema tree
//! next to the compiled validator, so violation reporting always reads
//! messages from exactly the schema that was registered — there is no shared
//! error-handler state to misattribute across registrations.
//!
//! ## Thread Safety
//!
//! [`SchemaValidator`] is `Send + Sync`. Registration takes `&mut self` and
//! validation takes `&self`: the borrow checker itself guarantees that
//! registrations are serialized and never overlap an in-flight validation.
//! Process-wide sharing is the caller's choice of wrapper (`RwLock`,
//! `OnceLock`, …); validations running concurrently under shared references
//! are safe.

use std::collections::HashMap;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Validator};
use serde_json::Value;
use thiserror::Error;

use valoc_core::{Constraint, DocumentSchema, FieldSchema, LocalizedText, Violation};

use crate::path;

/// Error during schema registration or validator lookup.
///
/// Constraint violations in validated documents are *not* errors — they are
/// returned as [`Violation`] data. These variants cover schemas the engine
/// rejects and lookups that cannot be answered.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// `validate` referenced an id no schema was registered under.
    #[error("no schema registered under id '{id}'")]
    UnknownSchema {
        /// The id that was looked up.
        id: String,
    },

    /// The engine refused to compile the schema (for example an invalid
    /// regular expression in a `pattern`).
    #[error("schema '{id}' does not compile: {reason}")]
    Compile {
        /// `$id` of the offending schema.
        id: String,
        /// The engine's own description of the failure.
        reason: String,
    },

    /// The schema tree could not be serialized for the engine.
    #[error("schema '{id}' cannot be serialized for the engine: {source}")]
    Serialize {
        /// `$id` of the offending schema.
        id: String,
        /// The underlying serialization failure.
        source: serde_json::Error,
    },
}

/// One registered schema: the typed tree for message and path resolution,
/// and the compiled validator for the actual checking.
struct RegisteredSchema {
    schema: DocumentSchema,
    compiled: Validator,
}

/// Registry of compiled validators, keyed by schema `$id`.
///
/// Per id the registry is a two-state machine: *unregistered* (lookups fail)
/// until [`register`](Self::register) succeeds, *registered* afterwards.
/// Re-registering an id replaces the previous entry; there is no
/// unregistration.
#[derive(Default)]
pub struct SchemaValidator {
    entries: HashMap<String, RegisteredSchema>,
}

impl SchemaValidator {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `schema` and register it under its `$id`, replacing any
    /// previous registration of the same id.
    ///
    /// Only the node tree is handed to the engine — `$id` stays a registry
    /// key and never doubles as a reference-resolution URI.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Compile`] when the engine rejects the schema,
    /// [`RegistryError::Serialize`] when the tree cannot be serialized.
    pub fn register(&mut self, schema: DocumentSchema) -> Result<(), RegistryError> {
        let engine_schema =
            serde_json::to_value(&schema.root).map_err(|source| RegistryError::Serialize {
                id: schema.id.clone(),
                source,
            })?;

        let mut options = jsonschema::options();
        options.with_draft(Draft::Draft202012);
        let compiled = options
            .build(&engine_schema)
            .map_err(|error| RegistryError::Compile {
                id: schema.id.clone(),
                reason: error.to_string(),
            })?;

        self.entries
            .insert(schema.id.clone(), RegisteredSchema { schema, compiled });
        Ok(())
    }

    /// Validate `object` against the schema registered under `schema_id`.
    ///
    /// Returns the ordered violation list — empty when the document
    /// conforms. Every engine failure maps to exactly the constraint that
    /// failed and the dotted path of the offending field; engine faults
    /// outside the schema vocabulary surface as a
    /// [`Constraint::Validator`] violation carrying the engine's message,
    /// so the caller always receives the uniform list contract.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownSchema`] when `schema_id` was never
    /// registered. Validating against the wrong schema silently is the one
    /// thing this method must never do.
    pub fn validate(
        &self,
        object: &Value,
        schema_id: &str,
    ) -> Result<Vec<Violation>, RegistryError> {
        let entry = self
            .entries
            .get(schema_id)
            .ok_or_else(|| RegistryError::UnknownSchema {
                id: schema_id.to_string(),
            })?;

        let mut violations = Vec::new();
        for error in entry.compiled.iter_errors(object) {
            violations.extend(entry.describe(error));
        }
        Ok(violations)
    }

    /// Whether a schema is registered under `schema_id`.
    pub fn is_registered(&self, schema_id: &str) -> bool {
        self.entries.contains_key(schema_id)
    }

    /// Number of registered schemas.
    pub fn schema_count(&self) -> usize {
        self.entries.len()
    }

    /// Ids of all registered schemas, sorted alphabetically.
    pub fn schema_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Look up the registered schema tree for an id.
    pub fn get_schema(&self, schema_id: &str) -> Option<&DocumentSchema> {
        self.entries.get(schema_id).map(|entry| &entry.schema)
    }
}

impl RegisteredSchema {
    /// Map one engine error to its violation(s).
    ///
    /// `required` failures are located at the object missing the property,
    /// so the missing name is appended before resolution — the report then
    /// addresses the absent field itself. `additionalProperties` failures
    /// name every unexpected property and yield one violation each.
    fn describe(&self, error: jsonschema::ValidationError<'_>) -> Vec<Violation> {
        let rendered = error.to_string();
        let mut segments = path::pointer_segments(&error.instance_path.to_string());

        match error.kind {
            ValidationErrorKind::Required { property } => {
                if let Some(name) = property.as_str() {
                    segments.push(name.to_string());
                }
                vec![self.violation(Constraint::Required, &segments)]
            }
            ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
                .into_iter()
                .map(|name| {
                    let mut segments = segments.clone();
                    segments.push(name);
                    self.violation(Constraint::AdditionalProperties, &segments)
                })
                .collect(),
            ValidationErrorKind::Type { .. } => vec![self.violation(Constraint::Type, &segments)],
            ValidationErrorKind::Pattern { .. } => {
                vec![self.violation(Constraint::Pattern, &segments)]
            }
            ValidationErrorKind::MinLength { .. } => {
                vec![self.violation(Constraint::MinLength, &segments)]
            }
            ValidationErrorKind::MaxLength { .. } => {
                vec![self.violation(Constraint::MaxLength, &segments)]
            }
            ValidationErrorKind::Minimum { .. } => {
                vec![self.violation(Constraint::Minimum, &segments)]
            }
            ValidationErrorKind::Enum { .. } => vec![self.violation(Constraint::Enum, &segments)],
            ValidationErrorKind::UniqueItems { .. } => {
                vec![self.violation(Constraint::UniqueItems, &segments)]
            }
            _ => {
                // Outside the schema vocabulary: an engine fault (reference
                // resolution, regex backtracking, …). Reported, not thrown.
                let resolved = path::resolve(&self.schema.root, &segments);
                vec![Violation::new(
                    Constraint::Validator,
                    resolved.property,
                    LocalizedText::in_language("en", rendered),
                )]
            }
        }
    }

    fn violation(&self, constraint: Constraint, segments: &[String]) -> Violation {
        let resolved = path::resolve(&self.schema.root, segments);
        let message = resolved
            .node
            .and_then(FieldSchema::message)
            .cloned()
            .unwrap_or_else(LocalizedText::failure);
        Violation::new(constraint, resolved.property, message)
    }
}
