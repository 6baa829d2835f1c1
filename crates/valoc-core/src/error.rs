//! # Error Types — Malformed and Unmappable Schemas
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Constraint violations in validated documents are **not** errors; they
//!   are returned as [`crate::Violation`] data. The types here cover the
//!   other taxonomy entries: schemas that are malformed, and schema features
//!   that cannot be translated.
//! - A schema feature the dialect projection does not know how to translate
//!   fails loudly. Silently dropping it would install a weaker validator in
//!   the target store than the schema author declared.

use thiserror::Error;

/// Error raised while parsing or translating a declarative schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The node's `type` is not one of `object`, `array`, `string`, `integer`.
    #[error("unsupported data type '{found}'")]
    UnsupportedType {
        /// The `type` value the schema carried.
        found: String,
    },

    /// A property name no node kind knows how to map.
    #[error("cannot map property '{property}' on a {node} node")]
    UnknownProperty {
        /// The offending property name.
        property: String,
        /// The node kind that rejected it.
        node: &'static str,
    },

    /// A known property carried a value of the wrong shape.
    #[error("schema property '{property}' is invalid: expected {expected}")]
    InvalidProperty {
        /// The offending property name.
        property: String,
        /// What the parser expected to find.
        expected: &'static str,
    },

    /// A schema node without a `type` property.
    #[error("schema node is missing 'type'")]
    MissingType,

    /// A root schema without the mandatory `$id` registration key.
    #[error("root schema is missing '$id'")]
    MissingId,

    /// A schema node that is not a JSON object.
    #[error("schema node must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type name of the value actually found.
        found: &'static str,
    },

    /// The schema text was not valid JSON at all.
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}
