//! # valoc-core — Foundational Types for Valoc
//!
//! Valoc validates structured records against a declarative schema and turns
//! failures into localized, field-addressed violation reports. This crate is
//! the bedrock of the workspace: it defines the schema tree, the localized
//! message map, and the violation model that every other crate speaks.
//!
//! ## Key Design Principles
//!
//! 1. **Tagged schema tree.** A schema node is one of exactly four kinds —
//!    `object`, `array`, `string`, `integer` — modeled as the [`FieldSchema`]
//!    enum. Each variant carries only the constraint fields that kind may
//!    declare, so an impossible schema (a `pattern` on an integer, say) is
//!    unrepresentable rather than a runtime surprise.
//!
//! 2. **One parsing path.** Raw JSON becomes a typed schema only through the
//!    strict parser in [`schema`]. Unknown property names and unrecognized
//!    `type` values are rejected loudly with [`SchemaError`]; a schema that
//!    parsed is well-formed everywhere it is reachable.
//!
//! 3. **Violations are data.** A constraint failure is a [`Violation`] value
//!    in a list, never an `Err`. Error returns are reserved for malformed
//!    schemas and engine faults.
//!
//! 4. **Localization stays a map until the last moment.** Messages travel as
//!    [`LocalizedText`] (language code → text) and collapse to a single
//!    string only where a consumer demands one, under an explicit
//!    [`LanguagePreference`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `valoc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone` and round-trip through serde.

pub mod error;
pub mod message;
pub mod schema;
pub mod violation;

// Re-export primary types for ergonomic imports.
pub use error::SchemaError;
pub use message::{LanguagePreference, LocalizedText, FALLBACK_MESSAGE};
pub use schema::{
    ArraySchema, DocumentSchema, FieldSchema, IntegerSchema, ObjectSchema, StringSchema,
    UNIQUE_ID_PATTERN,
};
pub use violation::{Constraint, Violation, WILDCARD_PROPERTY};
