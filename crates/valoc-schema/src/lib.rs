//! # valoc-schema — Schema Validation & Violation Reporting
//!
//! Compiles declarative [`valoc_core::DocumentSchema`] trees into reusable
//! validators (backed by the `jsonschema` crate) and turns raw engine
//! failures into ordered, localized, field-addressed
//! [`valoc_core::Violation`] reports.
//!
//! ## Registration, Then Validation
//!
//! A schema is registered once under its `$id` via
//! [`SchemaValidator::register`]; candidate documents are then checked with
//! [`SchemaValidator::validate`], which returns the violation list (empty on
//! success). Validating against an id that was never registered is a lookup
//! error, never a silent pass.
//!
//! ## Path Reconstruction
//!
//! The engine reports each failure with a JSON-Pointer location. The
//! [`path`] module walks that location alongside the registered schema tree
//! to recover the dotted property path (`albums[2].tracks[0].title`) and the
//! author's localized message for exactly the node that failed.
//!
//! ## Crate Policy
//!
//! - Constraint violations are returned as data; `Err` is reserved for
//!   unknown ids and schemas the engine cannot compile.
//! - The registry holds one compiled validator plus the originating schema
//!   tree per id. Nothing here is global: callers own the registry value and
//!   decide how to share it.

mod path;
pub mod registry;

pub use registry::{RegistryError, SchemaValidator};
