//! # valoc-mongo — MongoDB `$jsonSchema` Projection
//!
//! Translates a [`valoc_core::DocumentSchema`] into MongoDB's native
//! validation dialect, so the same declared schema that drives application
//! validation can also be installed as a collection validator — defense in
//! depth at the storage layer.
//!
//! ## Shape of the Transform
//!
//! A pure, stateless tree walk with no relation to live validation:
//!
//! - `type` becomes `bsonType`; `integer` becomes the fixed-width `"int"`.
//! - Structural and constraint properties (`properties`, `items`,
//!   `required`, `additionalProperties`, `minLength`, `maxLength`,
//!   `pattern`, `enum`, `minimum`, `uniqueItems`) carry over unchanged.
//! - `message` maps collapse to a single `description` string under an
//!   explicit [`valoc_core::LanguagePreference`] — the dialect has no
//!   localization concept.
//! - `$id` and `$schema` never appear in the output.
//!
//! ## Reject, Never Weaken
//!
//! The raw-JSON entry point [`convert_value`] refuses any schema feature it
//! cannot translate (unrecognized `type`, unmapped property name). A
//! silently incomplete projection would install a *weaker* validator in the
//! store than the schema author declared, which is exactly the failure mode
//! this crate exists to prevent.
//!
//! ## Crate Policy
//!
//! - Depends on `valoc-core` only; the Validator component is never
//!   involved.
//! - Deterministic: the same schema always projects to the structurally
//!   identical tree.

pub mod convert;

pub use convert::{convert_node, convert_schema, convert_value};
