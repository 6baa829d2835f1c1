//! # Violations — Field-Addressed Validation Failures
//!
//! A validated document either passes or yields an ordered list of
//! [`Violation`]s, one per failed constraint. Each violation names the rule
//! that failed, the dotted/bracketed path of the offending field, and the
//! localized message the schema author attached to that field's node.

use serde::{Deserialize, Serialize};

use crate::message::{LanguagePreference, LocalizedText};

/// Path used when no specific field applies (root-level failures, engine
/// faults, whole-document rejections).
pub const WILDCARD_PROPERTY: &str = "*";

/// The rule a violation reports.
///
/// The first nine name schema constraints and serialize to their schema
/// keyword spelling. The last three are synthetic: `validator` marks an
/// unexpected engine failure converted into a violation, while `database`
/// and `delete` belong to the CRUD layer wrapped around this library — it
/// reports storage-level rejections through the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    /// A required property is absent.
    Required,
    /// The value has the wrong JSON type for its node.
    Type,
    /// A string failed its regular expression.
    Pattern,
    /// A string is shorter than `minLength`.
    MinLength,
    /// A string is longer than `maxLength`.
    MaxLength,
    /// An integer is below `minimum`.
    Minimum,
    /// An integer is outside the declared `enum`.
    Enum,
    /// An array repeats an element despite `uniqueItems`.
    UniqueItems,
    /// An object carries a property the schema does not declare.
    AdditionalProperties,
    /// The validation engine itself failed unexpectedly.
    Validator,
    /// Synthetic: the storage layer rejected the operation.
    Database,
    /// Synthetic: a deletion was refused.
    Delete,
}

impl Constraint {
    /// The wire spelling, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::Type => "type",
            Constraint::Pattern => "pattern",
            Constraint::MinLength => "minLength",
            Constraint::MaxLength => "maxLength",
            Constraint::Minimum => "minimum",
            Constraint::Enum => "enum",
            Constraint::UniqueItems => "uniqueItems",
            Constraint::AdditionalProperties => "additionalProperties",
            Constraint::Validator => "validator",
            Constraint::Database => "database",
            Constraint::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single constraint violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The rule that failed.
    pub constraint: Constraint,
    /// Dotted path to the offending field, with array positions appended as
    /// bracketed suffixes (`albums[2].tracks[0].title`), or
    /// [`WILDCARD_PROPERTY`] when no field applies.
    pub property: String,
    /// Localized text from the deepest schema node along the path, or the
    /// generic failure message when that node declares none.
    pub message: LocalizedText,
}

impl Violation {
    /// Build a violation for a specific field path.
    pub fn new(
        constraint: Constraint,
        property: impl Into<String>,
        message: LocalizedText,
    ) -> Self {
        Self {
            constraint,
            property: property.into(),
            message,
        }
    }

    /// Build a violation that addresses no specific field.
    pub fn wildcard(constraint: Constraint, message: LocalizedText) -> Self {
        Self::new(constraint, WILDCARD_PROPERTY, message)
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}]: {}",
            self.property,
            self.constraint,
            self.message.resolve(&LanguagePreference::default())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constraint_serializes_to_keyword_spelling() {
        assert_eq!(
            serde_json::to_value(Constraint::MaxLength).unwrap(),
            json!("maxLength")
        );
        assert_eq!(
            serde_json::to_value(Constraint::UniqueItems).unwrap(),
            json!("uniqueItems")
        );
        assert_eq!(serde_json::to_value(Constraint::Enum).unwrap(), json!("enum"));
    }

    #[test]
    fn constraint_round_trips_through_serde() {
        for constraint in [
            Constraint::Required,
            Constraint::Type,
            Constraint::Pattern,
            Constraint::MinLength,
            Constraint::MaxLength,
            Constraint::Minimum,
            Constraint::Enum,
            Constraint::UniqueItems,
            Constraint::AdditionalProperties,
            Constraint::Validator,
            Constraint::Database,
            Constraint::Delete,
        ] {
            let text = serde_json::to_string(&constraint).unwrap();
            assert_eq!(text, format!("\"{}\"", constraint.as_str()));
            let back: Constraint = serde_json::from_str(&text).unwrap();
            assert_eq!(back, constraint);
        }
    }

    #[test]
    fn violation_serializes_with_localized_message() {
        let violation = Violation::new(
            Constraint::Pattern,
            "_id",
            LocalizedText::in_language("de", "Kennung ungültig"),
        );
        assert_eq!(
            serde_json::to_value(&violation).unwrap(),
            json!({
                "constraint": "pattern",
                "property": "_id",
                "message": {"de": "Kennung ungültig"}
            })
        );
    }

    #[test]
    fn wildcard_violation_uses_star_path() {
        let violation = Violation::wildcard(Constraint::Validator, LocalizedText::failure());
        assert_eq!(violation.property, WILDCARD_PROPERTY);
    }

    #[test]
    fn display_includes_path_and_constraint() {
        let violation = Violation::new(
            Constraint::MaxLength,
            "name",
            LocalizedText::in_language("en", "name too long"),
        );
        assert_eq!(violation.to_string(), "name [maxLength]: name too long");
    }
}
