//! # Error-Path Reconstruction
//!
//! The validation engine addresses each failure with an RFC 6901 JSON
//! Pointer into the *instance*. Reports, however, must speak the schema
//! author's language: a dotted property path whose array positions qualify
//! the preceding field (`albums[2].tracks[0].title`), plus the localized
//! message of the schema node that actually failed.
//!
//! Reconstruction happens in two steps:
//!
//! 1. [`pointer_segments`] decodes the pointer into raw segments. This is
//!    the only place pointer syntax is interpreted; everything else works on
//!    decoded segments.
//! 2. [`resolve`] walks the segments with a cursor into the schema tree.
//!    The cursor — not the segment's spelling — decides whether a segment is
//!    an array index or a property name, so a field literally named `"0"`
//!    still resolves as a property when its parent schema declares it.
//!
//! A pointer that wanders off the schema (an undeclared property, a deeper
//! path than the tree) never fails: the cursor goes empty and the caller
//! falls back to the generic message. Spurious paths degrade, they do not
//! crash.

use valoc_core::{FieldSchema, WILDCARD_PROPERTY};

/// Decode an RFC 6901 JSON Pointer into its unescaped segments.
///
/// The empty pointer addresses the whole document and yields no segments.
/// Escapes are decoded in the order the RFC mandates: `~1` → `/` before
/// `~0` → `~`.
pub(crate) fn pointer_segments(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .split('/')
        .skip(1)
        .map(|raw| raw.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Where a segment walk ended up.
pub(crate) struct ResolvedPath<'schema> {
    /// Dotted property path with bracketed index suffixes, or `*` when the
    /// failure addresses no specific field.
    pub property: String,
    /// The schema node reached, if the path stayed on the tree.
    pub node: Option<&'schema FieldSchema>,
}

/// Walk `segments` against the schema tree rooted at `root`.
///
/// Property segments open a new dotted path element and descend the cursor
/// into `properties[name]` (or `items.properties[name]` under an
/// array-shaped cursor). Index segments never open a path element: they
/// append a `[i]` suffix to the most recently emitted one and advance the
/// cursor into `items`. An index with no preceding property (a bare
/// root-level position) has nothing to qualify and leaves the path alone.
pub(crate) fn resolve<'schema>(
    root: &'schema FieldSchema,
    segments: &[String],
) -> ResolvedPath<'schema> {
    let mut cursor = Some(root);
    let mut parts: Vec<String> = Vec::new();

    for segment in segments {
        if is_index(segment, cursor) {
            if let Some(last) = parts.last_mut() {
                last.push('[');
                last.push_str(segment);
                last.push(']');
            }
            cursor = match cursor {
                Some(FieldSchema::Array(array)) => Some(array.items.as_ref()),
                _ => None,
            };
        } else {
            parts.push(segment.clone());
            cursor = match cursor {
                Some(FieldSchema::Object(object)) => object.properties.get(segment),
                // An array-shaped cursor can be asked for a property when a
                // spurious pointer skipped the index; look through `items`.
                Some(FieldSchema::Array(array)) => match array.items.as_ref() {
                    FieldSchema::Object(object) => object.properties.get(segment),
                    _ => None,
                },
                _ => None,
            };
        }
    }

    let property = if parts.is_empty() {
        WILDCARD_PROPERTY.to_string()
    } else {
        parts.join(".")
    };

    ResolvedPath {
        property,
        node: cursor,
    }
}

/// A segment counts as an array index when it is purely numeric and the
/// schema does not explicitly declare a property of that exact name at the
/// cursor position.
fn is_index(segment: &str, cursor: Option<&FieldSchema>) -> bool {
    let numeric = !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit());
    if !numeric {
        return false;
    }
    match cursor {
        Some(FieldSchema::Object(object)) => !object.properties.contains_key(segment),
        _ => true,
    }
}
