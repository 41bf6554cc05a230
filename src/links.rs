//! Link synthesis - default CRUD links merged with custom links.
//!
//! Every synthesized `links` array starts with the four reserved defaults
//! (`self`, `item`, `update`, `delete`). Custom links follow in their original
//! order. A custom link reusing a reserved `rel` is dropped: defaults can't be
//! overridden, and the collision is not an error.

use serde_json::Value;
use tracing::debug;

use crate::error::SynthesisError;
use crate::types::{json_type_name, Link, RESERVED_RELATIONS};

/// Build the four reserved links for a collection.
///
/// Each points at the `{base_url}/{collection}/{id}` URI template.
pub fn default_links(base_url: &str, collection: &str) -> [Link; 4] {
    let href = format!("{}/{}/{{id}}", base_url, collection);
    [
        Link::new("self", href.clone()),
        Link::new("item", href.clone()),
        Link::new("update", href.clone()).method("PUT"),
        Link::new("delete", href).method("DELETE"),
    ]
}

/// Returns true if `rel` names one of the reserved default relations.
pub fn is_reserved(rel: &str) -> bool {
    RESERVED_RELATIONS.contains(&rel)
}

/// Synthesize the `links` array for a collection.
///
/// Custom entries without a string `rel` (or that aren't objects at all) are
/// not reserved and are kept. `existing` is never modified.
pub fn synthesize(collection: &str, existing: Option<&[Value]>, base_url: &str) -> Vec<Value> {
    let custom = existing.unwrap_or_default();
    let mut links: Vec<Value> = default_links(base_url, collection)
        .iter()
        .map(Link::to_value)
        .collect();
    links.reserve(custom.len());

    for link in custom {
        match custom_rel(link) {
            Some(rel) if is_reserved(rel) => {
                debug!(rel, "dropping custom link that reuses a reserved relation");
            }
            _ => links.push(link.clone()),
        }
    }

    links
}

/// Replace `document.links` with the synthesized array.
///
/// # Errors
///
/// Returns `SynthesisError::NotAnObject` if the document isn't an object,
/// or `SynthesisError::InvalidLinks` if it has a non-array `links` member.
/// The document is untouched on error.
pub fn add_links(
    document: &mut Value,
    collection: &str,
    base_url: &str,
) -> Result<(), SynthesisError> {
    check_document(document)?;

    let existing = document
        .get("links")
        .and_then(Value::as_array)
        .map(Vec::as_slice);
    let links = synthesize(collection, existing, base_url);
    debug!(collection, count = links.len(), "synthesized links");

    if let Value::Object(map) = document {
        map.insert("links".to_string(), Value::Array(links));
    }
    Ok(())
}

/// Check that a document can carry a `links` array.
pub(crate) fn check_document(document: &Value) -> Result<(), SynthesisError> {
    let Some(map) = document.as_object() else {
        return Err(SynthesisError::NotAnObject {
            actual: json_type_name(document).to_string(),
        });
    };

    match map.get("links") {
        None | Some(Value::Array(_)) => Ok(()),
        Some(other) => Err(SynthesisError::InvalidLinks {
            actual: json_type_name(other).to_string(),
        }),
    }
}

fn custom_rel(link: &Value) -> Option<&str> {
    link.get("rel").and_then(Value::as_str)
}
