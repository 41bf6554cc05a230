//! Accessors for the hyper-schema document being served.

use serde_json::Value;

/// Set `$schema` to `default` unless the document already declares one.
///
/// Returns true if the document was changed. Non-object documents are
/// left alone.
pub fn update_schema_uri(document: &mut Value, default: &str) -> bool {
    let Value::Object(map) = document else {
        return false;
    };
    if map.contains_key("$schema") {
        return false;
    }
    map.insert("$schema".to_string(), Value::String(default.to_string()));
    true
}

/// The document's `id`, if it is a string or a number.
pub fn document_id(document: &Value) -> Option<String> {
    match document.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// The document's `collectionName`, if present.
pub fn collection_name(document: &Value) -> Option<&str> {
    document
        .get("collectionName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}
