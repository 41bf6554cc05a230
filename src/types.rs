//! Core types for hyper-schema annotation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Relations whose default links always lead the `links` array, in this order.
pub const RESERVED_RELATIONS: &[&str] = &["self", "item", "update", "delete"];

/// `$schema` assigned to documents that don't declare one.
pub const DEFAULT_SCHEMA_URI: &str = "http://json-schema.org/draft-04/hyper-schema#";

/// API root used when none is configured.
pub const DEFAULT_API_ROOT: &str = "/api";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A hypermedia link as emitted in a hyper-schema `links` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            method: None,
        }
    }

    /// Set the HTTP method used to follow this link.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Serialize into a JSON object with `rel`, `method` (if any), `href`.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("rel".to_string(), Value::String(self.rel.clone()));
        if let Some(method) = &self.method {
            map.insert("method".to_string(), Value::String(method.clone()));
        }
        map.insert("href".to_string(), Value::String(self.href.clone()));
        Value::Object(map)
    }
}

/// Which subtree of a hyper-schema body is being rewritten.
///
/// The entry point decides the candidate keys: inside `links` both `href`
/// and `$ref` are rewritten, inside `properties` only `$ref` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteScope {
    Links,
    Properties,
}

impl RewriteScope {
    /// Keys whose string values are rewritten in this scope.
    pub fn candidate_keys(&self) -> &'static [&'static str] {
        match self {
            RewriteScope::Links => &["href", "$ref"],
            RewriteScope::Properties => &["$ref"],
        }
    }

    /// Returns true if a string under `key` is a rewrite candidate.
    pub fn is_candidate(&self, key: &str) -> bool {
        self.candidate_keys().contains(&key)
    }
}

/// Options for annotating a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Path prefix of the REST API (e.g. `/api`).
    /// Normalized to a leading slash and no trailing slash; `/` becomes empty.
    pub api_root: String,
    /// `$schema` assigned when the document has none.
    pub default_schema: String,
    /// Collection that wins over both the document and the request.
    pub collection: Option<String>,
}

impl AnnotateOptions {
    /// Create options with the `/api` root and the draft-04 hyper-schema.
    pub fn new() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            default_schema: DEFAULT_SCHEMA_URI.to_string(),
            collection: None,
        }
    }

    /// Set the API root.
    pub fn api_root(mut self, api_root: impl AsRef<str>) -> Self {
        self.api_root = normalize_api_root(api_root.as_ref());
        self
    }

    /// Set the `$schema` used when the document has none.
    pub fn default_schema(mut self, default_schema: impl Into<String>) -> Self {
        self.default_schema = default_schema.into();
        self
    }

    /// Force the collection name used for links.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize an API root to `/segment[/segment...]`, or empty for the root.
pub fn normalize_api_root(api_root: &str) -> String {
    let trimmed = api_root.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
