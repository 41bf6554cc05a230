//! Hyper-Schema Links
//!
//! Augments JSON Hyper-Schema documents with hypermedia metadata.
//!
//! This library synthesizes the default CRUD `links` of a resource collection,
//! merges them with custom links (defaults can't be overridden), and makes every
//! relative `href`/`$ref` in the document absolute against the request's base URL.
//!
//! # Example
//!
//! ```
//! use hyper_schema::{annotate, AnnotateOptions, RequestContext};
//! use serde_json::json;
//!
//! let document = json!({
//!     "id": 123,
//!     "links": [
//!         { "rel": "friends", "href": "/people/{id}/friends" },
//!         { "rel": "item", "href": "/ignored" }
//!     ],
//!     "properties": {
//!         "spouse": { "$ref": "/json-schemas/123" }
//!     }
//! });
//!
//! let ctx = RequestContext::new("http", "example.org", "/api").with_collection("people");
//! let annotated = annotate(&document, &ctx, &AnnotateOptions::new()).unwrap();
//!
//! let links = annotated.document["links"].as_array().unwrap();
//! assert_eq!(links.len(), 5);
//! assert_eq!(links[1]["href"], "http://example.org/api/people/{id}");
//! assert_eq!(links[4]["href"], "http://example.org/api/people/{id}/friends");
//! assert_eq!(
//!     annotated.document["properties"]["spouse"]["$ref"],
//!     "http://example.org/api/json-schemas/123"
//! );
//! ```
//!
//! # Rewrite Rules
//!
//! | Subtree | Rewritten keys | Skipped |
//! |---------|----------------|---------|
//! | `links` | `href`, `$ref` | references with a host |
//! | `properties` | `$ref` | references with a host, every `href` |
//!
//! Relative references are concatenated onto the base URL as-is. Strings the
//! URL parser rejects count as relative.

mod annotate;
mod context;
mod document;
mod error;
mod headers;
mod links;
mod loader;
mod rewriter;
mod types;

pub use annotate::{annotate, Annotated};
pub use context::RequestContext;
pub use document::{collection_name, document_id, update_schema_uri};
pub use error::{AnnotateError, ContextError, LoadError, RewriteError, SynthesisError};
pub use headers::{schema_url, ResponseHeaders};
pub use links::{add_links, default_links, is_reserved, synthesize};
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use rewriter::{absolutize, absolutized, is_relative, make_absolute};
pub use types::{
    json_type_name, AnnotateOptions, Link, RewriteScope, DEFAULT_API_ROOT, DEFAULT_SCHEMA_URI,
    RESERVED_RELATIONS,
};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
