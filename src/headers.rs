//! Response headers pointing a representation at its hyper-schema.

use serde::Serialize;

/// `Content-Type` and `Link` headers describing a resource by its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Link")]
    pub link: String,
}

impl ResponseHeaders {
    /// Headers for the schema with `id`, served under `base_url`.
    pub fn new(base_url: &str, id: &str) -> Self {
        let schema_url = schema_url(base_url, id);
        Self {
            content_type: format!("application/json; profile={}", schema_url),
            link: format!("<{}>; rel=describedby", schema_url),
        }
    }

    /// Header name/value pairs, `Content-Type` first.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Content-Type", self.content_type.as_str()),
            ("Link", self.link.as_str()),
        ]
        .into_iter()
    }
}

/// URL of the stored schema with `id`.
pub fn schema_url(base_url: &str, id: &str) -> String {
    format!("{}/json-schemas/{}", base_url, id)
}
