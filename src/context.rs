//! Request context - where the base URL and collection name come from.
//!
//! The base URL is `scheme://authority` followed by the API root, e.g.
//! `http://example.org/api`. It is used as an opaque prefix: links are
//! built by appending to it and relative references are concatenated onto it.

use tracing::debug;
use url::Url;

use crate::error::ContextError;
use crate::types::{normalize_api_root, AnnotateOptions};

/// Scheme, authority, API root, and collection of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// URL scheme without `://` (e.g. `http`).
    pub scheme: String,
    /// Host, with the port when it isn't the scheme's default.
    pub authority: String,
    /// Normalized API root (e.g. `/api`, or empty).
    pub api_root: String,
    /// Pluralized collection identifier (e.g. `people`).
    pub collection_name: Option<String>,
}

impl RequestContext {
    pub fn new(
        scheme: impl Into<String>,
        authority: impl Into<String>,
        api_root: impl AsRef<str>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            authority: authority.into(),
            api_root: normalize_api_root(api_root.as_ref()),
            collection_name: None,
        }
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection_name = Some(collection.into());
        self
    }

    /// Build a context from a base URL such as `http://example.org/api`.
    ///
    /// The URL's path becomes the API root.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::InvalidUrl` if the URL can't be parsed, or
    /// `ContextError::MissingHost` if it has no host.
    pub fn from_base_url(base_url: &str) -> Result<Self, ContextError> {
        let url = parse_with_host(base_url)?;
        Ok(Self::new(url.scheme(), authority(&url), url.path()))
    }

    /// Build a context from the absolute URL of an incoming request.
    ///
    /// The collection is the first path segment after `options.api_root`:
    /// `http://example.org/api/people/42` yields collection `people`. A path
    /// naming nothing past the API root leaves the collection unset.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::InvalidUrl`, `ContextError::MissingHost`, or
    /// `ContextError::OutsideApiRoot` when the path doesn't start with the
    /// API root.
    pub fn from_request_url(
        request_url: &str,
        options: &AnnotateOptions,
    ) -> Result<Self, ContextError> {
        let url = parse_with_host(request_url)?;
        let api_root = normalize_api_root(&options.api_root);
        let path = url.path();

        let remainder = if api_root.is_empty() {
            Some(path)
        } else {
            path.strip_prefix(api_root.as_str())
                .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        };
        let Some(remainder) = remainder else {
            return Err(ContextError::OutsideApiRoot {
                path: path.to_string(),
                api_root,
            });
        };

        let collection = remainder.split('/').find(|segment| !segment.is_empty());
        debug!(request_url, collection, "parsed request context");

        let context = Self::new(url.scheme(), authority(&url), &api_root);
        Ok(match collection {
            Some(name) => context.with_collection(name),
            None => context,
        })
    }

    /// `scheme://authority`, without the API root.
    pub fn scheme_and_authority(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// `scheme://authority` followed by the API root.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.scheme_and_authority(), self.api_root)
    }
}

fn parse_with_host(raw: &str) -> Result<Url, ContextError> {
    let url = Url::parse(raw).map_err(|source| ContextError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if url.host().is_none() {
        return Err(ContextError::MissingHost {
            url: raw.to_string(),
        });
    }
    Ok(url)
}

fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
