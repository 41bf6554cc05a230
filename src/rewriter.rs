//! Reference rewriting - turns relative `href`/`$ref` values into absolute URLs.
//!
//! A reference is relative when it has no host. Relative references are
//! prefixed with the base URL by plain concatenation; nothing is normalized.
//! Strings the URL parser rejects have no host either, so they are rewritten
//! too. Absolute references are never touched, which makes rewriting
//! idempotent for a base URL that carries a host.

use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::RewriteError;
use crate::types::{json_type_name, RewriteScope};

/// Returns true if `reference` has no network host.
///
/// Covers root-relative paths (`/foo`), scheme-relative references
/// (`//cdn/foo`), bare fragments, and anything that fails to parse.
/// Opaque absolute URIs (`mailto:`, `urn:`, `tel:`) are not relative even
/// though they carry no host.
pub fn is_relative(reference: &str) -> bool {
    match Url::parse(reference) {
        Ok(url) => url.host().is_none() && !url.cannot_be_a_base(),
        Err(_) => true,
    }
}

/// Rewrite every relative reference in `value`, in place.
///
/// Walks objects and arrays depth-first. Only string values sitting directly
/// under one of the scope's candidate keys are considered; any other value,
/// including non-string values under a candidate key, is descended into.
///
/// Returns the number of references rewritten.
pub fn absolutize(base_url: &str, value: &mut Value, scope: RewriteScope) -> usize {
    let mut rewritten = 0;
    rewrite_value(base_url, value, scope, &mut rewritten);
    rewritten
}

/// Like [`absolutize`], but leaves `value` alone and returns a rewritten copy.
pub fn absolutized(base_url: &str, value: &Value, scope: RewriteScope) -> Value {
    let mut copy = value.clone();
    absolutize(base_url, &mut copy, scope);
    copy
}

/// Absolutize a hyper-schema body.
///
/// `links` is rewritten with [`RewriteScope::Links`] (`href` and `$ref`),
/// `properties` with [`RewriteScope::Properties`] (`$ref` only). Either
/// member may be missing.
///
/// # Errors
///
/// Returns `RewriteError::NotTraversable` if `body` isn't an object. Nothing
/// is rewritten in that case.
pub fn make_absolute(base_url: &str, body: &mut Value) -> Result<usize, RewriteError> {
    let Value::Object(map) = body else {
        return Err(RewriteError::NotTraversable {
            actual: json_type_name(body).to_string(),
        });
    };

    let mut rewritten = 0;
    if let Some(links) = map.get_mut("links") {
        rewritten += absolutize(base_url, links, RewriteScope::Links);
    }
    if let Some(properties) = map.get_mut("properties") {
        rewritten += absolutize(base_url, properties, RewriteScope::Properties);
    }

    debug!(base_url, rewritten, "made references absolute");
    Ok(rewritten)
}

fn rewrite_value(
    base_url: &str,
    value: &mut Value,
    scope: RewriteScope,
    rewritten: &mut usize,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                match child {
                    Value::String(reference) if scope.is_candidate(key) => {
                        if is_relative(reference) {
                            let absolute = format!("{}{}", base_url, reference);
                            trace!(
                                key = key.as_str(),
                                from = reference.as_str(),
                                to = absolute.as_str(),
                                "rewrote reference"
                            );
                            *reference = absolute;
                            *rewritten += 1;
                        }
                    }
                    other => rewrite_value(base_url, other, scope, rewritten),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_value(base_url, item, scope, rewritten);
            }
        }
        // Scalars outside a candidate key are never rewritten
        _ => {}
    }
}
