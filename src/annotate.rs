//! The full annotation pass for a hyper-schema response body.
//!
//! 1. Default `$schema` to draft-04 hyper-schema when missing
//! 2. Synthesize `links` (reserved defaults, then custom links)
//! 3. Make every `href`/`$ref` in `links` and `$ref` in `properties` absolute
//! 4. Build the `Content-Type`/`Link` headers when the document has an `id`

use serde_json::Value;
use tracing::{info, warn};

use crate::context::RequestContext;
use crate::document::{collection_name, document_id, update_schema_uri};
use crate::error::AnnotateError;
use crate::headers::ResponseHeaders;
use crate::links::{add_links, check_document};
use crate::rewriter::make_absolute;
use crate::types::AnnotateOptions;

/// An annotated document and the headers to send with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated {
    pub document: Value,
    /// `None` when the document has no `id` to point the headers at.
    pub headers: Option<ResponseHeaders>,
    /// Number of relative references made absolute.
    pub rewritten: usize,
}

/// Annotate a hyper-schema document for the given request.
///
/// The collection is `options.collection` when set, otherwise the
/// document's `collectionName`, otherwise the request context's collection.
/// The input is not modified; the annotated copy is returned.
///
/// # Errors
///
/// Returns `AnnotateError::Synthesis` if the document is not an object or
/// has a non-array `links`, and `AnnotateError::MissingCollection` if no
/// collection name is available. Validation happens before any rewriting.
pub fn annotate(
    document: &Value,
    ctx: &RequestContext,
    options: &AnnotateOptions,
) -> Result<Annotated, AnnotateError> {
    check_document(document)?;

    let collection = options
        .collection
        .as_deref()
        .or_else(|| collection_name(document))
        .or(ctx.collection_name.as_deref())
        .ok_or(AnnotateError::MissingCollection)?;
    let base_url = ctx.base_url();

    let mut annotated = document.clone();
    update_schema_uri(&mut annotated, &options.default_schema);
    add_links(&mut annotated, collection, &base_url)?;
    let rewritten = make_absolute(&base_url, &mut annotated)?;
    info!(
        collection,
        base_url = base_url.as_str(),
        rewritten,
        "hyper-schema links added"
    );

    let headers = match document_id(&annotated) {
        Some(id) => {
            info!(collection, id = id.as_str(), "hyper-schema headers added");
            Some(ResponseHeaders::new(&base_url, &id))
        }
        None => {
            warn!(collection, "document has no id; skipping describedby headers");
            None
        }
    };

    Ok(Annotated {
        document: annotated,
        headers,
        rewritten,
    })
}
