//! Pre-write validation and duplicate removal.

use super::WriteOptions;
use crate::error::{Result, SpdxError};
use crate::model::Document;
use crate::properties::{property_hash, same_properties, PropertyAccess};
use crate::validation::Validator;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, info};

/// Apply the `drop_duplicates` and `validate` options.
///
/// Duplicates are dropped first so that property-equal copies of an entity
/// do not count as duplicate identifiers. The input is borrowed unchanged
/// when there is nothing to drop.
///
/// # Errors
///
/// [`SpdxError::Validation`] when validation finds error-severity issues.
pub fn validate_and_deduplicate<'a>(
    document: &'a Document,
    options: &WriteOptions,
) -> Result<Cow<'a, Document>> {
    let document = if options.drop_duplicates {
        deduplicate(document)
    } else {
        Cow::Borrowed(document)
    };

    if options.validate {
        let report = Validator::new(options.validation.clone()).validate(&document);
        if let Some(first) = report.first_error() {
            return Err(SpdxError::Validation {
                errors: report.error_count(),
                first: first.to_string(),
            });
        }
    }
    Ok(document)
}

/// Drop every entity whose properties all equal an earlier entity's.
///
/// Entities are bucketed by property hash; only same-bucket entities are
/// compared property by property.
#[must_use]
pub fn deduplicate(document: &Document) -> Cow<'_, Document> {
    let packages = unique(&document.packages);
    let files = unique(&document.files);
    let snippets = unique(&document.snippets);
    let extracted_licenses = unique(&document.extracted_licenses);
    let relationships = unique(&document.relationships);
    let annotations = unique(&document.annotations);
    let reviews = unique(&document.reviews);

    let kept = packages.len()
        + files.len()
        + snippets.len()
        + extracted_licenses.len()
        + relationships.len()
        + annotations.len()
        + reviews.len();
    let total = document.packages.len()
        + document.files.len()
        + document.snippets.len()
        + document.extracted_licenses.len()
        + document.relationships.len()
        + document.annotations.len()
        + document.reviews.len();
    if kept == total {
        debug!("no duplicate entities");
        return Cow::Borrowed(document);
    }
    info!(dropped = total - kept, "dropped duplicate entities");

    let mut deduplicated = document.clone();
    deduplicated.packages = packages.into_iter().cloned().collect();
    deduplicated.files = files.into_iter().cloned().collect();
    deduplicated.snippets = snippets.into_iter().cloned().collect();
    deduplicated.extracted_licenses = extracted_licenses.into_iter().cloned().collect();
    deduplicated.relationships = relationships.into_iter().cloned().collect();
    deduplicated.annotations = annotations.into_iter().cloned().collect();
    deduplicated.reviews = reviews.into_iter().cloned().collect();
    Cow::Owned(deduplicated)
}

/// First occurrence of each property-distinct entity, in order.
fn unique<E: PropertyAccess>(items: &[E]) -> Vec<&E> {
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
    let mut kept: Vec<&E> = Vec::with_capacity(items.len());
    for item in items {
        let bucket = buckets.entry(property_hash(item)).or_default();
        if bucket.iter().any(|&i| same_properties(kept[i], item)) {
            continue;
        }
        bucket.push(kept.len());
        kept.push(item);
    }
    kept
}
