//! HTTP handlers for the admin reference-data endpoints.

pub mod city;
pub mod country;

use pawhub_core::error::CoreError;
use pawhub_core::slug::{derive_slug, is_valid_slug};

/// Resolve the slug to persist from a submitted name/slug pair.
///
/// An empty slug falls back to server-side derivation from the name;
/// a non-empty slug must already match `[a-z0-9-]`.
pub(crate) fn resolve_slug(name: &str, slug: &str) -> Result<String, CoreError> {
    if !is_valid_slug(slug) {
        return Err(CoreError::Validation(
            "Slug may only contain lowercase letters, digits, and hyphens".to_string(),
        ));
    }
    let resolved = if slug.is_empty() {
        derive_slug(name)
    } else {
        slug.to_string()
    };
    if resolved.is_empty() {
        return Err(CoreError::Validation(
            "Slug could not be derived from the name; provide one explicitly".to_string(),
        ));
    }
    Ok(resolved)
}
