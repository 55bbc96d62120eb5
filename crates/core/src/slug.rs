//! URL slug convention engine.
//!
//! Slugs identify cities and countries in public landing-page URLs, so
//! they are restricted to lowercase ASCII alphanumerics and hyphens.
//! Derivation is deterministic: the same display name always yields the
//! same slug.

/// Derive a URL slug from a display name.
///
/// Convention:
/// - lowercase the input
/// - replace every maximal run of characters outside `[a-z0-9]` with a
///   single hyphen (non-ASCII letters count as separators)
/// - strip leading and trailing hyphens
///
/// # Examples
///
/// ```
/// use pawhub_core::slug::derive_slug;
///
/// assert_eq!(derive_slug("Amsterdam"), "amsterdam");
/// assert_eq!(derive_slug("São Paulo!!"), "s-o-paulo");
/// assert_eq!(derive_slug("  "), "");
/// ```
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Check whether a string is a well-formed slug (`[a-z0-9-]*`).
///
/// The empty string is accepted: an empty slug means "derive one from
/// the name" at the API boundary.
pub fn is_valid_slug(slug: &str) -> bool {
    slug.chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Filter raw slug-field input down to the allowed character set.
///
/// Used by the admin controller on every keystroke: uppercase letters
/// are lowered, anything outside `[a-z0-9-]` is dropped. Unlike
/// [`derive_slug`] this performs no run-collapsing or trimming, so the
/// user can type hyphens freely while editing.
pub fn sanitize_slug_input(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-')
        .collect()
}
