//! URL slug helpers shared by posts and categories.

use crate::errors::ModelError;

/// Turn a title into a URL slug.
///
/// Lowercases and trims the input, drops everything except ASCII word
/// characters, whitespace and `-`, collapses runs of whitespace, `_` and `-`
/// into a single `-`, and strips leading/trailing dashes.
///
/// ```
/// assert_eq!(models::slug::slugify("  Hello, World! "), "hello-world");
/// assert_eq!(models::slug::slugify("Rust_is -- fun"), "rust-is-fun");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        }
    }
    out
}

/// A stored slug must be non-empty and made of `[a-z0-9-]` without leading,
/// trailing or doubled dashes.
pub fn validate_slug(slug: &str) -> Result<(), ModelError> {
    if slug.is_empty() {
        return Err(ModelError::required("slug"));
    }
    let charset_ok = slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !charset_ok || slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(ModelError::Validation(format!("invalid slug: {slug}")));
    }
    Ok(())
}

/// Use the supplied slug if it has content, otherwise derive one from `source`.
pub fn slug_or_derive(slug: Option<&str>, source: &str) -> String {
    match slug.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => slugify(source),
    }
}
