//! Identifier lookup for method, principle and regime names.
//!
//! Names arrive from the presentation layer as free text. They are normalized
//! (trimmed, lowercased, `_` and spaces folded to `-`) and resolved through a
//! static table so that an unknown name fails as a configuration error.

use std::collections::HashMap;

use super::ConfigurationError;

/// Folds a user-supplied identifier into its canonical kebab-case form.
pub fn canonical_identifier(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Resolves `raw` in `table`, reporting `kind` on failure.
pub fn resolve_identifier<T: Copy>(
    table: &HashMap<&'static str, T>,
    kind: &str,
    raw: &str,
) -> Result<T, ConfigurationError> {
    table
        .get(canonical_identifier(raw).as_str())
        .copied()
        .ok_or_else(|| ConfigurationError::unknown(kind, raw))
}
