//! Label and identifier derivations for role, module and menu names.

/// Convert a name into a URL-safe identifier.
///
/// Transforms to lowercase, replaces non-alphanumeric characters with hyphens,
/// collapses consecutive hyphens, and trims leading/trailing hyphens.
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_hyphen = true; // Start true to skip leading hyphens

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_was_hyphen = false;
        } else {
            if !prev_was_hyphen {
                result.push('-');
            }
            prev_was_hyphen = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Convert an underscored name into a human-readable label.
///
/// Leading underscores and a trailing `_id` are dropped, remaining
/// underscores become spaces, and only the first letter is capitalized:
/// `"project_module_id"` becomes `"Project module"`.
pub fn humanize(text: &str) -> String {
    let trimmed = text.trim().trim_start_matches('_');
    let trimmed = trimmed.strip_suffix("_id").unwrap_or(trimmed);
    let spaced = trimmed.replace('_', " ").to_lowercase();
    let spaced = spaced.trim();

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
