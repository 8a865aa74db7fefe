//! Templated link generation.

/// Placeholder replaced by the current line.
pub const DEFAULT_MARKER: &str = "[[my-data]]";

/// Template used when none is configured or persisted.
pub const DEFAULT_TEMPLATE: &str = "https://go.to/[[my-data]]";

/// Replace the first occurrence of `marker` in `template` with `line`.
///
/// `line` is inserted verbatim; marker-like text inside it is not expanded.
/// Returns `template` unchanged when the marker is absent or empty.
pub fn generate(template: &str, marker: &str, line: &str) -> String {
    if marker.is_empty() {
        return template.to_string();
    }
    template.replacen(marker, line, 1)
}

/// Whether `template` contains `marker`.
pub fn has_marker(template: &str, marker: &str) -> bool {
    !marker.is_empty() && template.contains(marker)
}
