//! Small text helpers for CLI input, config values, and server error bodies.

/// Longest server message kept in an [`ApiError`](crate::http::ApiError) or a log line.
pub const MAX_ERROR_SNIPPET_CHARS: usize = 180;

/// Trim user or config input; blank values count as absent.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(ToString::to_string)
}

/// Whether an API base URL uses a scheme `reqwest` can reach.
pub fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Server message cut down to [`MAX_ERROR_SNIPPET_CHARS`], so an HTML error
/// page does not flood the terminal.
pub fn error_snippet(message: &str) -> String {
    message.trim().chars().take(MAX_ERROR_SNIPPET_CHARS).collect()
}
