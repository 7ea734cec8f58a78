//! Server URL normalization.

/// Map `http(s)://` URLs (as printed by tunnelling tools) onto `ws(s)://`.
///
/// Anything else is returned unchanged.
pub fn normalize_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        url.to_string()
    }
}
