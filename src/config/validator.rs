//! Endpoint URL normalization and validation.

use crate::error::ConfigError;
use url::Url;

/// API path suffixes that callers habitually paste along with the project
/// origin; all of them are stripped during normalization.
const API_SUFFIXES: &[&str] = &[
    "/rest/v1",
    "/auth/v1",
    "/storage/v1",
    "/realtime/v1",
    "/functions/v1",
];

/// Reduce a configured endpoint to a bare origin: strips surrounding quotes
/// and whitespace, trailing slashes, and any known API path suffix (plus any
/// slash left behind by the suffix).
pub fn normalize_base_url(raw: &str) -> String {
    let mut url = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    while url.ends_with('/') {
        url.pop();
    }
    for suffix in API_SUFFIXES {
        if url.ends_with(suffix) {
            url.truncate(url.len() - suffix.len());
            while url.ends_with('/') {
                url.pop();
            }
        }
    }
    url
}

/// Validate a normalized endpoint. Must run before any RPC call is attempted;
/// a failure here is fatal to gateway construction, not to a query.
pub fn assert_valid_base_url(url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::EmptyUrl);
    }
    let parsed = Url::parse(url).map_err(|e| ConfigError::Unparseable(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::BadScheme);
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::MissingHost);
    }
    if !matches!(parsed.path(), "" | "/") {
        return Err(ConfigError::TrailingPath);
    }
    Ok(())
}
