//! Load gateway configuration from the process environment.

use crate::config::GatewayConfig;
use crate::error::ConfigError;

/// Origin substituted when validation is disabled and no URL is configured,
/// so tooling can still construct a gateway without credentials.
const PLACEHOLDER_URL: &str = "https://example.supabase.co";

/// Read one environment value, stripping whitespace, surrounding quotes, and
/// a trailing slash. Empty values count as absent.
fn env_value(key: &str) -> Option<String> {
    let raw = std::env::var(key).ok()?;
    let cleaned = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim_end_matches('/')
        .to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Build a [`GatewayConfig`] from `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY`
/// and `SUPABASE_ANON_KEY`, loading `.env` first. `CHECK_ENV_VARS=false`
/// skips the presence check for tooling and test contexts.
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    dotenvy::dotenv().ok();
    let url = env_value("SUPABASE_URL");
    let service_role_key = env_value("SUPABASE_SERVICE_ROLE_KEY");
    let anon_key = env_value("SUPABASE_ANON_KEY");
    let check_env = std::env::var("CHECK_ENV_VARS")
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(true);
    build(url, service_role_key, anon_key, check_env)
}

/// Environment-independent core of [`from_env`].
fn build(
    url: Option<String>,
    service_role_key: Option<String>,
    anon_key: Option<String>,
    check_env: bool,
) -> Result<GatewayConfig, ConfigError> {
    if check_env && (url.is_none() || anon_key.is_none()) {
        return Err(ConfigError::MissingEnv);
    }
    let url = url.unwrap_or_else(|| PLACEHOLDER_URL.to_string());
    GatewayConfig::new(&url, service_role_key, anon_key)
}
