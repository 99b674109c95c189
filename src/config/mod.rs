//! Endpoint configuration: validated base origin, credentials, default timeout.

pub mod loader;
pub mod validator;

pub use loader::*;
pub use validator::*;

use crate::error::ConfigError;
use std::time::Duration;

/// Per-call timeout applied when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Credential role for one remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Service-role key; bypasses row-level access policies. The default.
    Service,
    /// Anonymous key; constrained by row-level access policies.
    Anon,
}

/// Immutable gateway configuration, built once and owned by the gateway for
/// the lifetime of the process.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    base_url: String,
    service_role_key: Option<String>,
    anon_key: Option<String>,
    timeout: Duration,
}

impl GatewayConfig {
    /// Normalize and validate the endpoint, keeping only a bare origin.
    /// Fails with a [`ConfigError`] when the value cannot be reduced to
    /// `scheme://host`.
    pub fn new(
        raw_url: &str,
        service_role_key: Option<String>,
        anon_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(raw_url);
        assert_valid_base_url(&base_url)?;
        Ok(Self {
            base_url,
            service_role_key,
            anon_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The validated bare origin, e.g. `https://proj.example.co`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Key for the requested role. The service role falls back to the
    /// anonymous key when no service-role key is configured; the anonymous
    /// role never escalates.
    pub fn api_key(&self, role: Role) -> Option<&str> {
        match role {
            Role::Service => self.service_role_key.as_deref().or(self.anon_key.as_deref()),
            Role::Anon => self.anon_key.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_role_falls_back_to_anon_key() {
        let config = GatewayConfig::new("https://proj.example.co", None, Some("anon".into()))
            .expect("valid config");
        assert_eq!(config.api_key(Role::Service), Some("anon"));
        assert_eq!(config.api_key(Role::Anon), Some("anon"));
    }

    #[test]
    fn anon_role_never_escalates() {
        let config = GatewayConfig::new("https://proj.example.co", Some("svc".into()), None)
            .expect("valid config");
        assert_eq!(config.api_key(Role::Service), Some("svc"));
        assert_eq!(config.api_key(Role::Anon), None);
    }
}
