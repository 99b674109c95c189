//! Typed errors: fatal configuration failures and per-call classifications.

use thiserror::Error;

/// Raised while building a [`crate::GatewayConfig`]; fatal to gateway
/// construction, never to an individual query.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("endpoint url is empty; expected https://<project>.example.co")]
    EmptyUrl,
    #[error("endpoint url must start with http:// or https://")]
    BadScheme,
    #[error("endpoint url is missing a host")]
    MissingHost,
    #[error("endpoint url must be a bare origin, without /rest/v1 or any other path")]
    TrailingPath,
    #[error("endpoint url does not parse: {0}")]
    Unparseable(String),
    #[error("SUPABASE_URL and SUPABASE_ANON_KEY environment variables are required")]
    MissingEnv,
    #[error("http client: {0}")]
    HttpClient(String),
}

/// Per-call failure classification. Every variant is recovered locally by the
/// gateway façade and converted into the kind-appropriate benign default; none
/// of these reach CRUD callers.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The endpoint could not be reached (includes timeouts).
    #[error("transport: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("http {status}: {body}")]
    Response { status: u16, body: String },
    /// The endpoint answered 200 with a body that is not valid JSON.
    #[error("invalid json: {0}")]
    Decode(String),
    /// The decoded payload had a shape the normalizer does not recognize.
    #[error("normalization: {0}")]
    Normalization(String),
}
