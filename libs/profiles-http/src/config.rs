use std::time::Duration;

/// Default User-Agent header value
pub(crate) const DEFAULT_USER_AGENT: &str = concat!("profiles-http/", env!("CARGO_PKG_VERSION"));

/// Maximum body preview size kept in [`crate::HttpError::HttpStatus`] (8KB).
///
/// Error responses are read only up to this many bytes so a large error page
/// cannot blow up memory.
pub(crate) const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// Transport security configuration
///
/// Controls whether the client enforces TLS or allows plain HTTP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportSecurity {
    /// Require TLS for all connections (HTTPS only)
    #[default]
    TlsOnly,
    /// Allow plain HTTP connections (local backends, mock servers)
    AllowInsecureHttp,
}

/// Overall HTTP client configuration
#[derive(Debug, Clone)]
pub(crate) struct HttpClientConfig {
    /// Maximum response body size in bytes (default: 10 MB)
    pub(crate) max_body_size: usize,

    /// User-Agent header value (default: [`DEFAULT_USER_AGENT`])
    pub(crate) user_agent: String,

    /// Transport security mode (default: `TlsOnly`)
    pub(crate) transport: TransportSecurity,

    /// Buffer capacity for queued requests (default: 64)
    ///
    /// The client hands requests to a background worker through a bounded
    /// channel; this is the channel size.
    pub(crate) buffer_capacity: usize,

    /// Timeout for idle pooled connections (default: 90 seconds)
    ///
    /// `None` keeps idle connections until the server closes them.
    pub(crate) pool_idle_timeout: Option<Duration>,

    /// Maximum number of idle connections per host (default: 8)
    pub(crate) pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10 MB
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            transport: TransportSecurity::TlsOnly,
            buffer_capacity: 64,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 8,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_tls_only() {
        let config = HttpClientConfig::default();
        assert_eq!(config.transport, TransportSecurity::TlsOnly);
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
        assert!(config.user_agent.starts_with("profiles-http/"));
    }
}
