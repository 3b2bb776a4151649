use profiles_http::TransportSecurity;
use profiles_sdk::ProfilesError;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_USER_AGENT: &str = concat!("profiles-client/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Settings for [`crate::HttpProfilesClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProfilesConfig {
    /// API root; `/profiles` is appended to it.
    pub base_url: String,
    pub user_agent: String,
    /// Upper bound for any response body, in bytes.
    pub max_body_size: usize,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl ProfilesConfig {
    /// Parse and check `base_url`.
    ///
    /// # Errors
    /// Returns `ProfilesError::InvalidConfig` if the URL does not parse, is not
    /// `http`/`https`, or cannot carry path segments.
    pub fn parsed_base_url(&self) -> Result<Url, ProfilesError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ProfilesError::invalid_config(format!("base_url '{}': {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProfilesError::invalid_config(format!(
                "base_url '{}': scheme must be http or https",
                self.base_url
            )));
        }
        if url.cannot_be_a_base() {
            return Err(ProfilesError::invalid_config(format!(
                "base_url '{}': cannot be used as a base",
                self.base_url
            )));
        }

        Ok(url)
    }

    /// Plain HTTP is only enabled when the base URL asks for it.
    #[must_use]
    pub fn transport_security(&self) -> TransportSecurity {
        if Url::parse(&self.base_url).is_ok_and(|url| url.scheme() == "http") {
            TransportSecurity::AllowInsecureHttp
        } else {
            TransportSecurity::TlsOnly
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProfilesConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert!(config.user_agent.starts_with("profiles-client/"));
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
        assert_eq!(
            config.transport_security(),
            TransportSecurity::AllowInsecureHttp
        );
    }

    #[test]
    fn test_https_stays_tls_only() {
        let config = ProfilesConfig {
            base_url: "https://profiles.example.com/api".to_owned(),
            ..ProfilesConfig::default()
        };
        assert_eq!(config.transport_security(), TransportSecurity::TlsOnly);
        assert_eq!(
            config.parsed_base_url().unwrap().as_str(),
            "https://profiles.example.com/api"
        );
    }

    #[test]
    fn test_invalid_base_urls_rejected() {
        for bad in ["not a url", "ftp://example.com/api", "mailto:someone@example.com"] {
            let config = ProfilesConfig {
                base_url: bad.to_owned(),
                ..ProfilesConfig::default()
            };
            assert!(
                matches!(
                    config.parsed_base_url(),
                    Err(ProfilesError::InvalidConfig(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ProfilesConfig =
            serde_json::from_str(r#"{"base_url": "http://10.0.2.2:3001/api"}"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.2.2:3001/api");
        assert_eq!(config.max_body_size, DEFAULT_MAX_BODY_SIZE);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = serde_json::from_str::<ProfilesConfig>(r#"{"timeout": 5}"#);
        assert!(result.is_err());
    }
}
