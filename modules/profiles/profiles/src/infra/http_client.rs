use async_trait::async_trait;
use profiles_http::{HttpClient, HttpClientBuilder, HttpError};
use profiles_sdk::{Profile, ProfileId, ProfileInput, ProfilesClientV1, ProfilesError};
use serde::Deserialize;
use tracing::{instrument, warn};
use url::Url;

use crate::config::ProfilesConfig;

const LIST_FALLBACK: &str = "Failed to fetch profiles";
const CREATE_FALLBACK: &str = "Failed to create profile";
const UPDATE_FALLBACK: &str = "Failed to update profile";
const DELETE_FALLBACK: &str = "Failed to delete profile";

/// Error body shape used by the backend: `{"error": "..."}`.
#[derive(Deserialize)]
struct ServerError {
    error: String,
}

/// REST adapter implementing `ProfilesClientV1`.
///
/// Talks to `{base_url}/profiles`. `HttpClient` is `Clone + Send + Sync`, so
/// no external locking is needed.
pub struct HttpProfilesClient {
    client: HttpClient,
    base_url: Url,
}

impl HttpProfilesClient {
    #[must_use]
    pub fn new(client: HttpClient, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Build the transport from configuration.
    ///
    /// # Errors
    /// Returns `ProfilesError::InvalidConfig` for a bad base URL or user agent,
    /// or when TLS initialization fails.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn from_config(config: &ProfilesConfig) -> Result<Self, ProfilesError> {
        let base_url = config.parsed_base_url()?;
        let client = HttpClientBuilder::new()
            .user_agent(config.user_agent.clone())
            .max_body_size(config.max_body_size)
            .transport(config.transport_security())
            .build()
            .map_err(|e| ProfilesError::invalid_config(e.to_string()))?;

        Ok(Self::new(client, base_url))
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, id: Option<&ProfileId>, fallback: &str) -> Result<Url, ProfilesError> {
        endpoint(&self.base_url, id).ok_or_else(|| ProfilesError::transport(fallback))
    }
}

/// `{base}/profiles` or `{base}/profiles/{id}`, with the id percent-encoded.
///
/// `None` when the base URL cannot carry a path.
fn endpoint(base: &Url, id: Option<&ProfileId>) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop_if_empty().push("profiles");
        if let Some(id) = id {
            segments.push(id.as_str());
        }
    }
    Some(url)
}

/// Collapse a transport failure into the single user-facing message.
///
/// Precedence: the server's `error` field, then the transport message when
/// no response arrived, then the operation's fallback.
fn normalize_error(err: &HttpError, fallback: &str) -> ProfilesError {
    let message = match err {
        HttpError::HttpStatus { body_preview, .. } => server_message(body_preview),
        _ if !err.has_response() => Some(err.to_string()),
        _ => None,
    }
    .unwrap_or_else(|| fallback.to_owned());

    warn!(error = %err, message = %message, "Profiles request failed");
    ProfilesError::transport(message)
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ServerError>(body)
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.is_empty())
}

#[async_trait]
impl ProfilesClientV1 for HttpProfilesClient {
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn list_profiles(&self) -> Result<Vec<Profile>, ProfilesError> {
        let url = self.url_for(None, LIST_FALLBACK)?;

        let result: Result<Vec<Profile>, HttpError> =
            async { self.client.get(url.as_str()).send().await?.json().await }.await;

        result.map_err(|e| normalize_error(&e, LIST_FALLBACK))
    }

    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn create_profile(&self, input: ProfileInput) -> Result<Profile, ProfilesError> {
        let url = self.url_for(None, CREATE_FALLBACK)?;

        let result: Result<Profile, HttpError> = async {
            self.client
                .post(url.as_str())
                .json(&input)?
                .send()
                .await?
                .json()
                .await
        }
        .await;

        result.map_err(|e| normalize_error(&e, CREATE_FALLBACK))
    }

    #[instrument(skip_all, fields(base_url = %self.base_url, profile_id = %id))]
    async fn update_profile(
        &self,
        id: &ProfileId,
        input: ProfileInput,
    ) -> Result<Profile, ProfilesError> {
        let url = self.url_for(Some(id), UPDATE_FALLBACK)?;

        let result: Result<Profile, HttpError> = async {
            self.client
                .put(url.as_str())
                .json(&input)?
                .send()
                .await?
                .json()
                .await
        }
        .await;

        result.map_err(|e| normalize_error(&e, UPDATE_FALLBACK))
    }

    #[instrument(skip_all, fields(base_url = %self.base_url, profile_id = %id))]
    async fn delete_profile(&self, id: &ProfileId) -> Result<(), ProfilesError> {
        let url = self.url_for(Some(id), DELETE_FALLBACK)?;

        // Any 2xx counts; the body is ignored
        let result: Result<(), HttpError> = async {
            self.client
                .delete(url.as_str())
                .send()
                .await?
                .checked_bytes()
                .await
                .map(drop)
        }
        .await;

        result.map_err(|e| normalize_error(&e, DELETE_FALLBACK))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let base = base("http://localhost:3001/api");
        assert_eq!(
            endpoint(&base, None).unwrap().as_str(),
            "http://localhost:3001/api/profiles"
        );
        assert_eq!(
            endpoint(&base, Some(&ProfileId::from("64f1")))
                .unwrap()
                .as_str(),
            "http://localhost:3001/api/profiles/64f1"
        );
    }

    #[test]
    fn test_endpoint_trailing_slash_and_encoding() {
        let base = base("https://example.com/api/");
        assert_eq!(
            endpoint(&base, Some(&ProfileId::from("a/b c")))
                .unwrap()
                .as_str(),
            "https://example.com/api/profiles/a%2Fb%20c"
        );
    }

    #[test]
    fn test_endpoint_needs_path_capable_base() {
        assert!(endpoint(&base("mailto:ops@example.com"), None).is_none());
    }

    #[test]
    fn test_server_message() {
        assert_eq!(
            server_message(r#"{"error":"Profile not found"}"#).as_deref(),
            Some("Profile not found")
        );
        assert_eq!(server_message(r#"{"error":""}"#), None);
        assert_eq!(server_message(r#"{"error":42}"#), None);
        assert_eq!(server_message(r#"{"message":"nope"}"#), None);
        assert_eq!(server_message("<html>502</html>"), None);
    }

    #[test]
    fn test_normalize_prefers_server_message() {
        let err = HttpError::HttpStatus {
            status: http_status(400),
            body_preview: r#"{"error":"Age must be between 13 and 120"}"#.to_owned(),
            content_type: Some("application/json".to_owned()),
        };
        assert_eq!(
            normalize_error(&err, CREATE_FALLBACK).to_string(),
            "Age must be between 13 and 120"
        );
    }

    #[test]
    fn test_normalize_falls_back_when_response_has_no_message() {
        let err = HttpError::HttpStatus {
            status: http_status(500),
            body_preview: "Internal Server Error".to_owned(),
            content_type: Some("text/plain".to_owned()),
        };
        assert_eq!(
            normalize_error(&err, UPDATE_FALLBACK).to_string(),
            "Failed to update profile"
        );

        let err = HttpError::BodyTooLarge { limit: 10 };
        assert_eq!(
            normalize_error(&err, LIST_FALLBACK).to_string(),
            "Failed to fetch profiles"
        );
    }

    #[test]
    fn test_normalize_uses_transport_message_without_response() {
        let err = HttpError::Transport("connection refused".into());
        assert_eq!(
            normalize_error(&err, DELETE_FALLBACK).to_string(),
            "Transport error: connection refused"
        );
    }

    fn http_status(code: u16) -> ::http::StatusCode {
        ::http::StatusCode::from_u16(code).unwrap()
    }
}
