use crate::client::{BufferedService, map_buffer_error};
use crate::config::TransportSecurity;
use crate::error::{HttpError, InvalidUriKind};
use crate::response::HttpResponse;
use bytes::Bytes;
use http::Request;
use http_body_util::Full;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use tower::ServiceExt;

#[derive(Clone, Debug)]
enum BodyKind {
    Empty,
    Json(Bytes),
}

/// HTTP request builder with a send-at-the-end API
///
/// The URL is checked against the client's [`TransportSecurity`] on
/// [`RequestBuilder::send`], not when the builder is created.
#[must_use = "RequestBuilder does nothing until .send() is called"]
pub struct RequestBuilder {
    service: BufferedService,
    max_body_size: usize,
    method: http::Method,
    url: String,
    body: BodyKind,
    transport_security: TransportSecurity,
}

impl RequestBuilder {
    pub(crate) fn new(
        service: BufferedService,
        max_body_size: usize,
        method: http::Method,
        url: String,
        transport_security: TransportSecurity,
    ) -> Self {
        Self {
            service,
            max_body_size,
            method,
            url,
            body: BodyKind::Empty,
            transport_security,
        }
    }

    /// Set a JSON body; `content-type: application/json` is added on send
    ///
    /// # Errors
    /// Returns `HttpError::Json` if serialization fails
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, HttpError> {
        let json_bytes = serde_json::to_vec(body)?;
        self.body = BodyKind::Json(Bytes::from(json_bytes));
        Ok(self)
    }

    /// Send the request
    ///
    /// Resolves `Ok` for every HTTP status, including 4xx/5xx; the body
    /// readers on [`HttpResponse`] turn a non-2xx status into an error.
    ///
    /// # Errors
    /// Returns an error for a rejected URL and for transport failures
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let uri = target_uri(&self.url, self.transport_security)?;
        tracing::debug!(method = %self.method, url = %self.url, "sending request");

        let builder = Request::builder().method(self.method).uri(uri);
        let request = match self.body {
            BodyKind::Empty => builder.body(Full::new(Bytes::new()))?,
            BodyKind::Json(bytes) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Full::new(bytes))?,
        };

        // Boxed so the `Oneshot` state isn't part of this future's witness;
        // otherwise rustc can't prove `Send` for `#[async_trait]` callers.
        let call: Pin<Box<dyn Future<Output = Result<_, tower::BoxError>> + Send>> =
            Box::pin(self.service.oneshot(request));
        let inner = call.await.map_err(map_buffer_error)?;

        tracing::debug!(status = %inner.status(), "response received");

        Ok(HttpResponse {
            inner,
            max_body_size: self.max_body_size,
        })
    }
}

/// Parse an absolute request URL and check its scheme against `transport`.
fn target_uri(url: &str, transport: TransportSecurity) -> Result<http::Uri, HttpError> {
    let invalid = |kind, reason: String| HttpError::InvalidUri {
        url: url.to_owned(),
        kind,
        reason,
    };

    let uri: http::Uri = url
        .parse()
        .map_err(|e: http::uri::InvalidUri| invalid(InvalidUriKind::ParseError, e.to_string()))?;

    let Some(scheme) = uri.scheme_str() else {
        let kind = if uri.authority().is_none() {
            InvalidUriKind::MissingAuthority
        } else {
            InvalidUriKind::MissingScheme
        };
        return Err(invalid(kind, "expected an absolute http(s) URL".to_owned()));
    };
    if uri.authority().is_none() {
        return Err(invalid(
            InvalidUriKind::MissingAuthority,
            "URL has no host".to_owned(),
        ));
    }

    let allowed = match scheme {
        "https" => true,
        "http" => transport == TransportSecurity::AllowInsecureHttp,
        _ => false,
    };
    if allowed {
        Ok(uri)
    } else {
        Err(HttpError::InvalidScheme {
            scheme: scheme.to_owned(),
            reason: scheme_rejection(scheme).to_owned(),
        })
    }
}

fn scheme_rejection(scheme: &str) -> &'static str {
    if scheme == "http" {
        "plain HTTP is disabled for this client"
    } else {
        "only http and https are supported"
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_target_uri_accepts_https() {
        let uri =
            target_uri("https://example.com/api/profiles", TransportSecurity::TlsOnly).unwrap();
        assert_eq!(uri.host(), Some("example.com"));
    }

    #[test]
    fn test_target_uri_http_depends_on_transport() {
        let url = "http://localhost:3001/api/profiles";
        assert!(target_uri(url, TransportSecurity::AllowInsecureHttp).is_ok());
        match target_uri(url, TransportSecurity::TlsOnly) {
            Err(HttpError::InvalidScheme { scheme, .. }) => assert_eq!(scheme, "http"),
            other => panic!("expected InvalidScheme, got {other:?}"),
        }
    }

    #[test]
    fn test_target_uri_rejects_relative_and_odd_schemes() {
        assert!(matches!(
            target_uri("/api/profiles", TransportSecurity::AllowInsecureHttp),
            Err(HttpError::InvalidUri {
                kind: InvalidUriKind::MissingAuthority,
                ..
            })
        ));
        assert!(matches!(
            target_uri("ftp://localhost/profiles", TransportSecurity::AllowInsecureHttp),
            Err(HttpError::InvalidScheme { .. })
        ));
        assert!(matches!(
            target_uri("http://exa mple.com", TransportSecurity::AllowInsecureHttp),
            Err(HttpError::InvalidUri {
                kind: InvalidUriKind::ParseError,
                ..
            })
        ));
    }
}
