use crate::config::TransportSecurity;
use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::ResponseBody;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use std::future::Future;
use std::pin::Pin;
use tower::buffer::Buffer;

/// Type alias for the future type of the inner service
pub type ServiceFuture =
    Pin<Box<dyn Future<Output = Result<Response<ResponseBody>, HttpError>> + Send>>;

/// Type alias for the buffered service
pub type BufferedService = Buffer<Request<Full<Bytes>>, ServiceFuture>;

/// HTTP client over a buffered tower service
///
/// `HttpClient` is `Clone + Send + Sync`. Cloning is cheap (internal channel
/// clone), so callers store it directly without a `Mutex`.
///
/// Construct instances with [`HttpClientBuilder`](crate::HttpClientBuilder).
///
/// # Example
///
/// ```ignore
/// struct ProfilesApi {
///     http: HttpClient,
/// }
///
/// impl ProfilesApi {
///     async fn list(&self) -> Result<Vec<Profile>, HttpError> {
///         self.http.get("http://localhost:3001/api/profiles").send().await?.json().await
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: BufferedService,
    pub(crate) max_body_size: usize,
    pub(crate) transport_security: TransportSecurity,
}

impl HttpClient {
    /// Create a GET request builder
    ///
    /// The URL must be absolute (scheme and host). `http://` URLs are only
    /// accepted when the client was built with
    /// [`TransportSecurity::AllowInsecureHttp`].
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::GET, url)
    }

    /// Create a POST request builder
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::POST, url)
    }

    /// Create a PUT request builder
    pub fn put(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::PUT, url)
    }

    /// Create a DELETE request builder
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::DELETE, url)
    }

    fn request(&self, method: http::Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(
            self.service.clone(),
            self.max_body_size,
            method,
            url.to_owned(),
            self.transport_security,
        )
    }
}

/// Map buffer errors to `HttpError`
///
/// The buffer returns the inner service error boxed, or its own error when
/// the worker has shut down.
pub fn map_buffer_error(err: tower::BoxError) -> HttpError {
    match err.downcast::<HttpError>() {
        Ok(http_err) => *http_err,
        Err(err) => {
            tracing::error!(
                error = %err,
                "buffer worker closed unexpectedly; service unavailable"
            );
            HttpError::ServiceClosed
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[test]
    fn test_map_buffer_error_passes_through_http_error() {
        let err: tower::BoxError = Box::new(HttpError::BodyTooLarge { limit: 10 });
        assert!(matches!(
            map_buffer_error(err),
            HttpError::BodyTooLarge { limit: 10 }
        ));
    }

    #[test]
    fn test_map_buffer_error_returns_service_closed_for_unknown_error() {
        let err: tower::BoxError = "worker gone".into();
        assert!(matches!(map_buffer_error(err), HttpError::ServiceClosed));
    }
}
