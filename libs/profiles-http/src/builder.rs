use crate::config::{HttpClientConfig, TransportSecurity};
use crate::error::HttpError;
use crate::layers::DefaultHeadersLayer;
use crate::response::ResponseBody;
use crate::tls;
use bytes::Bytes;
use http::Response;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use tower::buffer::Buffer;
use tower::util::BoxCloneService;
use tower::{ServiceBuilder, ServiceExt};

/// Type-erased service handed to the request buffer.
type InnerService =
    BoxCloneService<http::Request<Full<Bytes>>, http::Response<ResponseBody>, HttpError>;

/// Builder for constructing an [`HttpClient`](crate::HttpClient).
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Set the user agent string
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the maximum response body size
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Set transport security mode
    #[must_use]
    pub fn transport(mut self, transport: TransportSecurity) -> Self {
        self.config.transport = transport;
        self
    }

    /// Allow plain HTTP connections
    ///
    /// Equivalent to `.transport(TransportSecurity::AllowInsecureHttp)`.
    #[must_use]
    pub fn allow_insecure_http(self) -> Self {
        self.transport(TransportSecurity::AllowInsecureHttp)
    }

    /// Build the HTTP client
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails or the user agent is not a
    /// valid header value
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime: the request buffer spawns
    /// its worker task here.
    pub fn build(self) -> Result<crate::HttpClient, HttpError> {
        if self.config.transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!(
                "insecure HTTP enabled (TransportSecurity::AllowInsecureHttp); \
                 traffic to http:// URLs is not encrypted"
            );
        }

        let https = build_https_connector(self.config.transport)?;

        let mut client_builder = Client::builder(TokioExecutor::new());
        // pool_timer is required for pool_idle_timeout to take effect
        client_builder
            .pool_timer(TokioTimer::new())
            .pool_max_idle_per_host(self.config.pool_max_idle_per_host);
        if let Some(idle_timeout) = self.config.pool_idle_timeout {
            client_builder.pool_idle_timeout(idle_timeout);
        }
        let hyper_client = client_builder.build::<_, Full<Bytes>>(https);

        let headers_layer = DefaultHeadersLayer::json_api(&self.config.user_agent)?;

        // Request flow: Buffer -> DefaultHeaders -> hyper_client.
        // send() resolves Ok for every HTTP status; only transport failures are Err.
        let service: InnerService = ServiceBuilder::new()
            .layer(headers_layer)
            .service(hyper_client)
            .map_response(box_incoming_body)
            .map_err(HttpError::from)
            .boxed_clone();

        let buffered_service: crate::client::BufferedService =
            Buffer::new(service, self.config.buffer_capacity.max(1));

        Ok(crate::HttpClient {
            service: buffered_service,
            max_body_size: self.config.max_body_size,
            transport_security: self.config.transport,
        })
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn box_incoming_body(response: Response<Incoming>) -> Response<ResponseBody> {
    let (parts, body) = response.into_parts();
    let boxed_body: ResponseBody = body.map_err(Into::into).boxed();
    Response::from_parts(parts, boxed_body)
}

/// Build the HTTPS connector using webpki roots.
///
/// Plain `http://` is only accepted by the connector when the transport
/// allows it; URL scheme checks in the request builder reject it earlier.
fn build_https_connector(
    transport: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, HttpError> {
    let builder = hyper_rustls::HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(tls::crypto_provider())
        .map_err(|e| HttpError::Tls(Box::new(e)))?;

    let connector = if transport == TransportSecurity::AllowInsecureHttp {
        builder.https_or_http().enable_all_versions().build()
    } else {
        builder.https_only().enable_all_versions().build()
    };
    Ok(connector)
}
