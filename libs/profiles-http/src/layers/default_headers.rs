use crate::error::HttpError;
use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderName, HeaderValue, Request, Response};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer that fills in default headers on every request.
///
/// A header is only inserted when the request does not already carry it,
/// so per-request values always win.
#[derive(Clone)]
pub struct DefaultHeadersLayer {
    headers: Arc<[(HeaderName, HeaderValue)]>,
}

impl DefaultHeadersLayer {
    /// Defaults for a JSON API client: `User-Agent` and `Accept: application/json`.
    ///
    /// # Errors
    /// Returns `HttpError::InvalidHeaderValue` if the user agent string is not a
    /// valid header value
    pub fn json_api(user_agent: impl AsRef<str>) -> Result<Self, HttpError> {
        let user_agent = HeaderValue::from_str(user_agent.as_ref())?;
        Ok(Self {
            headers: Arc::from(vec![
                (USER_AGENT, user_agent),
                (ACCEPT, HeaderValue::from_static("application/json")),
            ]),
        })
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeadersService {
            inner,
            headers: Arc::clone(&self.headers),
        }
    }
}

/// Service produced by [`DefaultHeadersLayer`]
#[derive(Clone)]
pub struct DefaultHeadersService<S> {
    inner: S,
    headers: Arc<[(HeaderName, HeaderValue)]>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for DefaultHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        for (name, value) in self.headers.iter() {
            if !req.headers().contains_key(name) {
                req.headers_mut().insert(name.clone(), value.clone());
            }
        }
        self.inner.call(req)
    }
}
