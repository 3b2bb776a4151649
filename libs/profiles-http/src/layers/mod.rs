//! Tower layers applied by [`crate::HttpClientBuilder`].

mod default_headers;

pub(crate) use default_headers::DefaultHeadersLayer;
