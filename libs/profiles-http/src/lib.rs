#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! HTTP client infrastructure for the profiles client
//!
//! This crate provides a hyper-based HTTP client with:
//! - TLS via rustls (webpki roots), plain HTTP only when explicitly allowed
//! - Connection pooling
//! - User-Agent header injection
//! - Body size limits on every response read
//! - JSON request/response helpers
//!
//! Every request is a single attempt. There is no retry layer and no
//! per-request timeout: a request that never completes keeps its caller
//! waiting.
//!
//! # Example
//!
//! ```ignore
//! use profiles_http::HttpClientBuilder;
//!
//! let client = HttpClientBuilder::new()
//!     .user_agent("my-app/1.0")
//!     .build()?;
//!
//! let data: MyData = client
//!     .get("https://example.com/api")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod layers;
mod request;
mod response;
mod tls;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::TransportSecurity;
pub use error::{HttpError, InvalidUriKind};
pub use request::RequestBuilder;
pub use response::HttpResponse;
