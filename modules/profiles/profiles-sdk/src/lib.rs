//! Profiles SDK
//!
//! This crate provides the public API for the profiles client:
//! - `ProfilesClientV1` trait, the four remote operations
//! - Model types (`Profile`, `ProfileId`, `ProfileInput`)
//! - Error type (`ProfilesError`)
//!
//! ```ignore
//! let client: Arc<dyn ProfilesClientV1> = Arc::new(HttpProfilesClient::new(&config)?);
//! let profiles = client.list_profiles().await?;
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod errors;
pub mod models;

pub use api::ProfilesClientV1;
pub use errors::ProfilesError;
pub use models::{Profile, ProfileId, ProfileInput};
