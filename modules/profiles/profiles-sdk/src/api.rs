//! `ProfilesClientV1` trait definition.

use async_trait::async_trait;

use crate::errors::ProfilesError;
use crate::models::{Profile, ProfileId, ProfileInput};

/// Remote profile operations (Version 1).
///
/// Every call is a single best-effort attempt: no retries, no timeout, no
/// caching. Failures come back as one normalized message in
/// [`ProfilesError::Transport`].
#[async_trait]
pub trait ProfilesClientV1: Send + Sync {
    /// Fetch every profile.
    async fn list_profiles(&self) -> Result<Vec<Profile>, ProfilesError>;

    /// Create a profile. The server assigns the identifier.
    ///
    /// `input` is expected to be validated by the caller.
    async fn create_profile(&self, input: ProfileInput) -> Result<Profile, ProfilesError>;

    /// Replace the profile identified by `id`.
    ///
    /// An unknown id surfaces like any other transport error.
    async fn update_profile(
        &self,
        id: &ProfileId,
        input: ProfileInput,
    ) -> Result<Profile, ProfilesError>;

    /// Delete the profile identified by `id`.
    ///
    /// Not idempotent: deleting an id the server no longer knows is an error.
    async fn delete_profile(&self, id: &ProfileId) -> Result<(), ProfilesError>;
}
