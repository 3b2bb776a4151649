//! Public models for the profiles API.
//!
//! Field names follow the backend's JSON (`firstName`, `lastName`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned profile identifier.
///
/// Opaque; never constructed from user input except to address an existing
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A profile record as returned by the server.
///
/// The server is the source of truth; missing fields fall back to empty
/// values instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProfileId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Body of create and update requests (full replacement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub interests: Vec<String>,
}
