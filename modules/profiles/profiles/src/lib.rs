//! Profiles client
//!
//! - `infra::HttpProfilesClient`: `ProfilesClientV1` over `profiles_http::HttpClient`
//! - `domain::validation`: pure form validation
//! - `domain::workflow::ProfileWorkflow`: the create/edit/delete form state machine
//! - `config::ProfilesConfig`: client settings

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod infra;

pub use config::ProfilesConfig;
pub use domain::error::WorkflowError;
pub use domain::form::{FormMode, ProfileForm};
pub use domain::validation::{ValidationError, validate_form};
pub use domain::workflow::{
    ConfirmDelete, DELETE_PROMPT, DeleteOutcome, ProfileWorkflow, SubmitKind, SubmitOutcome,
};
pub use infra::HttpProfilesClient;

pub use profiles_sdk::{Profile, ProfileId, ProfileInput, ProfilesClientV1, ProfilesError};
