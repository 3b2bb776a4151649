use profiles_sdk::ProfilesError;

use super::validation::ValidationError;

/// Why a workflow action did not complete.
///
/// Every variant is recoverable by repeating the action.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The form was rejected before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote call failed; form and mode are unchanged.
    #[error(transparent)]
    Client(#[from] ProfilesError),

    /// Another submit or delete is still in flight.
    #[error("Another request is already in progress")]
    SubmitInProgress,
}
