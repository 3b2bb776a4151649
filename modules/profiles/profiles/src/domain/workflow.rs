//! Create/edit/delete form workflow.
//!
//! `ProfileWorkflow` owns the form, the selection (`FormMode`) and the
//! last fetched list. Every successful mutation resets the form to
//! `Creating` and re-fetches the whole list.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use profiles_sdk::{Profile, ProfileId, ProfilesClientV1, ProfilesError};
use tracing::{debug, info, warn};

use super::error::WorkflowError;
use super::form::{FormMode, ProfileForm};
use super::validation::validate_form;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this profile?";

/// Yes/no decision asked before every delete.
pub trait ConfirmDelete: Send + Sync {
    fn confirm(&self, id: &ProfileId) -> bool;
}

impl<F> ConfirmDelete for F
where
    F: Fn(&ProfileId) -> bool + Send + Sync,
{
    fn confirm(&self, id: &ProfileId) -> bool {
        self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Created,
    Updated,
}

/// Result of a successful submit.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub kind: SubmitKind,
    /// Record as returned by the server.
    pub profile: Profile,
    /// Failure of the follow-up list refresh; the mutation itself succeeded.
    pub refresh_error: Option<ProfilesError>,
}

impl SubmitOutcome {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self.kind {
            SubmitKind::Created => "Profile created successfully",
            SubmitKind::Updated => "Profile updated successfully",
        }
    }
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted {
        refresh_error: Option<ProfilesError>,
    },
    /// The user said no; nothing was sent.
    Declined,
}

impl DeleteOutcome {
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Deleted { .. } => Some("Profile deleted successfully"),
            Self::Declined => None,
        }
    }
}

#[derive(Debug, Default)]
struct WorkflowState {
    form: ProfileForm,
    mode: FormMode,
    profiles: Vec<Profile>,
}

impl WorkflowState {
    fn reset_form(&mut self) {
        self.form = ProfileForm::default();
        self.mode = FormMode::Creating;
    }
}

/// Clears its flag when dropped, including when the owning future is dropped.
struct FlagGuard<'a>(&'a AtomicBool);

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Counts one in-flight list fetch; overlapping refreshes each hold one.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Form workflow over any [`ProfilesClientV1`].
///
/// `Send + Sync`; all methods take `&self`. The state lock is never held
/// across a remote call.
pub struct ProfileWorkflow {
    client: Arc<dyn ProfilesClientV1>,
    state: Mutex<WorkflowState>,
    loading: AtomicUsize,
    submitting: AtomicBool,
}

impl ProfileWorkflow {
    #[must_use]
    pub fn new(client: Arc<dyn ProfilesClientV1>) -> Self {
        Self {
            client,
            state: Mutex::new(WorkflowState::default()),
            loading: AtomicUsize::new(0),
            submitting: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn form(&self) -> ProfileForm {
        self.state.lock().form.clone()
    }

    /// Replace the form contents (user typing).
    pub fn set_form(&self, form: ProfileForm) {
        self.state.lock().form = form;
    }

    /// Edit the form in place.
    pub fn update_form(&self, edit: impl FnOnce(&mut ProfileForm)) {
        edit(&mut self.state.lock().form);
    }

    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.state.lock().mode.clone()
    }

    /// Last fetched list.
    #[must_use]
    pub fn profiles(&self) -> Vec<Profile> {
        self.state.lock().profiles.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire) > 0
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Re-fetch the list and replace the in-memory copy.
    ///
    /// On failure the previous list is kept. `is_loading` stays true until
    /// every overlapping refresh has finished.
    ///
    /// # Errors
    /// Returns the client's error.
    pub async fn refresh(&self) -> Result<(), ProfilesError> {
        let _loading = LoadingGuard::enter(&self.loading);

        match self.client.list_profiles().await {
            Ok(profiles) => {
                debug!(count = profiles.len(), "Profile list refreshed");
                self.state.lock().profiles = profiles;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh profile list");
                Err(e)
            }
        }
    }

    /// Select a profile for editing and pre-populate the form.
    pub fn select_for_edit(&self, profile: &Profile) {
        let mut state = self.state.lock();
        state.form = ProfileForm::from_profile(profile);
        state.mode = FormMode::Editing(profile.id.clone());
        debug!(profile_id = %profile.id, "Editing profile");
    }

    /// Leave edit mode and clear the form. No-op while creating.
    pub fn cancel_edit(&self) {
        let mut state = self.state.lock();
        if let FormMode::Editing(id) = &state.mode {
            debug!(profile_id = %id, "Edit cancelled");
            state.reset_form();
        }
    }

    /// Validate the form, then create or update depending on the mode.
    ///
    /// On success the form is reset to `Creating` and the list is refreshed.
    ///
    /// # Errors
    /// - `WorkflowError::SubmitInProgress` if another action is in flight
    /// - `WorkflowError::Validation` if the form is invalid (no call made)
    /// - `WorkflowError::Client` if the remote call failed (form kept)
    pub async fn submit(&self) -> Result<SubmitOutcome, WorkflowError> {
        let _submitting = self.begin_action()?;

        let (form, mode) = {
            let state = self.state.lock();
            (state.form.clone(), state.mode.clone())
        };
        let input = validate_form(&form)?;

        let (kind, profile) = match &mode {
            FormMode::Creating => (
                SubmitKind::Created,
                self.client.create_profile(input).await?,
            ),
            FormMode::Editing(id) => (
                SubmitKind::Updated,
                self.client.update_profile(id, input).await?,
            ),
        };
        info!(profile_id = %profile.id, kind = ?kind, "Profile saved");

        self.state.lock().reset_form();
        let refresh_error = self.refresh().await.err();

        Ok(SubmitOutcome {
            kind,
            profile,
            refresh_error,
        })
    }

    /// Delete a profile after asking `confirm`.
    ///
    /// Deleting the profile being edited also resets the form.
    ///
    /// # Errors
    /// - `WorkflowError::SubmitInProgress` if another action is in flight
    /// - `WorkflowError::Client` if the remote call failed (state kept)
    pub async fn delete(
        &self,
        id: &ProfileId,
        confirm: &dyn ConfirmDelete,
    ) -> Result<DeleteOutcome, WorkflowError> {
        let _submitting = self.begin_action()?;

        if !confirm.confirm(id) {
            debug!(profile_id = %id, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        self.client.delete_profile(id).await?;
        info!(profile_id = %id, "Profile deleted");

        {
            let mut state = self.state.lock();
            if state.mode.is_editing(id) {
                state.reset_form();
            }
        }
        let refresh_error = self.refresh().await.err();

        Ok(DeleteOutcome::Deleted { refresh_error })
    }

    fn begin_action(&self) -> Result<FlagGuard<'_>, WorkflowError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WorkflowError::SubmitInProgress);
        }
        Ok(FlagGuard(&self.submitting))
    }
}
