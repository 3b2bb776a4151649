use profiles_sdk::{Profile, ProfileId};

/// Raw, user-editable form contents.
///
/// All four fields are free text; [`crate::validate_form`] turns them into a
/// `ProfileInput`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    /// Comma-separated list, e.g. `"reading, chess"`.
    pub interests: String,
}

impl ProfileForm {
    /// Pre-populate the form from an existing profile.
    ///
    /// An age of 0 (absent on the server) leaves the age field blank.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        let age = match profile.age {
            0 => String::new(),
            age => age.to_string(),
        };
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            age,
            interests: profile.interests.join(", "),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What a submit of the form will do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(ProfileId),
}

impl FormMode {
    /// Id of the profile being edited, if any.
    #[must_use]
    pub fn editing_id(&self) -> Option<&ProfileId> {
        match self {
            Self::Creating => None,
            Self::Editing(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is_editing(&self, id: &ProfileId) -> bool {
        self.editing_id() == Some(id)
    }
}
