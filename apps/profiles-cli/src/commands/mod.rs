pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use profiles::{Profile, ProfilesError};

/// Two-line rendering of a profile, as shown in the list.
pub fn format_profile(profile: &Profile) -> String {
    let mut out = format!(
        "{}  {} {}\n    Age: {}",
        profile.id, profile.first_name, profile.last_name, profile.age
    );
    if !profile.interests.is_empty() {
        out.push_str("\n    Interests: ");
        out.push_str(&profile.interests.join(", "));
    }
    out
}

/// The mutation succeeded but the list could not be re-fetched.
pub fn report_refresh_error(refresh_error: Option<&ProfilesError>) {
    if let Some(err) = refresh_error {
        eprintln!("Error: {err}");
    }
}
