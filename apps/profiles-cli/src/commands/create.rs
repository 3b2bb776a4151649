use anyhow::Result;
use clap::Args;
use profiles::{ProfileForm, ProfileWorkflow};

use super::{format_profile, report_refresh_error};

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// Age in years (13-120)
    #[arg(long)]
    age: String,
    /// Comma-separated, e.g. "reading, chess"
    #[arg(long, default_value = "")]
    interests: String,
}

impl CreateArgs {
    pub async fn run(self, workflow: &ProfileWorkflow) -> Result<()> {
        workflow.set_form(ProfileForm {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            interests: self.interests,
        });

        let outcome = workflow.submit().await?;
        println!("{}", outcome.message());
        println!("{}", format_profile(&outcome.profile));
        report_refresh_error(outcome.refresh_error.as_ref());
        Ok(())
    }
}
