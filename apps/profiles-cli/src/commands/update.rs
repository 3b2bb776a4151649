use anyhow::{Result, bail};
use clap::Args;
use profiles::{ProfileId, ProfileWorkflow};

use super::{format_profile, report_refresh_error};

/// Fields left out keep their current values.
#[derive(Args)]
pub struct UpdateArgs {
    /// Profile id
    id: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    age: Option<String>,
    /// Comma-separated; pass "" to clear
    #[arg(long)]
    interests: Option<String>,
}

impl UpdateArgs {
    pub async fn run(self, workflow: &ProfileWorkflow) -> Result<()> {
        let id = ProfileId::new(self.id);

        workflow.refresh().await?;
        let Some(profile) = workflow.profiles().into_iter().find(|p| p.id == id) else {
            bail!("Profile not found: {id}");
        };
        workflow.select_for_edit(&profile);

        workflow.update_form(|form| {
            if let Some(first_name) = self.first_name {
                form.first_name = first_name;
            }
            if let Some(last_name) = self.last_name {
                form.last_name = last_name;
            }
            if let Some(age) = self.age {
                form.age = age;
            }
            if let Some(interests) = self.interests {
                form.interests = interests;
            }
        });

        let outcome = workflow.submit().await?;
        println!("{}", outcome.message());
        println!("{}", format_profile(&outcome.profile));
        report_refresh_error(outcome.refresh_error.as_ref());
        Ok(())
    }
}
