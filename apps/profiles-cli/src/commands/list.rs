use anyhow::Result;
use profiles::ProfileWorkflow;

use super::format_profile;

pub async fn run(workflow: &ProfileWorkflow) -> Result<()> {
    workflow.refresh().await?;

    let profiles = workflow.profiles();
    if profiles.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }
    for profile in &profiles {
        println!("{}", format_profile(profile));
    }
    Ok(())
}
