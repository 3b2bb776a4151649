use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use profiles::{HttpProfilesClient, ProfileWorkflow, WorkflowError};
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod config;

/// Profiles - manage profile records on a REST backend
#[derive(Parser)]
#[command(name = "profiles")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API root, e.g. `http://localhost:3001/api` (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all profiles
    List,
    /// Create a profile
    Create(commands::create::CreateArgs),
    /// Edit an existing profile
    Update(commands::update::UpdateArgs),
    /// Delete a profile
    Delete(commands::delete::DeleteArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref(), cli.base_url.as_deref())?;

    if cli.print_config {
        println!(
            "{}",
            serde_json::to_string_pretty(&config).context("serializing configuration")?
        );
        return Ok(());
    }

    let client = HttpProfilesClient::from_config(&config)?;
    tracing::debug!(base_url = %client.base_url(), "Profiles client ready");
    let workflow = ProfileWorkflow::new(Arc::new(client));

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => commands::list::run(&workflow).await,
        Commands::Create(args) => args.run(&workflow).await,
        Commands::Update(args) => args.run(&workflow).await,
        Commands::Delete(args) => args.run(&workflow).await,
    }
}

/// `RUST_LOG` wins; otherwise `-v` picks the level. Logs go to stderr.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn render_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<WorkflowError>() {
        Some(WorkflowError::Validation(e)) => format!("Validation Error: {e}"),
        _ => format!("Error: {err:#}"),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use profiles::{ProfileForm, ProfilesError, validate_form};

    #[test]
    fn test_cli_parses_commands() {
        let cli = Cli::try_parse_from([
            "profiles",
            "-vv",
            "--base-url",
            "http://127.0.0.1:3001/api",
            "create",
            "--first-name",
            "Ann",
            "--last-name",
            "Lee",
            "--age",
            "30",
            "--interests",
            "reading, chess",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:3001/api"));
        assert!(matches!(cli.command, Some(Commands::Create(_))));
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(Cli::try_parse_from(["profiles", "delete"]).is_err());
        let cli = Cli::try_parse_from(["profiles", "delete", "64f1", "--yes"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete(_))));
    }

    #[test]
    fn test_render_validation_error() {
        let err = validate_form(&ProfileForm::default()).unwrap_err();
        let err = anyhow::Error::from(WorkflowError::from(err));
        assert_eq!(render_error(&err), "Validation Error: First name is required");
    }

    #[test]
    fn test_render_client_error() {
        let err = anyhow::Error::from(WorkflowError::from(ProfilesError::transport(
            "Profile not found",
        )));
        assert_eq!(render_error(&err), "Error: Profile not found");
    }
}
