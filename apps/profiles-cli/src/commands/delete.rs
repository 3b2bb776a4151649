use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;
use profiles::{ConfirmDelete, DELETE_PROMPT, DeleteOutcome, ProfileId, ProfileWorkflow};

use super::report_refresh_error;

#[derive(Args)]
pub struct DeleteArgs {
    /// Profile id
    id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// Asks on stderr, reads the answer from stdin. Anything but y/yes is a no.
struct StdinConfirm;

impl ConfirmDelete for StdinConfirm {
    fn confirm(&self, _id: &ProfileId) -> bool {
        ask(io::stdin().lock())
    }
}

/// Prompts and waits for one line of `input`.
///
/// The read blocks, so it runs under `block_in_place` and needs the
/// multi-threaded runtime.
fn ask(mut input: impl BufRead) -> bool {
    tokio::task::block_in_place(move || {
        eprint!("{DELETE_PROMPT} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if input.read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    })
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn always(_: &ProfileId) -> bool {
    true
}

impl DeleteArgs {
    pub async fn run(self, workflow: &ProfileWorkflow) -> Result<()> {
        let id = ProfileId::new(self.id);
        let confirm: &dyn ConfirmDelete = if self.yes { &always } else { &StdinConfirm };

        let outcome = workflow.delete(&id, confirm).await?;
        match &outcome {
            DeleteOutcome::Deleted { refresh_error } => {
                println!("{}", outcome.message().unwrap_or_default());
                report_refresh_error(refresh_error.as_ref());
            }
            DeleteOutcome::Declined => println!("Cancelled"),
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        for yes in ["y", "Y", "yes", " YES\n"] {
            assert!(is_yes(yes), "{yes:?}");
        }
        for no in ["", "\n", "n", "no", "yep"] {
            assert!(!is_yes(no), "{no:?}");
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_ask_reads_one_answer_on_runtime() {
        assert!(ask(io::Cursor::new("yes\nno\n")));
        assert!(!ask(io::Cursor::new("n\n")));
        assert!(!ask(io::empty()));
    }
}
