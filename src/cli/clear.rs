use clap::Parser;
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Clear {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,

    /// Delete the session file instead of saving an empty session
    #[arg(long)]
    forget: bool,
}

impl Clear {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: &mut Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let count = session.collection().len();

        if count > 0 && !self.yes {
            let proceed = dialoguer::Confirm::new()
                .with_prompt(format!(
                    "Discard {count} requirement(s) in session '{}'?",
                    workspace.key()
                ))
                .default(false)
                .interact()?;
            if !proceed {
                println!("Cancelled");
                return Ok(());
            }
        }

        if self.forget {
            workspace.remove()?;
        } else {
            session.clear();
            workspace.save(&session)?;
        }
        tracing::info!(session = %workspace.key(), forget = self.forget, "cleared session");

        println!(
            "{}",
            format!("Cleared session '{}'", workspace.key()).success()
        );
        Ok(())
    }
}
