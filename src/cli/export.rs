use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use reqtract::interface::{DEFAULT_FILE_NAME, write_csv};
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Export {
    /// Write to this file instead of standard output
    ///
    /// If this is a directory, the export is written to 'requirements.csv'
    /// inside it.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Export {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.open()?;
        let records = session.collection();

        let Some(output) = self.output else {
            write_csv(std::io::stdout().lock(), records)?;
            return Ok(());
        };

        let path = if output.is_dir() {
            output.join(DEFAULT_FILE_NAME)
        } else {
            output
        };

        let file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        write_csv(BufWriter::new(file), records)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Exported {} requirements to {}", records.len(), path.display());

        eprintln!(
            "{}",
            format!("Exported {} requirement(s) to {}", records.len(), path.display()).success()
        );
        Ok(())
    }
}
