use std::{io::Read, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use reqtract::Upload;
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Extract {
    /// The document to extract from, or '-' to read standard input
    file: PathBuf,

    /// The label recorded as each requirement's source document
    ///
    /// Defaults to the file name, or '(uploaded)' for standard input.
    #[arg(short, long)]
    label: Option<String>,
}

impl Extract {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: &mut Workspace) -> anyhow::Result<()> {
        let upload = self.read()?;

        let pipeline = workspace.pipeline();
        tracing::debug!("Segmenting with the {} segmenter", pipeline.segmenter().name());

        let mut session = workspace.open()?;
        let count = session.extract(&pipeline, &upload.text, &upload.label);
        workspace.save(&session)?;

        if count == 0 {
            println!(
                "{}",
                format!("No requirements found in {}", upload.label).warning()
            );
        } else {
            println!(
                "{}",
                format!("Extracted {count} requirement(s) from {}", upload.label).success()
            );
        }

        Ok(())
    }

    fn read(&self) -> anyhow::Result<Upload> {
        let mut upload = if self.file.as_os_str() == "-" {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("failed to read standard input")?;
            Upload::from_bytes(&bytes, None)
        } else {
            Upload::read(&self.file)
                .with_context(|| format!("failed to read {}", self.file.display()))?
        };

        if let Some(label) = &self.label {
            label.clone_into(&mut upload.label);
        }

        Ok(upload)
    }
}
