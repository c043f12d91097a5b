use std::{collections::HashMap, io::Read, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use reqtract::EditSubmission;
use serde_json::Value;
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Save {
    /// A JSON file holding the edit form, or '-' to read standard input
    form: PathBuf,
}

impl Save {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: &mut Workspace) -> anyhow::Result<()> {
        let content = if self.form.as_os_str() == "-" {
            let mut content = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            content
        } else {
            std::fs::read_to_string(&self.form)
                .with_context(|| format!("failed to read {}", self.form.display()))?
        };

        let fields = parse_form(&content)?;
        let submission = EditSubmission::from_form(&fields)?;
        let count = submission.row_count;

        let mut session = workspace.open()?;
        session.apply(submission);
        workspace.save(&session)?;

        println!(
            "{}",
            format!("Saved {count} requirement(s) to session '{}'", workspace.key()).success()
        );
        Ok(())
    }
}

/// Flatten a JSON object into form fields.
///
/// Strings are taken as-is, numbers and booleans by their JSON text, and
/// `null` fields are treated as absent.
fn parse_form(content: &str) -> anyhow::Result<HashMap<String, String>> {
    let object: serde_json::Map<String, Value> =
        serde_json::from_str(content).context("edit form must be a JSON object")?;

    let mut fields = HashMap::with_capacity(object.len());
    for (name, value) in object {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                anyhow::bail!("form field '{name}' must be a string")
            }
        };
        fields.insert(name, value);
    }

    Ok(fields)
}
