use clap::Parser;
use dialoguer::{Confirm, Input, Select};
use reqtract::{Category, CategoryLabel, EditSubmission, Requirement};
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

/// Walk every requirement in the session, then replace the collection with
/// the edited set.
#[derive(Debug, Parser)]
pub struct Edit {
    /// Offer to append new rows after the existing ones
    #[arg(long)]
    add: bool,
}

impl Edit {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: &mut Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;
        let existing = session.collection().read().to_vec();

        if existing.is_empty() && !self.add {
            println!("{}", "No requirements to edit".dim());
            return Ok(());
        }

        let total = existing.len();
        let mut edited = Vec::with_capacity(total);
        for (index, record) in existing.into_iter().enumerate() {
            println!("\n{}", format!("Requirement {} of {total}", index + 1).info());
            let record = edit_row(record)?;

            if Confirm::new()
                .with_prompt("Keep this requirement?")
                .default(true)
                .interact()?
            {
                edited.push(record);
            }
        }

        while self.add
            && Confirm::new()
                .with_prompt("Add a requirement?")
                .default(false)
                .interact()?
        {
            edited.push(edit_row(blank_row())?);
        }

        let submission = EditSubmission::from_records(&edited);

        if !Confirm::new()
            .with_prompt(format!("Replace the collection with {} requirement(s)?", edited.len()))
            .default(true)
            .interact()?
        {
            println!("Cancelled");
            return Ok(());
        }

        session.apply(submission);
        workspace.save(&session)?;

        println!(
            "{}",
            format!("Saved {} requirement(s)", session.collection().len()).success()
        );
        Ok(())
    }
}

fn blank_row() -> Requirement {
    Requirement {
        id: String::new(),
        text: String::new(),
        category: Category::Functional.into(),
        source: String::new(),
    }
}

fn edit_row(record: Requirement) -> anyhow::Result<Requirement> {
    let id = prompt("ID", record.id)?;
    let text = prompt("Requirement", record.text)?;
    let category = select_category(record.category)?;
    let source = prompt("Source", record.source)?;

    Ok(Requirement {
        id,
        text,
        category,
        source,
    })
}

fn prompt(label: &str, initial: String) -> anyhow::Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

/// Choose a category. A label that isn't one of the known categories is
/// offered as an extra choice so it can be kept.
fn select_category(current: CategoryLabel) -> anyhow::Result<CategoryLabel> {
    let mut choices: Vec<CategoryLabel> = Category::ALL.into_iter().map(Into::into).collect();
    let selected = choices
        .iter()
        .position(|choice| *choice == current)
        .unwrap_or_else(|| {
            choices.push(current);
            choices.len() - 1
        });

    let names: Vec<&str> = choices.iter().map(CategoryLabel::as_str).collect();
    let index = Select::new()
        .with_prompt("Category")
        .items(names.as_slice())
        .default(selected)
        .interact()?;

    Ok(choices.swap_remove(index))
}
