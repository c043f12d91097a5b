use std::{collections::BTreeMap, io::Write};

use clap::{Parser, ValueEnum};
use reqtract::{EditSubmission, Requirement, Session};
use tracing::instrument;

use super::{
    Workspace,
    terminal::{self, Colorize},
};

/// Table width used when the terminal width is unknown.
const DEFAULT_WIDTH: usize = 100;

/// Narrowest the requirement text column is allowed to get.
const MIN_TEXT_WIDTH: usize = 20;

/// Command arguments for `reqx list`.
#[derive(Debug, Default, Parser)]
pub struct List {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    /// An edit form that `reqx save` accepts
    Form,
}

impl List {
    #[instrument(skip(workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.open()?;
        let records = session.collection().read();

        match self.output {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(std::io::stdout().lock(), records)?;
                println!();
            }
            OutputFormat::Form => {
                serde_json::to_writer_pretty(std::io::stdout().lock(), &edit_form(records))?;
                println!();
            }
            OutputFormat::Table if self.quiet => print_quiet(records)?,
            OutputFormat::Table => print_table(&session, records),
        }

        Ok(())
    }
}

/// The edit form reproducing `records`, with its fields in a stable order.
fn edit_form(records: &[Requirement]) -> BTreeMap<String, String> {
    EditSubmission::from_records(records)
        .to_form()
        .into_iter()
        .collect()
}

/// One tab-separated line per requirement, no header.
fn print_quiet(records: &[Requirement]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for record in records {
        writeln!(
            stdout,
            "{}\t{}\t{}\t{}",
            record.id, record.category, record.source, record.text
        )?;
    }
    Ok(())
}

fn print_table(session: &Session, records: &[Requirement]) {
    if records.is_empty() {
        println!("{}", "No requirements extracted yet".dim());
        return;
    }

    if let Some(document) = session.document() {
        println!("{} {document}", "Document:".dim());
    }
    if let Some(updated) = session.updated() {
        println!("{} {}", "Updated:".dim(), updated.format("%Y-%m-%d %H:%M UTC"));
    }

    if terminal::is_narrow() {
        for record in records {
            println!(
                "{} {}",
                record.id.info(),
                record.category.as_str().category(&record.category)
            );
            println!("  {}", record.text);
            println!("  {}", record.source.dim());
        }
        return;
    }

    let id_width = column_width("ID", records.iter().map(|r| r.id.as_str()));
    let category_width = column_width("Category", records.iter().map(|r| r.category.as_str()));
    let source_width = column_width("Source", records.iter().map(|r| r.source.as_str()));

    let total = terminal::terminal_width().map_or(DEFAULT_WIDTH, usize::from);
    let text_width = total
        .saturating_sub(id_width + category_width + source_width + 6)
        .max(MIN_TEXT_WIDTH);

    let header = format!(
        "{:id_width$}  {:category_width$}  {:text_width$}  {}",
        "ID", "Category", "Requirement", "Source"
    );
    println!("{}", header.dim());

    for record in records {
        // Pad before colouring so escape codes don't count towards the width
        let id = format!("{:id_width$}", record.id);
        let category = format!("{:category_width$}", record.category.as_str());
        let text = format!("{:text_width$}", terminal::truncate(&record.text, text_width));
        println!(
            "{}  {}  {}  {}",
            id.info(),
            category.category(&record.category),
            text,
            record.source.dim()
        );
    }

    println!(
        "\n{}",
        format!("{} requirement(s)", records.len()).dim()
    );
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|value| value.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use reqtract::Category;

    use super::*;

    #[test]
    fn edit_form_covers_every_row() {
        let records = [Requirement {
            id: "FR1".to_string(),
            text: "It must run.".to_string(),
            category: Category::Functional.into(),
            source: "a.txt | sentence 1".to_string(),
        }];

        let form = edit_form(&records);

        assert_eq!(form.get("row-count").map(String::as_str), Some("1"));
        assert_eq!(form.get("category-0").map(String::as_str), Some("Functional"));
        assert_eq!(form.len(), 5);

        let rebuilt = EditSubmission::from_form(&form.into_iter().collect())
            .unwrap()
            .into_records();
        assert_eq!(rebuilt, records);
    }

    #[test]
    fn column_width_covers_header_and_values() {
        assert_eq!(column_width("ID", ["FR1", "FR10"].into_iter()), 4);
        assert_eq!(column_width("Category", ["x"].into_iter()), 8);
        assert_eq!(column_width("ID", std::iter::empty()), 2);
    }
}
