use std::{
    borrow::Cow,
    io::{self, Write},
};

use crate::Requirement;

/// The header row of an export.
pub const HEADER: [&str; 4] = ["ID", "Requirement", "Category", "Source"];

/// The file name exports are offered under.
pub const DEFAULT_FILE_NAME: &str = "requirements.csv";

const LINE_ENDING: &str = "\r\n";

/// Write requirements as CSV: a header row, then one row per requirement in
/// the given order.
///
/// A field is quoted when it contains a comma, a double quote, whitespace or
/// a line break; embedded double quotes are doubled.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<'a, W, I>(mut writer: W, records: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Requirement>,
{
    for row in rows(records) {
        writer.write_all(row.as_bytes())?;
    }
    writer.flush()
}

/// Render requirements as a CSV string.
#[must_use]
pub fn to_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Requirement>,
{
    rows(records).collect()
}

/// The header row followed by one row per requirement, each with its line
/// ending.
fn rows<'a, I>(records: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = &'a Requirement>,
{
    std::iter::once(render_row(HEADER)).chain(records.into_iter().map(|record| {
        render_row([
            record.id.as_str(),
            record.text.as_str(),
            record.category.as_str(),
            record.source.as_str(),
        ])
    }))
}

fn render_row(fields: [&str; 4]) -> String {
    let mut line = fields.map(escape).join(",");
    line.push_str(LINE_ENDING);
    line
}

fn escape(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"']) || value.contains(char::is_whitespace) {
        let escaped = value.replace('"', "\"\"");
        Cow::Owned(format!("\"{escaped}\""))
    } else {
        Cow::Borrowed(value)
    }
}
