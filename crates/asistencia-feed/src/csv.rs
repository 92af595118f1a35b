//! Line-oriented CSV reader for the spreadsheet export.
//!
//! The export is one record per line with a header row first. Fields may be
//! double-quoted to carry commas; a doubled quote inside a quoted field is a
//! literal quote. Blank lines are skipped.

use std::collections::HashMap;

/// One data row keyed by (trimmed) header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRow {
    fields: HashMap<String, String>,
}

impl FeedRow {
    /// The trimmed value of `column`, or `None` when absent or blank.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Splits one CSV line into trimmed field values.
#[must_use]
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parses a whole document into header-keyed rows.
///
/// Returns an empty list when there is no data row after the header. Rows
/// shorter than the header leave the trailing columns absent; extra trailing
/// fields are ignored.
#[must_use]
pub fn parse_document(text: &str) -> Vec<FeedRow> {
    let mut lines = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = parse_line(header_line.trim_start_matches('\u{feff}'))
        .into_iter()
        .map(|h| h.to_lowercase())
        .collect();

    lines
        .map(|line| {
            let values = parse_line(line);
            let fields = headers
                .iter()
                .zip(values)
                .map(|(h, v)| (h.clone(), v))
                .collect();
            FeedRow { fields }
        })
        .collect()
}
