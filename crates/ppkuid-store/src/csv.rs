//! Minimal RFC-4180 dialect for the mapping table.
//!
//! Paths can contain commas, quotes, and in pathological cases newlines, so
//! both the writer and the scanner speak full quoting rather than naive
//! line splitting.

use ppkuid_types::ids::MAPPING_HEADER;
use ppkuid_types::MappingRecord;

/// Render the full mapping table, header first, rows in the given order.
pub fn render_mapping(records: &[MappingRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, &MAPPING_HEADER);
    for record in records {
        push_row(
            &mut out,
            &[
                record.source_path.as_str(),
                record.dest_path.as_str(),
                record.assigned_id.as_str(),
                record.status.as_str(),
            ],
        );
    }
    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse a mapping table back into rows of fields. Tolerates CRLF line
/// endings and quoted fields spanning newlines. The header row is included;
/// callers skip it.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                other => field.push(other),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            other => field.push(other),
        }
    }
    // Final row without a trailing newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

/// Scan a rendered mapping table for the row claiming `uid` and return its
/// `dest_path` column.
pub fn find_dest_for_uid(text: &str, uid: &str) -> Option<String> {
    parse_rows(text)
        .into_iter()
        .skip(1)
        .find(|row| row.len() >= 4 && row[2] == uid)
        .map(|mut row| row.swap_remove(1))
}
