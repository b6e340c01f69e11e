//! Low-level CSV line handling shared by the importers.
//!
//! Broker exports are not RFC 4180 clean: values are sometimes wrapped in
//! single quotes, sometimes in double quotes, and occasionally in both. The
//! helpers here cover exactly what the supported dialects need.

const QUOTES: [char; 2] = ['"', '\''];
const BOM: char = '\u{feff}';

/// Split a data line on commas.
///
/// A `"` anywhere opens a quoted section and the next `"` closes it. A `'`
/// opens one only at the start of a field, so apostrophes inside names stay
/// literal; the next `'` closes it. Commas inside a quoted section are
/// literal. Quote characters are kept in the output, use [`strip_quotes`] on
/// the values.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut open_quote: Option<char> = None;

    for c in line.chars() {
        match open_quote {
            Some(q) => {
                if c == q {
                    open_quote = None;
                }
                field.push(c);
            }
            None if c == ',' => {
                fields.push(std::mem::take(&mut field));
            }
            None => {
                if c == '"' || (c == '\'' && field.trim().is_empty()) {
                    open_quote = Some(c);
                }
                field.push(c);
            }
        }
    }

    fields.push(field);
    fields
}

/// Remove leading and trailing quote characters until none are left.
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| QUOTES.contains(&c))
}

/// Split a header line into quote-stripped column names.
pub fn split_header(line: &str) -> Vec<String> {
    line.split(',')
        .map(|name| strip_quotes(name.trim()).to_string())
        .collect()
}

/// Iterate the non-blank lines of a file as `(line_number, line)`.
///
/// Line numbers are 1-based and count blank lines. A leading byte order mark
/// is dropped.
pub fn non_blank_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .strip_prefix(BOM)
        .unwrap_or(content)
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
}
