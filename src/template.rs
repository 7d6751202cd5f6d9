//! Placeholder substitution.
//!
//! Templates are plain text with `##FIELD##` markers. Substitution is literal
//! string replacement driven by a fixed field list per category: there is no
//! escaping, no conditionals, and markers whose name is not in the list are
//! left exactly as written.
//!
//! ```text
//! template:  Hello ##Name##, code ##Code##
//! record:    { Name: "Flu", Code: "J10" }
//! fields:    [Name, Code]
//! result:    Hello Flu, code J10
//! ```

use crate::types::Record;
use std::fs;
use std::path::{Path, PathBuf};

const MARKER: &str = "##";

/// A template loaded from disk. Read once per category, never modified.
#[derive(Debug, Clone)]
pub struct Template {
    pub path: PathBuf,
    pub text: String,
}

impl Template {
    pub fn load(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            text: fs::read_to_string(path)?,
        })
    }

    pub fn render(&self, record: &Record, fields: &[String]) -> String {
        substitute(&self.text, record, fields)
    }
}

/// The `##name##` marker for a field.
pub fn placeholder(field: &str) -> String {
    format!("{MARKER}{field}{MARKER}")
}

/// Replace every `##field##` for each field in `fields` with the record's value.
///
/// Absent fields become the empty string.
pub fn substitute(template: &str, record: &Record, fields: &[String]) -> String {
    let mut out = template.to_string();
    for field in fields {
        let marker = placeholder(field);
        if out.contains(&marker) {
            out = out.replace(&marker, record.get(field));
        }
    }
    out
}

/// Distinct placeholder names in order of first appearance.
///
/// A name is the text between two `##` markers on the same line with no
/// whitespace in it, which keeps Groovy comments like `## note ##` out.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for line in template.lines() {
        let mut rest = line;
        while let Some(start) = rest.find(MARKER) {
            let after = &rest[start + MARKER.len()..];
            let Some(end) = after.find(MARKER) else {
                break;
            };
            let name = &after[..end];
            if !name.is_empty() && !name.chars().any(char::is_whitespace) {
                if !found.iter().any(|f| f == name) {
                    found.push(name.to_string());
                }
                rest = &after[end + MARKER.len()..];
            } else {
                // Not a name; the closing marker may open the next one.
                rest = after;
            }
        }
    }
    found
}

/// Placeholders present in the template but absent from the field list.
pub fn uncovered_placeholders(template: &str, fields: &[String]) -> Vec<String> {
    placeholders(template)
        .into_iter()
        .filter(|p| !fields.contains(p))
        .collect()
}
