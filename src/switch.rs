//! Groovy `switch` lookup functions rendered from a row source.
//!
//! A category with a `[switch]` table maps each row's `case_field` value to
//! an array of `return_fields` values:
//!
//! ```groovy
//! static String[] mapConsentData(final String cxxConsentPart){
//!   switch(cxxConsentPart) {
//!         case ("PATDAT_erheben_speichern_nutzen"):
//!       return ["2.16.840.1.113883.3.1937.777.24.5.3.1", "PATDAT_erheben_speichern_nutzen"]
//!    }
//! }
//! ```
//!
//! The function is printed for pasting into a hand-written template; it is not
//! part of a build.

use crate::config::SwitchConfig;
use crate::records::{self, RecordsError};
use crate::scan::CategoryPlan;
use crate::types::Record;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("Category {0} has no [switch] table")]
    NotConfigured(String),
    #[error("Category {0} has no [source] for its switch")]
    NoSource(String),
    #[error("Records error: {0}")]
    Records(#[from] RecordsError),
}

pub fn render_switch<'a>(
    config: &SwitchConfig,
    records: impl IntoIterator<Item = &'a Record>,
) -> String {
    let mut out = format!(
        "static String[] {}(final String {}){{\n  switch({}) {{",
        config.function, config.parameter, config.parameter
    );
    for record in records {
        let values: Vec<String> = config
            .return_fields
            .iter()
            .map(|field| format!("\"{}\"", record.get(field)))
            .collect();
        out.push_str(&format!(
            "\n        case (\"{}\"):\n      return [{}]",
            record.get(&config.case_field),
            values.join(", ")
        ));
    }
    out.push_str("\n   }\n}");
    out
}

/// Load a category's rows and render its switch function.
pub fn category_switch(category: &CategoryPlan) -> Result<String, SwitchError> {
    let config = category
        .config
        .switch
        .as_ref()
        .ok_or_else(|| SwitchError::NotConfigured(category.path.clone()))?;
    let source = category
        .config
        .source
        .as_ref()
        .ok_or_else(|| SwitchError::NoSource(category.path.clone()))?;

    let rows = records::load_rows(source, &category.dir)?;
    rows.require_columns(
        std::iter::once(config.case_field.as_str())
            .chain(config.return_fields.iter().map(String::as_str)),
    )?;
    Ok(render_switch(config, rows.records()))
}
