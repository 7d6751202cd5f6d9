//! The export mapping manifest.
//!
//! Every generated (or copied) file gets one [`ManifestEntry`] telling the
//! export pipeline which CXX entity to read, which template to apply and which
//! FHIR resource comes out. Entries keep the order in which categories and
//! rows were processed; consumers replay mappings in file order.
//!
//! The manifest is assembled as a list of entries and serialized once, so the
//! written document is always well-formed JSON:
//!
//! ```json
//! {
//!   "description": "...",
//!   "mappings": [
//!     {
//!       "selectFromCxxEntity": "STUDY_VISIT_ITEM",
//!       "transformByTemplate": "conditionDiabetes_e10",
//!       "exportToFhirResource": "Condition"
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One mapping: source entity, template name, target resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub select_from_cxx_entity: String,
    /// Base name of the generated file (no extension).
    pub transform_by_template: String,
    pub export_to_fhir_resource: String,
}

impl ManifestEntry {
    pub fn new(
        select_from: impl Into<String>,
        template: impl Into<String>,
        export_to: impl Into<String>,
    ) -> Self {
        Self {
            select_from_cxx_entity: select_from.into(),
            transform_by_template: template.into(),
            export_to_fhir_resource: export_to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub description: String,
    pub mappings: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            mappings: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.mappings.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = ManifestEntry>) {
        self.mappings.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)
    }

    pub fn read(path: &Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
