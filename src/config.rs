//! Generator configuration.
//!
//! Two kinds of file drive a build:
//!
//! - `generator.toml`: build-wide settings. It may sit at the source root and
//!   in any group directory; each level overrides its parent
//!   (stock defaults → root → group).
//! - `category.toml`: marks a directory as a category and says how its files
//!   are produced (template, row source, static files, mapping targets).
//!
//! ```text
//! generator/
//! ├── generator.toml               # root (overrides stock defaults)
//! ├── 010-Anamnesis/
//! │   ├── generator.toml           # group (overrides root)
//! │   ├── 010-Diabetes/
//! │   │   ├── category.toml
//! │   │   ├── template_Diabetes
//! │   │   └── values_Diabetes.xlsx
//! │   └── 020-History-of-Travel/
//! │       ├── category.toml        # [source] kind = "iterations"
//! │       └── historyTravelTemplate
//! └── 020-Imaging/
//!     └── ...
//! ```
//!
//! ## generator.toml
//!
//! ```toml
//! [manifest]
//! description = "..."                            # top-level "description" string
//! file_name = "ExportResourceMappingConfig.json"
//!
//! [defaults]
//! extension = "groovy"
//! select_from = "STUDY_VISIT_ITEM"
//! on_duplicate = "warn"                          # or "error"
//! ```
//!
//! ## category.toml
//!
//! ```toml
//! export_to = "Condition"
//! select_from = "LABOR_MAPPING"      # optional, overrides defaults
//! extension = "groovy"               # optional, overrides defaults
//!
//! [[static_files]]
//! file = "conditionOrganRecipient_General.groovy"
//!
//! [template]
//! file = "template_OrganTransplant"
//! file_name_root = "conditionOrganRecipient_"
//! id_field = "IdComplement"
//! fields = ["ParameterCodeOrgan", "IdComplement", "ICDCode"]
//!
//! [source]
//! kind = "spreadsheet"
//! path = "values_OrganTransplant.xlsx"
//! ```
//!
//! Unknown keys are rejected in both files to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Build-wide config file name, valid at the root and in group directories.
pub const CONFIG_FILE: &str = "generator.toml";
/// Marker file that turns a directory into a category.
pub const CATEGORY_FILE: &str = "category.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build-wide configuration loaded from `generator.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Final manifest settings (root level only).
    pub manifest: ManifestConfig,
    /// Per-category fallbacks, overridable in any group.
    pub defaults: DefaultsConfig,
}

impl GeneratorConfig {
    /// Validate config values are usable for a build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_file_name("manifest.file_name", &self.manifest.file_name)?;
        check_file_name("defaults.extension", &self.defaults.extension)?;
        if self.defaults.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "defaults.extension must not start with '.'".into(),
            ));
        }
        if self.defaults.select_from.trim().is_empty() {
            return Err(ConfigError::Validation(
                "defaults.select_from must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Fixed `description` string at the top of the manifest.
    pub description: String,
    /// Manifest file name inside the output directory.
    pub file_name: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            description: "Mapping of CXX entities to FHIR resources via generated templates"
                .to_string(),
            file_name: "ExportResourceMappingConfig.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Extension of generated files, without the dot.
    pub extension: String,
    /// `selectFromCxxEntity` for categories that don't set their own.
    pub select_from: String,
    /// What to do when two rows produce the same output file.
    pub on_duplicate: DuplicatePolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            extension: "groovy".to_string(),
            select_from: "STUDY_VISIT_ITEM".to_string(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

/// Handling of output file names produced twice in one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Log a warning; the later file replaces the earlier one.
    #[default]
    Warn,
    /// Abort the build.
    Error,
}

// =============================================================================
// category.toml
// =============================================================================

/// A category definition loaded from `category.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryConfig {
    /// `exportToFhirResource` for this category's entries.
    pub export_to: Option<String>,
    /// Overrides `defaults.select_from`.
    pub select_from: Option<String>,
    /// Overrides `defaults.extension`.
    pub extension: Option<String>,
    /// Hand-written files copied verbatim; their entries precede generated ones.
    pub static_files: Vec<StaticFileConfig>,
    pub template: Option<TemplateConfig>,
    pub source: Option<SourceConfig>,
    /// Lookup-function rendering, used by the `switch` command.
    pub switch: Option<SwitchConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticFileConfig {
    /// File name inside the category directory, copied under the same name.
    pub file: String,
    pub export_to: Option<String>,
    pub select_from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Template file inside the category directory.
    pub file: String,
    /// Prefix of every output file name.
    pub file_name_root: String,
    /// Field whose lower-cased value completes the file name.
    pub id_field: String,
    /// Fields substituted into the template, in order.
    pub fields: Vec<String>,
}

/// Where a category's rows come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum SourceConfig {
    /// An `.xlsx` workbook; the header row names the fields.
    Spreadsheet {
        path: String,
        #[serde(default)]
        sheet: Option<String>,
    },
    /// `count` rows whose only field holds the index `0..count`.
    Iterations {
        count: u32,
        #[serde(default = "default_iteration_field")]
        field: String,
    },
}

fn default_iteration_field() -> String {
    "iter".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchConfig {
    /// Name of the generated Groovy function.
    pub function: String,
    /// Name of its single `String` parameter.
    pub parameter: String,
    /// Field whose value becomes each `case` label.
    pub case_field: String,
    /// Fields returned as a `String[]` for each case.
    pub return_fields: Vec<String>,
}

impl CategoryConfig {
    /// Extension for this category's generated files.
    pub fn extension<'a>(&'a self, defaults: &'a DefaultsConfig) -> &'a str {
        self.extension.as_deref().unwrap_or(&defaults.extension)
    }

    /// `selectFromCxxEntity` for this category's entries.
    pub fn select_from<'a>(&'a self, defaults: &'a DefaultsConfig) -> &'a str {
        self.select_from.as_deref().unwrap_or(&defaults.select_from)
    }

    /// Whether building this category writes anything.
    pub fn emits_files(&self) -> bool {
        self.template.is_some() || !self.static_files.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.emits_files() && self.switch.is_none() {
            return Err(ConfigError::Validation(
                "category needs [template], [[static_files]] or [switch]".into(),
            ));
        }
        if let Some(ext) = &self.extension {
            check_file_name("extension", ext)?;
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(
                    "extension must not start with '.'".into(),
                ));
            }
        }
        for stat in &self.static_files {
            check_file_name("static_files.file", &stat.file)?;
            if stat.export_to.is_none() && self.export_to.is_none() {
                return Err(ConfigError::Validation(format!(
                    "static file {} needs export_to (or a category export_to)",
                    stat.file
                )));
            }
        }
        if let Some(template) = &self.template {
            check_file_name("template.file", &template.file)?;
            if template.file_name_root.contains(['/', '\\']) {
                return Err(ConfigError::Validation(
                    "template.file_name_root must not contain path separators".into(),
                ));
            }
            if template.id_field.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "template.id_field must not be empty".into(),
                ));
            }
            if template.fields.is_empty() {
                return Err(ConfigError::Validation(
                    "template.fields must not be empty".into(),
                ));
            }
            if self.export_to.is_none() {
                return Err(ConfigError::Validation(
                    "export_to is required with [template]".into(),
                ));
            }
            if self.source.is_none() {
                return Err(ConfigError::Validation(
                    "[template] requires a [source]".into(),
                ));
            }
        }
        if let Some(switch) = &self.switch {
            if self.source.is_none() {
                return Err(ConfigError::Validation(
                    "[switch] requires a [source]".into(),
                ));
            }
            if switch.return_fields.is_empty() {
                return Err(ConfigError::Validation(
                    "switch.return_fields must not be empty".into(),
                ));
            }
        }
        if let Some(SourceConfig::Spreadsheet { path, .. }) = &self.source
            && path.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "source.path must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn check_file_name(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    if value.contains(['/', '\\']) || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{key} must be a plain file name, got {value:?}"
        )));
    }
    Ok(())
}

// =============================================================================
// Loading and merging
// =============================================================================

/// The stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GeneratorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `generator.toml` from a directory as a raw TOML value.
///
/// `Ok(None)` when the directory has no such file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GeneratorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GeneratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the root `generator.toml` on top of stock defaults.
pub fn load_config(root: &Path) -> Result<GeneratorConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Load and validate `category.toml` from a category directory.
pub fn load_category(dir: &Path) -> Result<CategoryConfig, ConfigError> {
    let content = fs::read_to_string(dir.join(CATEGORY_FILE))?;
    let category: CategoryConfig = toml::from_str(&content)?;
    category.validate()?;
    Ok(category)
}

/// A fully-commented stock `generator.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# crf-mapgen configuration
# ========================
# All settings are optional. Values shown below are the defaults.
#
# generator.toml can be placed at the source root and in any group directory:
#   generator/generator.toml                 -> root (overrides stock defaults)
#   generator/010-Anamnesis/generator.toml   -> group (overrides root)
#
# Each level only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Final manifest (root level only)
# ---------------------------------------------------------------------------
[manifest]
# Fixed "description" string written at the top of the manifest.
description = "Mapping of CXX entities to FHIR resources via generated templates"

# Manifest file name inside the output directory.
file_name = "ExportResourceMappingConfig.json"

# ---------------------------------------------------------------------------
# Category defaults (overridable per group and per category.toml)
# ---------------------------------------------------------------------------
[defaults]
# Extension of generated files, without the dot.
extension = "groovy"

# selectFromCxxEntity for categories that don't set select_from.
select_from = "STUDY_VISIT_ITEM"

# Two rows producing the same output file name:
#   "warn"  -> log a warning, the later row replaces the earlier file
#   "error" -> abort the build
on_duplicate = "warn"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = GeneratorConfig::default();
        assert_eq!(config.manifest.file_name, "ExportResourceMappingConfig.json");
        assert_eq!(config.defaults.extension, "groovy");
        assert_eq!(config.defaults.select_from, "STUDY_VISIT_ITEM");
        assert_eq!(config.defaults.on_duplicate, DuplicatePolicy::Warn);
    }

    #[test]
    fn parse_partial_config() {
        let config: GeneratorConfig = toml::from_str(
            r#"
[defaults]
on_duplicate = "error"
"#,
        )
        .unwrap();
        assert_eq!(config.defaults.on_duplicate, DuplicatePolicy::Error);
        // Defaults preserved
        assert_eq!(config.defaults.extension, "groovy");
        assert_eq!(config.manifest.file_name, "ExportResourceMappingConfig.json");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[manifest]
description = "GECCO CRF export"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.manifest.description, "GECCO CRF export");
        assert_eq!(config.manifest.file_name, "ExportResourceMappingConfig.json");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<GeneratorConfig, _> = toml::from_str(
            r#"
[defaults]
extention = "groovy"
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_duplicate_policy_rejected() {
        let result: Result<GeneratorConfig, _> = toml::from_str(
            r#"
[defaults]
on_duplicate = "ignore"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn validate_extension_with_dot() {
        let mut config = GeneratorConfig::default();
        config.defaults.extension = ".groovy".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_manifest_name_with_separator() {
        let mut config = GeneratorConfig::default();
        config.manifest.file_name = "../out.json".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("manifest.file_name"));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[defaults]
select_from = ""
"#,
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[defaults]
extension = "groovy"
select_from = "STUDY_VISIT_ITEM"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[defaults]
select_from = "LABOR_MAPPING"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let defaults = merged.get("defaults").unwrap();
        assert_eq!(
            defaults.get("select_from").unwrap().as_str(),
            Some("LABOR_MAPPING")
        );
        assert_eq!(defaults.get("extension").unwrap().as_str(), Some("groovy"));
    }

    #[test]
    fn merge_toml_three_layers() {
        let stock = stock_defaults_value();
        let root: toml::Value = toml::from_str(
            r#"
[defaults]
extension = "txt"
"#,
        )
        .unwrap();
        let group: toml::Value = toml::from_str(
            r#"
[defaults]
select_from = "LABOR_MAPPING"
"#,
        )
        .unwrap();
        let config = resolve_config(merge_toml(stock, root), Some(group)).unwrap();
        assert_eq!(config.defaults.extension, "txt");
        assert_eq!(config.defaults.select_from, "LABOR_MAPPING");
        assert_eq!(config.defaults.on_duplicate, DuplicatePolicy::Warn);
    }

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    // =========================================================================
    // category.toml
    // =========================================================================

    const SPREADSHEET_CATEGORY: &str = r#"
export_to = "Condition"

[template]
file = "template_Diabetes"
file_name_root = "conditionDiabetes_"
id_field = "IdComplement"
fields = ["ParameterCodeDisease", "IdComplement", "ICDCode", "DiseaseName-EN", "SnomedCode"]

[source]
kind = "spreadsheet"
path = "values_Diabetes.xlsx"
"#;

    #[test]
    fn parse_spreadsheet_category() {
        let category: CategoryConfig = toml::from_str(SPREADSHEET_CATEGORY).unwrap();
        category.validate().unwrap();
        assert_eq!(category.export_to.as_deref(), Some("Condition"));
        let template = category.template.as_ref().unwrap();
        assert_eq!(template.fields.len(), 5);
        assert_eq!(
            category.source,
            Some(SourceConfig::Spreadsheet {
                path: "values_Diabetes.xlsx".into(),
                sheet: None,
            })
        );
    }

    #[test]
    fn parse_iterations_source_default_field() {
        let category: CategoryConfig = toml::from_str(
            r#"
export_to = "Observation"

[template]
file = "historyTravelTemplate"
file_name_root = "observationHistoryOfTravel_"
id_field = "iter"
fields = ["iter"]

[source]
kind = "iterations"
count = 14
"#,
        )
        .unwrap();
        category.validate().unwrap();
        assert_eq!(
            category.source,
            Some(SourceConfig::Iterations {
                count: 14,
                field: "iter".into(),
            })
        );
    }

    #[test]
    fn category_falls_back_to_defaults() {
        let defaults = DefaultsConfig::default();
        let mut category: CategoryConfig = toml::from_str(SPREADSHEET_CATEGORY).unwrap();
        assert_eq!(category.select_from(&defaults), "STUDY_VISIT_ITEM");
        assert_eq!(category.extension(&defaults), "groovy");

        category.select_from = Some("LABOR_MAPPING".into());
        assert_eq!(category.select_from(&defaults), "LABOR_MAPPING");
    }

    #[test]
    fn template_without_source_rejected() {
        let mut category: CategoryConfig = toml::from_str(SPREADSHEET_CATEGORY).unwrap();
        category.source = None;
        let err = category.validate().unwrap_err();
        assert!(err.to_string().contains("[source]"));
    }

    #[test]
    fn template_without_export_to_rejected() {
        let mut category: CategoryConfig = toml::from_str(SPREADSHEET_CATEGORY).unwrap();
        category.export_to = None;
        assert!(category.validate().is_err());
    }

    #[test]
    fn empty_fields_rejected() {
        let mut category: CategoryConfig = toml::from_str(SPREADSHEET_CATEGORY).unwrap();
        category.template.as_mut().unwrap().fields.clear();
        assert!(category.validate().is_err());
    }

    #[test]
    fn empty_category_rejected() {
        let category = CategoryConfig::default();
        assert!(matches!(
            category.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn static_only_category() {
        let category: CategoryConfig = toml::from_str(
            r#"
[[static_files]]
file = "conditionSmokingStatus.groovy"
export_to = "Observation"

[[static_files]]
file = "patient.groovy"
export_to = "Patient"
select_from = "PATIENT"
"#,
        )
        .unwrap();
        category.validate().unwrap();
        assert!(category.emits_files());
        assert_eq!(category.static_files[1].select_from.as_deref(), Some("PATIENT"));
    }

    #[test]
    fn static_file_needs_export_target() {
        let category: CategoryConfig = toml::from_str(
            r#"
[[static_files]]
file = "patient.groovy"
"#,
        )
        .unwrap();
        assert!(category.validate().is_err());
    }

    #[test]
    fn static_file_with_path_rejected() {
        let category: CategoryConfig = toml::from_str(
            r#"
export_to = "Patient"

[[static_files]]
file = "../patient.groovy"
"#,
        )
        .unwrap();
        assert!(category.validate().is_err());
    }

    #[test]
    fn category_extension_with_dot_rejected() {
        let mut category: CategoryConfig = toml::from_str(SPREADSHEET_CATEGORY).unwrap();
        category.extension = Some(".groovy".into());
        let err = category.validate().unwrap_err();
        assert!(err.to_string().contains("extension"));

        category.extension = Some("gvy".into());
        category.validate().unwrap();
    }

    #[test]
    fn switch_only_category() {
        let category: CategoryConfig = toml::from_str(
            r#"
[source]
kind = "spreadsheet"
path = "values_policy.xlsx"

[switch]
function = "mapConsentData"
parameter = "cxxConsentPart"
case_field = "Bezeichnung"
return_fields = ["Code", "Bezeichnung"]
"#,
        )
        .unwrap();
        category.validate().unwrap();
        assert!(!category.emits_files());
    }

    #[test]
    fn unknown_source_key_rejected() {
        let result: Result<CategoryConfig, _> = toml::from_str(
            r#"
[source]
kind = "spreadsheet"
path = "values.xlsx"
sheets = "Sheet1"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_category_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CATEGORY_FILE), SPREADSHEET_CATEGORY).unwrap();
        let category = load_category(tmp.path()).unwrap();
        assert_eq!(
            category.template.unwrap().file_name_root,
            "conditionDiabetes_"
        );
    }

    // =========================================================================
    // stock_config_toml
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: GeneratorConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.get("manifest").is_some());
        assert!(val.get("defaults").is_some());
    }
}
