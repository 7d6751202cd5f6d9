//! Per-category generation.
//!
//! Turns one [`CategoryPlan`] into files and manifest entries held in memory.
//! Nothing is written here; the driver merges every category's
//! [`CategoryOutput`] and writes once.
//!
//! For each category:
//!
//! 1. Static files are read verbatim, each with its own entry. They come
//!    first, so a hand-written "general" mapping precedes the rows that
//!    specialize it.
//! 2. With a `[template]`, each row of the source is substituted into the
//!    template and named `<file_name_root><lowercase id>.<ext>`.

use crate::config::DuplicatePolicy;
use crate::emit::{self, EmitError, OutputSet};
use crate::manifest::ManifestEntry;
use crate::records::{self, RecordsError};
use crate::scan::{BuildPlan, CategoryPlan};
use crate::template::{self, Template};
use crate::types::{FileOrigin, GeneratedFile};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Records error: {0}")]
    Records(#[from] RecordsError),
    #[error("{0}")]
    Emit(#[from] EmitError),
    #[error("Empty identifier field {field:?} in {category} row {row}")]
    EmptyIdentifier {
        category: String,
        field: String,
        row: usize,
    },
    #[error("Identifier {id:?} in {category} row {row} does not make a plain file name")]
    InvalidIdentifier {
        category: String,
        row: usize,
        id: String,
    },
}

/// Read-only inputs shared by every category step of a build.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub source_root: PathBuf,
    /// Treat duplicate output names as errors regardless of config.
    pub strict: bool,
}

impl BuildContext {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            strict: false,
        }
    }

    pub fn from_plan(plan: &BuildPlan) -> Self {
        Self::new(&plan.root)
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Effective duplicate handling for a category.
    pub fn duplicate_policy(&self, category: &CategoryPlan) -> DuplicatePolicy {
        if self.strict {
            DuplicatePolicy::Error
        } else {
            category.defaults.on_duplicate
        }
    }

    /// `path` relative to the source root, for messages.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.source_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Everything one category produced.
#[derive(Debug)]
pub struct CategoryOutput {
    pub title: String,
    /// Category path relative to the source root.
    pub path: String,
    pub outputs: OutputSet,
    /// Rows read from the category's source (0 without a template).
    pub rows: usize,
    /// Template placeholders not covered by the field list.
    pub uncovered: Vec<String>,
}

impl CategoryOutput {
    /// The category's partial manifest.
    pub fn entries(&self) -> &[ManifestEntry] {
        self.outputs.entries()
    }
}

fn read_text(ctx: &BuildContext, path: &Path) -> Result<String, GenerateError> {
    fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: PathBuf::from(ctx.display_path(path)),
        source,
    })
}

pub fn generate_category(
    ctx: &BuildContext,
    category: &CategoryPlan,
) -> Result<CategoryOutput, GenerateError> {
    let config = &category.config;
    let policy = ctx.duplicate_policy(category);
    let select_from = config.select_from(&category.defaults);
    let export_to = config.export_to.as_deref().unwrap_or_default();

    let mut outputs = OutputSet::new();

    for stat in &config.static_files {
        let content = read_text(ctx, &category.dir.join(&stat.file))?;
        let file = GeneratedFile {
            name: stat.file.clone(),
            content,
            origin: FileOrigin::Static {
                category: category.path.clone(),
                file: stat.file.clone(),
            },
        };
        let entry = ManifestEntry::new(
            stat.select_from.as_deref().unwrap_or(select_from),
            file.stem(),
            stat.export_to.as_deref().unwrap_or(export_to),
        );
        outputs.insert(file, entry, policy)?;
    }

    let mut rows = 0;
    let mut uncovered = Vec::new();

    if let (Some(tpl_config), Some(source)) = (&config.template, &config.source) {
        let template_path = category.dir.join(&tpl_config.file);
        let template = Template::load(&template_path).map_err(|source| GenerateError::Read {
            path: PathBuf::from(ctx.display_path(&template_path)),
            source,
        })?;

        uncovered = template::uncovered_placeholders(&template.text, &tpl_config.fields);
        if !uncovered.is_empty() {
            warn!(
                category = %category.path,
                placeholders = ?uncovered,
                "template placeholders not in the field list are left as-is"
            );
        }

        let row_set = records::load_rows(source, &category.dir)?;
        row_set.require_columns(
            tpl_config
                .fields
                .iter()
                .chain(std::iter::once(&tpl_config.id_field))
                .map(String::as_str),
        )?;
        rows = row_set.len();

        let extension = config.extension(&category.defaults);
        for row in &row_set.rows {
            let id = row.record.get(&tpl_config.id_field);
            if id.is_empty() {
                return Err(GenerateError::EmptyIdentifier {
                    category: category.path.clone(),
                    field: tpl_config.id_field.clone(),
                    row: row.number,
                });
            }
            let name = emit::output_file_name(&tpl_config.file_name_root, id, extension);
            if !emit::is_plain_file_name(&name) {
                return Err(GenerateError::InvalidIdentifier {
                    category: category.path.clone(),
                    row: row.number,
                    id: id.to_string(),
                });
            }
            let file = GeneratedFile {
                name,
                content: template.render(&row.record, &tpl_config.fields),
                origin: FileOrigin::Row {
                    category: category.path.clone(),
                    row: row.number,
                },
            };
            let entry = ManifestEntry::new(select_from, file.stem(), export_to);
            outputs.insert(file, entry, policy)?;
        }
    }

    debug!(
        category = %category.path,
        files = outputs.len(),
        rows,
        "generated category"
    );

    Ok(CategoryOutput {
        title: category.title.clone(),
        path: category.path.clone(),
        outputs,
        rows,
        uncovered,
    })
}
