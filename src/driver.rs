//! Whole-build orchestration.
//!
//! The driver runs every category of a [`BuildPlan`] in plan order, merges
//! their in-memory outputs into one [`OutputSet`], and only then touches the
//! output directory:
//!
//! ```text
//! scan plan ─► generate_category × N ─► merge (duplicate policy) ─► clear ─► write files ─► write manifest
//! ```
//!
//! A failing category aborts the build before anything is cleared or
//! written. Everything is sequential, so two builds over unchanged inputs
//! produce byte-identical output.

use crate::emit::{self, DuplicateOutput, EmitError, OutputSet};
use crate::generate::{self, BuildContext, CategoryOutput, GenerateError};
use crate::manifest::Manifest;
use crate::scan::{BuildPlan, CategoryPlan};
use crate::switch::{self, SwitchError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Category {category}: {source}")]
    Generate {
        category: String,
        source: GenerateError,
    },
    #[error("Category {category}: {source}")]
    Switch {
        category: String,
        source: SwitchError,
    },
    #[error("{0}")]
    Emit(#[from] EmitError),
    #[error("Output file {name} would be overwritten by the manifest")]
    ManifestNameCollision { name: String },
    #[error("Refusing to clear {output}: it contains the source directory {source_root}")]
    UnsafeOutputDir {
        output: PathBuf,
        source_root: PathBuf,
    },
}

/// What one category contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub title: String,
    pub path: String,
    pub files: usize,
    pub rows: usize,
    pub uncovered: Vec<String>,
    /// Name of the switch function, when the category defines one.
    pub switch: Option<String>,
}

#[derive(Debug)]
pub struct BuildReport {
    pub categories: Vec<CategorySummary>,
    /// Files in the final output, manifest excluded.
    pub files: usize,
    pub mappings: usize,
    pub duplicates: Vec<DuplicateOutput>,
    /// Unnumbered directories left out of the build.
    pub skipped: Vec<String>,
    /// Where the manifest was written; `None` for a check.
    pub manifest_path: Option<PathBuf>,
}

fn summarize(category: &CategoryPlan, output: &CategoryOutput) -> CategorySummary {
    CategorySummary {
        title: output.title.clone(),
        path: output.path.clone(),
        files: output.outputs.len(),
        rows: output.rows,
        uncovered: output.uncovered.clone(),
        switch: category.config.switch.as_ref().map(|s| s.function.clone()),
    }
}

/// Run every category and merge the results. Writes nothing.
fn collect(
    ctx: &BuildContext,
    plan: &BuildPlan,
) -> Result<(OutputSet, Vec<CategorySummary>), BuildError> {
    let mut merged = OutputSet::new();
    let mut summaries = Vec::new();

    for category in &plan.categories {
        let output = generate::generate_category(ctx, category).map_err(|source| {
            BuildError::Generate {
                category: category.path.clone(),
                source,
            }
        })?;
        summaries.push(summarize(category, &output));
        merged.absorb(output.outputs, ctx.duplicate_policy(category))?;
    }

    Ok((merged, summaries))
}

/// Build into `output_dir` with the plan's configured duplicate policies.
pub fn build(plan: &BuildPlan, output_dir: &Path) -> Result<BuildReport, BuildError> {
    build_with(&BuildContext::from_plan(plan), plan, output_dir)
}

pub fn build_with(
    ctx: &BuildContext,
    plan: &BuildPlan,
    output_dir: &Path,
) -> Result<BuildReport, BuildError> {
    ensure_safe_output(&plan.root, output_dir)?;

    let (merged, categories) = collect(ctx, plan)?;
    let manifest_name = &plan.config.manifest.file_name;
    if merged.files().iter().any(|f| &f.name == manifest_name) {
        return Err(BuildError::ManifestNameCollision {
            name: manifest_name.clone(),
        });
    }

    clear_output_dir(output_dir)?;
    let (files, entries, duplicates) = merged.into_parts();
    emit::write_files(&files, output_dir)?;

    let mut manifest = Manifest::new(&plan.config.manifest.description);
    manifest.extend(entries);
    let manifest_path = output_dir.join(manifest_name);
    manifest.write(&manifest_path)?;

    info!(
        files = files.len(),
        mappings = manifest.len(),
        output = %output_dir.display(),
        "build complete"
    );

    Ok(BuildReport {
        categories,
        files: files.len(),
        mappings: manifest.len(),
        duplicates,
        skipped: plan.skipped.clone(),
        manifest_path: Some(manifest_path),
    })
}

/// Everything a build does short of writing: load every template and row
/// source, apply duplicate policies, render switch functions.
pub fn check(ctx: &BuildContext, plan: &BuildPlan) -> Result<BuildReport, BuildError> {
    let (merged, categories) = collect(ctx, plan)?;

    for category in plan.categories.iter().filter(|c| c.config.switch.is_some()) {
        switch::category_switch(category).map_err(|source| BuildError::Switch {
            category: category.path.clone(),
            source,
        })?;
    }

    Ok(BuildReport {
        categories,
        files: merged.len(),
        mappings: merged.entries().len(),
        duplicates: merged.duplicates().to_vec(),
        skipped: plan.skipped.clone(),
        manifest_path: None,
    })
}

/// Run one category and write its files into `output_dir`, leaving other
/// files in place. The caller decides what to do with the partial manifest.
pub fn run_category(
    ctx: &BuildContext,
    category: &CategoryPlan,
    output_dir: &Path,
) -> Result<CategoryOutput, BuildError> {
    ensure_safe_output(&ctx.source_root, output_dir)?;
    let output =
        generate::generate_category(ctx, category).map_err(|source| BuildError::Generate {
            category: category.path.clone(),
            source,
        })?;
    emit::write_files(output.outputs.files(), output_dir)?;
    Ok(output)
}

/// Reject output directories that are, or contain, the source root.
fn ensure_safe_output(source_root: &Path, output_dir: &Path) -> Result<(), BuildError> {
    if !output_dir.exists() {
        return Ok(());
    }
    let source = source_root.canonicalize()?;
    let output = output_dir.canonicalize()?;
    if source.starts_with(&output) {
        return Err(BuildError::UnsafeOutputDir {
            output: output_dir.to_path_buf(),
            source_root: source_root.to_path_buf(),
        });
    }
    Ok(())
}

/// Remove everything inside `dir`, creating it if missing.
fn clear_output_dir(dir: &Path) -> Result<(), BuildError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if fs::symlink_metadata(&path)?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        debug!(path = %path.display(), "removed");
    }
    Ok(())
}
