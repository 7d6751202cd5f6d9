//! Category discovery.
//!
//! Walks the source tree and produces a [`BuildPlan`]: the categories to run,
//! in order, each with its parsed `category.toml` and the defaults that apply
//! to it after the `generator.toml` cascade.
//!
//! ## Directory Structure
//!
//! ```text
//! generator/                           # Source root
//! ├── generator.toml                   # Root config (optional)
//! ├── 000-Constant/                    # Category: only static files
//! │   ├── category.toml
//! │   └── conditionSmokingStatus.groovy
//! ├── 010-Anamnesis/                   # Group (no category.toml)
//! │   ├── generator.toml               # Group config (optional)
//! │   ├── 010-Diabetes/                # Category
//! │   │   ├── category.toml
//! │   │   ├── template_Diabetes
//! │   │   └── values_Diabetes.xlsx
//! │   └── 020-History-of-Travel/
//! │       ├── category.toml
//! │       └── historyTravelTemplate
//! └── Messprofile_old/                 # Unnumbered = skipped
//! ```
//!
//! ## Ordering
//!
//! Categories run depth-first in ascending `NNN-` order; this is also the
//! order of their entries in the manifest.
//!
//! ## Validation
//!
//! - No two sibling directories may share a number prefix
//! - A category directory may not contain numbered subdirectories
//! - Every `category.toml` and `generator.toml` must parse and validate

use crate::config::{self, CategoryConfig, ConfigError, DefaultsConfig, GeneratorConfig};
use crate::naming::parse_dir_name;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid config in {path}: {source}")]
    InvalidConfig { path: PathBuf, source: ConfigError },
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Duplicate directory number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("Category directory contains numbered subdirectories: {0}")]
    NestedCategory(PathBuf),
    #[error("Not a category directory (no category.toml): {0}")]
    NotACategory(PathBuf),
    #[error("Category {0} is outside the source directory")]
    OutsideSource(PathBuf),
}

/// Everything the driver needs for one build.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub root: PathBuf,
    /// Root configuration (stock defaults + root `generator.toml`).
    pub config: GeneratorConfig,
    pub categories: Vec<CategoryPlan>,
    /// Relative paths of unnumbered directories left out of the build.
    pub skipped: Vec<String>,
}

/// A category ready to run.
#[derive(Debug, Clone)]
pub struct CategoryPlan {
    /// Display title from the directory name (`History of Travel`).
    pub title: String,
    /// Path relative to the source root, `/`-separated.
    pub path: String,
    /// Absolute or root-joined directory; templates and sources resolve here.
    pub dir: PathBuf,
    /// Defaults after the root → group cascade.
    pub defaults: DefaultsConfig,
    pub config: CategoryConfig,
}

pub fn scan(root: &Path) -> Result<BuildPlan, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::SourceNotFound(root.to_path_buf()));
    }

    let base = config::merge_toml(
        config::stock_defaults_value(),
        config::load_raw_config(root)?.unwrap_or_else(empty_table),
    );
    let config = config::resolve_config(base.clone(), None)?;

    let mut categories = Vec::new();
    let mut skipped = Vec::new();
    scan_directory(root, root, &base, &mut categories, &mut skipped)?;

    Ok(BuildPlan {
        root: root.to_path_buf(),
        config,
        categories,
        skipped,
    })
}

/// Plan a single category directory, applying every `generator.toml`
/// between the source root and the category.
pub fn scan_category(root: &Path, dir: &Path) -> Result<CategoryPlan, ScanError> {
    let rel = dir
        .strip_prefix(root)
        .map_err(|_| ScanError::OutsideSource(dir.to_path_buf()))?;
    if !dir.join(config::CATEGORY_FILE).is_file() {
        return Err(ScanError::NotACategory(dir.to_path_buf()));
    }

    let mut layer = config::stock_defaults_value();
    let mut current = root.to_path_buf();
    if let Some(overlay) = config::load_raw_config(&current)? {
        layer = config::merge_toml(layer, overlay);
    }
    for component in rel.components() {
        current.push(component);
        let overlay = config::load_raw_config(&current).map_err(|source| {
            ScanError::InvalidConfig {
                path: current.join(config::CONFIG_FILE),
                source,
            }
        })?;
        if let Some(overlay) = overlay {
            layer = config::merge_toml(layer, overlay);
        }
    }

    let name = dir_file_name(dir);
    build_category(dir, root, &name, layer)
}

fn empty_table() -> toml::Value {
    toml::Value::Table(toml::map::Map::new())
}

fn dir_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Subdirectories of `path`, hidden ones excluded, sorted by name.
fn collect_subdirs(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !dir_file_name(p).starts_with('.'))
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Numbered subdirectories in run order; unnumbered ones go to `skipped`.
fn ordered_subdirs(
    path: &Path,
    root: &Path,
    skipped: &mut Vec<String>,
) -> Result<Vec<(PathBuf, String)>, ScanError> {
    let mut numbered: Vec<(u32, PathBuf, String)> = Vec::new();
    for dir in collect_subdirs(path)? {
        let name = dir_file_name(&dir);
        let parsed = parse_dir_name(&name);
        match parsed.order {
            Some(order) => {
                if numbered.iter().any(|(n, _, _)| *n == order) {
                    return Err(ScanError::DuplicateNumber(order, path.to_path_buf()));
                }
                numbered.push((order, dir, name));
            }
            None => skipped.push(relative_path(&dir, root)),
        }
    }
    numbered.sort_by_key(|(order, _, _)| *order);
    Ok(numbered
        .into_iter()
        .map(|(_, dir, name)| (dir, name))
        .collect())
}

fn scan_directory(
    path: &Path,
    root: &Path,
    base: &toml::Value,
    categories: &mut Vec<CategoryPlan>,
    skipped: &mut Vec<String>,
) -> Result<(), ScanError> {
    for (dir, name) in ordered_subdirs(path, root, skipped)? {
        let layer = match config::load_raw_config(&dir).map_err(|source| {
            ScanError::InvalidConfig {
                path: dir.join(config::CONFIG_FILE),
                source,
            }
        })? {
            Some(overlay) => config::merge_toml(base.clone(), overlay),
            None => base.clone(),
        };

        if dir.join(config::CATEGORY_FILE).is_file() {
            let has_numbered_children = collect_subdirs(&dir)?
                .iter()
                .any(|d| parse_dir_name(&dir_file_name(d)).is_enabled());
            if has_numbered_children {
                return Err(ScanError::NestedCategory(dir));
            }
            let plan = build_category(&dir, root, &name, layer)?;
            debug!(category = %plan.path, "found category");
            categories.push(plan);
        } else {
            scan_directory(&dir, root, &layer, categories, skipped)?;
        }
    }
    Ok(())
}

fn build_category(
    dir: &Path,
    root: &Path,
    name: &str,
    layer: toml::Value,
) -> Result<CategoryPlan, ScanError> {
    let resolved =
        config::resolve_config(layer, None).map_err(|source| ScanError::InvalidConfig {
            path: dir.join(config::CONFIG_FILE),
            source,
        })?;
    let category = config::load_category(dir).map_err(|source| ScanError::InvalidConfig {
        path: dir.join(config::CATEGORY_FILE),
        source,
    })?;

    let parsed = parse_dir_name(name);
    let title = if parsed.title.is_empty() {
        name.to_string()
    } else {
        parsed.title
    };

    Ok(CategoryPlan {
        title,
        path: relative_path(dir, root),
        dir: dir.to_path_buf(),
        defaults: resolved.defaults,
        config: category,
    })
}
