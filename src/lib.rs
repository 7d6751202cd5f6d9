//! # crf-mapgen
//!
//! Generates the per-item Groovy mapping templates of a CRF export and the
//! JSON manifest that tells the export pipeline which CXX entity feeds which
//! template and which FHIR resource comes out.
//!
//! The source tree is the data source: numbered directories are run in order,
//! a directory holding `category.toml` is one clinical-data category, and each
//! row of the category's spreadsheet becomes one generated file.
//!
//! # Architecture: Plan, Generate, Write
//!
//! ```text
//! 1. Scan      generator/  →  BuildPlan          (directories + cascaded config)
//! 2. Generate  each category → CategoryOutput    (files + entries, in memory)
//! 3. Write     merged outputs → crf/             (files, then the manifest)
//! ```
//!
//! Categories never write to the output directory themselves. Each returns its
//! files and its partial manifest, the [`driver`] merges them in plan order and
//! writes once. A failing category therefore leaves the previous build intact,
//! and the manifest is serialized from a list of entries rather than
//! concatenated text, so it is always valid JSON.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the source tree, resolves config cascades, produces the [`scan::BuildPlan`] |
//! | [`generate`] | Runs one category in memory: static files + template rows |
//! | [`driver`] | Whole build: clear output, merge categories, write files and manifest |
//! | [`records`] | Row sources: `.xlsx` worksheets and numbered iterations |
//! | [`template`] | `##FIELD##` placeholder substitution |
//! | [`emit`] | Output file naming, duplicate handling, writing |
//! | [`manifest`] | The `ExportResourceMappingConfig.json` document |
//! | [`switch`] | Groovy `switch` lookup functions rendered from rows |
//! | [`config`] | `generator.toml` / `category.toml` loading, merging, validation |
//! | [`naming`] | `NNN-name` directory convention parser |
//! | [`types`] | Shared types: [`types::Record`], [`types::GeneratedFile`] |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Config Cascading (Root → Group → Category)
//!
//! `generator.toml` at the source root and in any group directory overrides
//! its parent:
//!
//! ```text
//! generator/generator.toml                            ← root (overrides stock defaults)
//! generator/030-Laboratory-Values/generator.toml      ← group (overrides root)
//! generator/030-Laboratory-Values/010-Values/category.toml ← the category itself
//! ```
//!
//! Lab values read from `LABOR_MAPPING` instead of `STUDY_VISIT_ITEM`; the
//! group says so once instead of every category repeating it.
//!
//! ## NNN-Prefix Ordering
//!
//! Directory order is the manifest order, and the export pipeline applies
//! mappings in manifest order. Ordering is explicit (`010-`, `020-`), parsed by
//! [`naming::parse_dir_name`]. Unnumbered directories are skipped and reported,
//! which keeps retired categories in the tree without building them.
//!
//! ## Duplicate Output Names
//!
//! Ids are lowercased into file names, so `E10` and `e10` collide. By default
//! the later row wins with a warning and the earlier manifest entry is
//! replaced, keeping one entry per written file. `on_duplicate = "error"`
//! fails the build instead.

pub mod config;
pub mod driver;
pub mod emit;
pub mod generate;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod records;
pub mod scan;
pub mod switch;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

/// Initialize the tracing subscriber. Diagnostics go to stderr so stdout
/// stays clean for `switch` and `category` output; `RUST_LOG` overrides the
/// default `crf_mapgen=info`.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crf_mapgen=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();
}
