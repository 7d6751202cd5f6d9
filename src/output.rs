//! CLI output formatting.
//!
//! Output leads with each category's positional index and title; directories
//! and source files follow as indented context lines, so the listing reads as
//! an inventory of mappings while still pointing back at the files that
//! produced them.
//!
//! # Output Format
//!
//! ## Check / scan
//!
//! ```text
//! Categories
//! 001 Constant
//!     Source: 000-Constant/
//!     Static: observationSmokingStatus.groovy, patient.groovy
//! 002 Diabetes
//!     Source: 010-Anamnesis/010-Diabetes/
//!     Template: template_Diabetes → conditionDiabetes_<IdComplement>.groovy
//!     Rows: values_Diabetes.xlsx
//!     Export: STUDY_VISIT_ITEM → Condition
//!
//! Skipped
//!     030-Laboratory-Values/Messprofile_old/
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Constant → 2 files
//! 002 Diabetes → 2 files (2 rows)
//! 008 Policy → switch mapConsentData
//!
//! Duplicates
//!     conditionLungDiseases_copd.groovy: Diseases row 3 replaced by Values row 2
//!
//! Generated 17 files, 17 mappings → crf/ExportResourceMappingConfig.json
//! ```
//!
//! Each view has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout.

use crate::config::SourceConfig;
use crate::driver::{BuildReport, CategorySummary};
use crate::emit::DuplicateOutput;
use crate::scan::{BuildPlan, CategoryPlan};

// ============================================================================
// Shared helpers
// ============================================================================

/// 1-based positional index, 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn source_line(source: &SourceConfig) -> String {
    match source {
        SourceConfig::Spreadsheet { path, sheet: Some(sheet) } => format!("{path} [{sheet}]"),
        SourceConfig::Spreadsheet { path, sheet: None } => path.clone(),
        SourceConfig::Iterations { count, field } => format!("{count} iterations of {field}"),
    }
}

fn duplicate_line(dup: &DuplicateOutput) -> String {
    format!(
        "{}{}: {} replaced by {}",
        indent(1),
        dup.name,
        dup.replaced,
        dup.kept
    )
}

// ============================================================================
// Plan
// ============================================================================

fn category_lines(index: usize, category: &CategoryPlan) -> Vec<String> {
    let ctx = indent(1);
    let config = &category.config;
    let mut lines = vec![
        format!("{} {}", format_index(index), category.title),
        format!("{ctx}Source: {}/", category.path),
    ];

    if !config.static_files.is_empty() {
        let names: Vec<&str> = config.static_files.iter().map(|s| s.file.as_str()).collect();
        lines.push(format!("{ctx}Static: {}", names.join(", ")));
    }
    if let Some(template) = &config.template {
        lines.push(format!(
            "{ctx}Template: {} → {}<{}>.{}",
            template.file,
            template.file_name_root,
            template.id_field,
            config.extension(&category.defaults)
        ));
    }
    if let Some(source) = &config.source {
        lines.push(format!("{ctx}Rows: {}", source_line(source)));
    }
    if let Some(switch) = &config.switch {
        lines.push(format!("{ctx}Switch: {}({})", switch.function, switch.parameter));
    }
    if let Some(export_to) = &config.export_to {
        lines.push(format!(
            "{ctx}Export: {} → {export_to}",
            config.select_from(&category.defaults)
        ));
    }
    lines
}

/// Discovered categories in run order, then skipped directories.
pub fn format_plan_output(plan: &BuildPlan) -> Vec<String> {
    let mut lines = vec!["Categories".to_string()];
    for (i, category) in plan.categories.iter().enumerate() {
        lines.extend(category_lines(i + 1, category));
    }

    if !plan.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for path in &plan.skipped {
            lines.push(format!("{}{path}/", indent(1)));
        }
    }
    lines
}

pub fn print_plan_output(plan: &BuildPlan) {
    for line in format_plan_output(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// Build / check
// ============================================================================

fn summary_line(index: usize, summary: &CategorySummary) -> String {
    let head = format!("{} {}", format_index(index), summary.title);
    if summary.files == 0
        && let Some(function) = &summary.switch
    {
        return format!("{head} → switch {function}");
    }
    let files = plural(summary.files, "file");
    if summary.rows > 0 {
        format!("{head} → {files} ({})", plural(summary.rows, "row"))
    } else {
        format!("{head} → {files}")
    }
}

fn report_body(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, summary) in report.categories.iter().enumerate() {
        lines.push(summary_line(i + 1, summary));
        if !summary.uncovered.is_empty() {
            let names: Vec<String> = summary.uncovered.iter().map(|p| format!("##{p}##")).collect();
            lines.push(format!("{}Unsubstituted: {}", indent(1), names.join(", ")));
        }
    }

    if !report.duplicates.is_empty() {
        lines.push(String::new());
        lines.push("Duplicates".to_string());
        lines.extend(report.duplicates.iter().map(duplicate_line));
    }
    lines
}

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = report_body(report);
    lines.push(String::new());
    let totals = format!(
        "Generated {}, {}",
        plural(report.files, "file"),
        plural(report.mappings, "mapping")
    );
    match &report.manifest_path {
        Some(path) => lines.push(format!("{totals} → {}", path.display())),
        None => lines.push(totals),
    }
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

pub fn format_check_output(report: &BuildReport) -> Vec<String> {
    let mut lines = report_body(report);
    lines.push(String::new());
    lines.push(format!(
        "Would generate {}, {}",
        plural(report.files, "file"),
        plural(report.mappings, "mapping")
    ));
    lines
}

pub fn print_check_output(report: &BuildReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
