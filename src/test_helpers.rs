//! Shared test utilities.
//!
//! Builds the fixture source tree in a temp directory (text files copied from
//! `fixtures/generator/`, spreadsheets written on the fly since `.xlsx` is
//! binary) and offers lookups that panic with the available names on a miss.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let plan = scan(tmp.path()).unwrap();
//! let diabetes = find_category(&plan, "Diabetes");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::CATEGORY_FILE;
use crate::scan::{BuildPlan, CategoryPlan};

pub const FIXTURE_DESCRIPTION: &str = "GECCO CRF export: CXX study visit items to FHIR resources";

/// Files a full fixture build writes, manifest excluded.
pub const FIXTURE_FILE_COUNT: usize = 17;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/generator/` to a temp directory and add its spreadsheets.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/generator");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    write_fixture_spreadsheets(tmp.path());
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

const DISEASE_COLUMNS: &[&str] = &[
    "ParameterCodeDisease",
    "IdComplement",
    "ICDCode",
    "DiseaseName-EN",
    "SnomedCode",
];

fn write_fixture_spreadsheets(root: &Path) {
    write_xlsx(
        &root.join("010-Anamnesis/010-Diabetes/values_Diabetes.xlsx"),
        DISEASE_COLUMNS,
        &[
            &["COV_GECCO_DIABETES", "E10", "E10.9", "Type 1 diabetes mellitus", "46635009"],
            &["COV_GECCO_DIABETES", "E11", "E11.9", "Type 2 diabetes mellitus", "44054006"],
        ],
    );
    write_xlsx(
        &root.join("010-Anamnesis/020-Diseases/values_LungDiseases.xlsx"),
        DISEASE_COLUMNS,
        &[
            &["COV_GECCO_LUNG", "COPD", "J44.9", "Chronic obstructive lung disease", "13645005"],
            &["COV_GECCO_LUNG", "Asthma", "J45.9", "Asthma", ""],
            &["COV_GECCO_LUNG", "OSAS", "G47.31", "Sleep apnea", "78275009"],
        ],
    );
    write_xlsx(
        &root.join("010-Anamnesis/040-Organ-Transplant/values_OrganTransplant.xlsx"),
        &["ParameterCodeOrgan", "IdComplement", "ICDCode", "OrganName-EN", "SnomedCode"],
        &[
            &["COV_GECCO_ORGAN", "Heart", "Z94.1", "Heart", "32413006"],
            &["COV_GECCO_ORGAN", "Kidney", "Z94.0", "Kidney", "64033007"],
        ],
    );
    write_xlsx(
        &root.join("020-Imaging/010-Imaging-Procedure/values_RadiologyProcedure.xlsx"),
        &["IdComplement", "Text", "SnomedCode", "DCMCode"],
        &[
            &["CT", "Computertomographie", "77477000", "CT"],
            &["RX", "Röntgen", "168537006", "DX"],
        ],
    );
    write_xlsx(
        &root.join("030-Laboratory-Values/010-Values/values_Values.xlsx"),
        &["IdComplement", "ValueName-EN", "LoincCode", "Unit"],
        &[
            &["CRP", "C reactive protein", "1988-5", "mg/L"],
            &["Ferritin", "Ferritin", "2276-4", "ng/mL"],
        ],
    );
    write_xlsx(
        &root.join("040-Consent/010-Policy/values_policy.xlsx"),
        &["Level/Typ", "Code", "Bezeichnung", "Codesystem"],
        &[
            &["1", "2.16.840.1.113883.3.1937.777.24.5.3.1", "PATDAT_erheben_speichern_nutzen", "urn:oid"],
            &["1", "2.16.840.1.113883.3.1937.777.24.5.3.8", "MDAT_wissenschaftlich_nutzen", "urn:oid"],
        ],
    );
}

/// Write a one-sheet workbook: `headers` in row 1, then `rows`.
///
/// Empty strings leave the cell unset.
pub fn write_xlsx(path: &Path, headers: &[&str], rows: &[&[&str]]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).unwrap();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .get_cell_mut((col as u32 + 1, 1))
            .set_value(header.to_string());
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .get_cell_mut((col as u32 + 1, r as u32 + 2))
                    .set_value(value.to_string());
            }
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// A category directory holding one static file.
pub fn write_static_category(dir: &Path, file: &str, export_to: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join(CATEGORY_FILE),
        format!("[[static_files]]\nfile = \"{file}\"\nexport_to = \"{export_to}\"\n"),
    )
    .unwrap();
    fs::write(dir.join(file), format!("// {file}\n")).unwrap();
}

/// A template category fed by `count` iterations of `##iter##`.
pub fn write_iteration_category(dir: &Path, root: &str, count: u32) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join(CATEGORY_FILE),
        format!(
            r#"export_to = "Immunization"

[template]
file = "template"
file_name_root = "{root}"
id_field = "iter"
fields = ["iter"]

[source]
kind = "iterations"
count = {count}
"#
        ),
    )
    .unwrap();
    fs::write(dir.join("template"), "vaccination ##iter##\n").unwrap();
}

// =========================================================================
// Plan lookups
// =========================================================================

/// Find a category by title. Panics if not found.
pub fn find_category<'a>(plan: &'a BuildPlan, title: &str) -> &'a CategoryPlan {
    plan.categories
        .iter()
        .find(|c| c.title == title)
        .unwrap_or_else(|| {
            let titles = category_titles(plan);
            panic!("category '{title}' not found. Available: {titles:?}")
        })
}

/// All category titles in run order.
pub fn category_titles(plan: &BuildPlan) -> Vec<&str> {
    plan.categories.iter().map(|c| c.title.as_str()).collect()
}
