//! Output file naming, duplicate tracking and writing.
//!
//! Generated files are named `<file_name_root><lowercase id>.<extension>`:
//! row `{IdComplement: "E10"}` with root `conditionDiabetes_` becomes
//! `conditionDiabetes_e10.groovy`. Two rows yielding the same name are handled
//! by [`OutputSet`] according to the build's [`DuplicatePolicy`].

use crate::config::DuplicatePolicy;
use crate::manifest::ManifestEntry;
use crate::types::{FileOrigin, GeneratedFile};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Output file {name} produced by both {first} and {second}")]
    Duplicate {
        name: String,
        first: FileOrigin,
        second: FileOrigin,
    },
}

/// `<root><id lowercased>.<extension>`
pub fn output_file_name(root: &str, id: &str, extension: &str) -> String {
    format!("{root}{}.{extension}", id.to_lowercase())
}

/// Whether `name` stays inside the directory it is joined to.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// A file name produced more than once, kept for the build report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateOutput {
    pub name: String,
    /// The origin whose content was replaced.
    pub replaced: FileOrigin,
    /// The origin whose content was kept.
    pub kept: FileOrigin,
}

/// Generated files and their manifest entries, in order, with unique names.
///
/// Each file has exactly one entry (at the same index), so the manifest
/// length always equals the number of files written.
#[derive(Debug, Default)]
pub struct OutputSet {
    files: Vec<GeneratedFile>,
    entries: Vec<ManifestEntry>,
    index: HashMap<String, usize>,
    duplicates: Vec<DuplicateOutput>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with its entry.
    ///
    /// On a repeated name, `Warn` replaces the earlier file and entry in place
    /// (the position of the first occurrence is kept); `Error` fails.
    pub fn insert(
        &mut self,
        file: GeneratedFile,
        entry: ManifestEntry,
        policy: DuplicatePolicy,
    ) -> Result<(), EmitError> {
        match self.index.get(&file.name) {
            Some(&pos) => {
                let previous = self.files[pos].origin.clone();
                match policy {
                    DuplicatePolicy::Error => Err(EmitError::Duplicate {
                        name: file.name,
                        first: previous,
                        second: file.origin,
                    }),
                    DuplicatePolicy::Warn => {
                        warn!(
                            file = %file.name,
                            replaced = %previous,
                            kept = %file.origin,
                            "duplicate output file name; later row wins"
                        );
                        self.duplicates.push(DuplicateOutput {
                            name: file.name.clone(),
                            replaced: previous,
                            kept: file.origin.clone(),
                        });
                        self.files[pos] = file;
                        self.entries[pos] = entry;
                        Ok(())
                    }
                }
            }
            None => {
                self.index.insert(file.name.clone(), self.files.len());
                self.files.push(file);
                self.entries.push(entry);
                Ok(())
            }
        }
    }

    /// Move everything from `other` into `self`, applying `policy` per file.
    pub fn absorb(&mut self, other: OutputSet, policy: DuplicatePolicy) -> Result<(), EmitError> {
        self.duplicates.extend(other.duplicates);
        for (file, entry) in other.files.into_iter().zip(other.entries) {
            self.insert(file, entry, policy)?;
        }
        Ok(())
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn duplicates(&self) -> &[DuplicateOutput] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_parts(self) -> (Vec<GeneratedFile>, Vec<ManifestEntry>, Vec<DuplicateOutput>) {
        (self.files, self.entries, self.duplicates)
    }
}

/// Write every file into `output_dir` as UTF-8, replacing existing files.
pub fn write_files(files: &[GeneratedFile], output_dir: &Path) -> Result<(), EmitError> {
    fs::create_dir_all(output_dir)?;
    for file in files {
        let path = output_dir.join(&file.name);
        fs::write(&path, file.content.as_bytes())?;
        debug!(file = %file.name, origin = %file.origin, "wrote");
    }
    Ok(())
}
