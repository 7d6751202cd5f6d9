//! The `NNN-name` convention for category and group directories.
//!
//! The number prefix fixes the order in which categories run, which is also
//! the order of their entries in the final manifest. Directories without a
//! prefix are left out of the build.
//!
//! - `010-Anamnesis` → order 10, title "Anamnesis"
//! - `030-History-of-Travel` → order 30, title "History of Travel"
//! - `Messprofile_old` → no order, title "Messprofile_old" (skipped)

/// A directory name split into its order prefix and display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirName {
    /// Number prefix if present (`20` from `020-Diseases`).
    pub order: Option<u32>,
    /// Name after the prefix with dashes turned into spaces.
    pub title: String,
}

impl DirName {
    pub fn is_enabled(&self) -> bool {
        self.order.is_some()
    }
}

/// Parse a directory name following the `NNN-name` convention.
///
/// A bare number (`"040"`) has an order and an empty title; the caller falls
/// back to the raw directory name for display in that case.
pub fn parse_dir_name(name: &str) -> DirName {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let rest = &name[digits..];
        if (rest.is_empty() || rest.starts_with('-'))
            && let Ok(order) = name[..digits].parse::<u32>()
        {
            return DirName {
                order: Some(order),
                title: rest.trim_start_matches('-').replace('-', " "),
            };
        }
    }
    DirName {
        order: None,
        title: name.to_string(),
    }
}
