//! Default & path resolution for one validator type.
//!
//! Each attribute falls back independently, first non-empty value wins:
//!
//! | attribute  | fallback chain                                        |
//! |------------|-------------------------------------------------------|
//! | Name       | `Name` → map key                                      |
//! | MethodName | `MethodName` → project `MethodName` → `"Validate"`    |
//! | Dir        | `Dir` → `Package`                                     |
//! | FileName   | `FileName` → `"<Package>_validator.go"`               |
//! | FileMode   | non-zero `FileMode` → `0o644`                         |

use std::path::PathBuf;
use tracing::debug;

use crate::model::TypeDescriptor;

/// Method name used when neither the type nor the project names one.
pub const DEFAULT_METHOD_NAME: &str = "Validate";

/// Permission bits of a generated file when none are configured.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Suffix of generated source files.
pub const SOURCE_FILE_SUFFIX: &str = ".go";

/// Where and how a generated validator is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub file_name: String,
    pub path: PathBuf,
    pub mode: u32,
}

/// Compute the output target of a type without touching the descriptor.
pub fn output_target(descriptor: &TypeDescriptor) -> OutputTarget {
    let dir = PathBuf::from(descriptor.dir().unwrap_or(&descriptor.package));
    let file_name = descriptor
        .file_name()
        .map(str::to_string)
        .unwrap_or_else(|| default_file_name(&descriptor.package));
    let mode = match descriptor.file_mode {
        Some(mode) if mode != 0 => u32::try_from(mode).unwrap_or(DEFAULT_FILE_MODE),
        _ => DEFAULT_FILE_MODE,
    };
    OutputTarget {
        path: dir.join(&file_name),
        dir,
        file_name,
        mode,
    }
}

/// `"<package>_validator.go"`.
pub fn default_file_name(package: &str) -> String {
    format!("{package}_validator{SOURCE_FILE_SUFFIX}")
}

/// Fill every unset attribute of `descriptor` and return its output target.
///
/// Values that are already set are left alone.
pub fn resolve_defaults(
    descriptor: &mut TypeDescriptor,
    key: &str,
    project_method_name: Option<&str>,
) -> OutputTarget {
    if descriptor.name().is_none() {
        descriptor.name = Some(key.to_string());
    }
    if descriptor.method_name().is_none() {
        let method = project_method_name
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_METHOD_NAME);
        descriptor.method_name = Some(method.to_string());
    }

    for (field_key, field) in descriptor.properties.iter_mut() {
        if field.name().is_none() {
            field.name = Some(field_key.clone());
        }
    }

    let target = output_target(descriptor);
    descriptor.dir = Some(target.dir.to_string_lossy().into_owned());
    descriptor.file_name = Some(target.file_name.clone());
    descriptor.file_mode = Some(i64::from(target.mode));

    debug!(
        key,
        name = descriptor.name.as_deref().unwrap_or_default(),
        method_name = descriptor.method_name.as_deref().unwrap_or_default(),
        dir = %target.dir.display(),
        file_name = %target.file_name,
        file_mode = %format!("{:#o}", target.mode),
        "resolved validator defaults"
    );

    target
}
