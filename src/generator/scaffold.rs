use askama::Template;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{Result, ValidagenError};
use crate::model::ProjectKind;
use crate::validate::is_alphanumeric;

/// Starter configuration written by `validagen init`.
#[derive(Template)]
#[template(path = "validators.toml.txt", escape = "none")]
pub struct StarterConfigTemplate {
    pub package: String,
    pub type_name: String,
    pub kind: &'static str,
    pub file_name: String,
}

/// Render the starter configuration for `package`.
///
/// # Errors
///
/// Returns [`ValidagenError::Scaffold`] if the package name is not alphanumeric.
pub fn render_starter_config(package: &str, kind: ProjectKind, file_name: &str) -> Result<String> {
    if package.is_empty() || !is_alphanumeric(package) {
        return Err(ValidagenError::Scaffold(format!(
            "package name `{package}` must be non-empty and alphanumeric"
        )));
    }
    StarterConfigTemplate {
        package: package.to_string(),
        type_name: type_name(package),
        kind: kind.as_str(),
        file_name: file_name.to_string(),
    }
    .render()
    .map_err(|e| ValidagenError::Scaffold(e.to_string()))
}

/// Write a starter configuration; an existing file is kept unless `force`.
///
/// Returns `false` when the file already existed and was left alone.
pub fn write_starter_config(path: &Path, package: &str, kind: ProjectKind, force: bool) -> Result<bool> {
    if path.exists() && !force {
        info!(path = %path.display(), "config already exists (use --force to overwrite)");
        return Ok(false);
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let contents = render_starter_config(package, kind, &file_name)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ValidagenError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| ValidagenError::io(path, e))?;
    info!(path = %path.display(), "wrote starter config");
    Ok(true)
}

/// `person` → `Person`.
fn type_name(package: &str) -> String {
    let mut chars = package.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
