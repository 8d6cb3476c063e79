use std::path::Path;
use tracing::{info, warn};

use super::imports::infer_imports;
use super::render::{Renderer, TemplateRenderer, TemplateSource};
use super::resolve::resolve_defaults;
use super::write::{DryRunWriter, FsWriter, GeneratedFile, OutputWriter};
use crate::error::Result;
use crate::model::{load_project, Project};
use crate::validate::ensure_valid;

/// Global under which the project `Type` is exposed to templates.
pub const PROJECT_TYPE_GLOBAL: &str = "ProjectType";

/// Knobs of a `generate` run that do not live in the configuration file.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Template path overriding the configuration's `Template`.
    pub template: Option<String>,
    /// Render everything but write nothing.
    pub dry_run: bool,
}

/// Decode, validate and generate every validator of a configuration file.
///
/// # Errors
///
/// Fails on the first decode, validation, template, render or IO error.
/// Files written for earlier types are left in place.
pub fn generate_from_config(config_path: &Path, options: &GenerateOptions) -> Result<Vec<GeneratedFile>> {
    let mut project = load_project(config_path)?;
    if let Some(template) = options.template.as_deref().filter(|t| !t.is_empty()) {
        project.template = Some(template.to_string());
    }

    let report = ensure_valid(&project)?;
    for issue in report.warnings() {
        warn!(location = %issue.location, kind = %issue.kind, "{}", issue.message);
    }

    let mut renderer = TemplateRenderer::new(&TemplateSource::from_path(project.template()))?;
    if let Some(kind) = project.kind() {
        renderer = renderer.with_global(PROJECT_TYPE_GLOBAL, kind.as_str());
    }

    if options.dry_run {
        let mut writer = DryRunWriter::default();
        generate_validators(&mut project, &renderer, &mut writer)
    } else {
        generate_validators(&mut project, &renderer, &mut FsWriter)
    }
}

/// Resolve, infer imports for, render and write each type in key order.
///
/// The project must already be validated. Descriptors are completed in place.
///
/// # Errors
///
/// Stops at the first render or write failure.
pub fn generate_validators(
    project: &mut Project,
    renderer: &dyn Renderer,
    writer: &mut dyn OutputWriter,
) -> Result<Vec<GeneratedFile>> {
    let project_method = project.method_name().map(str::to_string);
    let mut generated = Vec::with_capacity(project.validators.len());

    for (key, descriptor) in project.validators.iter_mut() {
        let target = resolve_defaults(descriptor, key, project_method.as_deref());
        infer_imports(descriptor);
        info!(key = %key, path = %target.path.display(), "generate validator");

        let file = GeneratedFile {
            key: key.clone(),
            path: target.path,
            mode: target.mode,
            contents: renderer.render(key, descriptor)?,
        };
        writer.write(&file)?;
        generated.push(file);
    }

    Ok(generated)
}
