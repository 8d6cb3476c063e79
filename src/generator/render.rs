//! Template rendering for validator types.
//!
//! [`Renderer`] is the seam between the generation driver and the template
//! engine. [`TemplateRenderer`] implements it with minijinja and registers the
//! list helpers templates may call:
//!
//! - `isValidNumericList(list)` - at least one int or float element
//! - `isValidIntList(list)` - at least one int element
//! - `isValidFloatList(list)` - at least one float element
//! - `isValidStringList(list)` - at least one string element
//!
//! The template receives the resolved type descriptor as its context, with the
//! configuration's key names (`Name`, `MethodName`, `Import`, `Properties`, ...).
//! The project `Type` is available as the global `ProjectType`, and the names of
//! all format predicates as the global `Formats`.

use minijinja::value::ViaDeserialize;
use minijinja::Environment;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, ValidagenError};
use crate::model::{FormatPredicate, TypeDescriptor, TypedList};

/// Name the builtin template is registered under.
pub const BUILTIN_TEMPLATE_NAME: &str = "ozzo-validator.go.tmpl";

/// Global listing every format predicate name, in declaration order.
pub const FORMATS_GLOBAL: &str = "Formats";

/// Builtin template emitting Go validators for ozzo-validation.
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/ozzo-validator.go.tmpl");

/// Turns one resolved type descriptor into source text.
pub trait Renderer {
    /// Render `descriptor`; `key` identifies it in errors.
    fn render(&self, key: &str, descriptor: &TypeDescriptor) -> Result<String>;
}

/// Where the template text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin,
    File(PathBuf),
}

impl TemplateSource {
    /// The builtin template unless a non-empty path is given.
    pub fn from_path(path: Option<&str>) -> Self {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => TemplateSource::File(PathBuf::from(path)),
            None => TemplateSource::Builtin,
        }
    }
}

/// Helper predicates exposed to templates, by name.
pub type HelperFn = fn(ViaDeserialize<TypedList>) -> bool;

/// Name → helper registry installed into every template environment.
pub const HELPERS: &[(&str, HelperFn)] = &[
    ("isValidNumericList", is_valid_numeric_list),
    ("isValidIntList", is_valid_int_list),
    ("isValidFloatList", is_valid_float_list),
    ("isValidStringList", is_valid_string_list),
];

fn is_valid_numeric_list(list: ViaDeserialize<TypedList>) -> bool {
    list.has_numeric()
}

fn is_valid_int_list(list: ViaDeserialize<TypedList>) -> bool {
    list.has_int()
}

fn is_valid_float_list(list: ViaDeserialize<TypedList>) -> bool {
    list.has_float()
}

fn is_valid_string_list(list: ViaDeserialize<TypedList>) -> bool {
    list.has_string()
}

/// minijinja-backed [`Renderer`].
pub struct TemplateRenderer {
    env: Environment<'static>,
    name: String,
}

impl TemplateRenderer {
    /// Load and parse the template, then register the helpers.
    ///
    /// # Errors
    ///
    /// Returns [`ValidagenError::Io`] if a template file cannot be read and
    /// [`ValidagenError::Template`] if the template does not parse.
    pub fn new(source: &TemplateSource) -> Result<Self> {
        match source {
            TemplateSource::Builtin => {
                Self::from_source(BUILTIN_TEMPLATE_NAME, BUILTIN_TEMPLATE.to_string())
            }
            TemplateSource::File(path) => {
                debug!(path = %path.display(), "loading custom template");
                let text =
                    std::fs::read_to_string(path).map_err(|e| ValidagenError::io(path, e))?;
                Self::from_source(&template_name(path), text)
            }
        }
    }

    /// Build a renderer from template text.
    pub fn from_source(name: &str, text: String) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        for (helper, f) in HELPERS {
            env.add_function(*helper, *f);
        }
        let formats: Vec<&'static str> =
            FormatPredicate::ALL.iter().map(FormatPredicate::as_str).collect();
        env.add_global(FORMATS_GLOBAL, formats);
        env.add_template_owned(name.to_string(), text)
            .map_err(|source| ValidagenError::Template {
                name: name.to_string(),
                source,
            })?;
        Ok(TemplateRenderer {
            env,
            name: name.to_string(),
        })
    }

    /// Expose a project-level value to the template as a global variable.
    pub fn with_global(mut self, name: &str, value: &str) -> Self {
        self.env.add_global(name.to_string(), value.to_string());
        self
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, key: &str, descriptor: &TypeDescriptor) -> Result<String> {
        let render_err = |source: minijinja::Error| ValidagenError::Render {
            key: key.to_string(),
            source,
        };
        let template = self.env.get_template(&self.name).map_err(render_err)?;
        template.render(descriptor).map_err(render_err)
    }
}

fn template_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
