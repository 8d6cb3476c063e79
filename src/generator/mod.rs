//! # Generator Module
//!
//! Turns a validated [`Project`](crate::model::Project) into one source file per
//! validator type.
//!
//! ## Architecture
//!
//! ```text
//! config file → load_project → ensure_valid → per type:
//!     resolve_defaults → infer_imports → Renderer::render → OutputWriter::write
//! ```
//!
//! 1. **Resolve** ([`resolve`]) - fill in name, method name, directory, file name
//!    and permission through their fallback chains
//! 2. **Infer imports** ([`imports`]) - add the support packages the rules need
//! 3. **Render** ([`render`]) - run the descriptor through the builtin or a
//!    user-supplied minijinja template
//! 4. **Write** ([`write`]) - hand the text, path and mode to a writer
//!
//! Types are processed one at a time in key order. The first failure aborts the
//! run; files already written stay on disk.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use validagen::generator::{generate_from_config, GenerateOptions};
//!
//! let files = generate_from_config(
//!     "validators.toml".as_ref(),
//!     &GenerateOptions { template: None, dry_run: false },
//! )?;
//! ```
//!
//! ## Template Customization
//!
//! The builtin template lives in `templates/ozzo-validator.go.tmpl` and is
//! compiled into the binary. Pass `--template <file>` (or set `Template` in the
//! configuration) to render with your own.

pub mod imports;
pub mod render;
pub mod resolve;
pub mod write;

mod project;
mod scaffold;
#[cfg(test)]
mod tests;

pub use imports::{infer_imports, SupportNeeds, IS_IMPORT, REGEXP_IMPORT};
pub use project::{generate_from_config, generate_validators, GenerateOptions, PROJECT_TYPE_GLOBAL};
pub use render::{
    Renderer, TemplateRenderer, TemplateSource, BUILTIN_TEMPLATE_NAME, FORMATS_GLOBAL,
};
pub use resolve::{
    default_file_name, output_target, resolve_defaults, OutputTarget, DEFAULT_FILE_MODE,
    DEFAULT_METHOD_NAME,
};
pub use scaffold::{render_starter_config, write_starter_config, StarterConfigTemplate};
pub use write::{DryRunWriter, FsWriter, GeneratedFile, OutputWriter};
