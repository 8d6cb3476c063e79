//! # validagen
//!
//! **validagen** generates validation code for named record types from a
//! declarative rule file. Each type lists its fields, their kind
//! (`int`, `float`, `string`, `object`, `array`) and the rules to enforce:
//! required, length bounds, membership lists, patterns and a large set of
//! format checks such as email, URL, UUID or IP.
//!
//! ## Overview
//!
//! ```text
//! validators.toml ──▶ model::load_project ──▶ validate::ensure_valid
//!                                                   │
//!            ┌──────────────────────────────────────┘
//!            ▼  (for each type, in key order)
//!   generator::resolve ──▶ generator::imports ──▶ generator::render ──▶ generator::write
//! ```
//!
//! - **[`model`]** - the rule model and its decoder (TOML, YAML or JSON)
//! - **[`validate`]** - structural checks on the decoded model
//! - **[`generator`]** - default resolution, import inference, template rendering
//!   and output writing
//! - **[`cli`]** - the `validagen` command-line front end
//! - **[`logging`]** - tracing subscriber setup for the binary
//!
//! Generated code does not validate anything by itself at generation time; the
//! builtin template targets the Go ozzo-validation library.
//!
//! ## Example
//!
//! ```toml
//! Type = "struct"
//!
//! [Validators.person]
//! Package = "person"
//! Name = "Person"
//!
//! [Validators.person.Properties.Name]
//! Type = "string"
//! Required = true
//!
//! [Validators.person.Properties.Age]
//! Type = "int"
//! Length = [0, 150]
//! ```
//!
//! ```bash
//! validagen generate validators.toml   # writes person/person_validator.go
//! ```

pub mod cli;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;
pub mod validate;

pub use error::{Result, ValidagenError};
pub use generator::{generate_from_config, GenerateOptions};
pub use model::{load_project, Project};
pub use validate::{ensure_valid, validate_project};
