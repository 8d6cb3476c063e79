//! # Rule Model
//!
//! The in-memory form of a validator configuration: one [`Project`] holding a
//! [`TypeDescriptor`] per generated validator, each holding a
//! [`FieldDescriptor`] per validated field with its [`RuleSet`].
//!
//! ```toml
//! Type = "struct"
//! MethodName = "Validate"
//!
//! [Validators.person]
//! Package = "person"
//! Name = "Person"
//!
//! [Validators.person.Properties.Email]
//! Type = "string"
//! Required = true
//! Email = true
//! ```
//!
//! Attributes that have a default are `Option`s. The model is decoded once,
//! completed in place by [`crate::generator::resolve`] and
//! [`crate::generator::imports`], rendered once and dropped.

mod format;
mod load;
mod rules;


pub use format::{FormatPredicate, FormatSet};
pub use load::{load_project, parse_project, ConfigFormat};
pub use rules::{RuleSet, TypedList};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Shape of the generated validation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Struct,
    Map,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Struct => "struct",
            ProjectKind::Map => "map",
        }
    }
}

impl FromStr for ProjectKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "struct" => Ok(ProjectKind::Struct),
            "map" => Ok(ProjectKind::Map),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared kind of a validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
    String,
    Object,
    Array,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Int,
        FieldKind::Float,
        FieldKind::String,
        FieldKind::Object,
        FieldKind::Array,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::String => "string",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        }
    }
}

impl FromStr for FieldKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of a validator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Project {
    /// `struct` or `map`; kept as written so the validator can report bad values.
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    /// Method name inherited by types that do not set their own.
    pub method_name: Option<String>,
    /// Template file; unset means the builtin template.
    pub template: Option<String>,
    /// Type key → descriptor. Key-ordered so output order is stable.
    pub validators: BTreeMap<String, TypeDescriptor>,
}

impl Project {
    /// Parsed project kind, `None` when missing or unrecognized.
    pub fn kind(&self) -> Option<ProjectKind> {
        non_empty(&self.kind).and_then(|k| k.parse().ok())
    }

    pub fn method_name(&self) -> Option<&str> {
        non_empty(&self.method_name)
    }

    pub fn template(&self) -> Option<&str> {
        non_empty(&self.template)
    }
}

/// One generated validation unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TypeDescriptor {
    /// Package/namespace hint; also the default output directory.
    pub package: String,
    pub name: Option<String>,
    pub dir: Option<String>,
    pub file_name: Option<String>,
    /// Permission bits of the generated file, `[0, 0o777]`.
    pub file_mode: Option<i64>,
    /// Support references the generated code imports.
    pub import: Vec<String>,
    pub method_name: Option<String>,
    pub properties: BTreeMap<String, FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn dir(&self) -> Option<&str> {
        non_empty(&self.dir)
    }

    pub fn file_name(&self) -> Option<&str> {
        non_empty(&self.file_name)
    }

    pub fn method_name(&self) -> Option<&str> {
        non_empty(&self.method_name)
    }

    /// Append a support reference unless it is already imported.
    pub fn add_import(&mut self, reference: &str) -> bool {
        if self.import.iter().any(|existing| existing == reference) {
            return false;
        }
        self.import.push(reference.to_string());
        true
    }
}

/// One validated field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FieldDescriptor {
    pub name: Option<String>,
    /// `int`, `float`, `string`, `object` or `array`; kept as written.
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub rules: RuleSet,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind) -> Self {
        FieldDescriptor {
            kind: Some(kind.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Parsed field kind, `None` when missing or unrecognized.
    pub fn kind(&self) -> Option<FieldKind> {
        non_empty(&self.kind).and_then(|k| k.parse().ok())
    }
}

/// An empty string is treated the same as an absent one.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
