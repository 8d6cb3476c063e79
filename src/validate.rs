//! # Model Validator
//!
//! Structural checks run on a decoded [`Project`] before anything is generated.
//! The validator never mutates the model.
//!
//! ## Checks Performed
//!
//! 1. **Project kind** - `Type` is present and is `struct` or `map`
//! 2. **Project method name** - alphanumeric when present
//! 3. **Validators** - at least one type is declared
//! 4. **Types** - `Name` and `MethodName` alphanumeric, `FileMode` within `[0, 0o777]`, `Properties` non-empty
//! 5. **Fields** - `Name` alphanumeric, `Type` one of `int|float|string|object|array`
//! 6. **Length bounds** - `Length`/`RuneLength` empty or `[min, max]` with
//!    `0 <= min <= max`, including rules nested under `Each` and `Else`
//!
//! Beyond those, membership unions with more than one populated element kind
//! are errors, and a few suspicious settings are reported as warnings.
//!
//! All issues are collected rather than stopping at the first one. Generation
//! is refused when the report holds at least one error.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use validagen::validate::{validate_project, IssueSeverity};
//!
//! let report = validate_project(&project);
//! for issue in report.errors() {
//!     eprintln!("{}: {}", issue.location, issue.message);
//! }
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{Result, ValidagenError};
use crate::model::{FieldKind, Project, RuleSet, TypeDescriptor, TypedList};


/// Highest permission value a generated file may request.
pub const MAX_FILE_MODE: i64 = 0o777;

#[allow(clippy::expect_used)]
static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]*$").expect("valid alphanumeric pattern"));

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Blocks generation
    Error,
    /// Reported, generation continues
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Error => f.write_str("error"),
            IssueSeverity::Warning => f.write_str("warning"),
        }
    }
}

/// A problem found in a validator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path to the offending key (e.g. `Validators.person.Properties.Age.Length`)
    pub location: String,
    pub severity: IssueSeverity,
    /// Machine-readable issue code (e.g. `invalid_length`)
    pub kind: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn error(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(location, IssueSeverity::Error, kind, message)
    }

    pub fn warning(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(location, IssueSeverity::Warning, kind, message)
    }

    fn new(
        location: impl Into<String>,
        severity: IssueSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.location, self.kind, self.message
        )
    }
}

/// Every issue found in one project, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
    }

    /// Issues of a given kind code.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

/// Validate a decoded project and collect every issue.
pub fn validate_project(project: &Project) -> ValidationReport {
    let mut report = ValidationReport::default();

    match project.kind.as_deref().filter(|k| !k.is_empty()) {
        None => report.push(
            ValidationIssue::error("Type", "missing_kind", "project Type is required")
                .with_suggestion("set Type = \"struct\" or Type = \"map\""),
        ),
        Some(kind) if project.kind().is_none() => report.push(
            ValidationIssue::error(
                "Type",
                "invalid_kind",
                format!("unknown project Type `{kind}`, expected `struct` or `map`"),
            ),
        ),
        Some(_) => {}
    }

    if let Some(method) = project.method_name() {
        if !is_alphanumeric(method) {
            report.push(not_alphanumeric("MethodName", method));
        }
    }

    if project.validators.is_empty() {
        report.push(
            ValidationIssue::error(
                "Validators",
                "empty_validators",
                "at least one validator type must be declared",
            )
            .with_suggestion("add a [Validators.<name>] table"),
        );
    }

    for (key, descriptor) in &project.validators {
        validate_type(&mut report, &format!("Validators.{key}"), descriptor);
    }

    report
}

/// Validate the project and turn any error-severity issue into a failure.
///
/// On success the report is returned so warnings can still be shown.
///
/// # Errors
///
/// Returns [`ValidagenError::Validation`] carrying the full report.
pub fn ensure_valid(project: &Project) -> Result<ValidationReport> {
    let report = validate_project(project);
    if report.has_errors() {
        return Err(ValidagenError::Validation(report));
    }
    Ok(report)
}

/// Check a length-like bound: empty, or exactly `[min, max]` with `0 <= min <= max`.
pub fn check_length(bounds: &[i64]) -> std::result::Result<(), &'static str> {
    match bounds {
        [] => Ok(()),
        [min, max] => {
            if *min < 0 || *max < 0 {
                Err("must be positive int(>=0)")
            } else if min > max {
                Err("must be [min, max]")
            } else {
                Ok(())
            }
        }
        _ => Err("must be empty or 2-ints"),
    }
}

/// ASCII letters and digits only; the empty string passes.
pub fn is_alphanumeric(value: &str) -> bool {
    ALPHANUMERIC.is_match(value)
}

fn validate_type(report: &mut ValidationReport, location: &str, descriptor: &TypeDescriptor) {
    if let Some(name) = descriptor.name() {
        if !is_alphanumeric(name) {
            report.push(not_alphanumeric(&format!("{location}.Name"), name));
        }
    }

    if let Some(method) = descriptor.method_name() {
        if !is_alphanumeric(method) {
            report.push(not_alphanumeric(&format!("{location}.MethodName"), method));
        }
    }

    match descriptor.file_mode {
        Some(mode) if !(0..=MAX_FILE_MODE).contains(&mode) => report.push(
            ValidationIssue::error(
                format!("{location}.FileMode"),
                "file_mode_out_of_range",
                format!("FileMode {mode} must be within [0, 0o777] (0..=511)"),
            ),
        ),
        Some(0) => report.push(
            ValidationIssue::warning(
                format!("{location}.FileMode"),
                "zero_file_mode",
                "FileMode 0 is treated as unset and falls back to 0o644",
            ),
        ),
        _ => {}
    }

    if descriptor.package.is_empty() && descriptor.dir().is_none() && descriptor.file_name().is_none()
    {
        report.push(
            ValidationIssue::warning(
                format!("{location}.Package"),
                "missing_package",
                "no Package, Dir or FileName set; output goes to `_validator.go` in the working directory",
            )
            .with_suggestion("set Package to the target package name"),
        );
    }

    if descriptor.properties.is_empty() {
        report.push(ValidationIssue::error(
            format!("{location}.Properties"),
            "empty_properties",
            "a validator needs at least one property",
        ));
    }

    for (key, field) in &descriptor.properties {
        let field_location = format!("{location}.Properties.{key}");

        if let Some(name) = field.name() {
            if !is_alphanumeric(name) {
                report.push(not_alphanumeric(&format!("{field_location}.Name"), name));
            }
        }

        match field.kind.as_deref().filter(|k| !k.is_empty()) {
            None => report.push(
                ValidationIssue::error(
                    format!("{field_location}.Type"),
                    "missing_field_type",
                    "field Type is required",
                )
                .with_suggestion("use one of int, float, string, object, array"),
            ),
            Some(kind) if field.kind().is_none() => report.push(
                ValidationIssue::error(
                    format!("{field_location}.Type"),
                    "invalid_field_type",
                    format!("unknown field Type `{kind}`"),
                )
                .with_suggestion("use one of int, float, string, object, array"),
            ),
            Some(_) => {}
        }

        if field.kind() == Some(FieldKind::Object) && !field.rules.each.is_empty() {
            report.push(ValidationIssue::warning(
                format!("{field_location}.Each"),
                "each_on_object",
                "Each rules only apply to array elements",
            ));
        }

        validate_rules(report, &field_location, &field.rules);
    }
}

fn validate_rules(report: &mut ValidationReport, location: &str, rules: &RuleSet) {
    for (key, bounds, kind) in [
        ("Length", &rules.length, "invalid_length"),
        ("RuneLength", &rules.rune_length, "invalid_rune_length"),
    ] {
        if let Err(message) = check_length(bounds) {
            report.push(ValidationIssue::error(
                format!("{location}.{key}"),
                kind,
                format!("{key} {bounds:?} {message}"),
            ));
        }
    }

    validate_list(report, &format!("{location}.In"), &rules.r#in);
    validate_list(report, &format!("{location}.NotIn"), &rules.not_in);
    for (i, list) in rules.multiple_of.iter().enumerate() {
        validate_list(report, &format!("{location}.MultipleOf[{i}]"), list);
    }

    if rules.has_match() {
        if let Err(e) = Regex::new(&rules.r#match) {
            report.push(ValidationIssue::warning(
                format!("{location}.Match"),
                "invalid_match_pattern",
                format!("pattern does not compile: {e}"),
            ));
        }
    }

    for (i, nested) in rules.each.iter().enumerate() {
        validate_rules(report, &format!("{location}.Each[{i}]"), nested);
    }
    for (i, nested) in rules.r#else.iter().enumerate() {
        validate_rules(report, &format!("{location}.Else[{i}]"), nested);
    }
}

fn validate_list(report: &mut ValidationReport, location: &str, list: &TypedList) {
    if list.populated_variants() > 1 {
        report.push(
            ValidationIssue::error(
                location.to_string(),
                "ambiguous_list",
                "only one of Int, Float or String may be populated",
            ),
        );
    }
}

fn not_alphanumeric(location: &str, value: &str) -> ValidationIssue {
    ValidationIssue::error(
        location.to_string(),
        "not_alphanumeric",
        format!("`{value}` must contain only letters and digits"),
    )
}

/// Print a validation report for the `check` command.
pub fn print_report(report: &ValidationReport) {
    if report.is_empty() {
        println!("✅ No issues found!");
        return;
    }

    let errors: Vec<_> = report.errors().collect();
    let warnings: Vec<_> = report.warnings().collect();

    println!("\n📋 Validation Results:");
    println!(
        "   {} error(s), {} warning(s)\n",
        errors.len(),
        warnings.len()
    );

    for (title, issues) in [("❌ Errors (must fix):", errors), ("⚠️  Warnings:", warnings)] {
        if issues.is_empty() {
            continue;
        }
        println!("{title}");
        for issue in issues {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {suggestion}");
            }
        }
        println!();
    }
}
