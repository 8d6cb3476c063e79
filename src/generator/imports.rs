//! Support-reference inference.
//!
//! Scans the top-level rules of every property and adds the packages the
//! generated code needs. Rules nested under `Each`/`Else` are not scanned.

use tracing::debug;

use crate::model::TypeDescriptor;

/// Referenced when some property has a `Match` pattern.
pub const REGEXP_IMPORT: &str = "regexp";

/// Referenced when some property enables a format predicate.
pub const IS_IMPORT: &str = "github.com/go-ozzo/ozzo-validation/v4/is";

/// Which support facilities a type's rules call for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportNeeds {
    pub regexp: bool,
    pub format: bool,
}

impl SupportNeeds {
    /// Inspect the top-level rules of a type.
    pub fn of(descriptor: &TypeDescriptor) -> Self {
        descriptor
            .properties
            .values()
            .fold(SupportNeeds::default(), |needs, field| SupportNeeds {
                regexp: needs.regexp || field.rules.has_match(),
                format: needs.format || field.rules.has_format(),
            })
    }

    /// References implied by these needs, in import order.
    pub fn references(&self) -> Vec<&'static str> {
        let mut refs = Vec::new();
        if self.regexp {
            refs.push(REGEXP_IMPORT);
        }
        if self.format {
            refs.push(IS_IMPORT);
        }
        refs
    }
}

/// Add the inferred support references to the type's import list.
///
/// References already present are not duplicated. Returns the references
/// that were newly added.
pub fn infer_imports(descriptor: &mut TypeDescriptor) -> Vec<&'static str> {
    let added: Vec<_> = SupportNeeds::of(descriptor)
        .references()
        .into_iter()
        .filter(|reference| descriptor.add_import(reference))
        .collect();
    if !added.is_empty() {
        debug!(imports = ?added, "inferred support imports");
    }
    added
}
