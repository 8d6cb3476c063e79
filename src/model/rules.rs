use serde::{Deserialize, Serialize};

use super::format::{FormatPredicate, FormatSet};

/// A membership list typed by its element kind.
///
/// At most one of the three lists is expected to be populated; the validator
/// reports a union with more than one populated variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TypedList {
    pub int: Vec<i64>,
    pub float: Vec<f64>,
    pub string: Vec<String>,
}

impl TypedList {
    /// At least one int or float element.
    pub fn has_numeric(&self) -> bool {
        self.has_int() || self.has_float()
    }

    pub fn has_int(&self) -> bool {
        !self.int.is_empty()
    }

    pub fn has_float(&self) -> bool {
        !self.float.is_empty()
    }

    pub fn has_string(&self) -> bool {
        !self.string.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_numeric() && !self.has_string()
    }

    /// Number of element kinds that carry values.
    pub fn populated_variants(&self) -> usize {
        [self.has_int(), self.has_float(), self.has_string()]
            .into_iter()
            .filter(|populated| *populated)
            .count()
    }
}

/// The predicate bundle attached to a field, or to an element/branch of one
/// through `Each` and `Else`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RuleSet {
    pub r#in: TypedList,
    pub not_in: TypedList,
    /// Empty, or `[min, max]`.
    pub length: Vec<i64>,
    /// Empty, or `[min, max]` counted in runes.
    pub rune_length: Vec<i64>,
    pub r#match: String,
    pub date: String,
    pub required: bool,
    pub not_nil: bool,
    pub nil: bool,
    pub nil_or_not_empty: bool,
    pub empty: bool,
    pub multiple_of: Vec<TypedList>,
    pub each: Vec<RuleSet>,
    pub r#else: Vec<RuleSet>,
    #[serde(flatten)]
    pub formats: FormatSet,
}

impl RuleSet {
    pub fn has_match(&self) -> bool {
        !self.r#match.is_empty()
    }

    pub fn has_format(&self) -> bool {
        !self.formats.is_empty()
    }

    pub fn with_format(mut self, predicate: FormatPredicate) -> Self {
        self.formats.insert(predicate);
        self
    }
}
