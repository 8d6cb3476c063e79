//! Named string-shape checks (`Email`, `URL`, `UUIDv4`, ...).
//!
//! In the configuration each predicate is its own boolean key on a rule table.
//! In memory they collapse into a [`FormatSet`], so adding a predicate means
//! adding one enum variant instead of another struct field.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

macro_rules! format_predicates {
    ($($variant:ident => $key:literal),+ $(,)?) => {
        /// A single format check that the generated code delegates to the
        /// validation-support library.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum FormatPredicate {
            $($variant,)+
        }

        impl FormatPredicate {
            /// Every predicate, in declaration order.
            pub const ALL: &'static [FormatPredicate] = &[$(FormatPredicate::$variant,)+];

            /// Configuration key (and template key) of the predicate.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(FormatPredicate::$variant => $key,)+
                }
            }
        }

        impl FromStr for FormatPredicate {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok(FormatPredicate::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}

format_predicates! {
    Email => "Email",
    EmailFormat => "EmailFormat",
    Url => "URL",
    RequestUrl => "RequestURL",
    RequestUri => "RequestURI",
    Alpha => "Alpha",
    Digit => "Digit",
    Alphanumeric => "Alphanumeric",
    UtfLetter => "UTFLetter",
    UtfDigit => "UTFDigit",
    UtfLetterNumeric => "UTFLetterNumeric",
    UtfNumeric => "UTFNumeric",
    LowerCase => "LowerCase",
    UpperCase => "UpperCase",
    Hexadecimal => "Hexadecimal",
    HexColor => "HexColor",
    RgbColor => "RGBColor",
    Int => "Int",
    Float => "Float",
    UuidV3 => "UUIDv3",
    UuidV4 => "UUIDv4",
    UuidV5 => "UUIDv5",
    Uuid => "UUID",
    CreditCard => "CreditCard",
    Isbn10 => "ISBN10",
    Isbn13 => "ISBN13",
    Isbn => "ISBN",
    Json => "JSON",
    Ascii => "ASCII",
    PrintableAscii => "PrintableASCII",
    Multibyte => "Multibyte",
    FullWidth => "FullWidth",
    HalfWidth => "HalfWidth",
    VariableWidth => "VariableWidth",
    Base64 => "Base64",
    DataUri => "DataURI",
    E164 => "E164",
    CountryCode2 => "CountryCode2",
    CountryCode3 => "CountryCode3",
    DialString => "DialString",
    Mac => "MAC",
    Ip => "IP",
    IpV4 => "IPv4",
    IpV6 => "IPv6",
    Subdomain => "Subdomain",
    Domain => "Domain",
    DnsName => "DNSName",
    Host => "Host",
    Port => "Port",
    MongoId => "MongoID",
    Latitude => "Latitude",
    Longitude => "Longitude",
    Ssn => "SSN",
    Semver => "Semver",
}

impl fmt::Display for FormatPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of format predicates enabled on one rule.
///
/// Deserializes from the flattened remainder of a rule table: every key naming
/// a predicate is read as a boolean, other keys are skipped. Serializes back as
/// `<Name>: true` for each enabled predicate so templates can test `rule.Email`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSet(BTreeSet<FormatPredicate>);

impl FormatSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, predicate: FormatPredicate) -> bool {
        self.0.insert(predicate)
    }

    pub fn contains(&self, predicate: FormatPredicate) -> bool {
        self.0.contains(&predicate)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = FormatPredicate> + '_ {
        self.0.iter().copied()
    }
}

impl Serialize for FormatSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for predicate in self.iter() {
            map.serialize_entry(predicate.as_str(), &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormatSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FormatSetVisitor;

        impl<'de> Visitor<'de> for FormatSetVisitor {
            type Value = FormatSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of format predicate flags")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FormatSet, A::Error> {
                let mut set = FormatSet::new();
                while let Some(key) = map.next_key::<String>()? {
                    match key.parse::<FormatPredicate>() {
                        Ok(predicate) => {
                            let enabled: bool = map.next_value().map_err(|e| {
                                de::Error::custom(format!("{key}: {e}"))
                            })?;
                            if enabled {
                                set.insert(predicate);
                            }
                        }
                        Err(()) => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(FormatSetVisitor)
    }
}
