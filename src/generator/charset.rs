//! Character classes and alphabet construction for password generation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*";

/// One selectable category of password characters.
///
/// Variant order is the canonical concatenation order of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Numbers,
    Special,
}

impl CharClass {
    pub const ALL: [Self; 4] = [
        Self::Uppercase,
        Self::Lowercase,
        Self::Numbers,
        Self::Special,
    ];

    #[must_use]
    pub const fn pool(self) -> &'static str {
        match self {
            Self::Uppercase => UPPERCASE,
            Self::Lowercase => LOWERCASE,
            Self::Numbers => NUMBERS,
            Self::Special => SPECIAL,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Numbers => "numbers",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uppercase" | "upper" => Ok(Self::Uppercase),
            "lowercase" | "lower" => Ok(Self::Lowercase),
            "numbers" | "number" | "digits" => Ok(Self::Numbers),
            "special" | "symbols" => Ok(Self::Special),
            other => Err(format!("Unknown character type: {other}")),
        }
    }
}

/// A set of selected character classes, always iterated in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharClassSet(BTreeSet<CharClass>);

impl CharClassSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn all() -> Self {
        CharClass::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, class: CharClass) -> bool {
        self.0.insert(class)
    }

    #[must_use]
    pub fn contains(&self, class: CharClass) -> bool {
        self.0.contains(&class)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CharClass> + '_ {
        self.0.iter().copied()
    }

    /// Concatenates the pools of the selected classes.
    ///
    /// Returns an empty vector for an empty set; callers reject that case
    /// before generating anything.
    #[must_use]
    pub fn alphabet(&self) -> Vec<char> {
        self.iter().flat_map(|class| class.pool().chars()).collect()
    }

    /// Comma-separated class names, the stored `character_types` form.
    #[must_use]
    pub fn to_stored(&self) -> String {
        self.iter()
            .map(CharClass::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parses a comma-separated list such as `"uppercase,numbers"`.
    pub fn parse_list(list: &str) -> Result<Self, String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(CharClass::from_str)
            .collect()
    }
}

impl FromIterator<CharClass> for CharClassSet {
    fn from_iter<I: IntoIterator<Item = CharClass>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CharClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_stored())
    }
}
