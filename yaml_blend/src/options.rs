//! Decoding options accepted by [`crate::Blender`].

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::ParseDuplicateKeysError;

/// What to do when a mapping repeats a key at the same level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeys {
    /// Fail decoding with the codec's duplicate-key diagnostic.
    #[default]
    Reject,
    /// Keep every entry. A matching override key then replaces all of them.
    Tolerate,
}

impl DuplicateKeys {
    /// Returns the policy name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Tolerate => "tolerate",
        }
    }
}

impl fmt::Display for DuplicateKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateKeys {
    type Err = ParseDuplicateKeysError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "tolerate" => Ok(Self::Tolerate),
            _ => Err(ParseDuplicateKeysError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Options applied when decoding the base and override documents.
///
/// The struct deserialises from partial input with kebab-case field names
/// (`duplicate-keys`, `strict-booleans`), so configuration layers only need
/// to name the fields they change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BlendOptions {
    /// Duplicate-key handling for both documents.
    pub duplicate_keys: DuplicateKeys,
    /// Treat only `true` and `false` as booleans, leaving YAML 1.1 spellings
    /// such as `yes` or `on` as strings.
    pub strict_booleans: bool,
}

impl BlendOptions {
    /// Returns a copy with the given duplicate-key policy.
    #[must_use]
    pub const fn with_duplicate_keys(mut self, duplicate_keys: DuplicateKeys) -> Self {
        self.duplicate_keys = duplicate_keys;
        self
    }

    /// Returns a copy with strict boolean parsing toggled.
    #[must_use]
    pub const fn with_strict_booleans(mut self, strict_booleans: bool) -> Self {
        self.strict_booleans = strict_booleans;
        self
    }
}
