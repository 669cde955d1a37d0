use serde::{Deserialize, Serialize};
use std::fmt;

/// Content-derived identifier assigned to a packet.
///
/// Shape: `<prefix>-<12 hex>`, optionally extended with `-<6 hex>` (path
/// disambiguator) and `-<n>` (numeric tie-break). The type does not validate
/// the shape; it exists so identifiers and paths cannot be mixed up in
/// signatures.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the packet is stored under: `<uid>.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uid {
    fn from(value: &str) -> Self {
        Uid::new(value)
    }
}
