//! ContactId value object.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A type-safe wrapper for store-assigned contact ids.
///
/// Ids are positive integers handed out by the store on insert. They are
/// never reused, so a `ContactId` that once referred to a deleted record
/// will keep resolving to `NotFound`.
///
/// # Example
///
/// ```
/// use contactos_mcp_server::domain::ContactId;
///
/// let id: ContactId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(u64);

impl ContactId {
    /// Get the raw integer value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` at the top of the range.
    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for ContactId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for ContactId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

// Serde support - serialize as a plain integer
impl Serialize for ContactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Self)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
