//! Field-level validation errors.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The editable fields of a contact, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Address,
}

impl ContactField {
    /// The field name as used in payloads and error maps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping of field to human-readable error message.
///
/// Holds at most one message per field. Serializes as a JSON object keyed
/// by field name, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<ContactField, String>);

impl ValidationErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field` unless one is already present.
    pub fn add(&mut self, field: ContactField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// The message recorded for `field`, if any.
    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
