//! Contact model representing a single address-book record.

use crate::domain::ContactId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Store-assigned identifier, immutable after creation
    pub id: ContactId,

    /// Full name (at most 100 characters)
    pub name: String,

    /// Phone number kept as free text (at most 11 characters)
    pub phone: String,

    /// Email address ending in `.com` or `.cl`
    pub email: String,

    /// Postal address, unbounded
    pub address: String,
}

impl Contact {
    /// Attach an id to candidate field values.
    pub fn from_input(id: ContactId, input: ContactInput) -> Self {
        Self {
            id,
            name: input.name,
            phone: input.phone,
            email: input.email,
            address: input.address,
        }
    }

    /// The editable fields of this contact.
    pub fn to_input(&self) -> ContactInput {
        ContactInput {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }

    /// Whether `needle` occurs in the name or the email.
    ///
    /// `needle` must already be lowercased; matching is case-insensitive
    /// substring containment, so an empty needle matches every contact.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }

    /// Short label used in listings and confirmations, e.g. `Ana - ana@test.cl`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.email)
    }
}

/// Candidate field values for a new or edited contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(default)]
pub struct ContactInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl ContactInput {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
    }
}

/// Replacement values for an existing contact.
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ContactPatch {
    /// Merge this patch onto an existing contact, producing the candidate to validate.
    pub fn apply_to(self, existing: &Contact) -> ContactInput {
        ContactInput {
            name: self.name.unwrap_or_else(|| existing.name.clone()),
            phone: self.phone.unwrap_or_else(|| existing.phone.clone()),
            email: self.email.unwrap_or_else(|| existing.email.clone()),
            address: self.address.unwrap_or_else(|| existing.address.clone()),
        }
    }
}

impl From<ContactInput> for ContactPatch {
    fn from(input: ContactInput) -> Self {
        Self {
            name: Some(input.name),
            phone: Some(input.phone),
            email: Some(input.email),
            address: Some(input.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Contact {
        Contact::from_input(
            ContactId::from(1),
            ContactInput::new("Ana", "12345678901", "ana@test.cl", "Calle 1"),
        )
    }

    #[test]
    fn test_contact_label() {
        assert_eq!(ana().label(), "Ana - ana@test.cl");
    }

    #[test]
    fn test_matches_name_or_email() {
        let contact = Contact {
            email: "Foo@Bar.com".to_string(),
            ..ana()
        };
        assert!(contact.matches_lowercase("foo"));
        assert!(contact.matches_lowercase("an"));
        assert!(contact.matches_lowercase("bar.c"));
        assert!(contact.matches_lowercase(""));
        assert!(!contact.matches_lowercase("calle"));
        assert!(!contact.matches_lowercase("1234"));
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let patch = ContactPatch {
            phone: Some("99999999999".to_string()),
            ..Default::default()
        };
        let merged = patch.apply_to(&ana());
        assert_eq!(
            merged,
            ContactInput::new("Ana", "99999999999", "ana@test.cl", "Calle 1")
        );
    }

    #[test]
    fn test_full_input_replaces_every_field() {
        let replacement = ContactInput::new("Bea", "1", "bea@x.com", "Otra");
        let merged = ContactPatch::from(replacement.clone()).apply_to(&ana());
        assert_eq!(merged, replacement);
    }

    #[test]
    fn test_contact_serialization() {
        let json = serde_json::to_value(ana()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Ana",
                "phone": "12345678901",
                "email": "ana@test.cl",
                "address": "Calle 1",
            })
        );
    }
}
