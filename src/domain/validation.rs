//! Contact validation.
//!
//! Validation is an ordered list of field validators. Each validator is a pure
//! function from a candidate record to an optional `(field, message)` pair;
//! [`validate_contact`] runs them all and keeps the first message per field.

use super::email::{is_accepted_email, INVALID_EMAIL_MESSAGE};
use super::errors::{ContactField, ValidationErrors};
use crate::models::ContactInput;

/// Maximum number of characters in a contact name.
pub const NAME_MAX_CHARS: usize = 100;

/// Maximum number of characters in a contact phone.
pub const PHONE_MAX_CHARS: usize = 11;

/// Maximum number of characters in a contact email.
pub const EMAIL_MAX_CHARS: usize = 254;

/// Message for a missing required value.
pub const REQUIRED_MESSAGE: &str = "Este campo es obligatorio.";

/// A single field check.
pub type FieldValidator = fn(&ContactInput) -> Option<(ContactField, String)>;

/// Every check, in the order they run.
pub const CONTACT_VALIDATORS: [FieldValidator; 8] = [
    name_present,
    name_length,
    phone_present,
    phone_length,
    email_present,
    email_length,
    email_accepted,
    address_present,
];

/// Run every validator against `candidate`.
///
/// Returns `Ok(())` when the record may be written, otherwise the collected
/// field errors.
pub fn validate_contact(candidate: &ContactInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for validator in CONTACT_VALIDATORS {
        if let Some((field, message)) = validator(candidate) {
            errors.add(field, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn required(field: ContactField, value: &str) -> Option<(ContactField, String)> {
    value
        .trim()
        .is_empty()
        .then(|| (field, REQUIRED_MESSAGE.to_string()))
}

fn max_chars(field: ContactField, value: &str, limit: usize) -> Option<(ContactField, String)> {
    let count = value.chars().count();
    (count > limit).then(|| {
        (
            field,
            format!(
                "Asegúrese de que este valor tenga como máximo {} caracteres (tiene {}).",
                limit, count
            ),
        )
    })
}

fn name_present(c: &ContactInput) -> Option<(ContactField, String)> {
    required(ContactField::Name, &c.name)
}

fn name_length(c: &ContactInput) -> Option<(ContactField, String)> {
    max_chars(ContactField::Name, &c.name, NAME_MAX_CHARS)
}

fn phone_present(c: &ContactInput) -> Option<(ContactField, String)> {
    required(ContactField::Phone, &c.phone)
}

fn phone_length(c: &ContactInput) -> Option<(ContactField, String)> {
    max_chars(ContactField::Phone, &c.phone, PHONE_MAX_CHARS)
}

fn email_present(c: &ContactInput) -> Option<(ContactField, String)> {
    required(ContactField::Email, &c.email)
}

fn email_length(c: &ContactInput) -> Option<(ContactField, String)> {
    max_chars(ContactField::Email, &c.email, EMAIL_MAX_CHARS)
}

fn email_accepted(c: &ContactInput) -> Option<(ContactField, String)> {
    (!is_accepted_email(&c.email)).then(|| (ContactField::Email, INVALID_EMAIL_MESSAGE.to_string()))
}

fn address_present(c: &ContactInput) -> Option<(ContactField, String)> {
    required(ContactField::Address, &c.address)
}
