//! Domain value objects and validation rules.
//!
//! This module contains the type-safe contact id, the email acceptance rule
//! and the ordered field validators that guard every write to the store.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod validation;

pub use contact_id::ContactId;
pub use email::{is_accepted_email, ACCEPTED_EMAIL_SUFFIXES, INVALID_EMAIL_MESSAGE};
pub use errors::{ContactField, ValidationErrors};
pub use validation::{
    validate_contact, FieldValidator, CONTACT_VALIDATORS, EMAIL_MAX_CHARS, NAME_MAX_CHARS,
    PHONE_MAX_CHARS, REQUIRED_MESSAGE,
};
