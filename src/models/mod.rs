//! Data models for the contact book.
//!
//! This module contains the stored contact record together with the input
//! shapes used to create and edit it.

pub mod contact;

pub use contact::{Contact, ContactInput, ContactPatch};
