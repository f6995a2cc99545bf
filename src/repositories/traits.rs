use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, ContactInput};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval,
/// enabling different implementations (in-memory, file-backed, mock).
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store a new contact and return it with its assigned id.
    async fn insert(&self, input: &ContactInput) -> StoreResult<Contact>;

    /// Retrieve a single contact by id.
    async fn get(&self, id: ContactId) -> StoreResult<Contact>;

    /// Replace every editable field of an existing contact.
    async fn update(&self, id: ContactId, input: &ContactInput) -> StoreResult<Contact>;

    /// Delete a contact.
    async fn delete(&self, id: ContactId) -> StoreResult<()>;

    /// Retrieve every contact, in ascending id order.
    async fn list_all(&self) -> StoreResult<Vec<Contact>>;

    /// Contacts whose name or email contains `query`, ignoring case.
    ///
    /// An empty query returns the same records as [`ContactRepository::list_all`].
    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>>;
}
