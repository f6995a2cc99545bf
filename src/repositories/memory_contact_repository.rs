use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, ContactInput};
use crate::repositories::table::ContactTable;
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Contact repository kept entirely in process memory.
///
/// Contents are lost when the process exits. Each call takes the table lock
/// once, so single inserts, updates and deletes are atomic with respect to
/// each other.
#[derive(Default)]
pub struct InMemoryContactRepository {
    table: RwLock<ContactTable>,
}

impl InMemoryContactRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, input: &ContactInput) -> StoreResult<Contact> {
        let contact = self.table.write().await.insert(input)?;
        tracing::debug!(id = %contact.id, "Inserted contact");
        Ok(contact)
    }

    async fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.table.read().await.get(id)
    }

    async fn update(&self, id: ContactId, input: &ContactInput) -> StoreResult<Contact> {
        let contact = self.table.write().await.update(id, input)?;
        tracing::debug!(id = %id, "Updated contact");
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> StoreResult<()> {
        self.table.write().await.delete(id)?;
        tracing::debug!(id = %id, "Deleted contact");
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.table.read().await.list_all())
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        Ok(self.table.read().await.search(query))
    }
}
