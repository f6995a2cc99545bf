use async_trait::async_trait;
use contactos_mcp_server::domain::ContactId;
use contactos_mcp_server::error::{StoreError, StoreResult};
use contactos_mcp_server::models::{Contact, ContactInput};
use contactos_mcp_server::repositories::ContactRepository;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that tracks
/// method calls for verification and can be switched offline to simulate
/// an unavailable store.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<BTreeMap<ContactId, Contact>>>,
    next_id: Arc<Mutex<u64>>,
    call_counts: Arc<Mutex<BTreeMap<String, usize>>>,
    offline: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(BTreeMap::new())),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail with an I/O error (or recover).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Number of mutating calls (insert, update, delete) seen so far.
    pub fn mutation_count(&self) -> usize {
        self.get_call_count("insert") + self.get_call_count("update") + self.get_call_count("delete")
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    /// Remove a contact behind the service's back.
    pub fn remove_directly(&self, id: ContactId) {
        self.contacts.lock().unwrap().remove(&id);
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "store offline",
            )));
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn insert(&self, input: &ContactInput) -> StoreResult<Contact> {
        self.track_call("insert")?;

        let mut next_id = self.next_id.lock().unwrap();
        let id = ContactId::from(*next_id);
        *next_id += 1;

        let contact = Contact::from_input(id, input.clone());
        self.contacts.lock().unwrap().insert(id, contact.clone());
        Ok(contact)
    }

    async fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.track_call("get")?;

        let contacts = self.contacts.lock().unwrap();
        contacts.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: ContactId, input: &ContactInput) -> StoreResult<Contact> {
        self.track_call("update")?;

        let mut contacts = self.contacts.lock().unwrap();
        if !contacts.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        let contact = Contact::from_input(id, input.clone());
        contacts.insert(id, contact.clone());
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> StoreResult<()> {
        self.track_call("delete")?;

        let mut contacts = self.contacts.lock().unwrap();
        contacts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list_all")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.values().cloned().collect())
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        self.track_call("search")?;

        let contacts = self.contacts.lock().unwrap();
        let query_lower = query.to_lowercase();
        Ok(contacts
            .values()
            .filter(|contact| contact.matches_lowercase(&query_lower))
            .cloned()
            .collect())
    }
}
