//! In-process contact table shared by the store implementations.

use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ContactInput};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contacts keyed by id plus the next id to hand out.
///
/// `next_id` only ever grows, so ids freed by deletes are never reissued.
#[derive(Debug, Clone)]
pub(crate) struct ContactTable {
    next_id: ContactId,
    rows: BTreeMap<ContactId, Contact>,
}

/// On-disk shape of a [`ContactTable`].
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TableSnapshot {
    next_id: ContactId,
    contacts: Vec<Contact>,
}

impl Default for ContactTable {
    fn default() -> Self {
        Self {
            next_id: ContactId::from(1),
            rows: BTreeMap::new(),
        }
    }
}

impl ContactTable {
    /// Store `input` under the next free id.
    ///
    /// Fails with `IdsExhausted` rather than wrapping the counter.
    pub(crate) fn insert(&mut self, input: &ContactInput) -> StoreResult<Contact> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(StoreError::IdsExhausted)?;

        let contact = Contact::from_input(id, input.clone());
        self.rows.insert(id, contact.clone());
        Ok(contact)
    }

    pub(crate) fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.rows.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    pub(crate) fn update(&mut self, id: ContactId, input: &ContactInput) -> StoreResult<Contact> {
        let row = self.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *row = Contact::from_input(id, input.clone());
        Ok(row.clone())
    }

    pub(crate) fn delete(&mut self, id: ContactId) -> StoreResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    pub(crate) fn list_all(&self) -> Vec<Contact> {
        self.rows.values().cloned().collect()
    }

    pub(crate) fn search(&self, query: &str) -> Vec<Contact> {
        let needle = query.to_lowercase();
        self.rows
            .values()
            .filter(|contact| contact.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            next_id: self.next_id,
            contacts: self.list_all(),
        }
    }

    /// Rebuild a table from a snapshot.
    ///
    /// The id counter is raised past the highest stored id if the snapshot
    /// carries a stale value. Repeated ids, or a stored id with no successor,
    /// make the snapshot corrupt.
    pub(crate) fn from_snapshot(snapshot: TableSnapshot) -> StoreResult<Self> {
        let mut rows = BTreeMap::new();
        for contact in snapshot.contacts {
            let id = contact.id;
            if rows.insert(id, contact).is_some() {
                return Err(StoreError::Corrupt(format!("duplicate contact id {}", id)));
            }
        }

        let floor = match rows.keys().next_back() {
            Some(last) => last.next().ok_or_else(|| {
                StoreError::Corrupt(format!("contact id {} leaves no room for new ids", last))
            })?,
            None => ContactId::from(1),
        };

        Ok(Self {
            next_id: snapshot.next_id.max(floor),
            rows,
        })
    }
}
