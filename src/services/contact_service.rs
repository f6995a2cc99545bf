//! Contact service layer.
//!
//! Business logic for creating, editing, finding, deleting and exporting
//! contacts. Every write passes through [`validate_contact`] first.

use crate::domain::{validate_contact, ContactId};
use crate::error::{ServiceError, ServiceResult, StoreError};
use crate::export::{export_contacts_csv, CsvExport};
use crate::metrics::Metrics;
use crate::models::{Contact, ContactInput, ContactPatch};
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// A contact that has been looked up for deletion but not yet deleted.
///
/// Only [`ContactService::confirm_removal`] produces one, and
/// [`ContactService::commit_removal`] consumes it, so a delete can never be
/// committed without a successful lookup first.
#[derive(Debug)]
pub struct PendingDeletion {
    contact: Contact,
}

impl PendingDeletion {
    /// The record that will be deleted.
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn id(&self) -> ContactId {
        self.contact.id
    }
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Validate `input` and store it as a new contact.
    async fn create(&self, input: ContactInput) -> ServiceResult<Contact>;

    /// Merge `patch` onto contact `id`, validate the result and store it.
    async fn update(&self, id: ContactId, patch: ContactPatch) -> ServiceResult<Contact>;

    /// First deletion step: look up the contact to be deleted.
    async fn confirm_removal(&self, id: ContactId) -> ServiceResult<PendingDeletion>;

    /// Second deletion step: delete a previously confirmed contact.
    ///
    /// Returns the deleted record.
    async fn commit_removal(&self, pending: PendingDeletion) -> ServiceResult<Contact>;

    /// List every contact, or only those whose name or email contains `query`.
    async fn find(&self, query: Option<&str>) -> ServiceResult<Vec<Contact>>;

    /// Get a single contact.
    async fn get_one(&self, id: ContactId) -> ServiceResult<Contact>;

    /// Render the selected contacts as CSV, in selection order.
    ///
    /// Repeated ids are exported once, at their first position.
    async fn export(&self, ids: &[ContactId]) -> ServiceResult<CsvExport>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repo: Arc<dyn ContactRepository>,
    metrics: Metrics,
}

impl ContactServiceImpl {
    /// Create a new contact service on top of `repo`.
    pub fn new(repo: Arc<dyn ContactRepository>, metrics: Metrics) -> Self {
        Self { repo, metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Convert a store error, recording storage faults on the way.
    fn store_error(&self, err: StoreError) -> ServiceError {
        if err.is_unavailable() {
            self.metrics.record_storage_error();
            tracing::error!(error = %err, "Contact store unavailable");
        }
        err.into()
    }

    fn check(&self, candidate: ContactInput) -> ServiceResult<ContactInput> {
        match validate_contact(&candidate) {
            Ok(()) => Ok(candidate),
            Err(errors) => {
                self.metrics.record_validation_rejection();
                tracing::debug!(errors = %errors, "Contact rejected by validation");
                Err(ServiceError::Validation {
                    errors,
                    input: candidate,
                })
            }
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn create(&self, input: ContactInput) -> ServiceResult<Contact> {
        let input = self.check(input)?;

        let contact = self
            .repo
            .insert(&input)
            .await
            .map_err(|e| self.store_error(e))?;

        self.metrics.record_contact_created();
        tracing::info!(id = %contact.id, contact = %contact, "Contact created");
        Ok(contact)
    }

    async fn update(&self, id: ContactId, patch: ContactPatch) -> ServiceResult<Contact> {
        let existing = self.repo.get(id).await.map_err(|e| self.store_error(e))?;
        let candidate = self.check(patch.apply_to(&existing))?;

        let contact = self
            .repo
            .update(id, &candidate)
            .await
            .map_err(|e| self.store_error(e))?;

        self.metrics.record_contact_updated();
        tracing::info!(id = %id, "Contact updated");
        Ok(contact)
    }

    async fn confirm_removal(&self, id: ContactId) -> ServiceResult<PendingDeletion> {
        let contact = self.repo.get(id).await.map_err(|e| self.store_error(e))?;
        tracing::debug!(id = %id, "Contact deletion awaiting confirmation");
        Ok(PendingDeletion { contact })
    }

    async fn commit_removal(&self, pending: PendingDeletion) -> ServiceResult<Contact> {
        let contact = pending.contact;

        self.repo
            .delete(contact.id)
            .await
            .map_err(|e| self.store_error(e))?;

        self.metrics.record_contact_deleted();
        tracing::info!(id = %contact.id, contact = %contact, "Contact deleted");
        Ok(contact)
    }

    async fn find(&self, query: Option<&str>) -> ServiceResult<Vec<Contact>> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let result = match query {
            None => self.repo.list_all().await,
            Some(q) => self.repo.search(q).await,
        };
        let contacts = result.map_err(|e| self.store_error(e))?;

        self.metrics.record_search();
        tracing::debug!(query = ?query, result_count = contacts.len(), "Contacts listed");
        Ok(contacts)
    }

    async fn get_one(&self, id: ContactId) -> ServiceResult<Contact> {
        self.repo.get(id).await.map_err(|e| self.store_error(e))
    }

    async fn export(&self, ids: &[ContactId]) -> ServiceResult<CsvExport> {
        let mut seen = HashSet::new();
        let mut contacts = Vec::with_capacity(ids.len());

        for &id in ids {
            if seen.insert(id) {
                contacts.push(self.repo.get(id).await.map_err(|e| self.store_error(e))?);
            }
        }

        let export = export_contacts_csv(&contacts)?;

        self.metrics.record_export();
        tracing::info!(record_count = export.record_count, "Contacts exported to CSV");
        Ok(export)
    }
}
