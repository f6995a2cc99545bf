use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, ContactInput};
use crate::repositories::table::{ContactTable, TableSnapshot};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Contact repository persisted to a single JSON document.
///
/// The whole table is loaded on open and rewritten after every mutation.
/// Writes go to a sibling temp file that is flushed to disk and then renamed
/// over the data file; the temp file is removed if either step fails.
/// A mutation is applied to a copy of the table and only replaces the live
/// table once the write succeeded, so a failed write changes nothing.
pub struct JsonFileContactRepository {
    path: PathBuf,
    table: Mutex<ContactTable>,
}

impl JsonFileContactRepository {
    /// Open the data file at `path`, starting empty when it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let table = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: TableSnapshot = serde_json::from_slice(&bytes)?;
                ContactTable::from_snapshot(snapshot)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                ContactTable::default()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %path.display(),
            contacts = table.len(),
            "Opened contact data file"
        );

        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    /// Location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `op` to a copy of the table, persist it, then publish it.
    async fn mutate<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut ContactTable) -> StoreResult<T> + Send,
        T: Send,
    {
        let mut live = self.table.lock().await;
        let mut staged = live.clone();
        let outcome = op(&mut staged)?;

        if let Err(e) = self.persist(&staged).await {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to write contact data file");
            return Err(e);
        }

        *live = staged;
        Ok(outcome)
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    async fn persist(&self, table: &ContactTable) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(&table.snapshot())?;
        let tmp = self.temp_path();

        if let Err(e) = write_synced(&tmp, &bytes).await {
            discard_temp(&tmp).await;
            return Err(e.into());
        }

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            discard_temp(&tmp).await;
            return Err(e.into());
        }

        sync_parent_dir(&self.path).await;
        Ok(())
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn discard_temp(path: &Path) {
    // Best effort; the original error is what gets reported.
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Could not remove temp data file");
        }
    }
}

async fn sync_parent_dir(path: &Path) {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return;
    };
    // Best-effort directory sync; not every platform can open a directory.
    if let Ok(dir) = tokio::fs::File::open(parent).await {
        let _ = dir.sync_all().await;
    }
}

#[async_trait]
impl ContactRepository for JsonFileContactRepository {
    async fn insert(&self, input: &ContactInput) -> StoreResult<Contact> {
        let contact = self.mutate(|table| table.insert(input)).await?;
        tracing::debug!(id = %contact.id, "Inserted contact");
        Ok(contact)
    }

    async fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.table.lock().await.get(id)
    }

    async fn update(&self, id: ContactId, input: &ContactInput) -> StoreResult<Contact> {
        let contact = self.mutate(|table| table.update(id, input)).await?;
        tracing::debug!(id = %id, "Updated contact");
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> StoreResult<()> {
        self.mutate(|table| table.delete(id)).await?;
        tracing::debug!(id = %id, "Deleted contact");
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.table.lock().await.list_all())
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        Ok(self.table.lock().await.search(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn ana() -> ContactInput {
        ContactInput::new("Ana", "12345678901", "ana@test.cl", "Calle 1")
    }

    #[tokio::test]
    async fn test_contents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.json");

        let created = {
            let repo = JsonFileContactRepository::open(&path).await.unwrap();
            repo.insert(&ana()).await.unwrap()
        };

        let reopened = JsonFileContactRepository::open(&path).await.unwrap();
        assert_eq!(reopened.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.json");

        {
            let repo = JsonFileContactRepository::open(&path).await.unwrap();
            let first = repo.insert(&ana()).await.unwrap();
            repo.delete(first.id).await.unwrap();
        }

        let reopened = JsonFileContactRepository::open(&path).await.unwrap();
        let second = reopened.insert(&ana()).await.unwrap();
        assert_eq!(second.id, ContactId::from(2));
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contactos.json");

        let repo = JsonFileContactRepository::open(&path).await.unwrap();
        repo.insert(&ana()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.json");
        std::fs::write(&path, b"not json").unwrap();

        let result = JsonFileContactRepository::open(&path).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_table_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.json");
        let repo = JsonFileContactRepository::open(&path).await.unwrap();
        repo.insert(&ana()).await.unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(dir.path().join("contactos.json.tmp")).unwrap();

        let result = repo.insert(&ana()).await;
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.json");
        let repo = JsonFileContactRepository::open(&path).await.unwrap();

        // A non-empty directory at the data path makes the rename fail.
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let result = repo.insert(&ana()).await;
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(!dir.path().join("contactos.json.tmp").exists());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successful_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.json");
        let repo = JsonFileContactRepository::open(&path).await.unwrap();

        repo.insert(&ana()).await.unwrap();
        assert!(path.is_file());
        assert!(!dir.path().join("contactos.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_max_stored_id_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.json");
        let data = format!(
            r#"{{"next_id":1,"contacts":[{{"id":{},"name":"Ana","phone":"1","email":"ana@test.cl","address":"Calle 1"}}]}}"#,
            u64::MAX
        );
        std::fs::write(&path, data).unwrap();

        let result = JsonFileContactRepository::open(&path).await;
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_duplicate_ids_fail_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.json");
        std::fs::write(
            &path,
            r#"{"next_id":3,"contacts":[
                {"id":2,"name":"Ana","phone":"1","email":"ana@test.cl","address":"Calle 1"},
                {"id":2,"name":"Bea","phone":"2","email":"bea@test.cl","address":"Calle 2"}
            ]}"#,
        )
        .unwrap();

        let result = JsonFileContactRepository::open(&path).await;
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }
}
