use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

use super::json_file::read_records;
use super::RecordStore;
use crate::error::{CoreError, CoreResult};
use crate::models::{Record, RecordChanges};

/// In-process store. Used by tests and by the `memory` storage backend.
#[derive(Debug)]
pub struct MemoryStore<R> {
    records: RwLock<HashMap<String, R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Build a store pre-populated with records
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id().to_string(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Seed from a JSON records file. The file is read once and never
    /// written; edits live only as long as the process.
    pub async fn load_snapshot(path: &Path) -> CoreResult<Self> {
        let records = read_records::<R>(path).await?;
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Insert or replace a record. Creation is not part of the edit
    /// endpoint; this exists for seeding.
    pub async fn insert(&self, record: R) -> Option<R> {
        let mut records = self.records.write().await;
        records.insert(record.id().to_string(), record)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn find_unique(&self, id: &str) -> CoreResult<Option<R>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn update(&self, id: &str, changes: &RecordChanges) -> CoreResult<R> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| CoreError::not_found(R::KIND, id))?;
        record.apply_changes(changes);
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> CoreResult<R> {
        let mut records = self.records.write().await;
        records
            .remove(id)
            .ok_or_else(|| CoreError::not_found(R::KIND, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;

    fn coffee() -> Expense {
        Expense {
            id: "e1".to_string(),
            title: "Coffee".to_string(),
            description: String::new(),
            amount: 4.5,
        }
    }

    #[tokio::test]
    async fn test_find_update_delete() {
        let store = MemoryStore::with_records([coffee()]);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.find_unique("e1").await.unwrap(), Some(coffee()));
        assert_eq!(store.find_unique("nope").await.unwrap(), None);

        let changes = RecordChanges {
            title: "Tea".to_string(),
            description: "Green".to_string(),
            amount: 3.0,
        };
        let updated = store.update("e1", &changes).await.unwrap();
        assert_eq!(updated.title, "Tea");
        assert_eq!(store.find_unique("e1").await.unwrap(), Some(updated.clone()));

        let deleted = store.delete("e1").await.unwrap();
        assert_eq!(deleted, updated);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_record_errors() {
        let store: MemoryStore<Expense> = MemoryStore::new();
        let changes = RecordChanges {
            title: "x".to_string(),
            description: String::new(),
            amount: 1.0,
        };

        assert!(matches!(
            store.update("ghost", &changes).await,
            Err(CoreError::RecordNotFound { .. })
        ));
        assert!(matches!(
            store.delete("ghost").await,
            Err(CoreError::RecordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_snapshot_edits_stay_in_memory() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("finboard_{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join("expenses.json");
        let original = r#"[{"id": "e1", "title": "Coffee", "description": "", "amount": 4.5}]"#;
        tokio::fs::write(&path, original).await?;

        let store: MemoryStore<Expense> = MemoryStore::load_snapshot(&path).await?;
        assert_eq!(store.find_unique("e1").await?, Some(coffee()));

        let changes = RecordChanges {
            title: "Tea".to_string(),
            description: "Green".to_string(),
            amount: 3.0,
        };
        store.update("e1", &changes).await?;
        assert_eq!(store.find_unique("e1").await?.map(|e| e.title), Some("Tea".to_string()));
        store.delete("e1").await?;

        assert_eq!(tokio::fs::read_to_string(&path).await?, original);
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_of_missing_file_is_empty() {
        let path = std::env::temp_dir()
            .join(format!("finboard_{}", uuid::Uuid::new_v4()))
            .join("income.json");
        let store: MemoryStore<Expense> = MemoryStore::load_snapshot(&path).await.unwrap();

        assert!(store.is_empty().await);
        assert!(!path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_insert_replaces() {
        let store = MemoryStore::new();
        assert!(store.insert(coffee()).await.is_none());
        let mut pricier = coffee();
        pricier.amount = 5.0;
        assert_eq!(store.insert(pricier).await, Some(coffee()));
        assert_eq!(store.len().await, 1);
    }
}
