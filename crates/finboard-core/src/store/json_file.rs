use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::{fs, sync::RwLock};

use super::RecordStore;
use crate::error::{CoreError, CoreResult};
use crate::models::{Record, RecordChanges};

/// JSON file-backed record store.
///
/// The file holds a JSON array of records. It is read once at open and
/// rewritten after every successful mutation; the in-memory map only
/// changes once the new file is in place.
#[derive(Debug)]
pub struct JsonFileStore<R> {
    records: RwLock<HashMap<String, R>>,
    file_path: PathBuf,
}

impl<R: Record> JsonFileStore<R> {
    /// Open the store. A missing file is an empty store; the parent
    /// directory is created so the first write can succeed.
    pub async fn open<P: Into<PathBuf>>(path: P) -> CoreResult<Self> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let records = read_records::<R>(&file_path).await?;
        log::debug!("Loaded {} {} records from {}", records.len(), R::KIND, file_path.display());

        Ok(Self {
            records: RwLock::new(records),
            file_path,
        })
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Write the map through a temp file and rename it over the old one
    async fn save(&self, records: &HashMap<String, R>) -> CoreResult<()> {
        let mut list: Vec<&R> = records.values().collect();
        list.sort_by(|a, b| a.id().cmp(b.id()));
        let data = serde_json::to_vec_pretty(&list)?;

        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, data).await?;
        fs::rename(&tmp_path, &self.file_path).await?;
        Ok(())
    }
}

/// Read a JSON array of records keyed by id. A missing file yields no
/// records; malformed content or a repeated id is a `StorageError`.
pub async fn read_records<R: Record>(file_path: &Path) -> CoreResult<HashMap<String, R>> {
    let bytes = match fs::read(file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("{} not found, starting with no {} records", file_path.display(), R::KIND);
            return Ok(HashMap::new());
        }
        Err(e) => return Err(e.into()),
    };

    let list: Vec<R> = serde_json::from_slice(&bytes).map_err(|e| CoreError::StorageError {
        message: format!("{}: {}", file_path.display(), e),
    })?;

    let mut records = HashMap::with_capacity(list.len());
    for record in list {
        let id = record.id().to_string();
        if records.insert(id.clone(), record).is_some() {
            return Err(CoreError::StorageError {
                message: format!("{}: duplicate {} id '{}'", file_path.display(), R::KIND, id),
            });
        }
    }
    Ok(records)
}

#[async_trait]
impl<R: Record> RecordStore<R> for JsonFileStore<R> {
    async fn find_unique(&self, id: &str) -> CoreResult<Option<R>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn update(&self, id: &str, changes: &RecordChanges) -> CoreResult<R> {
        let mut records = self.records.write().await;
        let mut next = records.clone();
        let record = next
            .get_mut(id)
            .ok_or_else(|| CoreError::not_found(R::KIND, id))?;
        record.apply_changes(changes);
        let updated = record.clone();

        self.save(&next).await?;
        *records = next;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> CoreResult<R> {
        let mut records = self.records.write().await;
        let mut next = records.clone();
        let removed = next
            .remove(id)
            .ok_or_else(|| CoreError::not_found(R::KIND, id))?;

        self.save(&next).await?;
        *records = next;
        Ok(removed)
    }
}
