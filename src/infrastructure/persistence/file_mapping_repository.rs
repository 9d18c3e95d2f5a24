//! Flat-file implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Mapping store backed by an in-memory map mirrored to one JSON file.
///
/// Reads are served from memory under a shared lock; every mutation runs
/// under the exclusive lock and rewrites the full snapshot before the lock
/// is released. Holding the write lock across read-increment-write makes
/// [`MappingRepository::record_visit`] linearizable process-wide, so
/// concurrent redirects never lose an increment.
///
/// The snapshot is written to a sibling `.tmp` file and renamed over the
/// target, so a crash mid-write leaves the previous snapshot intact. When
/// the write fails, the in-memory change is rolled back and the error is
/// surfaced, keeping memory and disk in agreement.
pub struct FileMappingRepository {
    path: PathBuf,
    mappings: RwLock<HashMap<String, UrlMapping>>,
}

impl FileMappingRepository {
    /// Opens the snapshot at `path`, creating parent directories as needed.
    ///
    /// A missing file yields an empty store; an unreadable or corrupt file
    /// is a startup error.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mappings = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let records: Vec<UrlMapping> = serde_json::from_slice(&bytes)?;
                let mut map = HashMap::with_capacity(records.len());
                for record in records {
                    if map.insert(record.short_code.clone(), record).is_some() {
                        anyhow::bail!(
                            "corrupt snapshot {}: duplicate short code",
                            path.display()
                        );
                    }
                }
                map
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            mappings: RwLock::new(mappings),
        })
    }

    /// Rewrites the snapshot file from the given state.
    ///
    /// Callers must hold the write lock so that snapshot writes are
    /// serialized and always reflect a consistent state.
    async fn persist(&self, mappings: &HashMap<String, UrlMapping>) -> Result<(), AppError> {
        let mut records: Vec<&UrlMapping> = mappings.values().collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.short_code.cmp(&b.short_code))
        });

        let bytes = serde_json::to_vec_pretty(&records).map_err(|e| {
            AppError::internal(
                "Failed to serialize mapping snapshot",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let tmp_path = self.path.with_extension("tmp");

        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| snapshot_io_error("write", &tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| snapshot_io_error("rename", &self.path, e))?;

        Ok(())
    }
}

fn snapshot_io_error(operation: &str, path: &std::path::Path, e: std::io::Error) -> AppError {
    tracing::error!(%operation, path = %path.display(), error = %e, "snapshot write failed");
    AppError::internal(
        "Failed to persist mapping snapshot",
        json!({ "operation": operation }),
    )
}

#[async_trait]
impl MappingRepository for FileMappingRepository {
    async fn insert(&self, mapping: UrlMapping) -> Result<(), AppError> {
        let mut mappings = self.mappings.write().await;

        if mappings.contains_key(&mapping.short_code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": mapping.short_code }),
            ));
        }

        let code = mapping.short_code.clone();
        mappings.insert(code.clone(), mapping);

        if let Err(e) = self.persist(&mappings).await {
            mappings.remove(&code);
            return Err(e);
        }

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.mappings.read().await.get(code).cloned())
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self
            .mappings
            .read()
            .await
            .values()
            .find(|m| m.long_url == long_url)
            .cloned())
    }

    async fn update(&self, mapping: &UrlMapping) -> Result<(), AppError> {
        let mut mappings = self.mappings.write().await;

        let Some(stored) = mappings.get_mut(&mapping.short_code) else {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": mapping.short_code }),
            ));
        };

        let previous = std::mem::replace(stored, mapping.clone());

        if let Err(e) = self.persist(&mappings).await {
            mappings.insert(mapping.short_code.clone(), previous);
            return Err(e);
        }

        Ok(())
    }

    async fn record_visit(
        &self,
        code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<UrlMapping>, AppError> {
        // One write-lock hold covers the read, the increment, and the
        // snapshot rewrite.
        let mut mappings = self.mappings.write().await;

        let Some(stored) = mappings.get_mut(code) else {
            return Ok(None);
        };

        let previous = stored.clone();
        stored.record_visit(visited_at);
        let updated = stored.clone();

        if let Err(e) = self.persist(&mappings).await {
            mappings.insert(code.to_string(), previous);
            return Err(e);
        }

        Ok(Some(updated))
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        let mappings = self.mappings.read().await;

        let mut records: Vec<UrlMapping> = mappings.values().cloned().collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.short_code.cmp(&b.short_code))
        });

        Ok(records)
    }
}
