use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::HistoryError;
use crate::{PostMetrics, ScoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: String,
    pub metrics: PostMetrics,
    pub result: ScoreResult,
}

/// Scored posts kept in a JSON file, newest first.
pub struct ScoreHistory {
    path: PathBuf,
    capacity: usize,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl ScoreHistory {
    pub async fn load(path: PathBuf, capacity: usize) -> Result<Self, HistoryError> {
        let entries: Vec<HistoryEntry> = if path.exists() {
            let data = tokio::fs::read_to_string(&path).await?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded score history");

        Ok(Self {
            path,
            capacity: capacity.max(1),
            entries: Mutex::new(entries),
        })
    }

    pub async fn list(&self) -> Vec<HistoryEntry> {
        let guard = self.entries.lock().await;
        guard.clone()
    }

    pub async fn get(&self, id: &str) -> Option<HistoryEntry> {
        let guard = self.entries.lock().await;
        guard.iter().find(|entry| entry.id == id).cloned()
    }

    pub async fn record(
        &self,
        metrics: PostMetrics,
        result: ScoreResult,
    ) -> Result<HistoryEntry, HistoryError> {
        metrics.validate()?;
        let created_at = Utc::now().to_rfc3339();
        let entry = HistoryEntry {
            id: entry_id(&metrics, &created_at)?,
            created_at,
            metrics,
            result,
        };

        let mut guard = self.entries.lock().await;
        let mut next = Vec::with_capacity(self.capacity);
        next.push(entry.clone());
        next.extend(guard.iter().take(self.capacity - 1).cloned());
        self.persist(&next).await?;
        *guard = next;
        tracing::info!(id = %entry.id, score = entry.result.score, "recorded score");
        Ok(entry)
    }

    pub async fn delete(&self, id: &str) -> Result<(), HistoryError> {
        let mut guard = self.entries.lock().await;
        let next: Vec<HistoryEntry> = guard.iter().filter(|entry| entry.id != id).cloned().collect();
        if next.len() == guard.len() {
            return Err(HistoryError::NotFound(id.to_string()));
        }
        // Memory only follows a successful write.
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn persist(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

fn entry_id(metrics: &PostMetrics, created_at: &str) -> Result<String, HistoryError> {
    let payload = serde_json::to_string(metrics)?;
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(created_at.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    Ok(format!("score_{:016x}", u64::from_be_bytes(bytes)))
}

async fn ensure_dir(path: &Path) -> Result<(), HistoryError> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
