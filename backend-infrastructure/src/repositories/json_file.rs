use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use backend_domain::{Event, EventRepository};

use crate::utils::write_atomically;

/// Key the collection is stored under; the file is `<data_dir>/<key>.json`.
pub const EVENTS_KEY: &str = "volleyballEvents";

/// Whole-collection JSON blob on local disk.
pub struct JsonFileEventRepository {
    path: PathBuf,
}

impl JsonFileEventRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{}.json", EVENTS_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventRepository for JsonFileEventRepository {
    async fn load_events(&self) -> anyhow::Result<Option<Vec<Event>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        let events: Vec<Event> = serde_json::from_str(&content)
            .with_context(|| format!("decoding {}", self.path.display()))?;
        debug!(count = events.len(), path = %self.path.display(), "loaded events");
        Ok(Some(events))
    }

    async fn save_events(&self, events: &[Event]) -> anyhow::Result<()> {
        let content = serde_json::to_vec(events)?;
        write_atomically(&self.path, &content)
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;
        debug!(count = events.len(), path = %self.path.display(), "saved events");
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;
        let metadata = fs::metadata(dir).await?;
        if metadata.permissions().readonly() {
            anyhow::bail!("data directory {} is read-only", dir.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use backend_domain::{EventId, NewEvent};
    use chrono::Utc;

    use super::*;

    fn sample(id: &str) -> Event {
        NewEvent::titled(format!("Session {id}"))
            .into_event(EventId::from(id), Utc::now())
            .expect("valid event")
    }

    #[tokio::test]
    async fn absent_blob_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonFileEventRepository::new(dir.path());
        assert!(repo.load_events().await.expect("load").is_none());
    }

    #[tokio::test]
    async fn saved_collection_reloads_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonFileEventRepository::new(dir.path().join("nested"));
        let events = vec![sample("b"), sample("a")];
        repo.save_events(&events).await.expect("save");

        assert!(repo.path().ends_with("volleyballEvents.json"));
        let reopened = JsonFileEventRepository::new(dir.path().join("nested"));
        assert_eq!(reopened.load_events().await.expect("load"), Some(events));
    }

    #[tokio::test]
    async fn corrupt_blob_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonFileEventRepository::new(dir.path());
        std::fs::write(repo.path(), "{not json").expect("write");
        let err = repo.load_events().await.expect_err("corrupt");
        assert!(err.to_string().contains("decoding"));
    }

    #[tokio::test]
    async fn ping_creates_the_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonFileEventRepository::new(dir.path().join("fresh"));
        repo.ping().await.expect("ping");
        assert!(dir.path().join("fresh").is_dir());
    }
}
