use async_trait::async_trait;
use tokio::sync::RwLock;

use backend_domain::{Event, EventRepository};

/// Volatile repository for tests and throwaway runs.
#[derive(Default)]
pub struct InMemoryEventRepository {
    events: RwLock<Option<Vec<Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(Some(events)),
        }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self) -> anyhow::Result<Option<Vec<Event>>> {
        Ok(self.events.read().await.clone())
    }

    async fn save_events(&self, events: &[Event]) -> anyhow::Result<()> {
        *self.events.write().await = Some(events.to_vec());
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
