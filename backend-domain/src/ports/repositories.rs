use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{Event, NewEvent};

/// Persistence for the whole event collection as one blob.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// `None` when nothing has been stored yet.
    async fn load_events(&self) -> anyhow::Result<Option<Vec<Event>>>;
    async fn save_events(&self, events: &[Event]) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Supplies the records written when the collection is seeded or reset.
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn load_seed(&self, today: NaiveDate) -> anyhow::Result<Vec<NewEvent>>;
}
