// Event collection store
//
// Owns the in-memory mirror of the persisted collection. Every mutation holds
// the collection write lock across its read-modify-write, so writers are
// serialized and a failed save leaves the mirror untouched.

use std::collections::HashSet;
use std::sync::Arc;

use backend_domain::{
    apply_registration_delta, Event, EventId, EventPatch, EventRepository, NewEvent,
    RegistrationDelta, SeedSource,
};
use chrono::{Local, Utc};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::AppError;

#[derive(Default)]
struct Collection {
    events: Vec<Event>,
    loaded: bool,
}

pub struct EventStore {
    repo: Arc<dyn EventRepository>,
    seed: Arc<dyn SeedSource>,
    collection: RwLock<Collection>,
}

impl EventStore {
    pub fn new(repo: Arc<dyn EventRepository>, seed: Arc<dyn SeedSource>) -> Self {
        Self {
            repo,
            seed,
            collection: RwLock::new(Collection::default()),
        }
    }

    /// Loads the stored collection, seeding it when nothing is stored yet or
    /// when `force_reset` is set. Returns the number of events now held.
    pub async fn initialize(&self, force_reset: bool) -> Result<usize, AppError> {
        let mut collection = self.collection.write().await;
        let stored = if force_reset {
            None
        } else {
            self.repo.load_events().await.map_err(persistence_error)?
        };
        let events = match stored {
            Some(events) => events,
            None => {
                let seeded = self.build_seed().await?;
                self.repo
                    .save_events(&seeded)
                    .await
                    .map_err(persistence_error)?;
                info!(count = seeded.len(), force_reset, "seeded event collection");
                seeded
            }
        };
        collection.events = events;
        collection.loaded = true;
        Ok(collection.events.len())
    }

    pub async fn is_loaded(&self) -> bool {
        self.collection.read().await.loaded
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.repo.ping().await.map_err(AppError::Persistence)
    }

    /// Snapshot of every event in storage order.
    pub async fn get_all(&self) -> Result<Vec<Event>, AppError> {
        {
            let collection = self.collection.read().await;
            if collection.loaded {
                return Ok(collection.events.clone());
            }
        }
        let mut collection = self.collection.write().await;
        self.ensure_loaded(&mut collection).await?;
        Ok(collection.events.clone())
    }

    pub async fn get_by_id(&self, id: &EventId) -> Result<Option<Event>, AppError> {
        let events = self.get_all().await?;
        Ok(events.into_iter().find(|event| event.id == *id))
    }

    pub async fn add(&self, mut payload: NewEvent) -> Result<Event, AppError> {
        let mut collection = self.collection.write().await;
        self.ensure_loaded(&mut collection).await?;

        let requested = payload
            .id
            .take()
            .map(EventId::from)
            .filter(|id| !id.as_str().is_empty());
        let id = match requested {
            Some(id) if id.is_reserved() => {
                return Err(AppError::Validation(format!("event id {} is reserved", id)));
            }
            Some(id) if collection.events.iter().any(|event| event.id == id) => {
                return Err(AppError::Validation(format!("event id {} already exists", id)));
            }
            Some(id) => id,
            None => unique_id(&collection.events),
        };
        let event = payload.into_event(id, Utc::now())?;

        let mut next = collection.events.clone();
        next.push(event.clone());
        self.persist(&mut collection, next).await?;
        Ok(event)
    }

    /// Shallow merge of `patch` over the stored record. An empty patch returns
    /// the record without writing.
    pub async fn update(&self, id: &EventId, patch: &EventPatch) -> Result<Event, AppError> {
        if patch.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(id.clone()));
        }
        self.mutate(id, |event| patch.apply_to(event).map_err(AppError::from))
            .await
    }

    pub async fn join(&self, id: &EventId) -> Result<Event, AppError> {
        self.mutate(id, |event| {
            apply_registration_delta(event, RegistrationDelta::Join).map_err(AppError::from)
        })
        .await
    }

    pub async fn leave(&self, id: &EventId) -> Result<Event, AppError> {
        self.mutate(id, |event| {
            apply_registration_delta(event, RegistrationDelta::Leave).map_err(AppError::from)
        })
        .await
    }

    pub async fn delete(&self, id: &EventId) -> Result<Event, AppError> {
        let mut collection = self.collection.write().await;
        self.ensure_loaded(&mut collection).await?;
        let index = position(&collection.events, id)?;
        let mut next = collection.events.clone();
        let removed = next.remove(index);
        self.persist(&mut collection, next).await?;
        Ok(removed)
    }

    async fn mutate<F>(&self, id: &EventId, change: F) -> Result<Event, AppError>
    where
        F: FnOnce(&Event) -> Result<Event, AppError>,
    {
        let mut collection = self.collection.write().await;
        self.ensure_loaded(&mut collection).await?;
        let index = position(&collection.events, id)?;
        let updated = change(&collection.events[index])?;

        let mut next = collection.events.clone();
        next[index] = updated.clone();
        self.persist(&mut collection, next).await?;
        Ok(updated)
    }

    async fn ensure_loaded(&self, collection: &mut Collection) -> Result<(), AppError> {
        if collection.loaded {
            return Ok(());
        }
        match self.repo.load_events().await.map_err(persistence_error)? {
            Some(events) => {
                collection.events = events;
                collection.loaded = true;
            }
            // Nothing stored yet: reads see an empty collection until the
            // first successful write.
            None => collection.events.clear(),
        }
        Ok(())
    }

    async fn persist(&self, collection: &mut Collection, next: Vec<Event>) -> Result<(), AppError> {
        self.repo.save_events(&next).await.map_err(persistence_error)?;
        collection.events = next;
        collection.loaded = true;
        Ok(())
    }

    async fn build_seed(&self) -> Result<Vec<Event>, AppError> {
        let today = Local::now().date_naive();
        let payloads = self
            .seed
            .load_seed(today)
            .await
            .map_err(persistence_error)?;

        let mut events: Vec<Event> = Vec::with_capacity(payloads.len());
        let mut seen = HashSet::new();
        for mut payload in payloads {
            let id = match payload.id.take().map(EventId::from) {
                Some(id) if !id.as_str().is_empty() && !id.is_reserved() && !seen.contains(&id) => {
                    id
                }
                _ => unique_id(&events),
            };
            let title = payload.title.clone();
            match payload.into_event(id, Utc::now()) {
                Ok(event) => {
                    seen.insert(event.id.clone());
                    events.push(event);
                }
                Err(err) => warn!(title = %title, "skipping seed record: {}", err),
            }
        }
        Ok(events)
    }
}

fn position(events: &[Event], id: &EventId) -> Result<usize, AppError> {
    events
        .iter()
        .position(|event| event.id == *id)
        .ok_or_else(|| AppError::NotFound(id.clone()))
}

fn unique_id(events: &[Event]) -> EventId {
    loop {
        let candidate = EventId::generate();
        if !events.iter().any(|event| event.id == candidate) {
            return candidate;
        }
    }
}

fn persistence_error(err: anyhow::Error) -> AppError {
    error!("event storage failed: {:#}", err);
    AppError::Persistence(err)
}
