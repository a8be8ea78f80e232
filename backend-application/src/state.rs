use std::sync::Arc;

use backend_domain::RuntimeConfig;

use crate::{EventStore, Metrics};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub store: Arc<EventStore>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: RuntimeConfig, store: Arc<EventStore>) -> Self {
        Self {
            config,
            store,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
