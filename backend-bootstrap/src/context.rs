use std::sync::Arc;

use tracing::{error, info};

use backend_application::{AppState, EventStore};
use backend_domain::{EventRepository, RuntimeConfig, SeedSource};
use backend_infrastructure::{AppConfig, JsonFileEventRepository, SeedFileSource};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Self {
        let runtime_config = config.to_runtime_config();
        let (repo, seed) = storage(&runtime_config);
        Self::from_parts(runtime_config, repo, seed).await
    }

    /// A failed first load does not stop the server: it starts degraded,
    /// reports not-ready and retries the load on the next request.
    pub async fn from_parts(
        config: RuntimeConfig,
        repo: Arc<dyn EventRepository>,
        seed: Arc<dyn SeedSource>,
    ) -> Self {
        let store = Arc::new(EventStore::new(repo, seed));
        match store.initialize(config.force_reset).await {
            Ok(count) => info!(count, force_reset = config.force_reset, "event collection ready"),
            Err(err) => error!("event collection unavailable, starting degraded: {}", err),
        }
        Self {
            state: AppState::new(config, store),
        }
    }
}

pub fn storage(config: &RuntimeConfig) -> (Arc<dyn EventRepository>, Arc<dyn SeedSource>) {
    let repo = JsonFileEventRepository::new(&config.data_dir);
    info!(path = %repo.path().display(), "using json event storage");
    let seed = SeedFileSource::new(config.seed_path.as_deref());
    (Arc::new(repo), Arc::new(seed))
}
