use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    events_created: AtomicU64,
    events_updated: AtomicU64,
    events_deleted: AtomicU64,
    joins: AtomicU64,
    leaves: AtomicU64,
    registration_rejections: AtomicU64,
    persistence_errors: AtomicU64,
}

impl Metrics {
    pub fn record_created(&self) {
        self.events_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_updated(&self) {
        self.events_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_deleted(&self) {
        self.events_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_join(&self) {
        self.joins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_leave(&self) {
        self.leaves.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_registration_rejection(&self) {
        self.registration_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persistence_error(&self) {
        self.persistence_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let counters = [
            ("court_events_created_total", &self.events_created),
            ("court_events_updated_total", &self.events_updated),
            ("court_events_deleted_total", &self.events_deleted),
            ("court_registration_joins_total", &self.joins),
            ("court_registration_leaves_total", &self.leaves),
            ("court_registration_rejections_total", &self.registration_rejections),
            ("court_persistence_errors_total", &self.persistence_errors),
        ];
        counters
            .iter()
            .map(|(name, counter)| {
                format!(
                    "# TYPE {} counter\n{} {}\n",
                    name,
                    name,
                    counter.load(Ordering::Relaxed)
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_counter() {
        let metrics = Metrics::default();
        metrics.record_join();
        metrics.record_join();
        metrics.record_persistence_error();
        let text = metrics.render_prometheus();
        assert!(text.contains("court_registration_joins_total 2\n"));
        assert!(text.contains("court_persistence_errors_total 1\n"));
        assert!(text.contains("# TYPE court_events_created_total counter\n"));
    }
}
