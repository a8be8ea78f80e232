use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{event_handlers, ops_handlers, registration_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/events",
            get(event_handlers::list_events).post(event_handlers::create_event),
        )
        .route(
            "/api/events/featured",
            get(event_handlers::featured_events),
        )
        .route(
            "/api/events/featured/upcoming",
            get(event_handlers::upcoming_open_events),
        )
        .route("/api/events/recent", get(event_handlers::recent_events))
        .route("/api/events/related", get(event_handlers::related_events))
        .route("/api/events/drop-in", get(event_handlers::drop_in_sessions))
        .route(
            "/api/events/search/:query",
            get(event_handlers::search_events),
        )
        .route(
            "/api/events/category/:name",
            get(event_handlers::events_by_category),
        )
        .route(
            "/api/events/level/:name",
            get(event_handlers::events_by_level),
        )
        .route(
            "/api/events/:id",
            get(event_handlers::get_event)
                .patch(event_handlers::update_event)
                .delete(event_handlers::delete_event),
        )
        .route(
            "/api/events/:id/join",
            post(registration_handlers::join_event),
        )
        .route(
            "/api/events/:id/leave",
            post(registration_handlers::leave_event),
        )
        .route("/api/ops/health/live", get(ops_handlers::health_live))
        .route("/api/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/api/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::{Days, Local};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use backend_application::EventStore;
    use backend_domain::{RuntimeConfig, EVENT_DATE_FORMAT};
    use backend_infrastructure::{InMemoryEventRepository, SeedFileSource};

    use super::*;

    async fn app() -> Router {
        let store = Arc::new(EventStore::new(
            Arc::new(InMemoryEventRepository::with_events(Vec::new())),
            Arc::new(SeedFileSource::builtin()),
        ));
        store.initialize(false).await.expect("initialize");
        build_router(AppState::new(RuntimeConfig::default(), store))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = call_raw(app, method, uri, body).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn call_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, bytes.to_vec())
    }

    fn in_days(days: u64) -> String {
        let date = Local::now().date_naive() + Days::new(days);
        date.format(EVENT_DATE_FORMAT).to_string()
    }

    #[tokio::test]
    async fn create_then_fetch_by_id() {
        let app = app().await;
        let (status, created) = call(
            &app,
            Method::POST,
            "/api/events",
            Some(json!({"title": "Tuesday Doubles", "eventDate": "Mar 20, 2025", "level": "Advanced"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["eventDate"], "2025-03-20");
        assert_eq!(created["status"], "Open");
        assert_eq!(created["currentParticipants"], 0);
        assert_eq!(created["maxParticipants"], 12);

        let id = created["id"].as_str().expect("id");
        let (status, fetched) = call(&app, Method::GET, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, listed) = call(&app, Method::GET, "/api/events/level/Advanced", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn missing_event_is_404_with_kind() {
        let app = app().await;
        let (status, body) = call(&app, Method::GET, "/api/events/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");

        let (status, body) = call(&app, Method::POST, "/api/events/nope/join", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");
    }

    #[tokio::test]
    async fn bad_payloads_are_400() {
        let app = app().await;
        let (status, body) = call(&app, Method::POST, "/api/events", Some(json!({"title": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "validation");

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/events",
            Some(json!({"title": "Late", "eventDate": "someday"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "validation");

        let (status, _) = call(&app, Method::POST, "/api/events", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn registration_conflicts_are_409() {
        let app = app().await;
        let (_, created) = call(
            &app,
            Method::POST,
            "/api/events",
            Some(json!({"title": "Tiny Court", "maxParticipants": 1})),
        )
        .await;
        let id = created["id"].as_str().expect("id").to_string();

        let (status, _) = call(&app, Method::POST, &format!("/api/events/{id}/leave"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, joined) = call(&app, Method::POST, &format!("/api/events/{id}/join"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(joined["currentParticipants"], 1);
        assert_eq!(joined["status"], "Full");

        let (status, body) = call(&app, Method::POST, &format!("/api/events/{id}/join"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["kind"], "capacity");

        let (status, left) = call(&app, Method::POST, &format!("/api/events/{id}/leave"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(left["status"], "Open");

        let (_, metrics) = call_raw(&app, Method::GET, "/api/ops/metrics/prometheus", None).await;
        let metrics = String::from_utf8(metrics).expect("utf8");
        assert!(metrics.contains("court_registration_joins_total 1\n"));
        assert!(metrics.contains("court_registration_rejections_total 2\n"));
    }

    #[tokio::test]
    async fn patch_and_delete() {
        let app = app().await;
        let (_, created) = call(&app, Method::POST, "/api/events", Some(json!({"title": "Old"}))).await;
        let id = created["id"].as_str().expect("id").to_string();

        let (status, updated) = call(
            &app,
            Method::PATCH,
            &format!("/api/events/{id}"),
            Some(json!({"title": "New", "city": "Burnaby"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "New");
        assert_eq!(updated["city"], "Burnaby");
        assert_eq!(updated["createdAt"], created["createdAt"]);

        let (status, _) = call(&app, Method::DELETE, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, Method::DELETE, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn query_routes() {
        let app = app().await;
        for (title, category, city, date) in [
            ("Beginner Drop-in", "Drop-in", "Burnaby", in_days(1)),
            ("Coed League", "League", "Vancouver", in_days(2)),
            ("Advanced Drop-in", "Drop-in", "Vancouver", in_days(3)),
        ] {
            let (status, _) = call(
                &app,
                Method::POST,
                "/api/events",
                Some(json!({"title": title, "category": category, "city": city, "eventDate": date})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, featured) = call(&app, Method::GET, "/api/events/featured/upcoming", None).await;
        assert_eq!(featured[0]["title"], "Beginner Drop-in");

        let (_, found) = call(&app, Method::GET, "/api/events/search/coed%20league", None).await;
        assert_eq!(found.as_array().map(Vec::len), Some(1));

        let (_, drop_in) = call(
            &app,
            Method::GET,
            "/api/events/drop-in?city=Vancouver&date=This%20Week",
            None,
        )
        .await;
        assert_eq!(drop_in.as_array().map(Vec::len), Some(1));
        assert_eq!(drop_in[0]["title"], "Advanced Drop-in");

        let (status, _) = call(&app, Method::GET, "/api/events/drop-in?date=someday", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, related) = call(&app, Method::GET, "/api/events/related?category=Drop-in", None).await;
        assert_eq!(related.as_array().map(Vec::len), Some(2));

        let (_, recent) = call(&app, Method::GET, "/api/events/recent?limit=1", None).await;
        assert_eq!(recent.as_array().map(Vec::len), Some(1));

        let (_, by_category) = call(&app, Method::GET, "/api/events/category/League", None).await;
        assert_eq!(by_category[0]["title"], "Coed League");
    }

    #[tokio::test]
    async fn health_routes() {
        let app = app().await;
        let (status, _) = call_raw(&app, Method::GET, "/api/ops/health/live", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call_raw(&app, Method::GET, "/api/ops/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
