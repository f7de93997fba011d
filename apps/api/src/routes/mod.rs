pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::digest::handlers as digest;
use crate::matching::handlers as jobs;
use crate::preferences::handlers as preferences;
use crate::saved::handlers as saved;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // Preferences
        .route(
            "/api/v1/preferences",
            get(preferences::handle_get_preferences).put(preferences::handle_put_preferences),
        )
        // Saved jobs
        .route("/api/v1/saved", get(saved::handle_list_saved))
        .route("/api/v1/saved/:id/toggle", post(saved::handle_toggle_saved))
        // Digest
        .route("/api/v1/digest", get(digest::handle_get_digest))
        .route("/api/v1/digest/text", get(digest::handle_get_digest_text))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::storage::InMemoryStore;

    fn app() -> Router {
        build_router(AppState::for_tests(InMemoryStore::new()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn frontend_prefs() -> Value {
        json!({
            "roleKeywords": "frontend",
            "preferredLocations": ["Bangalore"],
            "preferredMode": ["Hybrid"],
            "experienceLevel": "1-3",
            "skills": "react",
            "minMatchScore": 40
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "tracker-api");
        let catalog = crate::catalog::Catalog::embedded().unwrap();
        assert_eq!(body["catalog_jobs"], catalog.len());
        assert_eq!(body["digest_size"], crate::digest::DEFAULT_DIGEST_SIZE);
    }

    #[tokio::test]
    async fn test_list_jobs_without_preferences() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_preferences"], false);
        assert_eq!(body["min_match_score"], 40);
        assert_eq!(body["sort"], "latest");
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(body["total"], jobs.len());
        assert!(!jobs.is_empty());
        let days: Vec<u64> = jobs
            .iter()
            .map(|j| j["postedDaysAgo"].as_u64().unwrap())
            .collect();
        assert!(days.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_unknown_filter_and_sort_fall_back() {
        let app = app();
        let (_, all) = send(&app, Method::GET, "/api/v1/jobs", None).await;
        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/jobs?location=Atlantis&sort=relevance",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sort"], "latest");
        assert_eq!(body["total"], all["total"]);
    }

    #[tokio::test]
    async fn test_filters_apply() {
        let (_, body) = send(
            &app(),
            Method::GET,
            "/api/v1/jobs?mode=remote&source=LinkedIn",
            None,
        )
        .await;
        for job in body["jobs"].as_array().unwrap() {
            assert_eq!(job["mode"], "Remote");
            assert_eq!(job["source"], "LinkedIn");
        }
    }

    #[tokio::test]
    async fn test_preferences_round_trip_and_drive_scoring() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/preferences",
            Some(frontend_prefs()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_preferences"], true);

        let (_, loaded) = send(&app, Method::GET, "/api/v1/preferences", None).await;
        assert_eq!(loaded["preferences"], frontend_prefs());

        let (_, body) = send(
            &app,
            Method::GET,
            "/api/v1/jobs?sort=match&only_matches=true",
            None,
        )
        .await;
        let jobs = body["jobs"].as_array().unwrap();
        assert!(!jobs.is_empty());
        let scores: Vec<u64> = jobs
            .iter()
            .map(|j| j["matchScore"].as_u64().unwrap())
            .collect();
        assert!(scores.iter().all(|s| *s >= 40));
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_only_matches_accepts_unrecognized_values() {
        let app = app();
        send(&app, Method::PUT, "/api/v1/preferences", Some(frontend_prefs())).await;

        let (_, all) = send(&app, Method::GET, "/api/v1/jobs", None).await;
        let (_, restricted) = send(&app, Method::GET, "/api/v1/jobs?only_matches=true", None).await;
        assert!(restricted["total"].as_u64() < all["total"].as_u64());

        for raw in ["1", "yes", "bogus"] {
            let uri = format!("/api/v1/jobs?only_matches={raw}");
            let (status, body) = send(&app, Method::GET, &uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["total"], all["total"]);
        }
    }

    #[tokio::test]
    async fn test_preferences_are_per_session() {
        let app = app();
        send(
            &app,
            Method::PUT,
            "/api/v1/preferences?session=alice",
            Some(frontend_prefs()),
        )
        .await;
        let (_, bob) = send(&app, Method::GET, "/api/v1/preferences?session=bob", None).await;
        assert_eq!(bob["has_preferences"], false);
    }

    #[tokio::test]
    async fn test_get_job_and_missing_job() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/v1/jobs/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job"]["id"], 1);
        assert_eq!(body["saved"], false);

        let (status, body) = send(&app, Method::GET, "/api/v1/jobs/99999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_toggle_saved_and_list() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/api/v1/saved/2/toggle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["saved"], true);
        assert_eq!(body["changed"], true);

        let (_, saved) = send(&app, Method::GET, "/api/v1/saved", None).await;
        assert_eq!(saved["ids"], json!([2]));
        assert_eq!(saved["jobs"][0]["id"], 2);

        let (_, detail) = send(&app, Method::GET, "/api/v1/jobs/2", None).await;
        assert_eq!(detail["saved"], true);

        let (_, body) = send(&app, Method::POST, "/api/v1/saved/2/toggle", None).await;
        assert_eq!(body["saved"], false);
        let (_, saved) = send(&app, Method::GET, "/api/v1/saved", None).await;
        assert_eq!(saved["ids"], json!([]));
    }

    #[tokio::test]
    async fn test_toggle_unknown_job_is_noop() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/api/v1/saved/99999/toggle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], false);
        let (_, saved) = send(&app, Method::GET, "/api/v1/saved", None).await;
        assert_eq!(saved["ids"], json!([]));
    }

    #[tokio::test]
    async fn test_digest_requires_preferences() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/digest", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_digest_is_frozen_for_the_day() {
        let app = app();
        send(&app, Method::PUT, "/api/v1/preferences", Some(frontend_prefs())).await;

        let (status, first) = send(&app, Method::GET, "/api/v1/digest", None).await;
        assert_eq!(status, StatusCode::OK);
        let jobs = first["jobs"].as_array().unwrap();
        assert!(jobs.len() <= 10);
        assert!(jobs.iter().all(|j| j["matchScore"].as_u64().unwrap() >= 40));

        // Changing preferences does not alter today's stored digest...
        let mut other = frontend_prefs();
        other["minMatchScore"] = json!(100);
        send(&app, Method::PUT, "/api/v1/preferences", Some(other)).await;
        let (_, second) = send(&app, Method::GET, "/api/v1/digest", None).await;
        assert_eq!(first, second);

        // ...unless a refresh is requested.
        let (_, refreshed) = send(&app, Method::GET, "/api/v1/digest?refresh=true", None).await;
        assert!(refreshed["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .all(|j| j["matchScore"] == 100));
    }

    #[tokio::test]
    async fn test_digest_unrecognized_refresh_keeps_stored_digest() {
        let app = app();
        send(&app, Method::PUT, "/api/v1/preferences", Some(frontend_prefs())).await;
        let (_, first) = send(&app, Method::GET, "/api/v1/digest", None).await;

        let mut other = frontend_prefs();
        other["minMatchScore"] = json!(100);
        send(&app, Method::PUT, "/api/v1/preferences", Some(other)).await;

        let (status, second) = send(&app, Method::GET, "/api/v1/digest?refresh=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_digest_text_is_plain_text() {
        let app = app();
        send(&app, Method::PUT, "/api/v1/preferences", Some(frontend_prefs())).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/digest/text")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("Jobs For You"));
    }
}
