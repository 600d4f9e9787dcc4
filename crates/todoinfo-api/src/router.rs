//! Router configuration and server setup.

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/example", get(handlers::get_example))
        .route("/api/history", get(handlers::get_history))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Starts the API server.
pub async fn serve(config: ApiConfig, state: AppState) -> Result<(), std::io::Error> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);
    axum::serve(listener, create_router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};
    use todoinfo_graph::{FetchConfig, GraphError, TaskProvider};
    use todoinfo_models::{Task, TaskListInfo};
    use todoinfo_persistence::StatsStore;

    const GOOD_TOKEN: &str = "good-token";

    /// Serves two lists to `GOOD_TOKEN` and rejects everything else.
    struct FakeGraph {
        broken_list: Option<&'static str>,
    }

    #[async_trait]
    impl TaskProvider for FakeGraph {
        async fn list_task_lists(
            &self,
            token: &str,
        ) -> todoinfo_graph::Result<Vec<TaskListInfo>> {
            if token != GOOD_TOKEN {
                return Err(GraphError::Api {
                    code: "InvalidAuthenticationToken".into(),
                    message: "Access token is empty.".into(),
                });
            }
            Ok(vec![
                TaskListInfo::new("home", "🏠Home"),
                TaskListInfo::new("work", "💻Work"),
                TaskListInfo::new("default", "Tasks").with_wellknown("defaultList"),
            ])
        }

        async fn list_tasks(
            &self,
            _token: &str,
            list_id: &str,
        ) -> todoinfo_graph::Result<Vec<Task>> {
            if self.broken_list == Some(list_id) {
                return Err(GraphError::Http {
                    status: 500,
                    body: "boom".into(),
                });
            }
            let now = Utc::now();
            Ok(match list_id {
                "home" => vec![
                    Task::new("Hang a painting", now - Duration::days(20)),
                    Task::new("Take out the trash", now - Duration::days(4)),
                ],
                "work" => vec![Task::new("Answer the letter from Bob", now - Duration::days(10))],
                _ => vec![Task::new("Should never be fetched", now - Duration::days(99))],
            })
        }
    }

    /// The snapshot directory lives as long as the returned `TempDir`.
    fn make_server(broken_list: Option<&'static str>) -> (TestServer, TempDir) {
        let dir = tempdir().unwrap();

        let state = AppState::new(
            ApiConfig::default(),
            Arc::new(FakeGraph { broken_list }),
            FetchConfig::default(),
            StatsStore::new(dir.path()),
        );
        (TestServer::new(create_router(state)).unwrap(), dir)
    }

    fn bearer(token: &str) -> axum::http::HeaderValue {
        axum::http::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (server, _dir) = make_server(None);

        let response = server.get("/api/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let (server, _dir) = make_server(None);

        let response = server
            .get("/api/stats")
            .add_header(header::AUTHORIZATION, bearer(GOOD_TOKEN))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["total_age"], 34);
        assert_eq!(body["list_ages"][0]["title"], "🏠Home");
        assert_eq!(body["list_ages"][0]["oldest_task"], "Hang a painting");
        assert_eq!(body["rotten_tasks"].as_array().unwrap().len(), 2);
        assert_eq!(body["upcoming_tasks"][0]["task_name"], "Take out the trash");
    }

    #[tokio::test]
    async fn test_stats_full_task_list() {
        let (server, _dir) = make_server(None);

        let response = server
            .get("/api/stats?full=true")
            .add_header(header::AUTHORIZATION, bearer(GOOD_TOKEN))
            .await;

        let body: serde_json::Value = response.json();
        assert_eq!(body["upcoming_tasks"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_stats_requires_token() {
        let (server, _dir) = make_server(None);

        let response = server.get("/api/stats").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("unauthorized"));
    }

    #[tokio::test]
    async fn test_stats_invalid_token() {
        let (server, _dir) = make_server(None);

        let response = server
            .get("/api/stats")
            .add_header(header::AUTHORIZATION, bearer("expired"))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_stats_graph_failure() {
        let (server, _dir) = make_server(Some("work"));

        let response = server
            .get("/api/stats")
            .add_header(header::AUTHORIZATION, bearer(GOOD_TOKEN))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_example_endpoint() {
        let (server, _dir) = make_server(None);

        let response = server.get("/api/example").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["total_age"], 43);
        assert_eq!(body["rotten_tasks"][0]["emoji"], "🤢");
    }

    #[tokio::test]
    async fn test_history_endpoint() {
        let (server, _dir) = make_server(None);

        let response = server.get("/api/history?days=7").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["days"], 7);
        assert!(body["points"].as_array().unwrap().is_empty());

        let response = server.get("/api/history?days=0").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let (server, _dir) = make_server(None);

        let response = server
            .get("/api/health")
            .add_header(
                header::ORIGIN,
                axum::http::HeaderValue::from_static("http://localhost:3000"),
            )
            .await;

        assert!(response.headers().contains_key("access-control-allow-origin"));
    }
}
