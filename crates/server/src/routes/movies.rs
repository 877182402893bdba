use axum::{body::Bytes, extract::State, Json};

use common::types::MovieResponse;
use service::errors::ActionError;
use service::movies::{handle, ActionRequest};

use super::AppState;
use crate::errors::ApiError;
use crate::metrics;

/// POST handler for `search` / `add` calls. The body is parsed leniently so
/// malformed JSON is answered as an invalid action rather than a 4xx rejection.
pub async fn movie_action(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MovieResponse>, ApiError> {
    let req = ActionRequest::from_slice(&body);
    let outcome = handle(state.catalog.as_ref(), &req).await;
    metrics::record(&outcome);
    Ok(Json(outcome?))
}

pub async fn method_not_allowed() -> ApiError {
    metrics::REQUEST_ERRORS_TOTAL.inc();
    ApiError(ActionError::MethodNotAllowed)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use service::movies::MovieStore;
    use tower::ServiceExt;

    use crate::routes::{build_cors, build_router, AppState};

    async fn app() -> (Router, PathBuf) {
        let path = std::env::temp_dir().join(format!("routes_movies_{}.json", uuid::Uuid::new_v4()));
        let store = MovieStore::new(&path, true).await.expect("store init");
        (build_router(AppState::new(store), build_cors()), path)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn add_and_search_over_http() {
        let (app, path) = app().await;
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/movies",
            r#"{"action":"add","movie":"Inception","link":"http://a/b"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success", "message": "Movie added successfully"}));

        // legacy path shares the same store
        let (status, body) =
            call(&app, Method::POST, "/movies.php", r#"{"action":"search","movie":"INCEPTION"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "found", "link": "http://a/b"}));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn non_post_is_method_not_allowed() {
        let (app, path) = app().await;
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let (status, body) = call(&app, method, "/api/movies", "").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body, json!({"status": "error", "message": "Method not allowed"}));
        }
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_action() {
        let (app, path) = app().await;
        let (status, body) = call(&app, Method::POST, "/api/movies", "{oops").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "error", "message": "Invalid action"}));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn cors_preflight_allows_post() {
        let (app, path) = app().await;
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/movies")
            .header(header::ORIGIN, "https://bot.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let headers = res.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "POST");
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn health_ok() {
        let (app, path) = app().await;
        let (status, body) = call(&app, Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
        let _ = tokio::fs::remove_file(&path).await;
    }
}
