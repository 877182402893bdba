//! Transport-independent dispatch of movie API calls.

use common::types::MovieResponse;
use serde_json::Value;
use tracing::debug;

use crate::errors::ActionError;
use super::catalog::MovieCatalog;
use super::store::LookupResult;

pub const ADDED_MESSAGE: &str = "Movie added successfully";

/// Fields of an inbound call. Missing or unusable fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: Option<String>,
    pub movie: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
    Add,
}

impl ActionRequest {
    /// Lenient body parsing: anything other than a JSON object yields an empty request.
    pub fn from_slice(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(obj)) => Self {
                action: obj.get("action").and_then(field_text),
                movie: obj.get("movie").and_then(field_text),
                link: obj.get("link").and_then(field_text),
            },
            Ok(_) | Err(_) => Self::default(),
        }
    }

    pub fn action(&self) -> Result<Action, ActionError> {
        match self.action.as_deref() {
            Some("search") => Ok(Action::Search),
            Some("add") => Ok(Action::Add),
            _ => Err(ActionError::InvalidAction),
        }
    }
}

/// Scalars are accepted as text; `false`, `null` and containers count as missing.
fn field_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".into()),
        _ => None,
    }
}

/// Run one call against the catalog.
pub async fn handle(catalog: &dyn MovieCatalog, req: &ActionRequest) -> Result<MovieResponse, ActionError> {
    match req.action()? {
        Action::Search => {
            let movie = req.movie.as_deref().unwrap_or_default();
            Ok(match catalog.search(movie).await {
                LookupResult::Found(link) => MovieResponse::Found { link },
                LookupResult::NotFound => MovieResponse::NotFound,
            })
        }
        Action::Add => {
            let (Some(movie), Some(link)) = (req.movie.as_deref(), req.link.as_deref()) else {
                debug!("add without movie or link");
                return Err(ActionError::InvalidInput);
            };
            catalog.add(movie, link).await?;
            Ok(MovieResponse::Success { message: ADDED_MESSAGE.into() })
        }
    }
}

impl ActionError {
    pub fn to_response(&self) -> MovieResponse {
        MovieResponse::error(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::ServiceError;
    use crate::movies::store::{find, upsert, MovieMap};

    /// In-memory catalog counting writes.
    #[derive(Default)]
    struct MemCatalog {
        map: Mutex<MovieMap>,
        saves: Mutex<usize>,
        fail_writes: bool,
    }

    #[async_trait]
    impl MovieCatalog for MemCatalog {
        async fn search(&self, query: &str) -> LookupResult {
            find(&self.map.lock().unwrap(), query)
        }

        async fn add(&self, movie: &str, link: &str) -> Result<(), ServiceError> {
            let mut next = self.map.lock().unwrap().clone();
            upsert(&mut next, movie, link)?;
            if self.fail_writes {
                return Err(ServiceError::Storage("disk full".into()));
            }
            *self.map.lock().unwrap() = next;
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn req(body: &str) -> ActionRequest {
        ActionRequest::from_slice(body.as_bytes())
    }

    #[tokio::test]
    async fn add_then_search_round_trip() {
        let cat = MemCatalog::default();
        let out = handle(&cat, &req(r#"{"action":"add","movie":"Inception","link":"http://a/b"}"#)).await.unwrap();
        assert_eq!(out, MovieResponse::Success { message: "Movie added successfully".into() });

        let out = handle(&cat, &req(r#"{"action":"search","movie":"INCEPTION"}"#)).await.unwrap();
        assert_eq!(out, MovieResponse::Found { link: "http://a/b".into() });
    }

    #[tokio::test]
    async fn search_without_movie_is_not_found() {
        let cat = MemCatalog::default();
        for body in [r#"{"action":"search"}"#, r#"{"action":"search","movie":"   "}"#] {
            assert_eq!(handle(&cat, &req(body)).await.unwrap(), MovieResponse::NotFound);
        }
    }

    #[tokio::test]
    async fn add_with_missing_fields_is_invalid_input() {
        let cat = MemCatalog::default();
        for body in [
            r#"{"action":"add","movie":"","link":"http://x"}"#,
            r#"{"action":"add","movie":"Inception"}"#,
            r#"{"action":"add","link":"http://x"}"#,
            r#"{"action":"add","movie":"Inception","link":" "}"#,
        ] {
            let err = handle(&cat, &req(body)).await.unwrap_err();
            assert!(matches!(err, ActionError::InvalidInput), "{body}");
            assert_eq!(err.to_response(), MovieResponse::error("Movie name and link required"));
        }
        assert_eq!(*cat.saves.lock().unwrap(), 0);
        assert!(cat.map.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_or_missing_action_is_invalid() {
        let cat = MemCatalog::default();
        for body in [r#"{"action":"delete"}"#, "{}", "not json", "[1,2]", ""] {
            let err = handle(&cat, &req(body)).await.unwrap_err();
            assert!(matches!(err, ActionError::InvalidAction), "{body}");
            assert_eq!(err.to_response(), MovieResponse::error("Invalid action"));
        }
    }

    #[tokio::test]
    async fn write_failure_maps_to_storage_error() {
        let cat = MemCatalog { fail_writes: true, ..Default::default() };
        let err = handle(&cat, &req(r#"{"action":"add","movie":"A","link":"B"}"#)).await.unwrap_err();
        assert!(matches!(err, ActionError::Storage(_)));
        assert_eq!(err.to_string(), "Failed to save movie");
    }

    #[test]
    fn scalar_fields_are_stringified() {
        let r = req(r#"{"action":"add","movie":1984,"link":true}"#);
        assert_eq!(r.movie.as_deref(), Some("1984"));
        assert_eq!(r.link.as_deref(), Some("1"));

        let r = req(r#"{"action":"search","movie":null,"link":false}"#);
        assert_eq!(r.movie, None);
        assert_eq!(r.link, None);
    }
}
