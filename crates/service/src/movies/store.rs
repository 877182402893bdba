use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;
use super::catalog::MovieCatalog;

/// Stored title -> link mapping, in document (insertion) order.
pub type MovieMap = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Found(String),
    NotFound,
}

/// Trimmed, lower-cased form used both for storage keys and queries.
pub fn normalize_title(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-insensitive exact match; the first matching key in map order wins.
pub fn find(map: &MovieMap, query: &str) -> LookupResult {
    let query = normalize_title(query);
    if query.is_empty() {
        return LookupResult::NotFound;
    }
    map.iter()
        .find(|(key, _)| key.to_lowercase() == query)
        .map(|(_, link)| LookupResult::Found(link.clone()))
        .unwrap_or(LookupResult::NotFound)
}

/// Set `map[lower(trim(raw_key))] = trim(raw_link)`; leaves `map` untouched on blank input.
pub fn upsert(map: &mut MovieMap, raw_key: &str, raw_link: &str) -> Result<(), ServiceError> {
    let key = normalize_title(raw_key);
    let link = raw_link.trim();
    if key.is_empty() || link.is_empty() {
        return Err(ServiceError::Validation("movie name and link required".into()));
    }
    map.insert(key, link.to_string());
    Ok(())
}

/// File-backed movie catalog: reloads the document per lookup, rewrites it per add.
pub struct MovieStore {
    store: Arc<JsonMapStore<String, String>>,
}

impl MovieStore {
    /// Open the store, creating an empty document if missing.
    pub async fn new<P: Into<PathBuf>>(path: P, pretty: bool) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::with_options(path, pretty).await?;
        info!(path = %store.path().display(), "movie store ready");
        Ok(Arc::new(Self { store }))
    }

    pub async fn load(&self) -> MovieMap {
        self.store.load().await
    }

    pub async fn save(&self, map: &MovieMap) -> Result<(), ServiceError> {
        self.store.save(map).await
    }

    pub async fn search(&self, query: &str) -> LookupResult {
        if normalize_title(query).is_empty() {
            return LookupResult::NotFound;
        }
        let map = self.load().await;
        let result = find(&map, query);
        debug!(movie = %query.trim(), found = matches!(result, LookupResult::Found(_)), "movie search");
        result
    }

    pub async fn add(&self, movie: &str, link: &str) -> Result<(), ServiceError> {
        self.store.update_map(|map| upsert(map, movie, link)).await?;
        info!(movie = %normalize_title(movie), "movie added");
        Ok(())
    }
}

#[async_trait]
impl MovieCatalog for MovieStore {
    async fn search(&self, query: &str) -> LookupResult { self.search(query).await }
    async fn add(&self, movie: &str, link: &str) -> Result<(), ServiceError> { self.add(movie, link).await }
}
