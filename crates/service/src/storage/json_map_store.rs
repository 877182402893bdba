use std::{hash::Hash, io::ErrorKind, path::{Path, PathBuf}, sync::Arc};
use indexmap::IndexMap;
use serde_json::Value;
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Nothing is cached: every call reads the whole document and every mutation
/// rewrites it. Entries keep their document order. A missing, empty or corrupt
/// document reads as an empty map; single entries that do not decode are skipped.
/// Mutations inside one process are serialized; other writers are last-writer-wins.
pub struct JsonMapStore<K, V> {
    file_path: PathBuf,
    pretty: bool,
    write_lock: Mutex<()>,
    _entry: std::marker::PhantomData<fn() -> (K, V)>,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned,
    V: serde::Serialize + serde::de::DeserializeOwned,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        Self::with_options(path, true).await
    }

    pub async fn with_options<P: Into<PathBuf>>(path: P, pretty: bool) -> Result<Arc<Self>, ServiceError> {
        let store = Self {
            file_path: path.into(),
            pretty,
            write_lock: Mutex::new(()),
            _entry: std::marker::PhantomData,
        };
        store.ensure_exists().await?;
        Ok(Arc::new(store))
    }

    pub fn path(&self) -> &Path { &self.file_path }

    /// Write an empty map when the document does not exist yet.
    pub async fn ensure_exists(&self) -> Result<(), ServiceError> {
        if fs::try_exists(&self.file_path).await.map_err(ServiceError::storage)? {
            return Ok(());
        }
        common::env::ensure_parent_dir(&self.file_path)
            .await
            .map_err(ServiceError::storage)?;
        self.write_all(&IndexMap::new()).await?;
        debug!(path = %self.file_path.display(), "initialized empty store");
        Ok(())
    }

    /// Read the whole map from disk.
    pub async fn load(&self) -> IndexMap<K, V> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return IndexMap::new(),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "store unreadable; using empty map");
                return IndexMap::new();
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return IndexMap::new();
        }
        let object = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                warn!(path = %self.file_path.display(), "store is not a JSON object; using empty map");
                return IndexMap::new();
            }
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "store is not valid JSON; using empty map");
                return IndexMap::new();
            }
        };
        object
            .into_iter()
            .filter_map(|(key, value)| {
                let entry = decode_entry(&key, value);
                if entry.is_none() {
                    warn!(path = %self.file_path.display(), %key, "skipping undecodable store entry");
                }
                entry
            })
            .collect()
    }

    /// Overwrite the document with the full map.
    pub async fn save(&self, map: &IndexMap<K, V>) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.write_all(map).await
    }

    /// Load, apply `f`, and persist only if `f` succeeds.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut IndexMap<K, V>) -> Result<T, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await;
        let out = f(&mut map)?;
        self.write_all(&map).await?;
        Ok(out)
    }

    /// Write to a sibling temp file and rename it over the document, so
    /// readers see either the old or the new map, never a partial one.
    async fn write_all(&self, map: &IndexMap<K, V>) -> Result<(), ServiceError> {
        let data = if self.pretty {
            serde_json::to_vec_pretty(map)
        } else {
            serde_json::to_vec(map)
        }
        .map_err(ServiceError::storage)?;
        let tmp = self.temp_path();
        fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
        fs::rename(&tmp, &self.file_path).await.map_err(ServiceError::storage)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Decode one document entry; numbers and booleans are retried as strings.
fn decode_entry<K, V>(key: &str, value: Value) -> Option<(K, V)>
where
    K: serde::de::DeserializeOwned,
    V: serde::de::DeserializeOwned,
{
    let key = serde_json::from_value(Value::String(key.to_string())).ok()?;
    let value = match value {
        Value::Number(n) => serde_json::from_value(Value::Number(n.clone()))
            .or_else(|_| serde_json::from_value(Value::String(n.to_string())))
            .ok()?,
        Value::Bool(b) => serde_json::from_value(Value::Bool(b))
            .or_else(|_| serde_json::from_value(Value::String(b.to_string())))
            .ok()?,
        other => serde_json::from_value(other).ok()?,
    };
    Some((key, value))
}
