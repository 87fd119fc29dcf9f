use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use nimbus_common::StoreError;

/// Object-safe storage backend: whole-value JSON blobs keyed by name.
pub trait KvBackend: Send {
    fn read_value(&self, key: &str) -> Option<Value>;
    fn write_value(&self, key: &str, value: &Value);
}

/// One `<key>.json` file per key under a root directory.
pub struct JsonBackend {
    root: PathBuf,
}

impl JsonBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Backend rooted at the platform data dir (`<data>/nimbus`).
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let root = dirs::data_dir().ok_or(StoreError::NoDataDir)?.join("nimbus");
        Ok(Self::new(root))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn try_read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let raw = match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value =
            serde_json::from_str(&raw).map_err(|e| StoreError::Serde(e.to_string()))?;
        Ok(Some(value))
    }

    fn try_write(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let raw = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Serde(e.to_string()))?;
        fs::write(self.path_for(key), raw)?;
        Ok(())
    }
}

impl KvBackend for JsonBackend {
    fn read_value(&self, key: &str) -> Option<Value> {
        match self.try_read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "store read failed, discarding");
                None
            }
        }
    }

    fn write_value(&self, key: &str, value: &Value) {
        if let Err(e) = self.try_write(key, value) {
            warn!(key, error = %e, "store write failed");
        }
    }
}

/// In-memory backend for tests and throwaway (incognito-style) state.
#[derive(Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, Value>>,
}

impl KvBackend for MemoryBackend {
    fn read_value(&self, key: &str) -> Option<Value> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn write_value(&self, key: &str, value: &Value) {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.clone());
        }
    }
}

/// Typed facade over a backend. `read` never fails; `write` never surfaces
/// an error.
pub struct Store {
    backend: Box<dyn KvBackend>,
}

impl Store {
    pub fn new(backend: Box<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Store under the platform data dir, falling back to memory when no
    /// data dir exists (containers, stripped-down CI).
    pub fn json() -> Self {
        match JsonBackend::in_data_dir() {
            Ok(backend) => Self::new(Box::new(backend)),
            Err(e) => {
                warn!(error = %e, "persistence is in-memory only");
                Self::memory()
            }
        }
    }

    pub fn memory() -> Self {
        Self::new(Box::new(MemoryBackend::default()))
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.backend.read_value(key) {
            Some(value) => match serde_json::from_value(value) {
                Ok(v) => v,
                Err(e) => {
                    warn!(key, error = %e, "store value has wrong shape, using default");
                    default
                }
            },
            None => default,
        }
    }

    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                debug!(key, "store write");
                self.backend.write_value(key, &v);
            }
            Err(e) => warn!(key, error = %e, "store write dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Blob {
        name: String,
        count: u32,
    }

    #[test]
    fn memory_roundtrip() {
        let store = Store::memory();
        let blob = Blob {
            name: "history".into(),
            count: 3,
        };
        store.write("blob", &blob);
        let back: Blob = store.read(
            "blob",
            Blob {
                name: String::new(),
                count: 0,
            },
        );
        assert_eq!(back, blob);
    }

    #[test]
    fn missing_key_returns_default() {
        let store = Store::memory();
        let got: Vec<String> = store.read("nope", vec!["fallback".to_string()]);
        assert_eq!(got, vec!["fallback".to_string()]);
    }

    #[test]
    fn wrong_shape_returns_default() {
        let store = Store::memory();
        store.write("key", &vec![1, 2, 3]);
        let got: u32 = store.read("key", 7);
        assert_eq!(got, 7);
    }

    #[test]
    fn json_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(Box::new(JsonBackend::new(dir.path().to_path_buf())));
        store.write("session", &vec!["https://example.com".to_string()]);
        let got: Vec<String> = store.read("session", Vec::new());
        assert_eq!(got, vec!["https://example.com".to_string()]);
        assert!(dir.path().join("session.json").exists());
    }

    #[test]
    fn json_backend_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let store = Store::new(Box::new(JsonBackend::new(dir.path().to_path_buf())));
        let got: HashMap<String, String> = store.read("settings", HashMap::new());
        assert!(got.is_empty());
    }

    #[test]
    fn corrupt_file_maps_to_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let backend = JsonBackend::new(dir.path().to_path_buf());
        assert!(matches!(
            backend.try_read("settings"),
            Err(StoreError::Serde(_))
        ));
        assert!(matches!(backend.try_read("absent"), Ok(None)));
    }

    #[test]
    fn unwritable_root_maps_to_io_error() {
        let backend = JsonBackend::new(PathBuf::from("/proc/definitely/not/writable"));
        assert!(matches!(
            backend.try_write("x", &Value::from(1u32)),
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn json_backend_unwritable_root_is_silent() {
        let store = Store::new(Box::new(JsonBackend::new(PathBuf::from(
            "/proc/definitely/not/writable",
        ))));
        store.write("x", &1u32);
        let got: u32 = store.read("x", 9);
        assert_eq!(got, 9);
    }
}
