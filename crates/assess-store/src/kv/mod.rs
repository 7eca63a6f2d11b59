//! Keyed record storage backends.
//!
//! The KV map is flat: record keys like `records/<uuid>` map to JSON blobs.
//! Writes are upserts (re-putting a key overwrites the prior value) and
//! each write is atomic per key behind the interior lock.

mod memory;

#[cfg(feature = "sqlite")]
mod sqlite;

use std::path::Path;

use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};

pub use memory::MemoryKv;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteKv;

#[derive(Debug, Clone)]
pub enum KvBackend {
    Memory,
    #[cfg(feature = "sqlite")]
    Sqlite { path: String },
}

impl Default for KvBackend {
    fn default() -> Self {
        #[cfg(feature = "sqlite")]
        {
            return KvBackend::Sqlite { path: "records.sqlite3".to_string() };
        }
        #[cfg(not(feature = "sqlite"))]
        {
            KvBackend::Memory
        }
    }
}

pub struct Kv {
    inner: RwLock<Box<dyn KvStore + Send + Sync>>,
}

impl Kv {
    pub fn open<P: AsRef<Path>>(dir: P, backend: KvBackend) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;

        let store: Box<dyn KvStore + Send + Sync> = match backend {
            KvBackend::Memory => Box::new(MemoryKv::default()),
            #[cfg(feature = "sqlite")]
            KvBackend::Sqlite { path } => Box::new(SqliteKv::open(dir.join(path))?),
        };

        Ok(Self { inner: RwLock::new(store) })
    }

    pub fn put_bytes(&self, key: &str, value: Vec<u8>) -> Result<()> {
        validate_key(key)?;
        self.inner.write().put(key, value)
    }

    pub fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        self.inner.read().get(key)
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.inner.write().delete(key)
    }

    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.put_bytes(key, serde_json::to_vec(value)?)
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(bytes) = self.get_bytes(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub fn list_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        validate_key(prefix)?;
        self.inner.read().list_prefix(prefix)
    }
}

pub trait KvStore {
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn delete(&mut self, key: &str) -> Result<()>;
    fn list_prefix(&self, prefix: &str) -> Result<Vec<String>>;
}

pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > 256 {
        return Err(anyhow!("kv key must be 1..=256 chars"));
    }
    if !key.is_ascii() {
        return Err(anyhow!("kv key must be ASCII"));
    }
    for b in key.bytes() {
        let ok = matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | b'-' | b'/' | b':');
        if !ok {
            return Err(anyhow!("kv key contains invalid char"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn memory_kv() -> Kv {
        let td = TempDir::new().unwrap();
        Kv::open(td.path(), KvBackend::Memory).unwrap()
    }

    #[test]
    fn put_same_key_overwrites() {
        let kv = memory_kv();
        kv.put_json("records/one", &serde_json::json!({"v": 1})).unwrap();
        kv.put_json("records/one", &serde_json::json!({"v": 2})).unwrap();

        let got: serde_json::Value = kv.get_json("records/one").unwrap().unwrap();
        assert_eq!(got["v"], 2);
        assert_eq!(kv.list_prefix("records/").unwrap().len(), 1);
    }

    #[test]
    fn list_prefix_filters() {
        let kv = memory_kv();
        kv.put_bytes("records/a", vec![1]).unwrap();
        kv.put_bytes("records/b", vec![2]).unwrap();
        kv.put_bytes("exports/a", vec![3]).unwrap();

        let keys = kv.list_prefix("records/").unwrap();
        assert_eq!(keys, vec!["records/a".to_string(), "records/b".to_string()]);
    }

    #[test]
    fn rejects_bad_keys() {
        let kv = memory_kv();
        assert!(kv.put_bytes("", vec![]).is_err());
        assert!(kv.put_bytes("white space", vec![]).is_err());
        assert!(kv.put_bytes("non-ascii-é", vec![]).is_err());
    }
}
