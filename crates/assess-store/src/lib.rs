//! Local persistence for the assessment pipeline.
//!
//! Two primitives, both owned by one [`Store`]:
//! - a flat keyed KV map for processed records (upsert-by-key, atomic per
//!   key, no secondary indexing)
//! - a content-addressed artifact store for rendered report documents

pub mod artifacts;
pub mod kv;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::artifacts::{ArtifactBackend, ArtifactStore};
use crate::kv::{Kv, KvBackend};

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root_dir: PathBuf,
    pub kv_backend: KvBackend,
    pub artifact_backend: ArtifactBackend,
    pub hash_alg: String,
}

impl StoreConfig {
    pub fn local_dev<P: AsRef<Path>>(root_dir: P) -> Result<Self> {
        let root = root_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root_dir: root,
            kv_backend: KvBackend::default(),
            artifact_backend: ArtifactBackend::default(),
            hash_alg: "sha256".to_string(),
        })
    }

    /// Memory-backed KV regardless of enabled features. Used by tests and
    /// ephemeral deployments.
    pub fn ephemeral<P: AsRef<Path>>(root_dir: P) -> Result<Self> {
        let mut cfg = Self::local_dev(root_dir)?;
        cfg.kv_backend = KvBackend::Memory;
        Ok(cfg)
    }
}

pub struct Store {
    cfg: StoreConfig,
    kv: Kv,
    reports: ArtifactStore,
}

impl Store {
    pub fn open(cfg: StoreConfig) -> Result<Self> {
        let kv = Kv::open(cfg.root_dir.join("kv"), cfg.kv_backend.clone())?;
        let reports = ArtifactStore::open(cfg.root_dir.join("reports"), cfg.artifact_backend.clone())?;
        Ok(Self { cfg, kv, reports })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.cfg
    }

    pub fn kv(&self) -> &Kv {
        &self.kv
    }

    pub fn reports(&self) -> &ArtifactStore {
        &self.reports
    }

    /// Store a rendered report document, returning its content id.
    pub fn put_report_bytes(&self, bytes: &[u8]) -> Result<String> {
        self.reports.put_bytes(&self.cfg.hash_alg, bytes)
    }

    pub fn get_report_bytes(&self, id: &str) -> Result<Option<Vec<u8>>> {
        self.reports.get_bytes(&self.cfg.hash_alg, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn store_roundtrip() {
        let td = TempDir::new().unwrap();
        let cfg = StoreConfig::ephemeral(td.path()).unwrap();
        let store = Store::open(cfg).unwrap();

        let id = store.put_report_bytes(b"<html>report</html>").unwrap();
        let got = store.get_report_bytes(&id).unwrap().unwrap();
        assert_eq!(got, b"<html>report</html>");

        store.kv().put_json("records/abc", &id).unwrap();
        let got_id: String = store.kv().get_json("records/abc").unwrap().unwrap();
        assert_eq!(got_id, id);
    }

    #[test]
    fn missing_report_is_none() {
        let td = TempDir::new().unwrap();
        let store = Store::open(StoreConfig::ephemeral(td.path()).unwrap()).unwrap();
        let id = "a".repeat(64);
        assert!(store.get_report_bytes(&id).unwrap().is_none());
    }
}
