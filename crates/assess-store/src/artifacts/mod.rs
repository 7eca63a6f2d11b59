//! Report artifact storage backends.
//!
//! Rendered report documents are stored content-addressed: the artifact id
//! is the hex digest of the bytes, so re-rendering identical content is a
//! no-op and ids are safe to hand out over HTTP.

mod fs;
mod layout;

use std::path::Path;

use anyhow::{anyhow, Result};

pub use fs::FsArtifactStore;
pub use layout::{ArtifactKey, ArtifactLayout};

#[derive(Debug, Clone)]
pub enum ArtifactBackend {
    Fs { dir: String },
}

impl Default for ArtifactBackend {
    fn default() -> Self {
        ArtifactBackend::Fs { dir: "artifacts".to_string() }
    }
}

pub struct ArtifactStore {
    inner: Box<dyn ArtifactStoreImpl + Send + Sync>,
}

impl ArtifactStore {
    pub fn open<P: AsRef<Path>>(root: P, backend: ArtifactBackend) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;

        let inner: Box<dyn ArtifactStoreImpl + Send + Sync> = match backend {
            ArtifactBackend::Fs { dir } => Box::new(FsArtifactStore::open(root.join(dir))?),
        };

        Ok(Self { inner })
    }

    pub fn put_bytes(&self, alg: &str, bytes: &[u8]) -> Result<String> {
        self.inner.put_bytes(alg, bytes)
    }

    pub fn get_bytes(&self, alg: &str, id: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get_bytes(alg, id)
    }

    pub fn exists(&self, alg: &str, id: &str) -> Result<bool> {
        self.inner.exists(alg, id)
    }
}

pub trait ArtifactStoreImpl {
    fn put_bytes(&self, alg: &str, bytes: &[u8]) -> Result<String>;
    fn get_bytes(&self, alg: &str, id: &str) -> Result<Option<Vec<u8>>>;
    fn exists(&self, alg: &str, id: &str) -> Result<bool>;
}

pub fn validate_artifact_id(id: &str) -> Result<()> {
    if id.len() < 16 || id.len() > 128 {
        return Err(anyhow!("artifact id length must be 16..=128"));
    }
    if !id.is_ascii() {
        return Err(anyhow!("artifact id must be ASCII"));
    }
    for c in id.bytes() {
        if !matches!(c, b'0'..=b'9' | b'a'..=b'f') {
            return Err(anyhow!("artifact id must be lowercase hex"));
        }
    }
    Ok(())
}

fn rooted_layout(root: &std::path::Path, alg: &str, id: &str) -> Result<std::path::PathBuf> {
    validate_artifact_id(id)?;
    Ok(ArtifactLayout::new(root.to_path_buf()).path_for(ArtifactKey::new(alg, id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip_and_idempotent_put() {
        let td = TempDir::new().unwrap();
        let store = ArtifactStore::open(td.path(), ArtifactBackend::default()).unwrap();

        let a = store.put_bytes("sha256", b"report body").unwrap();
        let b = store.put_bytes("sha256", b"report body").unwrap();
        assert_eq!(a, b);
        assert!(store.exists("sha256", &a).unwrap());
        assert_eq!(store.get_bytes("sha256", &a).unwrap().unwrap(), b"report body");
    }

    #[test]
    fn invalid_ids_rejected() {
        assert!(validate_artifact_id("short").is_err());
        assert!(validate_artifact_id(&"G".repeat(64)).is_err());
        assert!(validate_artifact_id(&"a".repeat(64)).is_ok());
    }
}
