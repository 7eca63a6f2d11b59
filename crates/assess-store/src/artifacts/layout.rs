//! Deterministic artifact layout.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::artifacts::validate_artifact_id;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArtifactKey {
    pub alg: String,
    pub id: String,
}

impl ArtifactKey {
    pub fn new(alg: &str, id: &str) -> Result<Self> {
        if alg.trim().is_empty() {
            return Err(anyhow!("hash algorithm must not be empty"));
        }
        if !alg.is_ascii() {
            return Err(anyhow!("hash algorithm must be ASCII"));
        }
        validate_artifact_id(id)?;
        Ok(Self { alg: alg.to_string(), id: id.to_string() })
    }

    pub fn prefix2(&self) -> (&str, &str) {
        (&self.id[0..2], &self.id[2..4])
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    root: PathBuf,
}

impl ArtifactLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path_for(&self, key: ArtifactKey) -> PathBuf {
        let (aa, bb) = key.prefix2();
        let (aa, bb) = (aa.to_string(), bb.to_string());
        self.root.join(key.alg).join(aa).join(bb).join(key.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fans_out_on_id_prefix() {
        let id = "ab12".to_string() + &"0".repeat(60);
        let key = ArtifactKey::new("sha256", &id).unwrap();
        let path = ArtifactLayout::new(PathBuf::from("/root")).path_for(key);
        assert_eq!(path, PathBuf::from(format!("/root/sha256/ab/12/{id}")));
    }
}
