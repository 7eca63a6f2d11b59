//! Durable persistence: upsert the processed record into the keyed store.

use std::sync::Arc;

use anyhow::{Context, Result};

use assess_core::model::ProcessedRecord;
use assess_store::Store;

const RECORD_PREFIX: &str = "records/";

/// Persist stage outcome.
#[derive(Debug, Clone)]
pub struct PersistOutcome {
    pub record_id: String,
    pub key: String,
}

/// Upserts processed records by their generated identifier. Re-running with
/// the same id overwrites the stored value; the store guarantees atomic
/// per-key writes.
#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Arc<Store>,
}

impl PersistenceAdapter {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn persist(&self, record: &ProcessedRecord) -> Result<PersistOutcome> {
        let key = record_key(&record.record_id);
        self.store
            .kv()
            .put_json(&key, record)
            .with_context(|| format!("storing record under {key}"))?;
        Ok(PersistOutcome { record_id: record.record_id.clone(), key })
    }

    pub fn load(&self, record_id: &str) -> Result<Option<ProcessedRecord>> {
        self.store.kv().get_json(&record_key(record_id))
    }
}

pub fn record_key(record_id: &str) -> String {
    format!("{RECORD_PREFIX}{record_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::ProcessedRecord;
    use assess_core::scoring::{score, ReadinessWeights};
    use assess_store::StoreConfig;
    use tempfile::TempDir;

    fn record(id: &str, first_name: &str) -> ProcessedRecord {
        let mut raw = assess_core::fixtures::sample_submission();
        raw["first_name"] = serde_json::json!(first_name);
        let submission: assess_core::model::Submission = serde_json::from_value(raw).unwrap();
        let derived = score(&submission, &ReadinessWeights::default());
        ProcessedRecord::new(id, "2025-06-01T12:00:00Z", submission, derived)
    }

    #[test]
    fn repersisting_same_id_overwrites() {
        let td = TempDir::new().unwrap();
        let store = Arc::new(Store::open(StoreConfig::ephemeral(td.path()).unwrap()).unwrap());
        let adapter = PersistenceAdapter::new(store.clone());

        adapter.persist(&record("same-id", "Ada")).unwrap();
        adapter.persist(&record("same-id", "Grace")).unwrap();

        let keys = store.kv().list_prefix(RECORD_PREFIX).unwrap();
        assert_eq!(keys.len(), 1);
        let loaded = adapter.load("same-id").unwrap().unwrap();
        assert_eq!(loaded.submission.first_name, "Grace");
    }

    #[test]
    fn load_missing_record_is_none() {
        let td = TempDir::new().unwrap();
        let store = Arc::new(Store::open(StoreConfig::ephemeral(td.path()).unwrap()).unwrap());
        let adapter = PersistenceAdapter::new(store);
        assert!(adapter.load("nope").unwrap().is_none());
    }
}
