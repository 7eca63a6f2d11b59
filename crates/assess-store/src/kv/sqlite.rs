//! SQLite KV backend for durable record storage.

#![cfg(feature = "sqlite")]

use std::path::{Path, PathBuf};

use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::{params, Connection};

use super::KvStore;

const MIG_0001: &str = include_str!("migrations/0001_records.sql");

pub struct SqliteKv {
    #[allow(dead_code)]
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteKv {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        let this = Self { path, conn: Mutex::new(conn) };
        this.migrate()?;
        Ok(this)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute_batch(MIG_0001)?;
        let v: i64 = conn.query_row("PRAGMA user_version;", [], |r| r.get(0))?;
        if v < 1 {
            conn.execute_batch("PRAGMA user_version = 1;")?;
        }
        Ok(())
    }

    fn now_unix() -> i64 {
        time::OffsetDateTime::now_utc().unix_timestamp()
    }
}

impl KvStore for SqliteKv {
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        let ts = Self::now_unix();
        let conn = self.conn.lock();
        conn.execute(
            r#"INSERT INTO records(key,value,updated_at)
               VALUES(?1,?2,?3)
               ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at"#,
            params![key, value, ts],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT value FROM records WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM records WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn list_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT key FROM records ORDER BY key ASC")?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        let mut out = Vec::new();
        for r in rows {
            let k = r?;
            if k.starts_with(prefix) {
                out.push(k);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sqlite_upsert_roundtrip() {
        let td = TempDir::new().unwrap();
        let mut kv = SqliteKv::open(td.path().join("records.sqlite3")).unwrap();

        kv.put("records/a", vec![1, 2, 3]).unwrap();
        kv.put("records/a", vec![9]).unwrap();
        assert_eq!(kv.get("records/a").unwrap(), Some(vec![9]));
        assert_eq!(kv.list_prefix("records/").unwrap(), vec!["records/a".to_string()]);

        kv.delete("records/a").unwrap();
        assert_eq!(kv.get("records/a").unwrap(), None);
    }

    #[test]
    fn reopen_preserves_rows() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("records.sqlite3");
        {
            let mut kv = SqliteKv::open(&path).unwrap();
            kv.put("records/kept", vec![7]).unwrap();
        }
        let kv = SqliteKv::open(&path).unwrap();
        assert_eq!(kv.get("records/kept").unwrap(), Some(vec![7]));
    }
}
