//! File-backed record store.
//!
//! # Responsibilities
//! - Own the in-memory table collection (table name → ordered records)
//! - CRUD operations plus a substring filter over string fields
//! - Persist the whole state to a single JSON file after every mutation
//! - Load prior state at startup, starting empty when none is readable
//!
//! # Design Decisions
//! - Records are schemaless JSON objects, so `update` is a shallow field
//!   merge and the store stays independent of the task resource
//! - Write-through on every mutation, no batching or journaling
//! - Temp-file + rename keeps readers from ever seeing a partial file
//! - One mutex serializes mutation and the durable write; it is never held
//!   across an await point

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use thiserror::Error;

/// A single stored record: a flat JSON object.
pub type Record = Map<String, Value>;

/// Field → substring mapping; a record matches when every listed field is a
/// string containing the substring (AND across fields, case-sensitive).
pub type Filter = BTreeMap<String, String>;

type Tables = BTreeMap<String, Vec<Record>>;

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Persistent collection of named tables.
pub struct RecordStore {
    path: PathBuf,
    tables: Mutex<Tables>,
}

impl RecordStore {
    /// Open a store backed by the given file.
    ///
    /// A missing or unreadable file is not fatal: the store starts with
    /// empty tables and the file is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tables = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(tables) => tables,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Ignoring unreadable store file");
                    Tables::new()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %err, "Failed to read store file");
                }
                Tables::new()
            }
        };

        Self {
            path,
            tables: Mutex::new(tables),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in a table, optionally filtered.
    ///
    /// Records are returned in insertion order.
    pub fn select(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Record>, StoreError> {
        let tables = self.lock()?;
        let rows = tables.get(table).map(Vec::as_slice).unwrap_or(&[]);

        let selected = match filter {
            Some(filter) => rows
                .iter()
                .filter(|record| matches_filter(record, filter))
                .cloned()
                .collect(),
            None => rows.to_vec(),
        };
        Ok(selected)
    }

    /// Find a record by its `"id"` field.
    pub fn find_by_id(&self, table: &str, id: &str) -> Result<Option<Record>, StoreError> {
        let tables = self.lock()?;
        let found = tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| record_id(r) == Some(id)))
            .cloned();
        Ok(found)
    }

    /// Append a record and persist the whole state before returning.
    pub fn insert(&self, table: &str, record: Record) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables.entry(table.to_string()).or_default().push(record);
        self.persist(&tables)
    }

    /// Shallow-merge fields into the record with the given id.
    ///
    /// A missing id is a silent no-op (callers check existence first);
    /// nothing is persisted in that case.
    pub fn update(&self, table: &str, id: &str, partial: Record) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        let Some(record) = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| record_id(r) == Some(id)))
        else {
            return Ok(());
        };

        for (field, value) in partial {
            record.insert(field, value);
        }
        self.persist(&tables)
    }

    /// Remove the record with the given id if present; persists regardless.
    pub fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| record_id(r) != Some(id));
        }
        self.persist(&tables)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Write the whole state atomically (temp file, then rename).
    fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(tables)?;
        let temp_path = self.path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn matches_filter(record: &Record, filter: &Filter) -> bool {
    filter.iter().all(|(field, needle)| {
        record
            .get(field)
            .and_then(Value::as_str)
            .map(|value| value.contains(needle.as_str()))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(id: &str, title: &str, description: &str) -> Record {
        match json!({ "id": id, "title": title, "description": description }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn open_temp() -> (RecordStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("db.json"));
        (store, dir)
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let (store, _dir) = open_temp();
        assert!(store.select("tasks", None).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "not json at all").unwrap();

        let store = RecordStore::open(&path);
        assert!(store.select("tasks", None).unwrap().is_empty());
    }

    #[test]
    fn test_insert_preserves_order() {
        let (store, _dir) = open_temp();
        store.insert("tasks", record("1", "first", "")).unwrap();
        store.insert("tasks", record("2", "second", "")).unwrap();
        store.insert("tasks", record("3", "third", "")).unwrap();

        let rows = store.select("tasks", None).unwrap();
        let ids: Vec<_> = rows.iter().filter_map(|r| record_id(r)).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_filter_is_and_across_fields() {
        let (store, _dir) = open_temp();
        store
            .insert("tasks", record("1", "buy milk", "from the milk shop"))
            .unwrap();
        store
            .insert("tasks", record("2", "buy milk", "from the market"))
            .unwrap();
        store
            .insert("tasks", record("3", "walk dog", "milk afterwards"))
            .unwrap();

        let mut filter = Filter::new();
        filter.insert("title".to_string(), "milk".to_string());
        filter.insert("description".to_string(), "milk".to_string());

        // Only the record where BOTH fields contain "milk" matches
        let rows = store.select("tasks", Some(&filter)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(record_id(&rows[0]), Some("1"));
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let (store, _dir) = open_temp();
        store.insert("tasks", record("1", "Buy Milk", "")).unwrap();

        let mut filter = Filter::new();
        filter.insert("title".to_string(), "milk".to_string());
        assert!(store.select("tasks", Some(&filter)).unwrap().is_empty());

        filter.insert("title".to_string(), "Milk".to_string());
        assert_eq!(store.select("tasks", Some(&filter)).unwrap().len(), 1);
    }

    #[test]
    fn test_filter_missing_field_never_matches() {
        let (store, _dir) = open_temp();
        let mut rec = record("1", "title only", "");
        rec.remove("description");
        store.insert("tasks", rec).unwrap();

        let mut filter = Filter::new();
        filter.insert("description".to_string(), "".to_string());
        assert!(store.select("tasks", Some(&filter)).unwrap().is_empty());
    }

    #[test]
    fn test_update_merges_fields() {
        let (store, _dir) = open_temp();
        store
            .insert("tasks", record("1", "old title", "keep me"))
            .unwrap();

        let mut partial = Record::new();
        partial.insert("title".to_string(), json!("new title"));
        store.update("tasks", "1", partial).unwrap();

        let row = store.find_by_id("tasks", "1").unwrap().unwrap();
        assert_eq!(row.get("title"), Some(&json!("new title")));
        assert_eq!(row.get("description"), Some(&json!("keep me")));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (store, _dir) = open_temp();
        store.insert("tasks", record("1", "title", "")).unwrap();

        let mut partial = Record::new();
        partial.insert("title".to_string(), json!("changed"));
        store.update("tasks", "missing", partial).unwrap();

        let rows = store.select("tasks", None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("title"), Some(&json!("title")));
    }

    #[test]
    fn test_delete() {
        let (store, _dir) = open_temp();
        store.insert("tasks", record("1", "a", "")).unwrap();
        store.insert("tasks", record("2", "b", "")).unwrap();

        store.delete("tasks", "1").unwrap();
        let rows = store.select("tasks", None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(record_id(&rows[0]), Some("2"));

        // Deleting an unknown id is not an error
        store.delete("tasks", "missing").unwrap();
        assert_eq!(store.select("tasks", None).unwrap().len(), 1);
    }

    #[test]
    fn test_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        let store = RecordStore::open(&path);
        store.insert("tasks", record("1", "first", "one")).unwrap();
        store.insert("tasks", record("2", "second", "two")).unwrap();
        store.insert("tasks", record("3", "third", "three")).unwrap();
        store.delete("tasks", "2").unwrap();
        let before = store.select("tasks", None).unwrap();
        drop(store);

        let reloaded = RecordStore::open(&path);
        let after = reloaded.select("tasks", None).unwrap();
        assert_eq!(before, after);

        let ids: Vec<_> = after.iter().filter_map(|r| record_id(r)).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
