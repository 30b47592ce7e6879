//! Task entity and store-record conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::store::Record;

/// Name of the table holding task records.
pub const TASKS_TABLE: &str = "tasks";

/// The sole entity of the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Generated at creation, immutable afterwards.
    pub id: Uuid,
    /// Non-empty after validation (trimmed).
    pub title: String,
    pub description: Option<String>,
    /// `None` means incomplete; set and cleared only by the complete toggle.
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create an incomplete task; both timestamps start equal.
    pub fn new(title: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Convert into a schemaless store record.
    pub fn into_record(self) -> Result<Record, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => unreachable!("a task serializes to a JSON object"),
        }
    }

    /// Rebuild a task from a store record.
    pub fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record.clone()))
    }
}
