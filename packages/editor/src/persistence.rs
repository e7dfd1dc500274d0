//! # Persistence Sinks
//!
//! Where course snapshots go when autosave, manual save or publish fires.
//! The persisted shape is the course JSON tree; array order is load-bearing
//! and round-trips exactly.

use crate::model::Course;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Persistence rejected: {0}")]
    Rejected(String),
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Serialize(e.to_string())
    }
}

/// Acknowledgement of a stored snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// Per-sink counter of successful writes
    pub revision: u64,
    pub saved_at: DateTime<Utc>,
}

/// Destination for course snapshots
pub trait PersistenceSink: Send + Sync {
    fn persist(&self, course: &Course) -> Result<Ack, PersistError>;
}

/// Writes the course as pretty JSON to a single file
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    revision: AtomicU64,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            revision: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a course previously written by this sink
    pub fn load(path: impl AsRef<Path>) -> Result<Course, PersistError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PersistenceSink for JsonFileSink {
    fn persist(&self, course: &Course) -> Result<Ack, PersistError> {
        let json = serde_json::to_string_pretty(course)?;

        // Write next to the target then rename so readers never see a partial file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        info!(path = %self.path.display(), revision, "course saved");

        Ok(Ack {
            revision,
            saved_at: Utc::now(),
        })
    }
}

/// Keeps every snapshot in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    snapshots: Mutex<Vec<Course>>,
    reject_next: Mutex<Option<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `persist` call fail with `reason`
    pub fn reject_next(&self, reason: impl Into<String>) {
        *self.reject_next.lock().unwrap_or_else(PoisonError::into_inner) = Some(reason.into());
    }

    pub fn snapshots(&self) -> Vec<Course> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn persist_count(&self) -> usize {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn last(&self) -> Option<Course> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl PersistenceSink for MemorySink {
    fn persist(&self, course: &Course) -> Result<Ack, PersistError> {
        if let Some(reason) = self
            .reject_next
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Err(PersistError::Rejected(reason));
        }

        let mut snapshots = self.snapshots.lock().unwrap_or_else(PoisonError::into_inner);
        snapshots.push(course.clone());
        debug!(revision = snapshots.len(), "snapshot stored in memory");

        Ok(Ack {
            revision: snapshots.len() as u64,
            saved_at: Utc::now(),
        })
    }
}
