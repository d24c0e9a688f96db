//! Bounded, newest-first list of rendered commands.

use std::collections::VecDeque;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::io;

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRing {
    capacity: usize,
    entries: VecDeque<String>,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Rebuild a ring from newest-first entries, skipping duplicates and
    /// anything past capacity.
    pub fn from_entries<I, S>(capacity: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ring = Self::new(capacity);
        for entry in entries {
            if ring.entries.len() >= capacity {
                break;
            }
            let entry = entry.into();
            if !ring.contains(&entry) {
                ring.entries.push_back(entry);
            }
        }
        ring
    }

    /// Prepend `entry` unless it is already present. Returns whether the
    /// ring changed.
    pub fn push(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if self.capacity == 0 || self.contains(&entry) {
            return false;
        }

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        true
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Newest first.
    pub fn entries(&self) -> Vec<&str> {
        self.entries.iter().map(String::as_str).collect()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Read a history file written by [`save_file`]. A missing file is an
/// empty ring.
pub fn load_file(path: &Path, capacity: usize) -> Result<HistoryRing> {
    if !path.exists() {
        return Ok(HistoryRing::new(capacity));
    }

    let raw = io::read_file(path, &format!("read {}", path.display()))?;
    let entries: Vec<String> = serde_json::from_str(&raw)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    Ok(HistoryRing::from_entries(capacity, entries))
}

pub fn save_file(path: &Path, ring: &HistoryRing) -> Result<()> {
    io::ensure_parent_dir(path)?;

    let content = serde_json::to_string_pretty(&ring.entries()).map_err(|e| {
        Error::internal_json(e.to_string(), Some("serialize history".to_string()))
    })?;

    io::write_file_atomic(path, &content, &format!("write {}", path.display()))
}
