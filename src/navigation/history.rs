//! Addressable-history stack and hash-fragment codec.
//!
//! # Responsibilities
//! - Keep the ordered back/forward stack of visited paths
//! - Carry opaque per-entry navigation state
//! - Convert between paths and the hash-fragment form shown in the address
//!   bar (`/node/42` ↔ `#/node/42`)
//!
//! # Design Decisions
//! - The stack is owned exclusively by the navigation controller
//! - Pushing after going back truncates the forward branch, mirroring
//!   browser history
//! - Boundary moves return None; the caller reports them as no-ops

use serde_json::Value;

/// One visited location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub path: String,
    /// Opaque navigation state, passed through untouched.
    pub state: Value,
}

impl HistoryEntry {
    pub fn new(path: impl Into<String>, state: Value) -> Self {
        HistoryEntry {
            path: path.into(),
            state,
        }
    }
}

/// Cursor-based back/forward stack.
#[derive(Debug, Default)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    /// Index of the current entry; meaningless while `entries` is empty.
    cursor: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new entry after the cursor, dropping any forward branch.
    pub fn push(&mut self, entry: HistoryEntry) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrite the current entry, or start the stack if it is empty.
    pub fn replace(&mut self, entry: HistoryEntry) {
        if self.entries.is_empty() {
            self.entries.push(entry);
            self.cursor = 0;
        } else {
            self.entries[self.cursor] = entry;
        }
    }

    /// Move the cursor one step back. None at the boundary.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Move the cursor one step forward. None at the boundary.
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.entries.is_empty() || self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    /// The entry behind the cursor, if any.
    pub fn previous(&self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.entries.get(self.cursor - 1)
    }

    /// The entry ahead of the cursor, if any.
    pub fn next(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hash-fragment form of a path for the address bar.
pub fn to_hash(path: &str) -> String {
    if path.starts_with('/') {
        format!("#{path}")
    } else {
        format!("#/{path}")
    }
}

/// Path carried by a hash fragment. Accepts `#/a/b`, `#a/b`, and a bare
/// path; an empty fragment is the root path.
pub fn from_hash(hash: &str) -> String {
    let stripped = hash.strip_prefix('#').unwrap_or(hash);
    if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    }
}
