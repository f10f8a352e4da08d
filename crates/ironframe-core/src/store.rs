//! Append-only record stores
//!
//! Records are kept most-recent-first. Callers only ever see the first
//! `view_limit` entries; older entries stay retained up to `retention` and
//! are then dropped from the tail.

use parking_lot::RwLock;
use std::collections::VecDeque;

/// Maximum number of records `list` returns
pub const DEFAULT_VIEW_LIMIT: usize = 200;
/// Maximum number of records retained in memory
pub const DEFAULT_RETENTION: usize = 2000;

/// Storage contract shared by every record log.
///
/// A persistence backend replacing the in-memory log must keep these
/// semantics: `append` inserts at the head, `list` is most-recent-first and
/// bounded by the view limit.
pub trait AppendOnlyStore<T>: Send + Sync {
    /// Insert a record at the head
    fn append(&self, record: T);
    /// Most recent records first, at most the view limit
    fn list(&self) -> Vec<T>;
}

/// In-memory append-only log
#[derive(Debug)]
pub struct RecordLog<T> {
    records: RwLock<VecDeque<T>>,
    view_limit: usize,
    retention: usize,
}

impl<T: Clone> RecordLog<T> {
    /// Log with the default 200-entry view
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_VIEW_LIMIT, DEFAULT_RETENTION)
    }

    /// Log with explicit limits. Retention never drops below the view limit.
    pub fn with_limits(view_limit: usize, retention: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
            view_limit,
            retention: retention.max(view_limit),
        }
    }

    /// Insert a record at the head
    pub fn append(&self, record: T) {
        let mut records = self.records.write();
        records.push_front(record);
        records.truncate(self.retention);
    }

    /// Most recent records first, at most `view_limit`
    pub fn list(&self) -> Vec<T> {
        self.records.read().iter().take(self.view_limit).cloned().collect()
    }

    /// Insert `record` unless a retained record already satisfies
    /// `exists`. The check and the insert share one write lock.
    /// Returns true if the record was appended.
    pub fn append_unless(&self, exists: impl FnMut(&T) -> bool, record: T) -> bool {
        let mut records = self.records.write();
        if records.iter().any(exists) {
            return false;
        }
        records.push_front(record);
        records.truncate(self.retention);
        true
    }

    /// Most recent records matching `predicate`, at most `view_limit`.
    /// Filters the whole retained log before the view limit applies.
    pub fn list_where(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        self.records
            .read()
            .iter()
            .filter(|record| predicate(record))
            .take(self.view_limit)
            .cloned()
            .collect()
    }

    /// Every retained record, most recent first
    pub fn snapshot(&self) -> Vec<T> {
        self.records.read().iter().cloned().collect()
    }

    /// Retained record count
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// View limit applied by `list`
    pub fn view_limit(&self) -> usize {
        self.view_limit
    }

    /// Run a retention sweep under the write lock. Only retention sweeps
    /// may drop records.
    pub(crate) fn sweep<R>(&self, f: impl FnOnce(&mut VecDeque<T>) -> R) -> R {
        f(&mut self.records.write())
    }
}

impl<T: Clone> Default for RecordLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> AppendOnlyStore<T> for RecordLog<T> {
    fn append(&self, record: T) {
        RecordLog::append(self, record);
    }

    fn list(&self) -> Vec<T> {
        RecordLog::list(self)
    }
}
