//! Soft-delete retention.
//!
//! A soft-deleted record stays in storage for the retention window (7 days
//! by default) and is purged by the first `load` after the window has fully
//! elapsed. A deleted record with no `deletedAt` cannot be dated and is purged
//! immediately.

use chrono::{DateTime, Duration, Utc};

use crate::model::BlogRecord;

pub const DEFAULT_RETENTION_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    window: Duration,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::days(DEFAULT_RETENTION_DAYS)
    }
}

impl RetentionPolicy {
    pub fn days(days: u32) -> Self {
        Self {
            window: Duration::days(i64::from(days)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// True when `record` must be purged at `now`.
    ///
    /// Active records never expire, whatever their `deleted_at` says. A
    /// `deleted_at` in the future counts as not yet elapsed.
    pub fn is_expired(&self, record: &BlogRecord, now: DateTime<Utc>) -> bool {
        if !record.is_deleted {
            return false;
        }
        match record.deleted_at {
            Some(deleted_at) => now.signed_duration_since(deleted_at) >= self.window,
            None => true,
        }
    }

    /// When a soft-deleted record becomes eligible for purge.
    pub fn purge_at(&self, record: &BlogRecord) -> Option<DateTime<Utc>> {
        if !record.is_deleted {
            return None;
        }
        record.deleted_at.map(|deleted_at| deleted_at + self.window)
    }

    /// Splits off expired records, keeping the survivors in their original
    /// order. Returns the survivors and how many records were dropped.
    pub fn retain(&self, records: Vec<BlogRecord>, now: DateTime<Utc>) -> (Vec<BlogRecord>, usize) {
        let before = records.len();
        let kept: Vec<BlogRecord> = records
            .into_iter()
            .filter(|r| !self.is_expired(r, now))
            .collect();
        let purged = before - kept.len();
        (kept, purged)
    }
}
