//! # Command Layer
//!
//! Each command lives in its own submodule and is a plain function over a
//! [`RecordStore`](crate::store::RecordStore). Mutating commands follow the
//! same shape: `load` → change the in-memory collection → `save`.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing or validation of uploads**: that's the caller's job
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`]:
//! - `affected_records`: records created, edited or deleted
//! - `listed_records`: records to display
//! - `page`: pagination details for listings
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! ## Command Modules
//!
//! - [`create`]: Create a post
//! - [`list`]: Filter and page posts
//! - [`view`]: Fetch one post by id
//! - [`update`]: Apply a typed patch
//! - [`delete`]: Soft-delete a post

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{BlogError, Result};
use crate::model::BlogRecord;
use crate::query;
use crate::retention::RetentionPolicy;

pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A record paired with what a UI needs to present it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub record: BlogRecord,
    /// When a soft-deleted record will be purged. `None` for active records.
    pub purge_at: Option<DateTime<Utc>>,
}

impl DisplayRecord {
    pub fn new(record: BlogRecord, retention: RetentionPolicy) -> Self {
        let purge_at = retention.purge_at(&record);
        Self { record, purge_at }
    }
}

/// Where a listing sits in the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: usize,
    pub size: usize,
    pub total_matches: usize,
    pub total_pages: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<DisplayRecord>,
    pub listed_records: Vec<DisplayRecord>,
    pub page: Option<Page>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }
}

/// The record with `id`, or `RecordNotFound`.
pub(crate) fn require<'a>(records: &'a [BlogRecord], id: &str) -> Result<&'a BlogRecord> {
    query::find(records, id).ok_or_else(|| BlogError::RecordNotFound(id.to_string()))
}
