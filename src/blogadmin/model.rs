//! # Domain Model: Blog Records and Their Lifecycle
//!
//! This module defines [`BlogRecord`], the only persisted entity, together with
//! the inputs that create and edit it ([`NewRecord`], [`RecordPatch`]).
//!
//! ## Persisted Shape
//!
//! Records are stored as a flat JSON array with camelCase keys:
//!
//! ```text
//! {
//!   "id": "5f0c…",
//!   "title": "Hello", "description": "", "category": "", "author": "",
//!   "image": "data:image/png;base64,…",      (optional)
//!   "publishDate": "2024-05-01",              (optional, "" reads as absent)
//!   "status": "draft" | "published",
//!   "createdAt": "2024-05-01T10:00:00.000Z",
//!   "isDeleted": false,
//!   "deletedAt": "2024-05-02T10:00:00Z"       (present iff isDeleted)
//! }
//! ```
//!
//! There is no schema version. Readers tolerate missing fields: text fields
//! default to empty, `status` to draft, `isDeleted` to false. Unknown keys are
//! ignored and dropped on the next write.
//!
//! ## Lifecycle
//!
//! ```text
//! Active ──soft delete──▶ SoftDeleted ──retention elapsed, on load──▶ (purged)
//! ```
//!
//! There is no way back from `SoftDeleted` to `Active`. Purged records leave no
//! tombstone.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const PUBLISH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlogStatus::Draft => write!(f, "draft"),
            BlogStatus::Published => write!(f, "published"),
        }
    }
}

impl FromStr for BlogStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(BlogStatus::Draft),
            "published" => Ok(BlogStatus::Published),
            other => Err(format!(
                "unknown status '{}' (expected draft or published)",
                other
            )),
        }
    }
}

/// Where a stored record sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Active,
    SoftDeleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    /// Inline encoded image (a data URL). Size limits belong to the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, with = "publish_date", skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: BlogStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
    /// Read leniently: `""` or an unparsable value reads as absent, which
    /// makes a deleted record eligible for purge.
    #[serde(
        default,
        deserialize_with = "deleted_at::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl BlogRecord {
    /// Builds an active record from caller data. Identity and creation time are
    /// supplied by the store.
    pub fn from_new(id: String, created_at: DateTime<Utc>, data: NewRecord) -> Self {
        Self {
            id,
            title: data.title,
            description: data.description,
            category: data.category,
            author: data.author,
            image: data.image,
            publish_date: data.publish_date,
            status: data.status,
            created_at,
            is_deleted: false,
            deleted_at: None,
        }
    }

    pub fn state(&self) -> RecordState {
        if self.is_deleted {
            RecordState::SoftDeleted
        } else {
            RecordState::Active
        }
    }

    /// Marks the record deleted at `now`.
    ///
    /// A record that is already deleted keeps its original `deleted_at`, so
    /// repeated deletes never extend the retention window. Returns whether the
    /// record changed.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_deleted && self.deleted_at.is_some() {
            return false;
        }
        self.is_deleted = true;
        self.deleted_at = Some(now);
        true
    }
}

/// Caller supplied fields for a new record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRecord {
    pub title: String,
    pub description: String,
    pub category: String,
    pub author: String,
    pub image: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub status: BlogStatus,
}

impl NewRecord {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A typed edit. Only the editable fields exist here, so an edit can never
/// touch `id`, `createdAt` or the deletion flags.
///
/// `image` and `publish_date` are doubly optional: the outer `None` leaves the
/// field alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image: Option<Option<String>>,
    pub publish_date: Option<Option<NaiveDate>>,
    pub status: Option<BlogStatus>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == RecordPatch::default()
    }

    /// Applies the patch in place and reports whether anything changed.
    pub fn apply(&self, record: &mut BlogRecord) -> bool {
        let before = record.clone();
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(category) = &self.category {
            record.category = category.clone();
        }
        if let Some(author) = &self.author {
            record.author = author.clone();
        }
        if let Some(image) = &self.image {
            record.image = image.clone();
        }
        if let Some(publish_date) = self.publish_date {
            record.publish_date = publish_date;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        *record != before
    }
}

/// Parses a caller supplied publish date (`YYYY-MM-DD`).
pub fn parse_publish_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), PUBLISH_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidPublishDate(raw.to_string()))
}

/// Text of a stored optional field, or `None` when it is absent, `null`,
/// blank or not a string.
fn lenient_text(field: &str, value: Option<serde_json::Value>) -> Option<String> {
    match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(other) => {
            tracing::warn!(field, value = %other, "ignoring non-string value");
            None
        }
    }
}

mod publish_date {
    use super::{lenient_text, PUBLISH_DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(PUBLISH_DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    // Date inputs persist "" when left blank; anything unparsable reads as absent
    // rather than failing the record.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(lenient_text("publishDate", raw).and_then(|s| {
            match NaiveDate::parse_from_str(&s, PUBLISH_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!(value = %s, "ignoring unparsable publishDate");
                    None
                }
            }
        }))
    }
}

mod deleted_at {
    use super::lenient_text;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(lenient_text("deletedAt", raw).and_then(|s| {
            match DateTime::parse_from_rfc3339(&s) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(_) => {
                    tracing::warn!(value = %s, "ignoring unparsable deletedAt");
                    None
                }
            }
        }))
    }
}
