//! Pure query helpers over an in-memory collection.
//!
//! Nothing here touches storage. Callers `load` once and then filter and
//! page the result; scans are linear, which is fine at blog-admin scale.

use crate::model::{BlogRecord, BlogStatus};

/// Visible (non-deleted) records whose title contains `search`
/// case-insensitively, optionally restricted to one status. Order is kept.
pub fn filter<'a>(
    records: &'a [BlogRecord],
    search: &str,
    status: Option<BlogStatus>,
) -> Vec<&'a BlogRecord> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| !r.is_deleted)
        .filter(|r| needle.is_empty() || r.title.to_lowercase().contains(&needle))
        .filter(|r| status.map_or(true, |s| r.status == s))
        .collect()
}

/// Soft-deleted records still inside their retention window, in stored order.
pub fn deleted(records: &[BlogRecord]) -> Vec<&BlogRecord> {
    records.iter().filter(|r| r.is_deleted).collect()
}

/// The 1-indexed `page` of `items`: `[(page-1)*page_size, page*page_size)`.
///
/// Pages past the end, page 0 and a zero page size all give an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = match (page - 1).checked_mul(page_size) {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `total` items, `page_size` at a time.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Looks a record up by id, deleted or not.
pub fn find<'a>(records: &'a [BlogRecord], id: &str) -> Option<&'a BlogRecord> {
    records.iter().find(|r| r.id == id)
}
