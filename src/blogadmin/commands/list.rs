use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult, DisplayRecord, Page};
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::{BlogRecord, BlogStatus};
use crate::query;
use crate::store::{KvBackend, RecordStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    /// Case-insensitive title search. Empty or `None` matches everything.
    pub search: Option<String>,
    /// Restrict to one status. `None` shows all.
    pub status: Option<BlogStatus>,
    /// 1-indexed page.
    pub page: usize,
    pub page_size: usize,
    /// List soft-deleted posts awaiting purge instead of visible ones.
    pub deleted: bool,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            deleted: false,
        }
    }
}

pub fn run<B: KvBackend, C: Clock, G: IdGenerator>(
    store: &RecordStore<B, C, G>,
    filter: ListFilter,
) -> Result<CmdResult> {
    let records = store.load()?;

    let matches: Vec<&BlogRecord> = if filter.deleted {
        query::deleted(&records)
    } else {
        query::filter(
            &records,
            filter.search.as_deref().unwrap_or(""),
            filter.status,
        )
    };

    let page = Page {
        number: filter.page,
        size: filter.page_size,
        total_matches: matches.len(),
        total_pages: query::page_count(matches.len(), filter.page_size),
    };
    let listed: Vec<DisplayRecord> = query::paginate(&matches, filter.page, filter.page_size)
        .iter()
        .map(|r| DisplayRecord::new((*r).clone(), store.retention()))
        .collect();

    let mut result = CmdResult::default().with_listed_records(listed);
    if result.listed_records.is_empty() && page.total_matches > 0 {
        result.add_message(CmdMessage::info(format!(
            "Page {} is out of range ({} page(s)).",
            page.number, page.total_pages
        )));
    }
    result.page = Some(page);
    Ok(result)
}
