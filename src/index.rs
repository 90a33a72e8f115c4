//! Paginated conversation index.
//!
//! [`ConversationIndexFetcher`] accumulates [`ConversationSummary`] pages for
//! the history browser and the sidebar. Page 1 replaces the list, later pages
//! append ("load more"). Whether more pages may exist is inferred from the
//! page being exactly full; the service's `total` is a hint at best and is
//! not used. Overlapping pages are not deduplicated, matching the service's
//! offset pagination.

use crate::api::{ApiError, ConversationPage, DebateApi};
use crate::controller::RefreshSignal;
use crate::models::ConversationSummary;

/// Page size used by the sidebar and the history command by default.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Default)]
pub struct ConversationIndexFetcher {
    summaries: Vec<ConversationSummary>,
    page: usize,
    has_more: bool,
    loading: bool,
    error: Option<String>,
    seen_refresh: u64,
}

impl ConversationIndexFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summaries(&self) -> &[ConversationSummary] {
        &self.summaries
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Page number to request for "load more".
    pub fn next_page(&self) -> usize {
        self.page + 1
    }

    /// Mark a page fetch as started.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a fetched page. Page 1 replaces the accumulated list, later
    /// pages append. `has_more` is true exactly when the page came back full;
    /// a short page ends the list until a page-1 reload starts over.
    /// Failures record a displayable error and leave the list untouched.
    pub fn apply_page(
        &mut self,
        page_number: usize,
        page_size: usize,
        outcome: Result<ConversationPage, ApiError>,
    ) {
        self.loading = false;

        match outcome {
            Ok(page) => {
                let count = page.conversations.len();
                if page_number <= 1 {
                    self.summaries = page.conversations;
                } else {
                    self.summaries.extend(page.conversations);
                }
                self.page = page_number;
                self.has_more = count == page_size;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    /// Fetch one page with `offset = (page_number - 1) * page_size`.
    pub async fn fetch_page(&mut self, api: &dyn DebateApi, page_number: usize, page_size: usize) {
        let offset = page_number.saturating_sub(1) * page_size;
        self.begin_fetch();
        let outcome = api.list_conversations(page_size, offset).await;
        self.apply_page(page_number, page_size, outcome);
    }

    /// Append the next page to the accumulated list.
    pub async fn load_more(&mut self, api: &dyn DebateApi, page_size: usize) {
        let page = self.next_page();
        self.fetch_page(api, page, page_size).await;
    }

    /// Replace-mode reload of the first page.
    pub async fn refresh(&mut self, api: &dyn DebateApi, page_size: usize) {
        self.fetch_page(api, 1, page_size).await;
    }

    /// True once per [`RefreshSignal`] bump: the caller should reload page 1.
    pub fn take_refresh(&mut self, signal: &RefreshSignal) -> bool {
        let version = signal.version();
        if version != self.seen_refresh {
            self.seen_refresh = version;
            return true;
        }
        false
    }
}
