//! Reference search: result types, query cache, and the debounce handle
//!
//! The update loop decides *whether* to search (cache hit, staleness); the runtime
//! owns the [`ScheduledTask`] that delays the actual provider call.

mod cache;
mod debounce;

pub use cache::{normalize_query, SearchCache, DEFAULT_CACHE_CAPACITY};
pub use debounce::ScheduledTask;

use serde::{Deserialize, Serialize};

use crate::model::document::ReferenceToken;

/// Default quiet period before a search is issued
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Default maximum results requested from the provider
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchResultKind {
    Block,
    Page,
    DailyNote,
}

/// One candidate returned by the search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub kind: SearchResultKind,
    pub title: String,
    #[serde(default)]
    pub preview_text: String,
}

impl SearchResult {
    pub fn block(id: impl Into<String>, preview_text: impl Into<String>) -> Self {
        let preview_text = preview_text.into();
        Self {
            id: id.into(),
            kind: SearchResultKind::Block,
            title: preview_text.clone(),
            preview_text,
        }
    }

    pub fn page(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SearchResultKind::Page,
            title: title.into(),
            preview_text: String::new(),
        }
    }

    pub fn daily_note(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: SearchResultKind::DailyNote,
            ..Self::page(id, title)
        }
    }

    /// Token inserted when this result is chosen. Daily notes are pages.
    pub fn to_reference(&self) -> ReferenceToken {
        match self.kind {
            SearchResultKind::Block => ReferenceToken::block(&self.id, &self.preview_text),
            SearchResultKind::Page | SearchResultKind::DailyNote => {
                ReferenceToken::page_with_id(&self.id, &self.title)
            }
        }
    }

    /// Text shown in the menu row
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.preview_text
        } else {
            &self.title
        }
    }
}

/// Search bookkeeping kept in the model
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub cache: SearchCache,
    /// A debounced or running search has not delivered yet
    pub loading: bool,
    /// Filter of the last request made for the open mention menu
    pub requested: Option<String>,
}

impl SearchState {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: SearchCache::new(cache_capacity),
            loading: false,
            requested: None,
        }
    }

    /// Forget the in-flight request. Returns true if one was loading.
    pub fn reset_request(&mut self) -> bool {
        self.requested = None;
        std::mem::replace(&mut self.loading, false)
    }
}
