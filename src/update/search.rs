//! Search message handlers
//!
//! A search result is applied only while it still answers the filter the user
//! is looking at. Every completed search is cached, stale or not.

use crate::commands::Cmd;
use crate::messages::SearchMsg;
use crate::model::{ComposerModel, MenuItem};
use crate::search::SearchResult;
use crate::trigger::TriggerKind;

use super::trigger::current_trigger;

/// Ask for results for the mention filter: from cache, or via a debounced search
pub(super) fn request_search(model: &mut ComposerModel, filter: &str) -> Vec<Cmd> {
    if model.search.requested.as_deref() == Some(filter) {
        return Vec::new();
    }
    model.search.requested = Some(filter.to_string());

    if filter.trim().is_empty() {
        model.menus.mention.set_items(Vec::new());
        return cancel_if_loading(model);
    }

    if let Some(results) = model.search.cache.get(filter) {
        tracing::debug!(query = filter, count = results.len(), "Search cache hit");
        let items = to_items(results);
        model.menus.mention.set_items(items);
        return cancel_if_loading(model);
    }

    model.search.loading = true;
    vec![Cmd::DebouncedSearch {
        query: filter.to_string(),
        delay_ms: model.config.debounce_ms,
    }]
}

pub fn update_search(model: &mut ComposerModel, msg: SearchMsg) -> Option<Cmd> {
    match msg {
        SearchMsg::DebounceElapsed { query } => {
            if !is_current(model, &query) {
                tracing::debug!(query = %query, "Skipping stale search");
                return None;
            }

            // A search for an equivalent query may have landed meanwhile
            if let Some(results) = model.search.cache.get(&query) {
                let items = to_items(results);
                model.menus.mention.set_items(items);
                model.search.loading = false;
                return None;
            }

            Some(Cmd::RunSearch {
                query,
                limit: model.config.search_limit,
            })
        }

        SearchMsg::Completed { query, result } => {
            let results = match result {
                Ok(results) => {
                    model.search.cache.insert(&query, results.clone());
                    results
                }
                Err(err) => {
                    tracing::warn!(query = %query, "Search failed: {}", err);
                    Vec::new()
                }
            };

            if !is_current(model, &query) {
                tracing::debug!(query = %query, "Discarding stale search results");
                return None;
            }

            tracing::debug!(query = %query, count = results.len(), "Search results applied");
            model.search.loading = false;
            model
                .menus
                .mention
                .set_items(results.into_iter().map(MenuItem::Search).collect());
            None
        }
    }
}

/// The mention menu is open and its filter is exactly `query`
fn is_current(model: &ComposerModel, query: &str) -> bool {
    current_trigger(model, TriggerKind::At).is_some_and(|ctx| ctx.filter_text == query)
}

fn to_items(results: &[SearchResult]) -> Vec<MenuItem> {
    results.iter().cloned().map(MenuItem::Search).collect()
}

fn cancel_if_loading(model: &mut ComposerModel) -> Vec<Cmd> {
    if std::mem::replace(&mut model.search.loading, false) {
        vec![Cmd::CancelSearch]
    } else {
        Vec::new()
    }
}
