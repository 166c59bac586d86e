//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use inlay::commands::Cmd;
use inlay::config::ComposerConfig;
use inlay::input::{handle_key, KeyInput};
use inlay::model::{ComposerModel, Document};
use inlay::runtime::{
    Collaborators, Composer, ComposerHost, PreviewResolver, SearchProvider,
};
use inlay::search::SearchResult;
use inlay::templates::TemplateItem;

/// Create a test model holding `text` with the cursor at the end
pub fn test_model(text: &str) -> ComposerModel {
    ComposerModel::with_text(text, ComposerConfig::default())
}

/// Model with the sample template catalog loaded
pub fn test_model_with_templates(text: &str) -> ComposerModel {
    let mut model = test_model(text);
    model.templates = sample_templates();
    model
}

/// Type `text` one key at a time, collecting every command produced
pub fn type_str(model: &mut ComposerModel, text: &str) -> Vec<Cmd> {
    text.chars()
        .filter_map(|ch| handle_key(model, KeyInput::Char(ch)))
        .flat_map(Cmd::flatten)
        .collect()
}

/// Press a key, returning the flattened commands
pub fn press(model: &mut ComposerModel, key: KeyInput) -> Vec<Cmd> {
    handle_key(model, key).map(Cmd::flatten).unwrap_or_default()
}

pub fn has_debounced_search(cmds: &[Cmd], query: &str) -> bool {
    cmds.iter()
        .any(|c| matches!(c, Cmd::DebouncedSearch { query: q, .. } if q == query))
}

pub fn menu_labels(model: &ComposerModel) -> Vec<String> {
    model
        .active_menu()
        .map(|menu| menu.items.iter().map(|i| i.label().to_string()).collect())
        .unwrap_or_default()
}

pub fn sample_templates() -> Vec<TemplateItem> {
    vec![
        TemplateItem::new("meeting", "Meeting notes", "## Meeting {{date}}\n- ")
            .with_category("Work"),
        TemplateItem::new("todo", "Todo", "- [ ] ").with_description("Checklist item"),
        TemplateItem::new("journal", "Journal", "Dear diary, ").with_category("Personal"),
    ]
}

// ============================================================================
// Mock collaborators
// ============================================================================

/// Search provider with canned results, per-query delays, and a call log
#[derive(Default)]
pub struct MockSearch {
    results: HashMap<String, Vec<SearchResult>>,
    delays: HashMap<String, Duration>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results.insert(query.to_string(), results);
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SearchResult>> {
        self.calls.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.iter().any(|q| q == query) {
            anyhow::bail!("search backend unavailable");
        }
        let mut results = self.results.get(query).cloned().unwrap_or_default();
        results.truncate(limit);
        Ok(results)
    }
}

/// Preview resolver backed by a map; unknown ids fail
#[derive(Default)]
pub struct MockPreviews {
    previews: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockPreviews {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            previews: entries
                .iter()
                .map(|(id, preview)| (id.to_string(), preview.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PreviewResolver for MockPreviews {
    async fn resolve_preview(&self, id: &str) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(id.to_string());
        self.previews
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("block {} not found", id))
    }
}

/// Host that records every notification
#[derive(Default)]
pub struct RecordingHost {
    pub changes: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<Document>>,
    pub focus: Mutex<Vec<usize>>,
}

impl RecordingHost {
    pub fn last_change(&self) -> Option<String> {
        self.changes.lock().unwrap().last().cloned()
    }

    pub fn sent(&self) -> Vec<Document> {
        self.sent.lock().unwrap().clone()
    }
}

impl ComposerHost for RecordingHost {
    fn on_change(&self, canonical: &str) {
        self.changes.lock().unwrap().push(canonical.to_string());
    }

    fn on_send(&self, document: &Document) {
        self.sent.lock().unwrap().push(document.clone());
    }

    fn restore_focus(&self, cursor: usize) {
        self.focus.lock().unwrap().push(cursor);
    }
}

/// Composer wired to the given mocks. Must be called inside a Tokio runtime.
pub fn test_composer(
    search: Arc<MockSearch>,
    previews: Arc<MockPreviews>,
) -> (Composer, Arc<RecordingHost>) {
    let host = Arc::new(RecordingHost::default());
    let collaborators = Collaborators {
        previews,
        search,
        templates: Arc::new(sample_templates()),
        host: host.clone(),
    };
    (Composer::new(ComposerConfig::default(), collaborators), host)
}

/// Let (paused) time pass in small steps, handling messages as they arrive
pub async fn settle(composer: &mut Composer, ms: u64) {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(ms);
    while tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
        composer.process_async_messages();
    }
}
