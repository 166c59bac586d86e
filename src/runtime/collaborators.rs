//! Interfaces to the outside world: previews, search, templates, and the host

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::Document;
use crate::search::SearchResult;
use crate::templates::TemplateItem;

/// Looks up the preview text of a block by id
#[async_trait]
pub trait PreviewResolver: Send + Sync {
    async fn resolve_preview(&self, id: &str) -> anyhow::Result<String>;
}

/// Searches blocks, pages, and daily notes
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SearchResult>>;
}

pub trait TemplateCatalog: Send + Sync {
    fn templates(&self) -> Vec<TemplateItem>;
}

/// Receives notifications from the composer
pub trait ComposerHost: Send + Sync {
    /// Content changed; `canonical` is its serialized form
    fn on_change(&self, canonical: &str);
    /// User submitted `document`
    fn on_send(&self, document: &Document);
    /// Put keyboard focus back into the editor
    fn restore_focus(&self, _cursor: usize) {}
}

impl TemplateCatalog for Vec<TemplateItem> {
    fn templates(&self) -> Vec<TemplateItem> {
        self.clone()
    }
}

/// The set of collaborators a [`Composer`](super::Composer) talks to
#[derive(Clone)]
pub struct Collaborators {
    pub previews: Arc<dyn PreviewResolver>,
    pub search: Arc<dyn SearchProvider>,
    pub templates: Arc<dyn TemplateCatalog>,
    pub host: Arc<dyn ComposerHost>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
