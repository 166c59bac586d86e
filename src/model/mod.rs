//! Composer model - the complete state of one composer
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;
pub mod menu;
pub mod selection;

pub use document::{
    DocPosition, Document, Inline, Paragraph, ReferenceKind, ReferenceToken, OBJECT_REPLACEMENT,
};
pub use menu::{CaretRect, MenuItem, MenuKind, MenuState, Menus, OpenMenu};
pub use selection::Selection;

use crate::config::ComposerConfig;
use crate::search::SearchState;
use crate::serializer;
use crate::templates::{TemplateItem, TemplateVars};
use crate::trigger::{TriggerContext, TriggerKind};

/// The complete composer model
#[derive(Debug, Clone)]
pub struct ComposerModel {
    pub document: Document,
    pub selection: Selection,
    /// Bumped on every content change; async results carry the revision they were made for
    pub revision: u64,
    /// Trigger governing the cursor, if any
    pub trigger: Option<TriggerContext>,
    pub menus: Menus,
    pub search: SearchState,
    /// Catalog snapshot used by the command menu
    pub templates: Vec<TemplateItem>,
    pub template_vars: TemplateVars,
    /// Last caret rectangle reported by the host
    pub caret: Option<CaretRect>,
    pub config: ComposerConfig,
    /// Trigger the user dismissed with Escape; it stays closed until it goes away
    pub dismissed_trigger: Option<(TriggerKind, usize)>,
}

impl Default for ComposerModel {
    fn default() -> Self {
        Self::new(ComposerConfig::default())
    }
}

impl ComposerModel {
    pub fn new(config: ComposerConfig) -> Self {
        Self {
            document: Document::new(),
            selection: Selection::default(),
            revision: 0,
            trigger: None,
            menus: Menus::default(),
            search: SearchState::new(config.cache_capacity),
            templates: Vec::new(),
            template_vars: TemplateVars::default(),
            caret: None,
            config,
            dismissed_trigger: None,
        }
    }

    /// Model holding `text` with the cursor at its end
    pub fn with_text(text: &str, config: ComposerConfig) -> Self {
        let mut model = Self::new(config);
        model.document = Document::from_text(text);
        model.selection = Selection::collapsed(model.document.len());
        model
    }

    pub fn cursor(&self) -> usize {
        self.selection.head
    }

    pub fn set_cursor(&mut self, offset: usize) {
        self.selection = Selection::collapsed(offset.min(self.document.len()));
    }

    pub fn canonical(&self) -> String {
        serializer::serialize(&self.document)
    }

    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    pub fn active_menu(&self) -> Option<&OpenMenu> {
        self.menus.active()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menus.active_kind().is_some()
    }
}
