//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::model::{CaretRect, Document};
use crate::search::SearchResult;
use crate::templates::{TemplateItem, TemplateVars};

/// Text editing and cursor messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMsg {
    // === Content ===
    /// Type a character, replacing the selection
    InsertChar(char),
    /// Paste text, replacing the selection (newlines open paragraphs)
    InsertText(String),
    /// Start a new paragraph (Shift+Enter)
    InsertNewline,
    /// Delete selection or the unit before the cursor (Backspace)
    DeleteBackward,
    /// Delete selection or the unit after the cursor (Delete)
    DeleteForward,

    // === Movement ===
    MoveLeft { extend: bool },
    MoveRight { extend: bool },
    MoveToStart { extend: bool },
    MoveToEnd { extend: bool },
    /// Set selection directly (from pointer input)
    SetSelection { anchor: usize, head: usize },
    SelectAll,

    // === Composer ===
    /// Hand the document to the host (Enter with no menu open)
    Submit,
    /// Empty the composer
    Clear,
}

/// Menu navigation and selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMsg {
    HighlightNext,
    HighlightPrevious,
    /// Pointer hover
    Highlight(usize),
    /// Insert the highlighted item (Enter/Tab)
    Confirm,
    /// Insert the item at an index (pointer click)
    ConfirmIndex(usize),
    /// Close the menu and leave the trigger text alone (Escape)
    Cancel,
}

/// Search pipeline messages, posted back by the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMsg {
    /// Debounce window for `query` ran out without being reset
    DebounceElapsed { query: String },
    /// Provider finished; errors arrive already formatted
    Completed {
        query: String,
        result: Result<Vec<SearchResult>, String>,
    },
}

/// Messages from the embedding host
#[derive(Debug, Clone)]
pub enum HostMsg {
    /// Replace the content with a canonical string (previews resolved async)
    SetCanonical(String),
    /// A `SetCanonical` finished resolving
    DocumentResolved { document: Document, revision: u64 },
    /// Close any open menu (e.g. the composer lost focus)
    CloseMenus,
    /// Where the caret is drawn, for menu placement
    SetCaretRect(CaretRect),
    /// Template catalog (re)loaded
    TemplatesLoaded(Vec<TemplateItem>),
    /// Values for `{{name}}` placeholders in templates
    SetTemplateVars(TemplateVars),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Editing messages (content, cursor, submit)
    Edit(EditMsg),
    /// Menu messages (navigation, confirm, cancel)
    Menu(MenuMsg),
    /// Search messages (debounce, completion)
    Search(SearchMsg),
    /// Host messages (load, focus, caret, templates)
    Host(HostMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn insert_char(ch: char) -> Self {
        Msg::Edit(EditMsg::InsertChar(ch))
    }

    pub fn insert_text(text: impl Into<String>) -> Self {
        Msg::Edit(EditMsg::InsertText(text.into()))
    }

    pub fn set_canonical(source: impl Into<String>) -> Self {
        Msg::Host(HostMsg::SetCanonical(source.into()))
    }
}
