//! Command and mention menu state
//!
//! At most one menu is open at a time. The highlight always stays inside the
//! item list and wraps at both ends.

use crate::search::SearchResult;
use crate::templates::TemplateItem;
use crate::trigger::{TriggerContext, TriggerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    /// Templates, opened by "/"
    Command,
    /// Reference search results, opened by "@"
    Mention,
}

impl MenuKind {
    pub fn for_trigger(kind: TriggerKind) -> Self {
        match kind {
            TriggerKind::Slash => MenuKind::Command,
            TriggerKind::At => MenuKind::Mention,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Template(TemplateItem),
    Search(SearchResult),
}

impl MenuItem {
    pub fn label(&self) -> &str {
        match self {
            MenuItem::Template(template) => &template.title,
            MenuItem::Search(result) => result.label(),
        }
    }
}

/// Caret position reported by the host, in host coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CaretRect {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

impl CaretRect {
    pub fn new(x: f32, y: f32, height: f32) -> Self {
        Self { x, y, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenMenu {
    pub items: Vec<MenuItem>,
    pub highlighted: usize,
    /// Trigger the menu was opened for, updated as the filter changes
    pub origin: TriggerContext,
    /// Caret position captured when the menu opened
    pub anchor: Option<CaretRect>,
}

impl OpenMenu {
    pub fn highlighted_item(&self) -> Option<&MenuItem> {
        self.items.get(self.highlighted)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MenuState {
    #[default]
    Closed,
    Open(OpenMenu),
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        matches!(self, MenuState::Open(_))
    }

    pub fn as_open(&self) -> Option<&OpenMenu> {
        match self {
            MenuState::Open(menu) => Some(menu),
            MenuState::Closed => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut OpenMenu> {
        match self {
            MenuState::Open(menu) => Some(menu),
            MenuState::Closed => None,
        }
    }

    /// Replace the item list and move the highlight back to the first item
    pub fn set_items(&mut self, items: Vec<MenuItem>) -> bool {
        let Some(menu) = self.as_open_mut() else {
            return false;
        };
        menu.items = items;
        menu.highlighted = 0;
        true
    }

    pub fn set_origin(&mut self, origin: TriggerContext) {
        if let Some(menu) = self.as_open_mut() {
            menu.origin = origin;
        }
    }

    pub fn highlight_next(&mut self) -> bool {
        match self.as_open_mut() {
            Some(menu) if !menu.items.is_empty() => {
                menu.highlighted = (menu.highlighted + 1) % menu.items.len();
                true
            }
            _ => false,
        }
    }

    pub fn highlight_previous(&mut self) -> bool {
        match self.as_open_mut() {
            Some(menu) if !menu.items.is_empty() => {
                let len = menu.items.len();
                menu.highlighted = (menu.highlighted + len - 1) % len;
                true
            }
            _ => false,
        }
    }

    /// Move the highlight to `index` if it names an item
    pub fn highlight(&mut self, index: usize) -> bool {
        match self.as_open_mut() {
            Some(menu) if index < menu.items.len() => {
                menu.highlighted = index;
                true
            }
            _ => false,
        }
    }

    pub fn highlighted_item(&self) -> Option<&MenuItem> {
        self.as_open().and_then(OpenMenu::highlighted_item)
    }

    pub fn close(&mut self) -> Option<OpenMenu> {
        match std::mem::take(self) {
            MenuState::Open(menu) => Some(menu),
            MenuState::Closed => None,
        }
    }
}

/// Both menus, kept mutually exclusive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Menus {
    pub command: MenuState,
    pub mention: MenuState,
}

impl Menus {
    pub fn get(&self, kind: MenuKind) -> &MenuState {
        match kind {
            MenuKind::Command => &self.command,
            MenuKind::Mention => &self.mention,
        }
    }

    pub fn get_mut(&mut self, kind: MenuKind) -> &mut MenuState {
        match kind {
            MenuKind::Command => &mut self.command,
            MenuKind::Mention => &mut self.mention,
        }
    }

    /// Open `kind` with no items, closing the other menu
    pub fn open(&mut self, kind: MenuKind, origin: TriggerContext, anchor: Option<CaretRect>) {
        self.close_all();
        *self.get_mut(kind) = MenuState::Open(OpenMenu {
            items: Vec::new(),
            highlighted: 0,
            origin,
            anchor,
        });
    }

    /// Close whichever menu is open. Returns true if one was.
    pub fn close_all(&mut self) -> bool {
        let command = self.command.close().is_some();
        let mention = self.mention.close().is_some();
        command || mention
    }

    pub fn active_kind(&self) -> Option<MenuKind> {
        if self.command.is_open() {
            Some(MenuKind::Command)
        } else if self.mention.is_open() {
            Some(MenuKind::Mention)
        } else {
            None
        }
    }

    pub fn active(&self) -> Option<&OpenMenu> {
        self.active_kind().and_then(|kind| self.get(kind).as_open())
    }

    pub fn active_mut(&mut self) -> Option<&mut MenuState> {
        let kind = self.active_kind()?;
        Some(self.get_mut(kind))
    }
}
