//! Keyboard routing
//!
//! While a menu is open, navigation keys drive the menu instead of the editor.
//! Everything else falls through to editing.

use crate::commands::Cmd;
use crate::messages::{EditMsg, MenuMsg, Msg};
use crate::model::ComposerModel;
use crate::update::update;

/// Keys the composer reacts to, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    Char(char),
    Enter,
    ShiftEnter,
    Tab,
    Escape,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ShiftArrowLeft,
    ShiftArrowRight,
    Home,
    End,
}

/// Map a key to the message it produces in the current state
pub fn route_key(model: &ComposerModel, key: KeyInput) -> Option<Msg> {
    if let Some(menu) = model.active_menu() {
        let has_items = !menu.items.is_empty();
        match key {
            KeyInput::ArrowDown => return Some(Msg::Menu(MenuMsg::HighlightNext)),
            KeyInput::ArrowUp => return Some(Msg::Menu(MenuMsg::HighlightPrevious)),
            KeyInput::Enter | KeyInput::Tab if has_items => {
                return Some(Msg::Menu(MenuMsg::Confirm))
            }
            KeyInput::Escape => return Some(Msg::Menu(MenuMsg::Cancel)),
            _ => {}
        }
    }

    let msg = match key {
        KeyInput::Char(ch) => EditMsg::InsertChar(ch),
        KeyInput::Enter => EditMsg::Submit,
        KeyInput::ShiftEnter => EditMsg::InsertNewline,
        KeyInput::Backspace => EditMsg::DeleteBackward,
        KeyInput::Delete => EditMsg::DeleteForward,
        KeyInput::ArrowLeft => EditMsg::MoveLeft { extend: false },
        KeyInput::ArrowRight => EditMsg::MoveRight { extend: false },
        KeyInput::ShiftArrowLeft => EditMsg::MoveLeft { extend: true },
        KeyInput::ShiftArrowRight => EditMsg::MoveRight { extend: true },
        KeyInput::Home => EditMsg::MoveToStart { extend: false },
        KeyInput::End => EditMsg::MoveToEnd { extend: false },
        KeyInput::Tab | KeyInput::Escape | KeyInput::ArrowUp | KeyInput::ArrowDown => {
            return None
        }
    };
    Some(Msg::Edit(msg))
}

/// Route a key and run the resulting message through `update`
pub fn handle_key(model: &mut ComposerModel, key: KeyInput) -> Option<Cmd> {
    let msg = route_key(model, key)?;
    update(model, msg)
}
