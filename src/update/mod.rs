//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod edit;
mod host;
mod menu;
mod search;
mod trigger;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::ComposerModel;

#[cfg(debug_assertions)]
use crate::tracing::ComposerSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use edit::update_edit;
pub use host::update_host;
pub use menu::update_menu;
pub use search::update_search;
pub use trigger::refresh_trigger;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Edit(m) => edit::update_edit(model, m),
        Msg::Menu(m) => menu::update_menu(model, m),
        Msg::Search(m) => search::update_search(model, m),
        Msg::Host(m) => host::update_host(model, m),
    }
}

/// Update with tracing instrumentation (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = ComposerSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    if let Some(diff) = before.diff(&ComposerSnapshot::from_model(model)) {
        debug!(target: "state", %diff, "state changed");
    }

    debug_assert!(
        model.selection.head <= model.document.len()
            && model.selection.anchor <= model.document.len(),
        "selection out of bounds after {}",
        msg_name
    );
    debug_assert!(
        !(model.menus.command.is_open() && model.menus.mention.is_open()),
        "both menus open after {}",
        msg_name
    );

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Edit::InsertChar('x')`
/// - `Menu::HighlightNext`
/// - `Search::DebounceElapsed { query: "rob" }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::Menu(m) => format!("Menu::{:?}", m),
        Msg::Search(crate::messages::SearchMsg::Completed { query, result }) => format!(
            "Search::Completed {{ query: {:?}, ok: {} }}",
            query,
            result.is_ok()
        ),
        Msg::Search(m) => format!("Search::{:?}", m),
        Msg::Host(crate::messages::HostMsg::DocumentResolved { revision, .. }) => {
            format!("Host::DocumentResolved {{ revision: {} }}", revision)
        }
        Msg::Host(m) => format!("Host::{:?}", m),
    }
}
