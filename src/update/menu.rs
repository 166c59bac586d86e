//! Menu message handlers: navigation, confirm, dismiss

use crate::commands::Cmd;
use crate::insert;
use crate::messages::MenuMsg;
use crate::model::{ComposerModel, MenuItem, Selection};

use super::trigger::{dismiss_trigger, refresh_trigger};

pub fn update_menu(model: &mut ComposerModel, msg: MenuMsg) -> Option<Cmd> {
    match msg {
        MenuMsg::HighlightNext => {
            model.menus.active_mut()?.highlight_next();
            None
        }
        MenuMsg::HighlightPrevious => {
            model.menus.active_mut()?.highlight_previous();
            None
        }
        MenuMsg::Highlight(index) => {
            model.menus.active_mut()?.highlight(index);
            None
        }
        MenuMsg::Confirm => commit_selection(model),
        MenuMsg::ConfirmIndex(index) => {
            if !model.menus.active_mut()?.highlight(index) {
                return None;
            }
            commit_selection(model)
        }
        MenuMsg::Cancel => Cmd::from_vec(dismiss_trigger(model)),
    }
}

/// Close the active menu and insert its highlighted item in place of the trigger span
fn commit_selection(model: &mut ComposerModel) -> Option<Cmd> {
    let menu = model.menus.active_mut()?.close()?;
    let mut cmds = Vec::new();
    if model.search.reset_request() {
        cmds.push(Cmd::CancelSearch);
    }

    let Some(item) = menu.items.get(menu.highlighted) else {
        // Nothing to insert; keep the typed text but stop offering this trigger
        model.dismissed_trigger = Some((menu.origin.kind, menu.origin.anchor_offset));
        return Cmd::from_vec(cmds);
    };

    let near = model.cursor();
    let result = match item {
        MenuItem::Search(result) => insert::insert_reference(
            &mut model.document,
            &menu.origin,
            near,
            result.to_reference(),
            model.config.separator,
        ),
        MenuItem::Template(template) => insert::insert_template(
            &mut model.document,
            &menu.origin,
            near,
            template,
            &model.template_vars,
        ),
    };

    match result {
        Ok(insertion) => {
            model.selection = Selection::collapsed(insertion.cursor);
            model.revision += 1;
            model.trigger = None;
            cmds.extend(refresh_trigger(model));
            cmds.push(Cmd::Focus {
                cursor: insertion.cursor,
            });
            cmds.push(Cmd::NotifyChange {
                canonical: insertion.canonical,
            });
        }
        Err(err) => {
            tracing::warn!("Skipping insertion: {}", err);
            model.trigger = None;
            cmds.extend(refresh_trigger(model));
        }
    }
    Cmd::from_vec(cmds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MenuKind;
    use crate::search::SearchResult;
    use crate::trigger::{TriggerContext, TriggerKind};

    fn mention_model(text: &str, filter: &str, items: Vec<SearchResult>) -> ComposerModel {
        let mut model = ComposerModel::with_text(text, Default::default());
        let anchor = text.chars().count() - filter.chars().count() - 1;
        let origin = TriggerContext::new(TriggerKind::At, anchor, filter);
        model.trigger = Some(origin.clone());
        model.menus.open(MenuKind::Mention, origin, None);
        model
            .menus
            .mention
            .set_items(items.into_iter().map(MenuItem::Search).collect());
        model
    }

    #[test]
    fn test_confirm_inserts_block_reference() {
        let results = vec![SearchResult::block("xyz123", "Robert")];
        let mut model = mention_model("check @rob", "rob", results);
        let cmds = update_menu(&mut model, MenuMsg::Confirm).unwrap().flatten();

        assert_eq!(model.canonical(), "check ((xyz123)) ");
        assert_eq!(model.cursor(), 8);
        assert!(!model.is_menu_open());
        assert!(cmds.contains(&Cmd::Focus { cursor: 8 }));
        assert!(cmds.contains(&Cmd::NotifyChange {
            canonical: "check ((xyz123)) ".into()
        }));
    }

    #[test]
    fn test_confirm_index_out_of_range_is_ignored() {
        let mut model = mention_model("@a", "a", vec![SearchResult::page("p", "Alpha")]);
        assert_eq!(update_menu(&mut model, MenuMsg::ConfirmIndex(5)), None);
        assert!(model.is_menu_open());
        assert_eq!(model.canonical(), "@a");
    }

    #[test]
    fn test_confirm_with_vanished_span_is_noop() {
        let results = vec![SearchResult::page("p", "Rob")];
        let mut model = mention_model("check @rob", "rob", results);
        // Text changed behind the menu's back
        model.document = crate::model::Document::from_text("check nothing");
        model.set_cursor(13);
        let revision = model.revision;
        update_menu(&mut model, MenuMsg::Confirm);
        assert_eq!(model.canonical(), "check nothing");
        assert_eq!(model.revision, revision);
        assert!(!model.is_menu_open());
    }

    #[test]
    fn test_cancel_marks_trigger_dismissed() {
        let mut model = mention_model("hi @ro", "ro", vec![]);
        update_menu(&mut model, MenuMsg::Cancel);
        assert!(!model.is_menu_open());
        assert_eq!(model.dismissed_trigger, Some((TriggerKind::At, 3)));
        assert_eq!(model.canonical(), "hi @ro");
    }

    #[test]
    fn test_navigation_without_menu_is_noop() {
        let mut model = ComposerModel::with_text("plain", Default::default());
        assert_eq!(update_menu(&mut model, MenuMsg::HighlightNext), None);
        assert_eq!(update_menu(&mut model, MenuMsg::Confirm), None);
    }
}
