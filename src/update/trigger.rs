//! Keeping the active trigger and its menu in step with the document

use crate::commands::Cmd;
use crate::model::{ComposerModel, MenuItem, MenuKind};
use crate::templates::filter_templates;
use crate::trigger::{self, TriggerContext, TriggerKind};

use super::search::request_search;

/// Re-run trigger detection at the cursor and open, refilter, or close menus.
///
/// Called after every content change and cursor move.
pub fn refresh_trigger(model: &mut ComposerModel) -> Vec<Cmd> {
    let detected = if model.selection.is_empty() {
        trigger::detect(&model.document.plain_text(), model.cursor())
    } else {
        None
    };

    let Some(ctx) = detected else {
        return clear_trigger(model);
    };

    if model.dismissed_trigger == Some((ctx.kind, ctx.anchor_offset)) {
        model.trigger = Some(ctx);
        return Vec::new();
    }
    model.dismissed_trigger = None;

    let kind = MenuKind::for_trigger(ctx.kind);
    let same_trigger = model.menus.get(kind).is_open()
        && model
            .trigger
            .as_ref()
            .is_some_and(|prev| prev.kind == ctx.kind && prev.anchor_offset == ctx.anchor_offset);
    let filter_changed = model
        .trigger
        .as_ref()
        .map_or(true, |prev| prev.filter_text != ctx.filter_text);

    let mut cmds = Vec::new();
    if same_trigger {
        model.menus.get_mut(kind).set_origin(ctx.clone());
    } else {
        tracing::debug!(kind = ?ctx.kind, anchor = ctx.anchor_offset, "Opening menu");
        if model.search.reset_request() {
            cmds.push(Cmd::CancelSearch);
        }
        model.menus.open(kind, ctx.clone(), model.caret);
    }
    model.trigger = Some(ctx.clone());

    match ctx.kind {
        TriggerKind::Slash => {
            if !same_trigger || filter_changed {
                refilter_templates(model);
            }
        }
        TriggerKind::At => cmds.extend(request_search(model, &ctx.filter_text)),
    }
    cmds
}

/// Forget the trigger and close menus, cancelling any pending search
pub(super) fn clear_trigger(model: &mut ComposerModel) -> Vec<Cmd> {
    model.dismissed_trigger = None;
    let had_trigger = model.trigger.take().is_some();
    let closed = model.menus.close_all();
    if had_trigger || closed {
        tracing::debug!("Trigger cleared");
    }
    if model.search.reset_request() {
        vec![Cmd::CancelSearch]
    } else {
        Vec::new()
    }
}

/// Close menus for a trigger the user chose to ignore
pub(super) fn dismiss_trigger(model: &mut ComposerModel) -> Vec<Cmd> {
    let Some(origin) = model.menus.active().map(|menu| menu.origin.clone()) else {
        return Vec::new();
    };
    tracing::debug!(kind = ?origin.kind, anchor = origin.anchor_offset, "Menu dismissed");
    model.menus.close_all();
    model.dismissed_trigger = Some((origin.kind, origin.anchor_offset));
    if model.search.reset_request() {
        vec![Cmd::CancelSearch]
    } else {
        Vec::new()
    }
}

/// Repopulate an open command menu from the template catalog
pub(super) fn refilter_templates(model: &mut ComposerModel) {
    let Some(filter) = model
        .menus
        .command
        .as_open()
        .map(|menu| menu.origin.filter_text.clone())
    else {
        return;
    };
    let items = filter_templates(&model.templates, &filter)
        .into_iter()
        .map(MenuItem::Template)
        .collect();
    model.menus.command.set_items(items);
}

/// Trigger context for the open menu, if it still matches the detected trigger
pub(super) fn current_trigger(model: &ComposerModel, kind: TriggerKind) -> Option<&TriggerContext> {
    model
        .trigger
        .as_ref()
        .filter(|ctx| ctx.kind == kind && model.menus.get(MenuKind::for_trigger(kind)).is_open())
}
