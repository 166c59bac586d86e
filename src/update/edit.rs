//! Editing message handlers

use crate::commands::Cmd;
use crate::messages::EditMsg;
use crate::model::{ComposerModel, Document, Selection};

use super::trigger::{clear_trigger, refresh_trigger};

pub fn update_edit(model: &mut ComposerModel, msg: EditMsg) -> Option<Cmd> {
    match msg {
        EditMsg::InsertChar(ch) => replace_selection(model, ch.encode_utf8(&mut [0; 4])),
        EditMsg::InsertText(text) => replace_selection(model, &text),
        EditMsg::InsertNewline => replace_selection(model, "\n"),

        EditMsg::DeleteBackward => {
            let range = if model.selection.is_empty() {
                let cursor = model.cursor();
                if cursor == 0 {
                    return None;
                }
                cursor - 1..cursor
            } else {
                model.selection.range()
            };
            delete(model, range)
        }

        EditMsg::DeleteForward => {
            let range = if model.selection.is_empty() {
                let cursor = model.cursor();
                if cursor >= model.document.len() {
                    return None;
                }
                cursor..cursor + 1
            } else {
                model.selection.range()
            };
            delete(model, range)
        }

        EditMsg::MoveLeft { extend } => {
            let target = if !extend && !model.selection.is_empty() {
                model.selection.start()
            } else {
                model.cursor().saturating_sub(1)
            };
            move_to(model, target, extend)
        }

        EditMsg::MoveRight { extend } => {
            let target = if !extend && !model.selection.is_empty() {
                model.selection.end()
            } else {
                (model.cursor() + 1).min(model.document.len())
            };
            move_to(model, target, extend)
        }

        EditMsg::MoveToStart { extend } => move_to(model, 0, extend),
        EditMsg::MoveToEnd { extend } => {
            let end = model.document.len();
            move_to(model, end, extend)
        }

        EditMsg::SetSelection { anchor, head } => {
            let len = model.document.len();
            model.selection = Selection::new(anchor.min(len), head.min(len));
            after_cursor_move(model)
        }

        EditMsg::SelectAll => {
            model.selection = Selection::new(0, model.document.len());
            after_cursor_move(model)
        }

        EditMsg::Submit => submit(model),

        EditMsg::Clear => {
            if model.document.is_empty() {
                return None;
            }
            model.document.clear();
            model.selection = Selection::collapsed(0);
            model.revision += 1;
            let mut cmds = clear_trigger(model);
            cmds.push(Cmd::NotifyChange {
                canonical: String::new(),
            });
            Cmd::from_vec(cmds)
        }
    }
}

fn replace_selection(model: &mut ComposerModel, text: &str) -> Option<Cmd> {
    let range = model.selection.range();
    let cursor = model.document.replace_with_text(range, text);
    model.selection = Selection::collapsed(cursor);
    after_edit(model)
}

fn delete(model: &mut ComposerModel, range: std::ops::Range<usize>) -> Option<Cmd> {
    let start = range.start;
    model.document.delete_range(range);
    model.selection = Selection::collapsed(start);
    after_edit(model)
}

fn move_to(model: &mut ComposerModel, target: usize, extend: bool) -> Option<Cmd> {
    if extend {
        model.selection.extend_to(target);
    } else {
        model.selection = Selection::collapsed(target);
    }
    after_cursor_move(model)
}

/// Bookkeeping after the document content changed
pub(super) fn after_edit(model: &mut ComposerModel) -> Option<Cmd> {
    model.revision += 1;
    model.selection.clamp(model.document.len());
    let mut cmds = refresh_trigger(model);
    cmds.push(Cmd::NotifyChange {
        canonical: model.canonical(),
    });
    Cmd::from_vec(cmds)
}

fn after_cursor_move(model: &mut ComposerModel) -> Option<Cmd> {
    Cmd::from_vec(refresh_trigger(model))
}

fn submit(model: &mut ComposerModel) -> Option<Cmd> {
    if model.document.is_blank() {
        tracing::debug!("Ignoring submit of blank document");
        return None;
    }

    let document = model.document.normalized();
    tracing::debug!(len = document.len(), "Submitting document");
    let mut cmds = vec![Cmd::Send { document }];

    if model.config.clear_on_send {
        model.document = Document::new();
        model.selection = Selection::collapsed(0);
        model.revision += 1;
        cmds.extend(clear_trigger(model));
        cmds.push(Cmd::NotifyChange {
            canonical: String::new(),
        });
    }
    Cmd::from_vec(cmds)
}
