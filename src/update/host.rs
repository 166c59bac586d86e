//! Host message handlers: loading content, caret position, templates

use crate::commands::Cmd;
use crate::messages::HostMsg;
use crate::model::{ComposerModel, Selection};

use super::trigger::{clear_trigger, dismiss_trigger, refilter_templates};

pub fn update_host(model: &mut ComposerModel, msg: HostMsg) -> Option<Cmd> {
    match msg {
        HostMsg::SetCanonical(source) => {
            model.revision += 1;
            let mut cmds = clear_trigger(model);
            cmds.push(Cmd::ResolveDocument {
                source,
                revision: model.revision,
            });
            Cmd::from_vec(cmds)
        }

        HostMsg::DocumentResolved { document, revision } => {
            if revision != model.revision {
                tracing::debug!(
                    revision,
                    current = model.revision,
                    "Discarding stale document load"
                );
                return None;
            }
            model.document = document;
            model.selection = Selection::collapsed(model.document.len());
            Cmd::from_vec(clear_trigger(model))
        }

        HostMsg::CloseMenus => Cmd::from_vec(dismiss_trigger(model)),

        HostMsg::SetCaretRect(rect) => {
            model.caret = Some(rect);
            None
        }

        HostMsg::TemplatesLoaded(templates) => {
            tracing::debug!(count = templates.len(), "Templates loaded");
            model.templates = templates;
            refilter_templates(model);
            None
        }

        HostMsg::SetTemplateVars(vars) => {
            model.template_vars = vars;
            None
        }
    }
}
