//! Composer runtime: runs the update loop and executes commands
//!
//! Must be driven from inside a Tokio runtime. Debounce timers and collaborator
//! calls run as tasks that post their outcome back as messages.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::commands::Cmd;
use crate::config::ComposerConfig;
use crate::input::{route_key, KeyInput};
use crate::messages::{HostMsg, Msg, SearchMsg};
use crate::model::ComposerModel;
use crate::search::ScheduledTask;
use crate::serializer::DocumentSkeleton;
use crate::update::update;

use super::collaborators::Collaborators;

pub struct Composer {
    model: ComposerModel,
    collaborators: Collaborators,
    search_debounce: ScheduledTask,
    msg_tx: UnboundedSender<Msg>,
    msg_rx: UnboundedReceiver<Msg>,
}

impl Composer {
    pub fn new(config: ComposerConfig, collaborators: Collaborators) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let mut model = ComposerModel::new(config);
        model.templates = collaborators.templates.templates();

        Self {
            model,
            collaborators,
            search_debounce: ScheduledTask::new(),
            msg_tx,
            msg_rx,
        }
    }

    pub fn model(&self) -> &ComposerModel {
        &self.model
    }

    /// Sender for posting messages from outside the composer
    pub fn sender(&self) -> UnboundedSender<Msg> {
        self.msg_tx.clone()
    }

    /// Run one message through update and execute the resulting commands
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Route a key through the menus and editor. Returns false if the key was not handled.
    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        match route_key(&self.model, key) {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Type each character of `text` as a separate keystroke
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.handle_key(KeyInput::Char(ch));
        }
    }

    /// Replace the content with a canonical string; previews resolve in the background
    pub fn load(&mut self, canonical: impl Into<String>) {
        self.dispatch(Msg::set_canonical(canonical));
    }

    /// Re-read the template catalog
    pub fn reload_templates(&mut self) {
        let templates = self.collaborators.templates.templates();
        self.dispatch(Msg::Host(HostMsg::TemplatesLoaded(templates)));
    }

    /// Handle every message already queued. Returns how many were processed.
    pub fn process_async_messages(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            processed += 1;
        }
        processed
    }

    /// Wait for the next queued message and handle it
    pub async fn next_message(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            Cmd::NotifyChange { canonical } => self.collaborators.host.on_change(&canonical),
            Cmd::Send { document } => self.collaborators.host.on_send(&document),
            Cmd::Focus { cursor } => self.collaborators.host.restore_focus(cursor),

            Cmd::DebouncedSearch { query, delay_ms } => {
                tracing::trace!(query = %query, delay_ms, "Search debounce reset");
                let tx = self.msg_tx.clone();
                self.search_debounce
                    .reset(Duration::from_millis(delay_ms), async move {
                        let _ = tx.send(Msg::Search(SearchMsg::DebounceElapsed { query }));
                    });
            }

            Cmd::CancelSearch => {
                if self.search_debounce.cancel() {
                    tracing::trace!("Pending search cancelled");
                }
            }

            Cmd::RunSearch { query, limit } => {
                let tx = self.msg_tx.clone();
                let provider = Arc::clone(&self.collaborators.search);
                tokio::spawn(async move {
                    tracing::debug!(query = %query, limit, "Running search");
                    let result = provider
                        .search(&query, limit)
                        .await
                        .map_err(|e| format!("{:#}", e));
                    let _ = tx.send(Msg::Search(SearchMsg::Completed { query, result }));
                });
            }

            Cmd::ResolveDocument { source, revision } => {
                let tx = self.msg_tx.clone();
                let previews = Arc::clone(&self.collaborators.previews);
                tokio::spawn(async move {
                    let skeleton = DocumentSkeleton::parse(&source);
                    let document = skeleton.resolve(previews.as_ref()).await;
                    let _ = tx.send(Msg::Host(HostMsg::DocumentResolved { document, revision }));
                });
            }
        }
    }
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("model", &self.model)
            .field("search_pending", &self.search_debounce.is_pending())
            .finish_non_exhaustive()
    }
}
