//! Logging setup and state snapshots for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=inlay::update=debug,inlay::runtime=trace` - module-level filtering
//! - `RUST_LOG=message=debug` - only the per-message trace from `update`
//!
//! # Log Files
//!
//! Logs are written to `~/.config/inlay/logs/inlay.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{ComposerModel, MenuKind};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`.
/// A host that already installed a subscriber keeps it; this call is then a no-op.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: Tracing already initialized: {}", e);
    }
}

/// Lightweight snapshot of composer state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerSnapshot {
    pub revision: u64,
    pub anchor: usize,
    pub head: usize,
    pub menu: Option<MenuKind>,
    pub items: usize,
    pub highlighted: usize,
    pub loading: bool,
}

impl ComposerSnapshot {
    pub fn from_model(model: &ComposerModel) -> Self {
        let menu = model.menus.active();
        Self {
            revision: model.revision,
            anchor: model.selection.anchor,
            head: model.selection.head,
            menu: model.menus.active_kind(),
            items: menu.map_or(0, |m| m.items.len()),
            highlighted: menu.map_or(0, |m| m.highlighted),
            loading: model.search.loading,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &ComposerSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.revision != other.revision {
            changes.push(format!("rev {} → {}", self.revision, other.revision));
        }
        if self.anchor != other.anchor || self.head != other.head {
            changes.push(format!(
                "sel {}..{} → {}..{}",
                self.anchor, self.head, other.anchor, other.head
            ));
        }
        if self.menu != other.menu {
            changes.push(format!("menu {:?} → {:?}", self.menu, other.menu));
        } else if self.items != other.items || self.highlighted != other.highlighted {
            changes.push(format!(
                "items {}[{}] → {}[{}]",
                self.items, self.highlighted, other.items, other.highlighted
            ));
        }
        if self.loading != other.loading {
            let status = if other.loading { "started" } else { "settled" };
            changes.push(format!("search {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
