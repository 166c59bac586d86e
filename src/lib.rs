//! inlay - a reference-aware composer core
//!
//! A plain-text editing surface with inline block `((id))` and page `[[Title]]`
//! reference tokens, a "/" template menu, and an "@" mention menu backed by a
//! debounced, cached search.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod input;
pub mod insert;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod search;
pub mod serializer;
pub mod templates;
pub mod tracing;
pub mod trigger;
pub mod update;

pub use commands::Cmd;
pub use config::ComposerConfig;
pub use insert::InsertError;
pub use messages::Msg;
pub use model::{ComposerModel, Document, ReferenceKind, ReferenceToken};
pub use runtime::Composer;
