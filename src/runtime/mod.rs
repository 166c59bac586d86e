//! Runtime module - async integration
//!
//! - `app` - the [`Composer`], which owns the model and executes commands
//! - `collaborators` - traits for previews, search, templates, and the host

pub mod app;
pub mod collaborators;

pub use app::Composer;
pub use collaborators::{
    Collaborators, ComposerHost, PreviewResolver, SearchProvider, TemplateCatalog,
};
