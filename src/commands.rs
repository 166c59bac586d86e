//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::model::Document;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    // === Host Notifications ===
    /// Content changed; carries the new canonical string
    NotifyChange { canonical: String },
    /// User submitted the document
    Send { document: Document },
    /// Return focus to the editor with the caret at `cursor`
    Focus { cursor: usize },

    // === Search Commands ===
    /// (Re)start the debounce timer for a search
    /// After delay_ms, sends Msg::Search(DebounceElapsed)
    DebouncedSearch { query: String, delay_ms: u64 },
    /// Drop any pending debounce timer
    CancelSearch,
    /// Call the search provider in the background
    /// Sends Msg::Search(Completed) when done
    RunSearch { query: String, limit: usize },

    // === Document Loading ===
    /// Resolve a canonical string into a document in the background
    /// Sends Msg::Host(DocumentResolved) when done
    ResolveDocument { source: String, revision: u64 },
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Fold a list into the smallest equivalent command
    pub fn from_vec(mut cmds: Vec<Cmd>) -> Option<Cmd> {
        cmds.retain(|cmd| !matches!(cmd, Cmd::None));
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }

    /// True if this command, or any command in a batch, matches
    pub fn any(&self, pred: &impl Fn(&Cmd) -> bool) -> bool {
        match self {
            Cmd::Batch(cmds) => cmds.iter().any(|cmd| cmd.any(pred)),
            cmd => pred(cmd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        assert_eq!(Cmd::from_vec(vec![]), None);
        assert_eq!(Cmd::from_vec(vec![Cmd::None, Cmd::CancelSearch]), Some(Cmd::CancelSearch));
        assert!(matches!(
            Cmd::from_vec(vec![Cmd::CancelSearch, Cmd::Focus { cursor: 1 }]),
            Some(Cmd::Batch(cmds)) if cmds.len() == 2
        ));
    }

    #[test]
    fn test_flatten_nested_batches() {
        let cmd = Cmd::batch(vec![
            Cmd::CancelSearch,
            Cmd::batch(vec![Cmd::None, Cmd::Focus { cursor: 3 }]),
        ]);
        assert!(cmd.any(&|c| matches!(c, Cmd::Focus { cursor: 3 })));
        assert_eq!(cmd.flatten(), vec![Cmd::CancelSearch, Cmd::Focus { cursor: 3 }]);
    }
}
