//! Trigger detection for the "/" command menu and the "@" mention menu
//!
//! Works on the plain-text projection of the document, where each reference
//! token is U+FFFC and each paragraph break is `\n`. The scan walks backward
//! from the cursor to the nearest trigger character.

use serde::{Deserialize, Serialize};

use crate::model::document::OBJECT_REPLACEMENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// "/" opens the template menu
    Slash,
    /// "@" opens the reference search menu
    At,
}

impl TriggerKind {
    pub fn as_char(self) -> char {
        match self {
            TriggerKind::Slash => '/',
            TriggerKind::At => '@',
        }
    }
}

/// An active trigger: where its character sits and what was typed after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerContext {
    pub kind: TriggerKind,
    /// Offset of the trigger character itself
    pub anchor_offset: usize,
    /// Text between the trigger character and the cursor
    pub filter_text: String,
}

impl TriggerContext {
    pub fn new(kind: TriggerKind, anchor_offset: usize, filter_text: impl Into<String>) -> Self {
        Self {
            kind,
            anchor_offset,
            filter_text: filter_text.into(),
        }
    }

    /// Trigger character followed by the filter, e.g. `@rob`
    pub fn marker_text(&self) -> String {
        let mut text = String::with_capacity(self.filter_text.len() + 1);
        text.push(self.kind.as_char());
        text.push_str(&self.filter_text);
        text
    }

    /// Length of the trigger span in offset units
    pub fn span_len(&self) -> usize {
        1 + self.filter_text.chars().count()
    }
}

/// Find the trigger governing `cursor` (a char offset into `text`).
///
/// A trigger character counts only at a word boundary: start of text or right
/// after whitespace. Between it and the cursor there may be no token and no
/// whitespace other than `\n`; a "/" filter additionally may not cross a line
/// break or contain another "/".
pub fn detect(text: &str, cursor: usize) -> Option<TriggerContext> {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let mut slash_allowed = true;

    let mut ix = cursor;
    while ix > 0 {
        ix -= 1;
        match chars[ix] {
            '/' if slash_allowed => {
                if at_boundary(&chars, ix) {
                    return Some(context(TriggerKind::Slash, &chars, ix, cursor));
                }
                slash_allowed = false;
            }
            // Mid-word "@" is an ordinary filter character
            '@' if at_boundary(&chars, ix) => {
                return Some(context(TriggerKind::At, &chars, ix, cursor));
            }
            '\n' => slash_allowed = false,
            OBJECT_REPLACEMENT => return None,
            ch if ch.is_whitespace() => return None,
            _ => {}
        }
    }
    None
}

fn at_boundary(chars: &[char], ix: usize) -> bool {
    ix == 0 || chars[ix - 1].is_whitespace()
}

fn context(kind: TriggerKind, chars: &[char], anchor: usize, cursor: usize) -> TriggerContext {
    TriggerContext::new(kind, anchor, chars[anchor + 1..cursor].iter().collect::<String>())
}
