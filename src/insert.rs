//! Replacing a trigger span with a chosen menu item
//!
//! The span (`@rob`, `/meet`) is located again at confirm time instead of being
//! trusted from when the menu opened. Either the whole replacement lands or the
//! document is left untouched.

use std::ops::Range;

use thiserror::Error;

use crate::model::document::{Document, Inline, ReferenceToken};
use crate::serializer;
use crate::templates::{TemplateItem, TemplateVars};
use crate::trigger::TriggerContext;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("trigger text `{needle}` not found near offset {near}")]
    SpanNotFound { needle: String, near: usize },
}

/// Result of a successful insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Range the trigger span occupied before the edit
    pub replaced: Range<usize>,
    /// Cursor position after the inserted content
    pub cursor: usize,
    /// Canonical form of the edited document
    pub canonical: String,
}

/// Find the trigger span in `text` (the document's plain-text projection).
///
/// The recorded anchor is tried first. Otherwise the boundary-valid occurrence
/// ending closest to `near` wins, ties going to the one before it.
pub fn locate_trigger_span(
    text: &str,
    trigger: &TriggerContext,
    near: usize,
) -> Option<Range<usize>> {
    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = trigger.marker_text().chars().collect();

    let matches_at = |start: usize| {
        start + needle.len() <= chars.len()
            && chars[start..start + needle.len()] == needle[..]
            && (start == 0 || chars[start - 1].is_whitespace())
    };

    if matches_at(trigger.anchor_offset) {
        return Some(trigger.anchor_offset..trigger.anchor_offset + needle.len());
    }

    (0..chars.len())
        .filter(|&start| matches_at(start))
        .map(|start| start..start + needle.len())
        .min_by_key(|span| (span.end.abs_diff(near), span.end > near))
}

fn locate_span(
    doc: &Document,
    trigger: &TriggerContext,
    near: usize,
) -> Result<Range<usize>, InsertError> {
    locate_trigger_span(&doc.plain_text(), trigger, near).ok_or_else(|| {
        InsertError::SpanNotFound {
            needle: trigger.marker_text(),
            near,
        }
    })
}

/// Replace the trigger span with `token` followed by `separator`
pub fn insert_reference(
    doc: &mut Document,
    trigger: &TriggerContext,
    near: usize,
    token: ReferenceToken,
    separator: char,
) -> Result<Insertion, InsertError> {
    let span = locate_span(doc, trigger, near)?;
    let cursor = doc.replace_range(
        span.clone(),
        vec![Inline::Reference(token), Inline::Text(separator.to_string())],
    );
    tracing::debug!(?span, cursor, "Inserted reference");
    Ok(Insertion {
        replaced: span,
        cursor,
        canonical: serializer::serialize(doc),
    })
}

/// Replace the trigger span with the template body, placeholders expanded
pub fn insert_template(
    doc: &mut Document,
    trigger: &TriggerContext,
    near: usize,
    template: &TemplateItem,
    vars: &TemplateVars,
) -> Result<Insertion, InsertError> {
    let span = locate_span(doc, trigger, near)?;
    let cursor = doc.replace_with_text(span.clone(), &vars.expand(&template.body));
    tracing::debug!(?span, cursor, template = %template.id, "Inserted template");
    Ok(Insertion {
        replaced: span,
        cursor,
        canonical: serializer::serialize(doc),
    })
}
