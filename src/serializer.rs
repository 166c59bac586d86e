//! Canonical string form of a document
//!
//! Block references serialize as `((id))`, page references as `[[Title]]`,
//! paragraphs are joined with `\n`, and text runs are emitted verbatim.
//! Deserialization scans for those markers and resolves block previews through
//! a [`PreviewResolver`], one lookup at a time and in document order.

use std::borrow::Cow;

use crate::model::document::{Document, Inline, Paragraph, ReferenceKind, ReferenceToken};
use crate::runtime::PreviewResolver;

/// Characters allowed in a block id
pub fn is_block_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Canonical form of a document
pub fn serialize(doc: &Document) -> String {
    let doc = if doc.is_normalized() {
        Cow::Borrowed(doc)
    } else {
        Cow::Owned(doc.normalized())
    };

    let mut out = String::new();
    for (ix, paragraph) in doc.paragraphs().iter().enumerate() {
        if ix > 0 {
            out.push('\n');
        }
        for inline in &paragraph.inlines {
            match inline {
                Inline::Text(text) => out.push_str(text),
                Inline::Reference(token) => push_marker(&mut out, token),
            }
        }
    }
    out
}

fn push_marker(out: &mut String, token: &ReferenceToken) {
    match token.kind {
        ReferenceKind::Block => {
            out.push_str("((");
            out.push_str(&token.id);
            out.push_str("))");
        }
        ReferenceKind::Page => {
            out.push_str("[[");
            out.push_str(&token.preview_text);
            out.push_str("]]");
        }
    }
}

/// A piece of a canonical string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    BlockMarker(String),
    PageMarker(String),
}

/// Split a canonical string into literal text and reference markers.
///
/// Malformed markers (`(())`, `((a b))`, `[[]]`, unterminated ones) stay literal text.
pub fn scan(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(ch) = rest.chars().next() {
        let marker = match_block_marker(rest)
            .map(|(id, used)| (Segment::BlockMarker(id.to_string()), used))
            .or_else(|| {
                match_page_marker(rest)
                    .map(|(title, used)| (Segment::PageMarker(title.to_string()), used))
            });

        match marker {
            Some((segment, used)) => {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(segment);
                rest = &rest[used..];
            }
            None => {
                text.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

fn match_block_marker(s: &str) -> Option<(&str, usize)> {
    let inner = s.strip_prefix("((")?;
    let len = inner
        .find(|ch: char| !is_block_id_char(ch))
        .unwrap_or(inner.len());
    if len == 0 || !inner[len..].starts_with("))") {
        return None;
    }
    Some((&inner[..len], len + 4))
}

fn match_page_marker(s: &str) -> Option<(&str, usize)> {
    let inner = s.strip_prefix("[[")?;
    // Leftmost "[[" opens; the title runs to the first "]]"
    let end = inner.find("]]")?;
    if end == 0 {
        return None;
    }
    Some((&inner[..end], end + 4))
}

/// Canonical string split into paragraphs of segments, previews not yet resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSkeleton {
    pub paragraphs: Vec<Vec<Segment>>,
}

impl DocumentSkeleton {
    pub fn parse(source: &str) -> Self {
        let mut paragraphs: Vec<Vec<Segment>> = vec![Vec::new()];
        for segment in scan(source) {
            match segment {
                Segment::Text(text) => {
                    for (ix, line) in text.split('\n').enumerate() {
                        if ix > 0 {
                            paragraphs.push(Vec::new());
                        }
                        if !line.is_empty() {
                            if let Some(current) = paragraphs.last_mut() {
                                current.push(Segment::Text(line.to_string()));
                            }
                        }
                    }
                }
                marker => {
                    if let Some(current) = paragraphs.last_mut() {
                        current.push(marker);
                    }
                }
            }
        }
        Self { paragraphs }
    }

    /// Block ids in document order, duplicates included
    pub fn block_ids(&self) -> Vec<&str> {
        self.paragraphs
            .iter()
            .flatten()
            .filter_map(|segment| match segment {
                Segment::BlockMarker(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Resolve block previews through the collaborator, sequentially in document order
    pub async fn resolve(&self, resolver: &dyn PreviewResolver) -> Document {
        let mut previews = Vec::new();
        for id in self.block_ids() {
            match resolver.resolve_preview(id).await {
                Ok(preview) => previews.push(Some(preview)),
                Err(err) => {
                    tracing::warn!(block = id, "Block preview lookup failed: {:#}", err);
                    previews.push(None);
                }
            }
        }
        self.assemble(previews)
    }

    /// Resolve with a synchronous lookup; `None` means the lookup failed
    pub fn resolve_with<F>(&self, mut lookup: F) -> Document
    where
        F: FnMut(&str) -> Option<String>,
    {
        let previews = self.block_ids().into_iter().map(&mut lookup).collect();
        self.assemble(previews)
    }

    fn assemble(&self, previews: Vec<Option<String>>) -> Document {
        let mut previews = previews.into_iter();
        let paragraphs = self
            .paragraphs
            .iter()
            .map(|segments| {
                let mut paragraph = Paragraph::new();
                for segment in segments {
                    match segment {
                        Segment::Text(text) => paragraph.push_text(text),
                        Segment::PageMarker(title) => {
                            paragraph.push_reference(ReferenceToken::page(title.as_str()))
                        }
                        Segment::BlockMarker(id) => match previews.next().flatten() {
                            Some(preview) if preview.is_empty() => paragraph.push_reference(
                                ReferenceToken::block(id.as_str(), ReferenceToken::placeholder_preview(id)),
                            ),
                            Some(preview) => {
                                paragraph.push_reference(ReferenceToken::block(id.as_str(), preview))
                            }
                            // Failed lookup keeps the marker as literal text
                            None => paragraph.push_text(&format!("(({}))", id)),
                        },
                    }
                }
                paragraph
            })
            .collect();
        Document::from_paragraphs(paragraphs)
    }
}

/// Parse a canonical string and resolve its block previews
pub async fn deserialize(source: &str, resolver: &dyn PreviewResolver) -> Document {
    DocumentSkeleton::parse(source).resolve(resolver).await
}
