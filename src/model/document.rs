//! Document model - paragraphs of plain text runs and atomic reference tokens
//!
//! Positions are flat character offsets over the document's plain-text projection:
//! every text character is one unit, every reference token is one unit (projected as
//! U+FFFC), and every paragraph boundary is one unit (projected as `\n`). Offsets can
//! only address unit boundaries, so a token can be selected or deleted but never split.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Stand-in for a reference token in the plain-text projection
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// What a reference token points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Block,
    Page,
}

/// Atomic inline reference to an external block or page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceToken {
    pub kind: ReferenceKind,
    pub id: String,
    pub preview_text: String,
}

impl ReferenceToken {
    pub fn block(id: impl Into<String>, preview_text: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Block,
            id: id.into(),
            preview_text: preview_text.into(),
        }
    }

    /// Page token whose identity is its title (the form produced by `[[Title]]`)
    pub fn page(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            kind: ReferenceKind::Page,
            id: title.clone(),
            preview_text: title,
        }
    }

    /// Page token carrying a host id; only the title survives serialization
    pub fn page_with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Page,
            id: id.into(),
            preview_text: title.into(),
        }
    }

    /// Preview shown for a block whose lookup produced no text
    pub fn placeholder_preview(id: &str) -> String {
        format!("Block {}", id)
    }

    pub fn identity(&self) -> (ReferenceKind, &str) {
        (self.kind, &self.id)
    }
}

/// A run of plain text or a single reference token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Reference(ReferenceToken),
}

impl Inline {
    /// Length in offset units
    pub fn len(&self) -> usize {
        match self {
            Inline::Text(text) => text.chars().count(),
            Inline::Reference(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Inline::Text(text) => text.is_empty(),
            Inline::Reference(_) => false,
        }
    }
}

/// Ordered sequence of text runs and reference tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut paragraph = Self::new();
        paragraph.push_text(text);
        paragraph
    }

    /// Length in offset units
    pub fn len(&self) -> usize {
        self.inlines.iter().map(Inline::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.iter().all(Inline::is_empty)
    }

    /// Append text, merging into a trailing text run
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = self.inlines.last_mut() {
            last.push_str(text);
        } else {
            self.inlines.push(Inline::Text(text.to_string()));
        }
    }

    pub fn push_reference(&mut self, token: ReferenceToken) {
        self.inlines.push(Inline::Reference(token));
    }

    /// Merge adjacent text runs and drop empty ones
    pub fn normalize(&mut self) {
        let inlines = std::mem::take(&mut self.inlines);
        for inline in inlines {
            match inline {
                Inline::Text(text) => self.push_text(&text),
                Inline::Reference(token) => self.push_reference(token),
            }
        }
    }

    pub fn is_normalized(&self) -> bool {
        let no_empty_runs = self
            .inlines
            .iter()
            .all(|inline| !matches!(inline, Inline::Text(t) if t.is_empty()));
        let no_adjacent_runs = self
            .inlines
            .windows(2)
            .all(|pair| !matches!(pair, [Inline::Text(_), Inline::Text(_)]));
        no_empty_runs && no_adjacent_runs
    }

    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Text(text) => out.push_str(text),
                Inline::Reference(_) => out.push(OBJECT_REPLACEMENT),
            }
        }
        out
    }

    pub fn references(&self) -> impl Iterator<Item = &ReferenceToken> {
        self.inlines.iter().filter_map(|inline| match inline {
            Inline::Reference(token) => Some(token),
            Inline::Text(_) => None,
        })
    }

    /// Split at `column`, keeping the head and returning the tail
    fn split_off(&mut self, column: usize) -> Paragraph {
        let mut pos = 0;
        for ix in 0..self.inlines.len() {
            if column <= pos {
                return Paragraph {
                    inlines: self.inlines.split_off(ix),
                };
            }
            let len = self.inlines[ix].len();
            if column < pos + len {
                if let Inline::Text(text) = &mut self.inlines[ix] {
                    let rest = text.split_off(byte_index(text, column - pos));
                    let mut tail = vec![Inline::Text(rest)];
                    tail.extend(self.inlines.drain(ix + 1..));
                    return Paragraph { inlines: tail };
                }
            }
            pos += len;
        }
        Paragraph::new()
    }

    fn append(&mut self, other: Paragraph) {
        self.inlines.extend(other.inlines);
        self.normalize();
    }
}

/// Paragraph index plus column inside that paragraph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocPosition {
    pub paragraph: usize,
    pub column: usize,
}

impl DocPosition {
    pub const fn new(paragraph: usize, column: usize) -> Self {
        Self { paragraph, column }
    }
}

/// A composed message: one or more paragraphs (never zero)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDocument")]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

/// Wire shape of [`Document`]; decoding goes through [`Document::from_paragraphs`]
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    paragraphs: Vec<Paragraph>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        Self::from_paragraphs(raw.paragraphs)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with a single empty paragraph
    pub fn new() -> Self {
        Self {
            paragraphs: vec![Paragraph::new()],
        }
    }

    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let mut doc = Self { paragraphs };
        if doc.paragraphs.is_empty() {
            doc.paragraphs.push(Paragraph::new());
        }
        doc.normalize();
        doc
    }

    /// Plain text only, newlines start new paragraphs
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.insert_text(0, text);
        doc
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Length in offset units
    pub fn len(&self) -> usize {
        let content: usize = self.paragraphs.iter().map(Paragraph::len).sum();
        content + self.paragraphs.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when there is nothing worth sending: no tokens and only whitespace
    pub fn is_blank(&self) -> bool {
        self.paragraphs.iter().all(|p| {
            p.inlines.iter().all(|inline| match inline {
                Inline::Text(text) => text.trim().is_empty(),
                Inline::Reference(_) => false,
            })
        })
    }

    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn references(&self) -> impl Iterator<Item = &ReferenceToken> {
        self.paragraphs.iter().flat_map(Paragraph::references)
    }

    pub fn is_normalized(&self) -> bool {
        self.paragraphs.iter().all(Paragraph::is_normalized)
    }

    pub fn normalize(&mut self) {
        for paragraph in &mut self.paragraphs {
            paragraph.normalize();
        }
    }

    pub fn normalized(&self) -> Self {
        let mut doc = self.clone();
        doc.normalize();
        doc
    }

    pub fn clear(&mut self) {
        self.paragraphs = vec![Paragraph::new()];
    }

    /// Convert a flat offset (clamped to the document) into paragraph/column
    pub fn position_of(&self, offset: usize) -> DocPosition {
        let mut remaining = offset.min(self.len());
        let last = self.paragraphs.len() - 1;
        for (ix, paragraph) in self.paragraphs.iter().enumerate() {
            let len = paragraph.len();
            if remaining <= len || ix == last {
                return DocPosition::new(ix, remaining.min(len));
            }
            remaining -= len + 1;
        }
        DocPosition::new(last, self.paragraphs[last].len())
    }

    pub fn offset_of(&self, pos: DocPosition) -> usize {
        let paragraph = pos.paragraph.min(self.paragraphs.len() - 1);
        let before: usize = self.paragraphs[..paragraph]
            .iter()
            .map(|p| p.len() + 1)
            .sum();
        before + pos.column.min(self.paragraphs[paragraph].len())
    }

    /// Token occupying the unit that starts at `offset`, if any
    pub fn reference_at(&self, offset: usize) -> Option<&ReferenceToken> {
        let pos = self.position_of(offset);
        let mut column = 0;
        for inline in &self.paragraphs[pos.paragraph].inlines {
            if column > pos.column {
                break;
            }
            if let Inline::Reference(token) = inline {
                if column == pos.column {
                    return Some(token);
                }
            }
            column += inline.len();
        }
        None
    }

    /// Insert text at `offset`, returning the offset just after it.
    /// Newlines open new paragraphs.
    pub fn insert_text(&mut self, offset: usize, text: &str) -> usize {
        let text = text.replace("\r\n", "\n");
        let mut cursor = offset.min(self.len());
        for (ix, line) in text.split('\n').enumerate() {
            if ix > 0 {
                cursor = self.split_paragraph(cursor);
            }
            if !line.is_empty() {
                cursor = self.insert_inlines(cursor, vec![Inline::Text(line.to_string())]);
            }
        }
        cursor
    }

    /// Insert a token at `offset`, returning the offset just after it
    pub fn insert_reference(&mut self, offset: usize, token: ReferenceToken) -> usize {
        self.insert_inlines(offset, vec![Inline::Reference(token)])
    }

    /// Remove a range, joining paragraphs whose boundary falls inside it
    pub fn delete_range(&mut self, range: Range<usize>) {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return;
        }

        let from = self.position_of(start);
        let to = self.position_of(end);

        let tail = self.paragraphs[to.paragraph].split_off(to.column);
        self.paragraphs[from.paragraph].split_off(from.column);
        if to.paragraph > from.paragraph {
            self.paragraphs.drain(from.paragraph + 1..=to.paragraph);
        }
        self.paragraphs[from.paragraph].append(tail);
    }

    /// Replace a range with inline content, returning the offset after it.
    /// Newlines inside text runs open new paragraphs.
    pub fn replace_range(&mut self, range: Range<usize>, inlines: Vec<Inline>) -> usize {
        let mut cursor = range.start.min(self.len());
        self.delete_range(range);
        for inline in inlines {
            cursor = match inline {
                Inline::Text(text) => self.insert_text(cursor, &text),
                Inline::Reference(token) => self.insert_reference(cursor, token),
            };
        }
        cursor
    }

    /// Replace a range with plain text, returning the offset after it
    pub fn replace_with_text(&mut self, range: Range<usize>, text: &str) -> usize {
        self.replace_range(range, vec![Inline::Text(text.to_string())])
    }

    /// Insert inline content (no paragraph breaks) at `offset`
    fn insert_inlines(&mut self, offset: usize, inlines: Vec<Inline>) -> usize {
        let pos = self.position_of(offset);
        let inserted: usize = inlines.iter().map(Inline::len).sum();
        let paragraph = &mut self.paragraphs[pos.paragraph];
        let tail = paragraph.split_off(pos.column);
        paragraph.inlines.extend(inlines);
        paragraph.append(tail);
        self.offset_of(pos) + inserted
    }

    fn split_paragraph(&mut self, offset: usize) -> usize {
        let pos = self.position_of(offset);
        let tail = self.paragraphs[pos.paragraph].split_off(pos.column);
        self.paragraphs.insert(pos.paragraph + 1, tail);
        self.offset_of(DocPosition::new(pos.paragraph + 1, 0))
    }
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(ix, _)| ix)
        .unwrap_or(text.len())
}
