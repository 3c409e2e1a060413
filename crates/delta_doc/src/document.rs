//! Flat line-record document
//!
//! The document is a flat ordered sequence of lines. Each line's formatting
//! lives on its terminating newline, so every line contributes its text
//! length plus one to the document length. Structural hierarchy (tables,
//! rows, cells) is never stored here; it is synthesized downstream by
//! grouping adjacent lines that share identity attributes.

use crate::{Attributes, Delta, DeltaOp, DeltaDocError, Range, Result, SchemaRegistry};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Origin of a change or selection update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// A user-originated change
    User,
    /// A programmatic change
    Api,
    /// A change that should not be broadcast to listeners
    Silent,
}

/// One line of the document with its line-level attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Line text, excluding the terminating newline
    pub text: String,
    /// Attributes carried by the terminating newline
    pub attributes: Attributes,
}

impl Line {
    /// Create a line with text and attributes
    pub fn new(text: &str, attributes: Attributes) -> Self {
        Self {
            text: text.to_string(),
            attributes,
        }
    }

    /// Grapheme length of the text, excluding the newline
    pub fn text_len(&self) -> usize {
        self.text.graphemes(true).count()
    }
}

/// Cursor used while applying a delta. `line == lines.len()` means the
/// position after the final newline.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    line: usize,
    offset: usize,
}

/// The flat document: lines, schema, and the current selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    lines: Vec<Line>,
    schema: SchemaRegistry,
    selection: Option<Range>,
}

impl Document {
    /// Create an empty document (one empty line) governed by a schema
    pub fn new(schema: SchemaRegistry) -> Self {
        Self {
            lines: vec![Line::default()],
            schema,
            selection: None,
        }
    }

    /// The lines in document order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The schema this document was created with
    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    /// Total grapheme length, counting one per line terminator
    pub fn len(&self) -> usize {
        self.lines.iter().map(|l| l.text_len() + 1).sum()
    }

    /// A document always holds at least one (empty) line
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].text.is_empty()
    }

    /// Full text with line terminators
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    /// Look up the line at a flat offset.
    ///
    /// Returns the line number, the line, and the offset within the line.
    /// Offsets at or past the document end resolve to `None`.
    pub fn line_at(&self, index: usize) -> Option<(usize, &Line, usize)> {
        let mut acc = 0;
        for (number, line) in self.lines.iter().enumerate() {
            let span = line.text_len() + 1;
            if index < acc + span {
                return Some((number, line, index - acc));
            }
            acc += span;
        }
        None
    }

    /// The current selection, if any
    pub fn selection(&self) -> Option<Range> {
        self.selection
    }

    /// Set the selection. The source tag mirrors the host-engine contract;
    /// silent updates skip listener notification, which this engine does
    /// not model beyond the trace record.
    pub fn set_selection(&mut self, range: Range, source: Source) -> Result<()> {
        let len = self.len();
        if range.end() > len {
            return Err(DeltaDocError::InvalidSelection {
                index: range.index,
                length: range.length,
                len,
            });
        }
        tracing::trace!(index = range.index, length = range.length, ?source, "set selection");
        self.selection = Some(range);
        Ok(())
    }

    /// Drop the selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Apply a delta atomically.
    ///
    /// Retains advance a grapheme cursor; inserting `"\n"` splits the
    /// current line at the cursor, with the prefix taking the operation's
    /// attributes and the remainder keeping the line's original attributes.
    /// Plain text splices into the current line. Attribute keys that are
    /// not registered block formats are dropped (schema normalization).
    /// The delta is validated up front; on error nothing is applied.
    pub fn apply(&mut self, delta: &Delta, source: Source) -> Result<()> {
        let retained = delta.retain_len();
        let len = self.len();
        if retained > len {
            return Err(DeltaDocError::RetainPastEnd { retained, len });
        }

        let mut cursor = Cursor { line: 0, offset: 0 };
        for op in delta.ops() {
            match op {
                DeltaOp::Retain { length } => {
                    cursor = self.advance(cursor, *length);
                }
                DeltaOp::Insert { text, attributes } => {
                    let mut attributes = attributes.clone();
                    attributes.retain_keys(|k| self.schema.is_block_format(k));
                    cursor = self.insert_at(cursor, text, attributes);
                }
            }
        }
        tracing::trace!(ops = delta.ops().len(), ?source, "applied delta");
        Ok(())
    }

    /// Advance the cursor by `n` graphemes, counting one per newline.
    fn advance(&self, mut cursor: Cursor, mut n: usize) -> Cursor {
        while n > 0 && cursor.line < self.lines.len() {
            let left = self.lines[cursor.line].text_len() - cursor.offset;
            if n <= left {
                cursor.offset += n;
                n = 0;
            } else {
                // consume the rest of the line and its newline
                n -= left + 1;
                cursor.line += 1;
                cursor.offset = 0;
            }
        }
        cursor
    }

    /// Insert text at the cursor, returning the cursor after the insert.
    fn insert_at(&mut self, mut cursor: Cursor, text: &str, attributes: Attributes) -> Cursor {
        let mut rest = text;
        while !rest.is_empty() {
            match rest.find('\n') {
                Some(pos) => {
                    let (segment, tail) = rest.split_at(pos);
                    if !segment.is_empty() {
                        cursor = self.splice_text(cursor, segment);
                    }
                    cursor = self.split_line(cursor, attributes.clone());
                    rest = &tail[1..];
                }
                None => {
                    cursor = self.splice_text(cursor, rest);
                    rest = "";
                }
            }
        }
        cursor
    }

    /// Insert a newline at the cursor: the prefix becomes a line carrying
    /// `attributes`, the remainder keeps the original line attributes.
    fn split_line(&mut self, cursor: Cursor, attributes: Attributes) -> Cursor {
        if cursor.line == self.lines.len() {
            // position after the final newline: append a fresh line
            self.lines.push(Line::new("", attributes));
            return Cursor {
                line: self.lines.len(),
                offset: 0,
            };
        }

        let line = &mut self.lines[cursor.line];
        let byte = grapheme_byte_index(&line.text, cursor.offset);
        let suffix = line.text.split_off(byte);
        let original = std::mem::replace(&mut line.attributes, attributes);
        self.lines
            .insert(cursor.line + 1, Line::new(&suffix, original));
        Cursor {
            line: cursor.line + 1,
            offset: 0,
        }
    }

    /// Splice plain text into the line at the cursor.
    fn splice_text(&mut self, cursor: Cursor, text: &str) -> Cursor {
        if cursor.line == self.lines.len() {
            self.lines.push(Line::new(text, Attributes::new()));
            return Cursor {
                line: self.lines.len() - 1,
                offset: text.graphemes(true).count(),
            };
        }

        let line = &mut self.lines[cursor.line];
        let byte = grapheme_byte_index(&line.text, cursor.offset);
        line.text.insert_str(byte, text);
        Cursor {
            line: cursor.line,
            offset: cursor.offset + text.graphemes(true).count(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(SchemaRegistry::new())
    }
}

/// Byte index of the grapheme at `offset`, or the end of the string.
fn grapheme_byte_index(text: &str, offset: usize) -> usize {
    text.grapheme_indices(true)
        .nth(offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
