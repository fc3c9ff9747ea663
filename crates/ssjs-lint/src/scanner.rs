//! Boundary scanner separating embedded script regions from markup.
//!
//! The scanner makes one left-to-right pass. Outside a region it looks for an
//! opening `<script ...>` tag carrying a dialect attribute. Inside a region it
//! walks the code with the [`Lexer`](crate::lexer::Lexer) so that a
//! `</script>` inside a string literal or comment never closes the region.

use serde::Serialize;
use ssjs_core::{
    ByteSpan, Diagnostic, DiagnosticCode, DiagnosticSource, LineCol, LineIndex, SourceDocument,
};

use crate::attributes::{DelimiterAttributes, parse_attributes};
use crate::lexer::{CharClass, Lexer, blank_preserving_bytes};

const OPEN_TAG: &str = "<script";
const CLOSE_TAG: &str = "</script";

/// A span of document text holding script code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeRegion {
    span: ByteSpan,
    opening: Option<ByteSpan>,
    closing: Option<ByteSpan>,
    attributes: DelimiterAttributes,
    start: LineCol,
    opening_start: LineCol,
    unterminated: bool,
}

impl CodeRegion {
    /// Returns the byte span of the code between the delimiters.
    #[must_use]
    pub const fn span(&self) -> ByteSpan {
        self.span
    }

    /// Returns the byte span of the opening delimiter. `None` for the
    /// whole-document region of a pure code file.
    #[must_use]
    pub const fn opening(&self) -> Option<ByteSpan> {
        self.opening
    }

    /// Returns the byte span of the closing delimiter, if one was found.
    #[must_use]
    pub const fn closing(&self) -> Option<ByteSpan> {
        self.closing
    }

    /// Returns the attributes of the opening delimiter.
    #[must_use]
    pub const fn attributes(&self) -> &DelimiterAttributes {
        &self.attributes
    }

    /// Returns the document position of the first code character.
    #[must_use]
    pub const fn start(&self) -> LineCol {
        self.start
    }

    /// Returns the document position of the opening delimiter, or of the
    /// document start for a synthetic region.
    #[must_use]
    pub const fn opening_start(&self) -> LineCol {
        self.opening_start
    }

    /// Returns `true` when no closing delimiter was found.
    #[must_use]
    pub const fn is_unterminated(&self) -> bool {
        self.unterminated
    }

    /// Returns `true` for the whole-document region of a pure code file.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.opening.is_none()
    }

    /// Returns the code text of this region within `text`.
    #[must_use]
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        self.span.slice(text).unwrap_or_default()
    }
}

/// What a [`Segment`] of the document contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Script code inside a region.
    Code,
    /// Markup outside every region.
    NonCode,
    /// An opening or closing delimiter.
    Delimiter,
}

/// A contiguous, non-empty span of the document with a single kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// The kind of text in the span.
    pub kind: SegmentKind,
    /// The covered bytes.
    pub span: ByteSpan,
}

/// The result of scanning one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    regions: Vec<CodeRegion>,
    masked: String,
    diagnostics: Vec<Diagnostic>,
    len: usize,
}

impl Scan {
    /// Returns the regions in ascending document order.
    #[must_use]
    pub fn regions(&self) -> &[CodeRegion] {
        &self.regions
    }

    /// Returns the masked document: region code verbatim, every other
    /// character blanked, line breaks kept and byte length unchanged.
    #[must_use]
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Returns the scanner's own diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the scan, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Partitions the document into code, markup and delimiter segments.
    ///
    /// The segments are contiguous, do not overlap and together cover every
    /// byte of the document. Empty spans are omitted.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        segments_of(&self.regions, self.len)
    }
}

/// Scans `document` for script regions.
///
/// A pure code document yields one region spanning the whole text and a
/// masked copy identical to the input.
#[must_use]
pub fn scan(document: &SourceDocument) -> Scan {
    let text = document.text();
    if document.language().is_pure_code() {
        return Scan {
            regions: vec![CodeRegion {
                span: ByteSpan::new(0, text.len()),
                opening: None,
                closing: None,
                attributes: DelimiterAttributes::default(),
                start: LineCol::default(),
                opening_start: LineCol::default(),
                unterminated: false,
            }],
            masked: text.to_owned(),
            diagnostics: Vec::new(),
            len: text.len(),
        };
    }

    let index = LineIndex::new(text);
    let mut regions = Vec::new();
    let mut diagnostics = Vec::new();
    let mut cursor = 0;

    while let Some((opening, attributes)) = find_opening(text, cursor) {
        let interior_start = opening.end();
        let closing = find_closing(text, interior_start);
        let opening_start = index.line_col(opening.start());
        let interior_end = closing.map_or(text.len(), |close| close.start());
        regions.push(CodeRegion {
            span: ByteSpan::new(interior_start, interior_end),
            opening: Some(opening),
            closing,
            attributes,
            start: index.line_col(interior_start),
            opening_start,
            unterminated: closing.is_none(),
        });

        let Some(close) = closing else {
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::UnterminatedRegion,
                DiagnosticSource::Scanner,
                "script region not closed",
                opening_start,
            ));
            break;
        };
        cursor = close.end();
    }

    let masked = mask(text, &regions);
    Scan {
        regions,
        masked,
        diagnostics,
        len: text.len(),
    }
}

/// Builds the masked copy of `text`.
fn mask(text: &str, regions: &[CodeRegion]) -> String {
    let mut masked = String::with_capacity(text.len());
    for segment in segments_of(regions, text.len()) {
        let slice = segment.span.slice(text).unwrap_or_default();
        match segment.kind {
            SegmentKind::Code => masked.push_str(slice),
            SegmentKind::NonCode | SegmentKind::Delimiter => {
                blank_preserving_bytes(slice, &mut masked);
            }
        }
    }
    masked
}

fn segments_of(regions: &[CodeRegion], len: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut push = |kind, start, end| {
        if end > start {
            segments.push(Segment {
                kind,
                span: ByteSpan::new(start, end),
            });
        }
    };

    let mut cursor = 0;
    for region in regions {
        if let Some(opening) = region.opening {
            push(SegmentKind::NonCode, cursor, opening.start());
            push(SegmentKind::Delimiter, opening.start(), opening.end());
        }
        push(SegmentKind::Code, region.span.start(), region.span.end());
        cursor = region.span.end();
        if let Some(closing) = region.closing {
            push(SegmentKind::Delimiter, closing.start(), closing.end());
            cursor = closing.end();
        }
    }
    push(SegmentKind::NonCode, cursor, len);
    segments
}

/// Finds the next opening delimiter at or after `from`.
///
/// `<script>` tags without a dialect attribute are browser script: they and
/// their bodies are skipped as markup.
fn find_opening(text: &str, from: usize) -> Option<(ByteSpan, DelimiterAttributes)> {
    let mut cursor = from;
    loop {
        let start = find_open_tag(text, cursor)?;
        let end = tag_end(text, start + OPEN_TAG.len())?;
        let span = ByteSpan::new(start, end);
        let attributes = parse_attributes(span.slice(text).unwrap_or_default());
        if attributes.is_dialect() {
            return Some((span, attributes));
        }
        cursor = find_closing(text, end).map_or(end, |close| close.end());
    }
}

/// Finds `<script` followed by a tag-name boundary.
fn find_open_tag(text: &str, from: usize) -> Option<usize> {
    let rest = text.get(from..)?;
    rest.match_indices('<')
        .map(|(offset, _)| from + offset)
        .find(|&at| {
            starts_with_ignore_case(text, at, OPEN_TAG)
                && text
                    .get(at + OPEN_TAG.len()..)
                    .and_then(|after| after.chars().next())
                    .is_some_and(|ch| ch.is_whitespace() || ch == '>' || ch == '/')
        })
}

/// Returns the offset just past the `>` closing a tag, honouring quoted
/// attribute values.
///
/// A quote only opens a value when it follows `=`, so an apostrophe inside a
/// bare value such as `title=don't` is ordinary text, as in
/// [`parse_attributes`].
fn tag_end(text: &str, from: usize) -> Option<usize> {
    let mut quote = None;
    let mut after_equals = false;
    for (offset, ch) in text.get(from..)?.char_indices() {
        match (quote, ch) {
            (Some(open), _) if ch == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') if after_equals => quote = Some(ch),
            (None, '>') => return Some(from + offset + 1),
            _ => {}
        }
        if !ch.is_whitespace() {
            after_equals = quote.is_none() && ch == '=';
        }
    }
    None
}

/// Finds the closing delimiter of a region whose code starts at `from`.
fn find_closing(text: &str, from: usize) -> Option<ByteSpan> {
    let code = text.get(from..)?;
    Lexer::new(code)
        .filter(|lexeme| lexeme.class == CharClass::Code && lexeme.ch == '<')
        .find_map(|lexeme| {
            let at = from + lexeme.offset;
            closing_tag_end(text, at).map(|end| ByteSpan::new(at, end))
        })
}

/// Matches `</script` plus optional whitespace plus `>` at `at`.
fn closing_tag_end(text: &str, at: usize) -> Option<usize> {
    if !starts_with_ignore_case(text, at, CLOSE_TAG) {
        return None;
    }
    let after = at + CLOSE_TAG.len();
    let rest = text.get(after..)?;
    let trimmed = rest.trim_start();
    trimmed
        .starts_with('>')
        .then(|| after + (rest.len() - trimmed.len()) + 1)
}

fn starts_with_ignore_case(text: &str, at: usize, needle: &str) -> bool {
    text.as_bytes()
        .get(at..at + needle.len())
        .is_some_and(|bytes| bytes.eq_ignore_ascii_case(needle.as_bytes()))
}
