//! Opening delimiter attributes and their validation.

use serde::Serialize;
use ssjs_config::AttributeTable;
use ssjs_core::{Diagnostic, DiagnosticCode, DiagnosticSource, LineCol, LineIndex};

/// Attribute name selecting where a region executes.
pub const TARGET_ATTRIBUTE: &str = "runat";
/// Attribute name selecting the script language.
pub const LANGUAGE_ATTRIBUTE: &str = "language";
/// Attribute name selecting the request method a region runs for.
pub const CONTEXT_TYPE_ATTRIBUTE: &str = "executioncontexttype";
/// Attribute name labelling the execution context.
pub const CONTEXT_NAME_ATTRIBUTE: &str = "executioncontextname";

/// One attribute value and where its name starts in the delimiter text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValue {
    value: String,
    offset: usize,
}

impl AttributeValue {
    /// Returns the unquoted value. An attribute written without `=` has an
    /// empty value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the byte offset of the attribute name within the delimiter.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// The dialect attributes carried by an opening delimiter.
///
/// Names are matched case-insensitively; when an attribute repeats, the first
/// occurrence wins. Unrecognised attributes are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DelimiterAttributes {
    execution_target: Option<AttributeValue>,
    language: Option<AttributeValue>,
    context_type: Option<AttributeValue>,
    context_name: Option<AttributeValue>,
}

impl DelimiterAttributes {
    /// Returns the `runat` attribute.
    #[must_use]
    pub const fn execution_target(&self) -> Option<&AttributeValue> {
        self.execution_target.as_ref()
    }

    /// Returns the `language` attribute.
    #[must_use]
    pub const fn language(&self) -> Option<&AttributeValue> {
        self.language.as_ref()
    }

    /// Returns the `executioncontexttype` attribute.
    #[must_use]
    pub const fn context_type(&self) -> Option<&AttributeValue> {
        self.context_type.as_ref()
    }

    /// Returns the `executioncontextname` attribute.
    #[must_use]
    pub const fn context_name(&self) -> Option<&AttributeValue> {
        self.context_name.as_ref()
    }

    /// Returns `true` when any dialect attribute is present.
    #[must_use]
    pub const fn is_dialect(&self) -> bool {
        self.execution_target.is_some()
            || self.language.is_some()
            || self.context_type.is_some()
            || self.context_name.is_some()
    }

    fn record(&mut self, name: &str, value: AttributeValue) {
        let slot = if name.eq_ignore_ascii_case(TARGET_ATTRIBUTE) {
            &mut self.execution_target
        } else if name.eq_ignore_ascii_case(LANGUAGE_ATTRIBUTE) {
            &mut self.language
        } else if name.eq_ignore_ascii_case(CONTEXT_TYPE_ATTRIBUTE) {
            &mut self.context_type
        } else if name.eq_ignore_ascii_case(CONTEXT_NAME_ATTRIBUTE) {
            &mut self.context_name
        } else {
            return;
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

/// Parses the attributes of an opening delimiter such as
/// `<script runat="server" language='javascript'>`.
///
/// Values may be double-quoted, single-quoted or bare. Parsing stops at the
/// first `>` outside a quoted value.
#[must_use]
pub fn parse_attributes(tag: &str) -> DelimiterAttributes {
    let mut attributes = DelimiterAttributes::default();
    let mut chars = tag.char_indices().peekable();

    // Skip the tag name.
    if chars.next_if(|(_, ch)| *ch == '<').is_some() {
        while chars
            .next_if(|(_, ch)| !ch.is_whitespace() && *ch != '>' && *ch != '/')
            .is_some()
        {}
    }

    loop {
        while chars
            .next_if(|(_, ch)| ch.is_whitespace() || *ch == '/')
            .is_some()
        {}
        let Some(&(name_start, first)) = chars.peek() else {
            break;
        };
        if first == '>' {
            break;
        }

        let mut name_end = name_start;
        while let Some((offset, ch)) =
            chars.next_if(|(_, ch)| !ch.is_whitespace() && !matches!(ch, '=' | '>' | '/'))
        {
            name_end = offset + ch.len_utf8();
        }
        let name = tag.get(name_start..name_end).unwrap_or_default();
        if name.is_empty() {
            // A stray `=` or similar; skip it so parsing always advances.
            chars.next();
            continue;
        }

        while chars.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}
        let mut value = String::new();
        if chars.next_if(|(_, ch)| *ch == '=').is_some() {
            while chars.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}
            match chars.peek().map(|(_, ch)| *ch) {
                Some(quote @ ('"' | '\'')) => {
                    chars.next();
                    while let Some((_, ch)) = chars.next_if(|(_, ch)| *ch != quote) {
                        value.push(ch);
                    }
                    chars.next();
                }
                _ => {
                    while let Some((_, ch)) =
                        chars.next_if(|(_, ch)| !ch.is_whitespace() && *ch != '>')
                    {
                        value.push(ch);
                    }
                }
            }
        }

        attributes.record(
            name,
            AttributeValue {
                value,
                offset: name_start,
            },
        );
    }

    attributes
}

/// Where a region executes, resolved against an [`AttributeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionTarget {
    /// Server-side script in the restricted dialect.
    Server,
    /// Browser script; bounded but not checked.
    Client,
    /// The target is missing or unsupported.
    Unknown,
}

/// Checks opening delimiters against a table of accepted values.
#[derive(Debug, Clone, Default)]
pub struct AttributeValidator {
    table: AttributeTable,
}

impl AttributeValidator {
    /// Creates a validator over `table`.
    #[must_use]
    pub const fn new(table: AttributeTable) -> Self {
        Self { table }
    }

    /// Returns the accepted-value table.
    #[must_use]
    pub const fn table(&self) -> &AttributeTable {
        &self.table
    }

    /// Resolves the execution target of parsed attributes.
    #[must_use]
    pub fn target(&self, attributes: &DelimiterAttributes) -> ExecutionTarget {
        match attributes.execution_target() {
            Some(value) if self.table.is_server_target(value.value()) => ExecutionTarget::Server,
            Some(value) if self.table.is_client_target(value.value()) => ExecutionTarget::Client,
            _ => ExecutionTarget::Unknown,
        }
    }

    /// Validates the text of one opening delimiter.
    ///
    /// Positions are relative to the delimiter text (line 1, column 0 at its
    /// first character); callers relocate them with
    /// [`Diagnostic::relocated`].
    #[must_use]
    pub fn validate(&self, opening: &str) -> Vec<Diagnostic> {
        let attributes = parse_attributes(opening);
        let index = LineIndex::new(opening);
        let mut diagnostics = Vec::new();

        let target = self.target(&attributes);
        if target == ExecutionTarget::Unknown {
            diagnostics.push(self.target_diagnostic(attributes.execution_target(), &index));
        }

        // Browser script is not restricted-dialect code.
        if target == ExecutionTarget::Client {
            return diagnostics;
        }

        // Language rules apply to server regions only.
        if target == ExecutionTarget::Server
            && let Some(language) = attributes.language()
        {
            diagnostics.extend(self.language_diagnostic(language, &index));
        }
        if let Some(context) = attributes.context_type()
            && !self.table.is_context_type(context.value())
        {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::UnsupportedContextType,
                DiagnosticSource::Attributes,
                format!(
                    "unsupported execution context type '{}'; use {}",
                    context.value(),
                    quoted_choices(&self.table.context_types, CONTEXT_TYPE_ATTRIBUTE),
                ),
                index.line_col(context.offset()),
            ));
        }
        diagnostics
    }

    fn target_diagnostic(
        &self,
        target: Option<&AttributeValue>,
        index: &LineIndex<'_>,
    ) -> Diagnostic {
        let mut choices = Vec::new();
        choices.extend(self.table.server_targets.first().cloned());
        choices.extend(self.table.client_targets.first().cloned());
        let guidance = quoted_choices(&choices, TARGET_ATTRIBUTE);
        let (message, position) = target.map_or_else(
            || {
                (
                    format!("script region has no execution target; use {guidance}"),
                    LineCol::default(),
                )
            },
            |value| {
                (
                    format!(
                        "ambiguous or unsupported execution target '{}'; use {guidance}",
                        value.value()
                    ),
                    index.line_col(value.offset()),
                )
            },
        );
        Diagnostic::error(
            DiagnosticCode::UnsupportedExecutionTarget,
            DiagnosticSource::Attributes,
            message,
            position,
        )
    }

    fn language_diagnostic(
        &self,
        language: &AttributeValue,
        index: &LineIndex<'_>,
    ) -> Option<Diagnostic> {
        let value = language.value();
        let canonical = self.table.canonical_language();
        let (code, message) = if self.table.is_rejected_language(value) {
            (
                DiagnosticCode::RejectedLanguage,
                format!(
                    "language '{value}' is not supported by this analyzer; \
                     use {LANGUAGE_ATTRIBUTE}=\"{canonical}\" instead"
                ),
            )
        } else if self.table.is_supported_language(value) {
            return None;
        } else {
            (
                DiagnosticCode::UnsupportedLanguage,
                format!("unsupported script language '{value}'; expected \"{canonical}\""),
            )
        };
        Some(Diagnostic::error(
            code,
            DiagnosticSource::Attributes,
            message,
            index.line_col(language.offset()),
        ))
    }
}

/// Formats accepted values as `name="a" or name="b"`.
fn quoted_choices(values: &[String], name: &str) -> String {
    values
        .iter()
        .map(|value| format!("{name}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" or ")
}
