//! Line-oriented rules for constructs the restricted runtime rejects.
//!
//! Each rule is a pure function over one line of region code, after string
//! literals and comments have been blanked. Rules run in [`RULES`] order and
//! each reports at most once per line.

use once_cell::sync::Lazy;
use regex::Regex;
use ssjs_core::{Diagnostic, DiagnosticCode, DiagnosticSource, LineCol};

use crate::lexer::blank_literals;

/// One line of sanitized region code and the nearest non-blank line above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineView<'a> {
    /// The current line without its terminator.
    pub text: &'a str,
    /// The previous non-blank line in the same region, if any.
    pub previous: Option<&'a str>,
}

/// A rule match within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    /// Byte offset of the offending construct within the line.
    pub offset: usize,
    /// Message reported to the author.
    pub message: String,
}

/// A named line rule.
#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    /// Stable rule name.
    pub name: &'static str,
    /// Code attached to the rule's diagnostics.
    pub code: DiagnosticCode,
    /// The check itself.
    pub check: fn(&LineView<'_>) -> Option<RuleHit>,
}

/// The rule battery, in reporting order.
pub const RULES: &[LineRule] = &[
    LineRule {
        name: "no-block-scoped-declaration",
        code: DiagnosticCode::BlockScopedDeclaration,
        check: block_scoped_declaration,
    },
    LineRule {
        name: "no-arrow-function",
        code: DiagnosticCode::ArrowFunction,
        check: arrow_function,
    },
    LineRule {
        name: "no-async-await",
        code: DiagnosticCode::AsyncAwait,
        check: async_await,
    },
    LineRule {
        name: "no-trailing-comma",
        code: DiagnosticCode::TrailingComma,
        check: trailing_comma,
    },
    LineRule {
        name: "no-module-syntax",
        code: DiagnosticCode::ModuleSyntax,
        check: module_syntax,
    },
];

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static BLOCK_SCOPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w$.])(let|const)\s+[\w$\[{]").expect("valid declaration pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static ASYNC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w$.])(async)\s*(?:function\b|\(|[A-Za-z_$][\w$]*\s*=>)")
        .expect("valid async pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static AWAIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|[^\w$.])(await)\s+[\w$(\[{"'`!+\-~]"#).expect("valid await pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([)}])").expect("valid trailing comma pattern"));

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static MODULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(import|export)\b\s*[\w$*{("'`]"#).expect("valid module pattern")
});

/// Returns the first capture group of `pattern` in `line`.
fn keyword_match<'a>(pattern: &Regex, line: &'a str) -> Option<(usize, &'a str)> {
    pattern
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|keyword| (keyword.start(), keyword.as_str()))
}

fn block_scoped_declaration(view: &LineView<'_>) -> Option<RuleHit> {
    keyword_match(&BLOCK_SCOPED, view.text).map(|(offset, keyword)| RuleHit {
        offset,
        message: format!("'{keyword}' declarations are not supported in SSJS; use 'var'"),
    })
}

fn arrow_function(view: &LineView<'_>) -> Option<RuleHit> {
    view.text.find("=>").map(|offset| RuleHit {
        offset,
        message: String::from(
            "arrow functions are not supported in SSJS; use a function expression",
        ),
    })
}

fn async_await(view: &LineView<'_>) -> Option<RuleHit> {
    let found_async = keyword_match(&ASYNC, view.text);
    let found_await = keyword_match(&AWAIT, view.text);
    let (offset, keyword) = match (found_async, found_await) {
        (Some(first), Some(second)) => {
            if second.0 < first.0 {
                second
            } else {
                first
            }
        }
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => return None,
    };
    Some(RuleHit {
        offset,
        message: format!("'{keyword}' is not supported in SSJS"),
    })
}

fn trailing_comma(view: &LineView<'_>) -> Option<RuleHit> {
    if let Some((offset, closer)) = TRAILING_COMMA
        .captures(view.text)
        .and_then(|captures| Some((captures.get(0)?.start(), captures.get(1)?.as_str())))
    {
        return Some(RuleHit {
            offset,
            message: format!("trailing comma before '{closer}' is not supported in SSJS"),
        });
    }

    let trimmed = view.text.trim_start();
    let closer = trimmed.chars().next().filter(|ch| matches!(ch, ')' | '}'))?;
    let previous_ends_with_comma = view
        .previous
        .is_some_and(|previous| previous.trim_end().ends_with(','));
    previous_ends_with_comma.then(|| RuleHit {
        offset: view.text.len() - trimmed.len(),
        message: format!(
            "unexpected '{closer}' after a comma; maybe there is a trailing comma on the previous line?"
        ),
    })
}

fn module_syntax(view: &LineView<'_>) -> Option<RuleHit> {
    keyword_match(&MODULE, view.text).map(|(offset, keyword)| RuleHit {
        offset,
        message: format!("'{keyword}' module syntax is not supported in SSJS"),
    })
}

/// Applies [`RULES`] to the code of one region.
///
/// `start_line` and `start_column` locate the region's first character in
/// the document; the column offset applies only to the region's first line.
#[must_use]
pub fn apply_rules(region_text: &str, start_line: u32, start_column: u32) -> Vec<Diagnostic> {
    let sanitized = blank_literals(region_text);
    let mut diagnostics = Vec::new();
    let mut previous = None;

    for (index, raw_line) in sanitized.split('\n').enumerate() {
        let text = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let view = LineView { text, previous };
        let line = start_line.saturating_add(u32::try_from(index).unwrap_or(u32::MAX));
        let column_offset = if index == 0 { start_column } else { 0 };

        for rule in RULES {
            if let Some(hit) = (rule.check)(&view) {
                let column = char_column(text, hit.offset).saturating_add(column_offset);
                diagnostics.push(Diagnostic::error(
                    rule.code,
                    DiagnosticSource::Rules,
                    hit.message,
                    LineCol::new(line, column),
                ));
            }
        }

        if !text.trim().is_empty() {
            previous = Some(text);
        }
    }

    diagnostics
}

fn char_column(line: &str, offset: usize) -> u32 {
    let count = line.get(..offset).map_or(offset, |prefix| prefix.chars().count());
    u32::try_from(count).unwrap_or(u32::MAX)
}
