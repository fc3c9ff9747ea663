//! Human-readable rendering of diagnostics with source context.

use ssjs_core::{Diagnostic, LineIndex};
use ssjs_lint::{Analysis, DiagnosticSummary};
use unicode_width::UnicodeWidthChar;

const CONTEXT_LINES: u32 = 2;

/// Renders every diagnostic of `analysis` against `source`.
#[must_use]
pub(crate) fn render_report(path: &str, source: &str, analysis: &Analysis) -> String {
    let index = LineIndex::new(source);
    let mut lines = vec![path.to_owned()];
    for (position, diagnostic) in analysis.diagnostics().iter().enumerate() {
        if position > 0 {
            lines.push(String::new());
        }
        lines.extend(diagnostic_block(&index, diagnostic));
    }
    lines.push(summary_line(analysis.summary()));

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn diagnostic_block(index: &LineIndex<'_>, diagnostic: &Diagnostic) -> Vec<String> {
    let line = diagnostic.line();
    let column = diagnostic.column();
    let label = format!(
        "{}[{}]: {}",
        diagnostic.severity(),
        diagnostic.code(),
        diagnostic.message()
    );
    let mut block = vec![format!("  --> {line}:{column}")];

    let total_lines = u32::try_from(index.line_count()).unwrap_or(u32::MAX);
    if line == 0 || line > total_lines {
        block.push(format!("  = {label}"));
        block.push("  note: line out of range".to_owned());
        return block;
    }

    let start_line = line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = line.saturating_add(CONTEXT_LINES).min(total_lines);
    let line_width = end_line.to_string().len();

    block.push(format!("{:>line_width$} |", ""));
    for current in start_line..=end_line {
        let text = index.line_text(current).unwrap_or_default();
        block.push(format!("{current:>line_width$} | {text}"));
        if current == line {
            block.push(format!(
                "{:>line_width$} | {}^ {label}",
                "",
                caret_padding(text, column)
            ));
        }
    }
    block
}

/// Builds the indentation that places a caret under character `column` of
/// `text`, accounting for wide characters and tabs.
fn caret_padding(text: &str, column: u32) -> String {
    let count = usize::try_from(column).unwrap_or(usize::MAX);
    let mut padding = String::new();
    for ch in text.chars().take(count) {
        if ch == '\t' {
            padding.push('\t');
        } else {
            padding.extend(std::iter::repeat_n(' ', ch.width().unwrap_or(0)));
        }
    }
    padding
}

fn summary_line(summary: DiagnosticSummary) -> String {
    if summary.total() == 0 {
        return "no problems found".to_owned();
    }
    format!(
        "{} error(s), {} warning(s)",
        summary.errors, summary.warnings
    )
}
