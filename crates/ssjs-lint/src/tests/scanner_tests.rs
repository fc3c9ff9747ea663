//! Tests for region boundary detection and masking.

use rstest::rstest;
use ssjs_core::{ByteSpan, DiagnosticCode, LanguageId, LineCol, Severity, SourceDocument};

use crate::scanner::{Segment, SegmentKind, scan};

fn html(text: &str) -> SourceDocument {
    SourceDocument::new(text, LanguageId::Html, "page.html")
}

fn region_texts(document: &SourceDocument) -> Vec<String> {
    let scanned = scan(document);
    scanned
        .regions()
        .iter()
        .map(|region| region.text(document.text()).to_owned())
        .collect()
}

fn kinds(segments: &[Segment]) -> Vec<SegmentKind> {
    segments.iter().map(|segment| segment.kind).collect()
}

#[test]
fn document_without_regions_is_fully_blanked() {
    let document = html("<p>hello</p>");
    let scanned = scan(&document);
    assert!(scanned.regions().is_empty());
    assert!(scanned.diagnostics().is_empty());
    assert_eq!(scanned.masked(), " ".repeat(12));
    assert_eq!(
        scanned.segments(),
        vec![Segment {
            kind: SegmentKind::NonCode,
            span: ByteSpan::new(0, 12),
        }]
    );
}

#[test]
fn segments_partition_the_document() {
    let document =
        html("<p>a</p>\n<script runat=\"server\">\nvar x = 1;\n</script>\n<p>b</p>");
    let scanned = scan(&document);
    let segments = scanned.segments();
    assert_eq!(
        segments,
        vec![
            Segment {
                kind: SegmentKind::NonCode,
                span: ByteSpan::new(0, 9),
            },
            Segment {
                kind: SegmentKind::Delimiter,
                span: ByteSpan::new(9, 32),
            },
            Segment {
                kind: SegmentKind::Code,
                span: ByteSpan::new(32, 44),
            },
            Segment {
                kind: SegmentKind::Delimiter,
                span: ByteSpan::new(44, 53),
            },
            Segment {
                kind: SegmentKind::NonCode,
                span: ByteSpan::new(53, 62),
            },
        ]
    );

    let region = scanned.regions().first().expect("one region");
    assert_eq!(region.opening_start(), LineCol::new(2, 0));
    assert_eq!(region.start(), LineCol::new(2, 23));
    assert!(!region.is_unterminated());
}

#[test]
fn masked_document_keeps_code_and_line_positions() {
    let text = "<p>a</p>\n<script runat=\"server\">\nvar x = 1;\n</script>\n<p>b</p>";
    let scanned = scan(&html(text));
    let masked = scanned.masked();
    assert_eq!(masked.len(), text.len());
    let lines: Vec<_> = masked.lines().collect();
    assert_eq!(lines.len(), text.lines().count());
    assert_eq!(lines.get(2), Some(&"var x = 1;"));
    assert!(lines.get(1).is_some_and(|line| line.trim().is_empty()));
}

#[test]
fn masked_document_keeps_byte_length_with_multibyte_markup() {
    let text = "<p>é</p><script runat=\"server\">var ü = 1;</script>";
    let scanned = scan(&html(text));
    assert_eq!(scanned.masked().len(), text.len());
    assert!(scanned.masked().contains("var ü = 1;"));
    assert!(!scanned.masked().contains('é'));
}

#[test]
fn closing_delimiter_in_string_does_not_end_region() {
    let document = html(
        "<script runat=\"server\">\nvar s = \"</script>\";\nWrite(s);\n</script><p>after</p>",
    );
    assert_eq!(
        region_texts(&document),
        vec!["\nvar s = \"</script>\";\nWrite(s);\n"]
    );
    assert!(scan(&document).diagnostics().is_empty());
}

#[test]
fn closing_delimiter_in_comments_does_not_end_region() {
    let line = html("<script runat=\"server\">// </script>\nvar a;</script>");
    assert_eq!(region_texts(&line), vec!["// </script>\nvar a;"]);

    let block = html("<script runat=\"server\">/* </script> */var a;</script>");
    assert_eq!(region_texts(&block), vec!["/* </script> */var a;"]);

    let template = html("<script runat=\"server\">var t = `</script>`;</script>");
    assert_eq!(region_texts(&template), vec!["var t = `</script>`;"]);
}

#[test]
fn unterminated_region_runs_to_end_of_document() {
    let text = "<p>x</p>\n<script runat=\"server\">\nvar a = 1;";
    let scanned = scan(&html(text));
    let region = scanned.regions().first().expect("one region");
    assert!(region.is_unterminated());
    assert_eq!(region.closing(), None);
    assert_eq!(region.span().end(), text.len());

    assert_eq!(scanned.diagnostics().len(), 1);
    let diagnostic = scanned.diagnostics().first().expect("diagnostic");
    assert_eq!(diagnostic.code(), DiagnosticCode::UnterminatedRegion);
    assert_eq!(diagnostic.severity(), Severity::Warning);
    assert_eq!(diagnostic.position(), LineCol::new(2, 0));
}

#[test]
fn adjacent_regions_have_no_markup_between_them() {
    let document = html(
        "<script runat=\"server\">var a;</script><script runat=\"server\">var b;</script>",
    );
    assert_eq!(region_texts(&document), vec!["var a;", "var b;"]);
    assert_eq!(
        kinds(&scan(&document).segments()),
        vec![
            SegmentKind::Delimiter,
            SegmentKind::Code,
            SegmentKind::Delimiter,
            SegmentKind::Delimiter,
            SegmentKind::Code,
            SegmentKind::Delimiter,
        ]
    );
}

#[test]
fn browser_script_without_dialect_attributes_is_markup() {
    let document = html(concat!(
        "<script src=\"app.js\"></script>",
        "<script>if (a < b) {}</script>",
        "<script runat=\"server\">var a;</script>",
    ));
    assert_eq!(region_texts(&document), vec!["var a;"]);
}

#[test]
fn delimiters_match_case_insensitively() {
    let document = html("<SCRIPT RunAt=\"Server\">var a;</Script >");
    let scanned = scan(&document);
    assert_eq!(region_texts(&document), vec!["var a;"]);
    assert!(scanned.diagnostics().is_empty());
}

#[test]
fn tag_without_closing_bracket_is_not_a_delimiter() {
    let scanned = scan(&html("<script runat=\"server\" var a;"));
    assert!(scanned.regions().is_empty());
}

#[test]
fn pure_code_document_is_one_region() {
    let text = "<script runat=\"client\">\nlet a;\n";
    let document = SourceDocument::new(text, LanguageId::Ssjs, "a.ssjs");
    let scanned = scan(&document);
    assert_eq!(scanned.regions().len(), 1);
    let region = scanned.regions().first().expect("region");
    assert!(region.is_synthetic());
    assert_eq!(region.start(), LineCol::new(1, 0));
    assert_eq!(scanned.masked(), text);
    assert_eq!(kinds(&scanned.segments()), vec![SegmentKind::Code]);
}

#[test]
fn apostrophe_in_bare_value_does_not_hide_the_tag_end() {
    let document = html("<script runat=server title=don't>let a = 1;</script>");
    let scanned = scan(&document);
    assert_eq!(region_texts(&document), vec!["let a = 1;"]);
    assert!(scanned.diagnostics().is_empty());
    let region = scanned.regions().first().expect("region");
    assert_eq!(
        region
            .attributes()
            .execution_target()
            .map(|target| target.value()),
        Some("server")
    );
}

#[test]
fn quoted_value_after_spaced_equals_still_hides_bracket() {
    let document = html("<script runat = 'server' executioncontextname = 'a>b'>var a;</script>");
    assert_eq!(region_texts(&document), vec!["var a;"]);
}

#[rstest]
#[case::no_regions(html("<p>hello</p>\n"))]
#[case::single_region(html("<p>a</p>\n<script runat=\"server\">\nvar x = 1;\n</script>\n"))]
#[case::unterminated(html("<p>x</p>\n<script runat=\"server\">\nvar a = 1;"))]
#[case::browser_script_skipped(html(
    "<script>if (a < b) {}</script>\n<script runat=\"server\">var a;</script><p>é</p>"
))]
#[case::adjacent(html(
    "<script runat=\"server\">var a;</script><script runat=\"client\">b();</script>"
))]
#[case::empty_region(html("<script runat=\"server\"></script>"))]
#[case::pure_code(SourceDocument::new("var a = '</script>';\n", LanguageId::Ssjs, "a.ssjs"))]
#[case::empty_document(html(""))]
fn segments_cover_every_byte_exactly_once(#[case] document: SourceDocument) {
    let scanned = scan(&document);
    let segments = scanned.segments();

    let mut cursor = 0;
    for segment in &segments {
        assert_eq!(segment.span.start(), cursor, "gap or overlap in {segments:?}");
        assert!(!segment.span.is_empty(), "empty segment in {segments:?}");
        cursor = segment.span.end();
    }
    assert_eq!(cursor, document.text().len());

    let total: usize = segments.iter().map(|segment| segment.span.len()).sum();
    assert_eq!(total, document.text().len());
    assert_eq!(scanned.masked().len(), document.text().len());
}
