//! Bibliography assembly from engine output.

use cite_bridge::bibliography::{EntryOverrides, RTF_LINE_BREAK};
use cite_bridge::{Bibliography, Error, OutputFormat, format_bibliography};
use std::path::Path;

fn engine_output() -> Bibliography {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/engine-bibliography.json");
    let json = std::fs::read_to_string(path).unwrap();
    Bibliography::from_json(&json).unwrap()
}

#[test]
fn rtf_uses_hanging_indent_and_line_spacing() {
    let bibliography = engine_output();
    let rtf = format_bibliography(&bibliography, OutputFormat::Rtf, None);

    assert!(
        rtf.starts_with("{\\rtf \\li720 \\fi-720 \\sl480 \\slmult1 Blandy"),
        "Got: {}",
        rtf
    );
    assert!(rtf.ends_with(&format!("Mosfilm.\n{}}}", RTF_LINE_BREAK)), "Got: {}", rtf);
    assert_eq!(rtf.matches(RTF_LINE_BREAK).count(), 3);
}

#[test]
fn text_concatenates_entries() {
    let text = engine_output().render("text", None).unwrap();
    assert_eq!(text.matches('\n').count(), 3);
    assert!(text.contains("Journal of Things, 12(3), 1-10.\nTarkovsky"));
}

#[test]
fn overrides_replace_matching_entries_only() {
    let mut overrides = EntryOverrides::new();
    overrides.insert("7".to_string(), "<b>Edited entry</b>\n".to_string());

    let html = engine_output().render("html", Some(&overrides)).unwrap();
    assert!(html.contains("Ownership and Borrowing.\n<b>Edited entry</b>\nTarkovsky"));
    assert!(!html.contains("Mapping Things"));
}

#[test]
fn unsupported_format_is_rejected() {
    let err = engine_output().render("markdown", None).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref format } if format == "markdown"));
}
