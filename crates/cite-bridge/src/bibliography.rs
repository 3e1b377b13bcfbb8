//! Assembly of a citation engine's bibliography output into final markup.
//!
//! The engine returns a `[metadata, entries]` pair: layout metadata plus one
//! pre-rendered markup fragment per entry. Text and HTML output concatenate
//! the fragments; RTF output additionally needs a paragraph preamble that
//! reproduces the style's hanging indent or second-field alignment.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Twips in half an inch.
const HANGING_INDENT_TWIPS: i64 = 720;
/// Twips per character of first-field width.
const TWIPS_PER_OFFSET: i64 = 120;
/// Padding added to the widest first field.
const ALIGN_PADDING_TWIPS: i64 = 24;
/// Single line spacing in twips.
const LINE_TWIPS: f64 = 240.0;

/// Separator between RTF entries (an escaped line break).
pub const RTF_LINE_BREAK: &str = "\\\r\n";

/// Replacement markup for individual entries, keyed by record identifier.
pub type EntryOverrides = HashMap<String, String>;

/// Output markup formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
    Rtf,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Html => "html",
            OutputFormat::Rtf => "rtf",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "rtf" => Ok(OutputFormat::Rtf),
            _ => Err(Error::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the second field of an entry is aligned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecondFieldAlign {
    #[default]
    None,
    Flush,
    Margin,
}

impl<'de> Deserialize<'de> for SecondFieldAlign {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) if s == "margin" => SecondFieldAlign::Margin,
            serde_json::Value::String(s) if s.is_empty() => SecondFieldAlign::None,
            serde_json::Value::String(_) => SecondFieldAlign::Flush,
            serde_json::Value::Bool(true) => SecondFieldAlign::Flush,
            _ => SecondFieldAlign::None,
        })
    }
}

/// Identifier of a bibliography entry.
///
/// Engines report either a single id or a list of ids for merged entries; a
/// list is keyed by its comma-joined form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        fn scalar(value: &serde_json::Value) -> Option<String> {
            match value {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        }

        let value = serde_json::Value::deserialize(deserializer)?;
        if let serde_json::Value::Array(items) = &value {
            let parts: Option<Vec<String>> = items.iter().map(scalar).collect();
            return parts
                .map(|parts| EntryId(parts.join(",")))
                .ok_or_else(|| D::Error::custom("expected string or number entry ids"));
        }
        scalar(&value)
            .map(EntryId)
            .ok_or_else(|| D::Error::custom("expected string, number or array for entry id"))
    }
}

fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        _ => false,
    })
}

fn default_linespacing() -> f64 {
    1.0
}

/// Layout metadata reported by the engine alongside the rendered entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BibliographyMetadata {
    #[serde(default)]
    pub bibstart: String,
    #[serde(default)]
    pub bibend: String,
    #[serde(default, deserialize_with = "truthy")]
    pub hangingindent: bool,
    #[serde(rename = "second-field-align", default)]
    pub second_field_align: SecondFieldAlign,
    /// Width of the widest first field, in characters.
    #[serde(default)]
    pub maxoffset: u32,
    #[serde(default = "default_linespacing")]
    pub linespacing: f64,
    #[serde(default)]
    pub entry_ids: Vec<EntryId>,
}

impl Default for BibliographyMetadata {
    fn default() -> Self {
        Self {
            bibstart: String::new(),
            bibend: String::new(),
            hangingindent: false,
            second_field_align: SecondFieldAlign::None,
            maxoffset: 0,
            linespacing: default_linespacing(),
            entry_ids: Vec::new(),
        }
    }
}

/// A bibliography as returned by the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(BibliographyMetadata, Vec<String>)")]
pub struct Bibliography {
    pub metadata: BibliographyMetadata,
    /// Rendered entries, index-aligned with `metadata.entry_ids`.
    pub entries: Vec<String>,
}

impl From<(BibliographyMetadata, Vec<String>)> for Bibliography {
    fn from((metadata, entries): (BibliographyMetadata, Vec<String>)) -> Self {
        Self { metadata, entries }
    }
}

impl Bibliography {
    pub fn new(metadata: BibliographyMetadata, entries: Vec<String>) -> Self {
        Self { metadata, entries }
    }

    /// Parse the engine's `[metadata, entries]` JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render to the named format (`text`, `html` or `rtf`).
    pub fn render(&self, format: &str, overrides: Option<&EntryOverrides>) -> Result<String> {
        let format: OutputFormat = format.parse()?;
        Ok(format_bibliography(self, format, overrides))
    }
}

/// RTF paragraph layout, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtfLayout {
    pub tab_stop: Option<i64>,
    pub left_indent: i64,
    pub first_line_indent: i64,
    pub line_spacing: i64,
}

impl RtfLayout {
    /// Derive the layout from engine metadata.
    ///
    /// A hanging indent wins over second-field alignment. The alignment
    /// position is only an estimate from the widest first field, which holds
    /// for labels such as "[1]" or "1.".
    pub fn from_metadata(metadata: &BibliographyMetadata) -> Self {
        let mut layout = RtfLayout {
            tab_stop: None,
            left_indent: 0,
            first_line_indent: 0,
            line_spacing: (LINE_TWIPS * metadata.linespacing).round() as i64,
        };

        if metadata.hangingindent {
            layout.left_indent = HANGING_INDENT_TWIPS;
            layout.first_line_indent = -HANGING_INDENT_TWIPS;
        } else if metadata.second_field_align != SecondFieldAlign::None {
            let align_at = ALIGN_PADDING_TWIPS + i64::from(metadata.maxoffset) * TWIPS_PER_OFFSET;
            layout.first_line_indent = -align_at;
            if metadata.second_field_align == SecondFieldAlign::Margin {
                layout.tab_stop = Some(0);
            } else {
                layout.left_indent = align_at;
                layout.tab_stop = Some(align_at);
            }
        }

        layout
    }

    /// RTF control words that open the bibliography.
    pub fn preamble(&self) -> String {
        let mut preamble = String::new();
        if let Some(tab_stop) = self.tab_stop {
            preamble.push_str(&format!("\\tx{} ", tab_stop));
        }
        preamble.push_str(&format!(
            "\\li{} \\fi{} ",
            self.left_indent, self.first_line_indent
        ));
        preamble.push_str(&format!("\\sl{} \\slmult1 ", self.line_spacing));
        preamble
    }
}

/// Replace entries whose identifier has an override.
pub fn apply_overrides<'a>(
    entries: &'a [String],
    entry_ids: &[EntryId],
    overrides: Option<&'a EntryOverrides>,
) -> Vec<&'a str> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let replacement = overrides.and_then(|overrides| {
                entry_ids
                    .get(i)
                    .and_then(|id| overrides.get(id.as_str()))
            });
            match replacement {
                Some(text) => text.as_str(),
                None => entry.as_str(),
            }
        })
        .collect()
}

/// Assemble a bibliography into final markup.
pub fn format_bibliography(
    bibliography: &Bibliography,
    format: OutputFormat,
    overrides: Option<&EntryOverrides>,
) -> String {
    let metadata = &bibliography.metadata;
    let entries = apply_overrides(&bibliography.entries, &metadata.entry_ids, overrides);

    match format {
        OutputFormat::Text | OutputFormat::Html => {
            format!("{}{}{}", metadata.bibstart, entries.concat(), metadata.bibend)
        }
        OutputFormat::Rtf => {
            let layout = RtfLayout::from_metadata(metadata);
            format!(
                "{}{}{}{}{}",
                metadata.bibstart,
                layout.preamble(),
                entries.join(RTF_LINE_BREAK),
                RTF_LINE_BREAK,
                metadata.bibend
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> BibliographyMetadata {
        BibliographyMetadata {
            bibstart: "{\\rtf ".to_string(),
            bibend: "}".to_string(),
            entry_ids: vec![
                EntryId("1".to_string()),
                EntryId("2".to_string()),
                EntryId("3".to_string()),
            ],
            ..Default::default()
        }
    }

    fn entries() -> Vec<String> {
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("rtf".parse::<OutputFormat>().unwrap(), OutputFormat::Rtf);
        let err = "latex".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref format } if format == "latex"));
    }

    #[test]
    fn test_hanging_indent_layout() {
        let metadata = BibliographyMetadata {
            hangingindent: true,
            second_field_align: SecondFieldAlign::Margin,
            ..Default::default()
        };
        let layout = RtfLayout::from_metadata(&metadata);
        assert_eq!(layout.left_indent, 720);
        assert_eq!(layout.first_line_indent, -720);
        assert_eq!(layout.tab_stop, None);
        assert_eq!(layout.preamble(), "\\li720 \\fi-720 \\sl240 \\slmult1 ");
    }

    #[test]
    fn test_margin_alignment_layout() {
        let metadata = BibliographyMetadata {
            second_field_align: SecondFieldAlign::Margin,
            maxoffset: 3,
            ..Default::default()
        };
        let layout = RtfLayout::from_metadata(&metadata);
        assert_eq!(layout.tab_stop, Some(0));
        assert_eq!(layout.left_indent, 0);
        assert_eq!(layout.first_line_indent, -384);
        assert_eq!(layout.preamble(), "\\tx0 \\li0 \\fi-384 \\sl240 \\slmult1 ");
    }

    #[test]
    fn test_flush_alignment_layout() {
        let metadata = BibliographyMetadata {
            second_field_align: SecondFieldAlign::Flush,
            maxoffset: 2,
            linespacing: 2.0,
            ..Default::default()
        };
        let layout = RtfLayout::from_metadata(&metadata);
        assert_eq!(layout.tab_stop, Some(264));
        assert_eq!(layout.left_indent, 264);
        assert_eq!(layout.first_line_indent, -264);
        assert_eq!(layout.line_spacing, 480);
    }

    #[test]
    fn test_plain_layout() {
        let layout = RtfLayout::from_metadata(&BibliographyMetadata::default());
        assert_eq!(layout.preamble(), "\\li0 \\fi0 \\sl240 \\slmult1 ");
    }

    #[test]
    fn test_text_and_html_concatenate_without_separators() {
        let bibliography = Bibliography::new(metadata(), entries());
        assert_eq!(
            format_bibliography(&bibliography, OutputFormat::Text, None),
            "{\\rtf ABC}"
        );

        let html = Bibliography::new(
            BibliographyMetadata {
                bibstart: "<div class=\"csl-bib-body\">".to_string(),
                bibend: "</div>".to_string(),
                ..Default::default()
            },
            vec!["<div>A</div>".to_string(), "<div>B</div>".to_string()],
        );
        assert_eq!(
            format_bibliography(&html, OutputFormat::Html, None),
            "<div class=\"csl-bib-body\"><div>A</div><div>B</div></div>"
        );
    }

    #[test]
    fn test_rtf_assembly() {
        let bibliography = Bibliography::new(metadata(), entries());
        assert_eq!(
            format_bibliography(&bibliography, OutputFormat::Rtf, None),
            "{\\rtf \\li0 \\fi0 \\sl240 \\slmult1 A\\\r\nB\\\r\nC\\\r\n}"
        );
    }

    #[test]
    fn test_overrides_replace_matching_entries() {
        let mut overrides = EntryOverrides::new();
        overrides.insert("2".to_string(), "B2".to_string());
        overrides.insert("9".to_string(), "unused".to_string());

        let rendered = entries();
        let ids = metadata().entry_ids;
        let assembled = apply_overrides(&rendered, &ids, Some(&overrides));
        assert_eq!(assembled, vec!["A", "B2", "C"]);

        let bibliography = Bibliography::new(metadata(), entries());
        assert_eq!(
            format_bibliography(&bibliography, OutputFormat::Text, Some(&overrides)),
            "{\\rtf AB2C}"
        );
    }

    #[test]
    fn test_parse_engine_output() {
        let json = r#"[
            {
                "bibstart": "<div>",
                "bibend": "</div>",
                "hangingindent": 2,
                "second-field-align": false,
                "maxoffset": 4,
                "linespacing": 1.5,
                "entryspacing": 1,
                "entry_ids": [["7"], [8], ["9", "10"]],
                "done": true
            },
            ["x", "y", "z"]
        ]"#;

        let bibliography = Bibliography::from_json(json).unwrap();
        let metadata = &bibliography.metadata;
        assert!(metadata.hangingindent);
        assert_eq!(metadata.second_field_align, SecondFieldAlign::None);
        assert_eq!(metadata.maxoffset, 4);
        assert_eq!(
            metadata.entry_ids,
            vec![
                EntryId("7".to_string()),
                EntryId("8".to_string()),
                EntryId("9,10".to_string())
            ]
        );
        assert_eq!(RtfLayout::from_metadata(metadata).line_spacing, 360);
        assert_eq!(bibliography.entries.len(), 3);
    }

    #[test]
    fn test_render_rejects_unknown_format() {
        let bibliography = Bibliography::new(metadata(), entries());
        let err = bibliography.render("docx", None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
        assert_eq!(bibliography.render("text", None).unwrap(), "{\\rtf ABC}");
    }
}
