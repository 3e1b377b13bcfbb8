//! Parser for CSL locale XML files.
//!
//! Only the `<terms>` section is read. Date formats and style options are
//! skipped.

use super::{LocaleTerms, Term, TermForm};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Which part of a `<term>` text content belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TermPart {
    Value,
    Single,
    Multiple,
}

#[derive(Default)]
struct TermsBuilder {
    seen_root: bool,
    lang: Option<String>,
    terms: Vec<Term>,
    open: Vec<String>,
    current: Option<Term>,
    part: Option<TermPart>,
}

/// Parse a locale XML file.
pub fn parse_locale_xml(xml: &str) -> Result<LocaleTerms, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text_start = false;
    reader.config_mut().trim_text_end = false;

    let mut builder = TermsBuilder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                builder.open_element(&e)?;
            }
            Ok(Event::Empty(e)) => {
                builder.open_element(&e)?;
                builder.close_element();
            }
            Ok(Event::End(_)) => builder.close_element(),
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| format!("Invalid text in locale: {}", err))?;
                builder.push_text(&text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                builder.push_text(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "XML parse error at byte {}: {}",
                    reader.error_position(),
                    e
                ));
            }
        }
    }

    if !builder.seen_root {
        return Err("Expected <locale> root element, found an empty document".to_string());
    }
    if let Some(open) = builder.open.last() {
        return Err(format!("Unexpected end of document, expected </{}>", open));
    }

    Ok(LocaleTerms {
        lang: builder.lang,
        terms: builder.terms,
    })
}

impl TermsBuilder {
    fn open_element(&mut self, e: &BytesStart<'_>) -> Result<(), String> {
        let local = e.local_name();
        let name = String::from_utf8_lossy(local.as_ref()).into_owned();

        if self.open.is_empty() {
            if name != "locale" {
                return Err(format!("Expected <locale> root element, found <{}>", name));
            }
            self.seen_root = true;
            self.lang = attribute(e, "lang", Some("xml"))?;
        } else if name == "term" && self.parent() == Some("terms") {
            let term_name =
                attribute(e, "name", None)?.ok_or("Term missing 'name' attribute")?;
            let form = attribute(e, "form", None)?
                .map_or(TermForm::Long, |form| TermForm::from_attribute(&form));
            self.current = Some(Term {
                name: term_name,
                form,
                single: None,
                multiple: None,
                value: None,
            });
            self.part = Some(TermPart::Value);
        } else if self.current.is_some() && self.parent() == Some("term") {
            self.part = match name.as_str() {
                "single" => Some(TermPart::Single),
                "multiple" => Some(TermPart::Multiple),
                _ => None,
            };
        }

        self.open.push(name);
        Ok(())
    }

    fn close_element(&mut self) {
        let Some(name) = self.open.pop() else {
            return;
        };
        match name.as_str() {
            "term" if self.current.is_some() && self.parent() == Some("terms") => {
                if let Some(mut term) = self.current.take() {
                    if term.single.is_none() && term.multiple.is_none() && term.value.is_none() {
                        // `<term name="..."/>` defines an empty term.
                        term.value = Some(String::new());
                    }
                    self.terms.push(term);
                }
                self.part = None;
            }
            "single" | "multiple" if self.current.is_some() => {
                self.part = Some(TermPart::Value);
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        let (Some(term), Some(part)) = (self.current.as_mut(), self.part) else {
            return;
        };
        let target = match part {
            TermPart::Value => &mut term.value,
            TermPart::Single => &mut term.single,
            TermPart::Multiple => &mut term.multiple,
        };
        if part == TermPart::Value && text.trim().is_empty() {
            // Whitespace between <single> and <multiple>.
            return;
        }
        target.get_or_insert_with(String::new).push_str(text.trim());
    }

    fn parent(&self) -> Option<&str> {
        self.open.last().map(String::as_str)
    }
}

fn attribute(e: &BytesStart<'_>, name: &str, prefix: Option<&str>) -> Result<Option<String>, String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| format!("Invalid attribute: {}", err))?;
        let key = attr.key;
        let attr_prefix = key
            .prefix()
            .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned());
        if key.local_name().as_ref() == name.as_bytes() && attr_prefix.as_deref() == prefix {
            let value = attr
                .unescape_value()
                .map_err(|err| format!("Invalid attribute value: {}", err))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCALE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<locale xmlns="http://purl.org/net/xbiblio/csl" version="1.0" xml:lang="en-US">
  <info>
    <updated>2015-10-10T23:31:02+00:00</updated>
  </info>
  <date form="text">
    <date-part name="month" suffix=" "/>
    <date-part name="year"/>
  </date>
  <terms>
    <term name="and">and</term>
    <term name="month-01">January</term>
    <term name="month-01" form="short">Jan.</term>
    <term name="open-quote">&#8220;</term>
    <term name="editor">
      <single>editor</single>
      <multiple>editors</multiple>
    </term>
    <term name="ordinal"/>
  </terms>
</locale>
"#;

    #[test]
    fn test_parse_locale_terms() {
        let locale = parse_locale_xml(LOCALE).unwrap();
        assert_eq!(locale.lang.as_deref(), Some("en-US"));
        assert_eq!(locale.terms.len(), 6);

        let january = locale.term("month-01", TermForm::Long).unwrap();
        assert_eq!(january.value.as_deref(), Some("January"));
        let short = locale.term("month-01", TermForm::Short).unwrap();
        assert_eq!(short.text(), Some("Jan."));
    }

    #[test]
    fn test_single_and_multiple() {
        let locale = parse_locale_xml(LOCALE).unwrap();
        let editor = locale.term("editor", TermForm::Long).unwrap();
        assert_eq!(editor.single.as_deref(), Some("editor"));
        assert_eq!(editor.multiple.as_deref(), Some("editors"));
        assert_eq!(editor.value, None);
    }

    #[test]
    fn test_entities_and_empty_terms() {
        let locale = parse_locale_xml(LOCALE).unwrap();
        assert_eq!(
            locale.term("open-quote", TermForm::Long).and_then(Term::text),
            Some("\u{201c}")
        );
        assert_eq!(
            locale.term("ordinal", TermForm::Long).and_then(Term::text),
            Some("")
        );
    }

    #[test]
    fn test_wrong_root_rejected() {
        let err = parse_locale_xml("<style><terms/></style>").unwrap_err();
        assert!(err.contains("<style>"), "Got: {}", err);
    }

    #[test]
    fn test_malformed_xml_rejected() {
        let err = parse_locale_xml("<locale><terms><term name=\"a\">x</terms></locale>");
        assert!(err.is_err());
    }

    #[test]
    fn test_truncated_document_rejected() {
        let err = parse_locale_xml("<locale><terms>").unwrap_err();
        assert!(err.contains("</terms>"), "Got: {}", err);
    }

    #[test]
    fn test_empty_document_rejected() {
        assert!(parse_locale_xml("").is_err());
    }
}
