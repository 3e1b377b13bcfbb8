//! Locale data for month names.
//!
//! Locale definitions are CSL locale XML files fetched by identifier through a
//! [`LocaleSource`]. A requested identifier is resolved to its best-match
//! dialect, and an explicit [`FallbackChain`] decides which identifiers are
//! tried before the default locale is used instead.

mod months;
mod parser;
mod resolve;
mod source;

pub use months::{MonthForm, MonthNameResolver, MonthNames, MonthResolution, MonthTable};
pub use parser::parse_locale_xml;
pub use resolve::{FallbackChain, FallbackSegment, ResolvedLocale, resolve_locale};
pub use source::{BundledLocales, DirectoryLocaleSource, LocaleSource};

use std::collections::HashMap;

/// Form of a locale term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermForm {
    Long,
    Short,
    Verb,
    VerbShort,
    Symbol,
}

impl TermForm {
    fn from_attribute(value: &str) -> Self {
        match value {
            "short" => TermForm::Short,
            "verb" => TermForm::Verb,
            "verb-short" => TermForm::VerbShort,
            "symbol" => TermForm::Symbol,
            _ => TermForm::Long,
        }
    }
}

/// A localized term such as a month name or "and".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub name: String,
    pub form: TermForm,
    pub single: Option<String>,
    pub multiple: Option<String>,
    pub value: Option<String>,
}

impl Term {
    /// The singular text of the term.
    pub fn text(&self) -> Option<&str> {
        self.single
            .as_deref()
            .or(self.value.as_deref())
            .or(self.multiple.as_deref())
    }
}

/// The terms defined by one locale file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTerms {
    /// The `xml:lang` of the file, if declared.
    pub lang: Option<String>,
    pub terms: Vec<Term>,
}

impl LocaleTerms {
    /// Find a term by name and exact form.
    pub fn term(&self, name: &str, form: TermForm) -> Option<&Term> {
        self.terms
            .iter()
            .find(|term| term.name == name && term.form == form)
    }
}

/// Parsed locales, keyed by canonical locale identifier.
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    locales: HashMap<String, LocaleTerms>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleTerms> {
        self.locales.get(locale)
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Register terms under a canonical identifier, replacing any previous entry.
    pub fn insert(&mut self, locale: impl Into<String>, terms: LocaleTerms) {
        self.locales.insert(locale.into(), terms);
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(name: &str, form: TermForm, value: &str) -> Term {
        Term {
            name: name.to_string(),
            form,
            single: None,
            multiple: None,
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn test_term_lookup_by_form() {
        let terms = LocaleTerms {
            lang: Some("en-US".to_string()),
            terms: vec![
                term("month-01", TermForm::Long, "January"),
                term("month-01", TermForm::Short, "Jan."),
            ],
        };
        assert_eq!(
            terms.term("month-01", TermForm::Short).and_then(Term::text),
            Some("Jan.")
        );
        assert!(terms.term("month-02", TermForm::Long).is_none());
    }

    #[test]
    fn test_term_text_prefers_single() {
        let term = Term {
            name: "editor".to_string(),
            form: TermForm::Long,
            single: Some("editor".to_string()),
            multiple: Some("editors".to_string()),
            value: None,
        };
        assert_eq!(term.text(), Some("editor"));
    }

    #[test]
    fn test_registry() {
        let mut registry = LocaleRegistry::new();
        assert!(registry.is_empty());
        registry.insert("de-DE", LocaleTerms::default());
        assert!(registry.contains("de-DE"));
        assert!(registry.get("de-AT").is_none());
        assert_eq!(registry.len(), 1);
    }
}
