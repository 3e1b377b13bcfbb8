//! Localized month names.

use super::resolve::{FallbackChain, FallbackSegment};
use super::source::LocaleSource;
use super::{LocaleRegistry, LocaleTerms, Term, TermForm, parse_locale_xml};
use crate::cache::BoundedCache;
use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use std::str::FromStr;
use std::sync::Arc;

/// Twelve month names, January first. A month the locale omits is `None`.
pub type MonthNames = [Option<String>; 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonthForm {
    #[default]
    Long,
    Short,
}

impl FromStr for MonthForm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "long" => Ok(MonthForm::Long),
            "short" => Ok(MonthForm::Short),
            other => Err(Error::Config {
                message: format!("unknown month form '{}' (expected long or short)", other),
            }),
        }
    }
}

/// Long and short month names for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    /// Canonical identifier of the locale the names came from.
    pub locale: String,
    long: MonthNames,
    short: MonthNames,
}

impl MonthTable {
    /// Extract month names from parsed locale terms.
    ///
    /// A short form falls back to the long form, and explicit short forms
    /// lose their trailing periods ("Jan." becomes "Jan").
    pub fn from_terms(locale: &str, terms: &LocaleTerms) -> Self {
        let mut long = MonthNames::default();
        let mut short = MonthNames::default();

        for month in 0..12 {
            let name = format!("month-{:02}", month + 1);
            let long_form = terms.term(&name, TermForm::Long).and_then(Term::text);
            let short_form = terms.term(&name, TermForm::Short).and_then(Term::text);

            if long_form.is_none() && short_form.is_none() {
                tracing::warn!(locale, month = month + 1, "No month {} specified for locale {}", month + 1, locale);
                continue;
            }

            long[month] = long_form.map(str::to_string);
            short[month] = match short_form {
                Some(text) => Some(text.trim_end_matches('.').to_string()),
                None => {
                    tracing::warn!(locale, month = month + 1, "locale has no short form for month {}", month + 1);
                    long[month].clone()
                }
            };
        }

        Self {
            locale: locale.to_string(),
            long,
            short,
        }
    }

    pub fn names(&self, form: MonthForm) -> &MonthNames {
        match form {
            MonthForm::Long => &self.long,
            MonthForm::Short => &self.short,
        }
    }
}

/// Outcome of loading locale data for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthResolution {
    /// Canonical identifier of the locale that satisfied the request.
    pub locale: String,
    /// Canonical identifiers that were tried and failed, in order.
    pub fallbacks: Vec<String>,
}

/// Resolves month names for a locale, falling back to the default locale.
///
/// Parsed locales are registered under their canonical identifier and
/// month tables are cached per requested identifier, so repeated requests
/// do not touch the locale source again.
pub struct MonthNameResolver<S> {
    source: S,
    default_locale: String,
    registry: LocaleRegistry,
    cache: BoundedCache<String, MonthTable>,
}

impl<S: LocaleSource> MonthNameResolver<S> {
    pub fn new(source: S, default_locale: impl Into<String>, cache_capacity: usize) -> Self {
        Self {
            source,
            default_locale: default_locale.into(),
            registry: LocaleRegistry::new(),
            cache: BoundedCache::new(cache_capacity),
        }
    }

    pub fn from_config(source: S, config: &BridgeConfig) -> Self {
        Self::new(
            source,
            config.default_locale.clone(),
            config.month_cache_capacity,
        )
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &BoundedCache<String, MonthTable> {
        &self.cache
    }

    /// Month names in the requested form, for `locale` or the default locale.
    ///
    /// ```
    /// use cite_bridge::locale::{BundledLocales, MonthForm, MonthNameResolver};
    ///
    /// let mut resolver = MonthNameResolver::new(BundledLocales, "en-US", 4);
    /// let names = resolver.month_names(MonthForm::Short, Some("en-GB")).unwrap();
    /// assert_eq!(names[0].as_deref(), Some("Jan"));
    /// ```
    pub fn month_names(&mut self, form: MonthForm, locale: Option<&str>) -> Result<MonthNames> {
        Ok(self.month_table(locale)?.names(form).clone())
    }

    /// The full month table for `locale`, served from the cache when possible.
    pub fn month_table(&mut self, locale: Option<&str>) -> Result<Arc<MonthTable>> {
        let requested = locale.unwrap_or(&self.default_locale).to_string();
        if let Some(table) = self.cache.get(&requested) {
            return Ok(table);
        }

        let resolution = self.load_locale(&requested)?;
        let terms = self
            .registry
            .get(&resolution.locale)
            .ok_or_else(|| Error::LocaleDataMissing {
                locale: resolution.locale.clone(),
            })?;
        let table = MonthTable::from_terms(&resolution.locale, terms);
        Ok(self.cache.insert(requested, table))
    }

    /// Make sure locale data for `requested` is registered, walking the
    /// fallback chain as needed.
    ///
    /// Each exhausted segment before the default locale is logged once and
    /// recorded in [`MonthResolution::fallbacks`]. Failing the default locale
    /// is an error.
    pub fn load_locale(&mut self, requested: &str) -> Result<MonthResolution> {
        let chain = FallbackChain::new(requested, &self.default_locale);
        let default_segment = chain.default_segment().canonical.clone();
        let mut fallbacks = Vec::new();

        for segment in chain.segments() {
            if self.registry.contains(&segment.canonical) || self.fetch_segment(segment) {
                return Ok(MonthResolution {
                    locale: segment.canonical.clone(),
                    fallbacks,
                });
            }
            if segment.canonical == default_segment {
                break;
            }
            tracing::warn!(
                locale = %segment.canonical,
                fallback = %default_segment,
                "No locale {}; using {}",
                segment.canonical,
                default_segment
            );
            fallbacks.push(segment.canonical.clone());
        }

        Err(Error::LocaleDataMissing {
            locale: default_segment,
        })
    }

    /// Try each candidate of a segment, registering the first that parses.
    fn fetch_segment(&mut self, segment: &FallbackSegment) -> bool {
        for candidate in &segment.candidates {
            let Some(xml) = self.source.retrieve_locale(candidate) else {
                tracing::debug!(locale = %candidate, "locale source has no data");
                continue;
            };
            match parse_locale_xml(&xml) {
                Ok(terms) => {
                    tracing::debug!(locale = %candidate, registered = %segment.canonical, "loaded locale");
                    self.registry.insert(segment.canonical.clone(), terms);
                    return true;
                }
                Err(message) => {
                    let err = Error::LocaleParse {
                        locale: candidate.clone(),
                        message,
                    };
                    tracing::warn!("{}", err);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::BundledLocales;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn locale_xml(lang: &str, months: &[(&str, Option<&str>)]) -> String {
        let mut terms = String::new();
        for (i, (long, short)) in months.iter().enumerate() {
            terms.push_str(&format!("<term name=\"month-{:02}\">{}</term>", i + 1, long));
            if let Some(short) = short {
                terms.push_str(&format!(
                    "<term name=\"month-{:02}\" form=\"short\">{}</term>",
                    i + 1,
                    short
                ));
            }
        }
        format!(
            "<locale xml:lang=\"{}\"><terms>{}</terms></locale>",
            lang, terms
        )
    }

    /// A source backed by a map that records every identifier requested.
    struct MapSource {
        locales: HashMap<String, String>,
        requests: RefCell<Vec<String>>,
    }

    impl MapSource {
        fn new(entries: &[(&str, String)]) -> Self {
            Self {
                locales: entries
                    .iter()
                    .map(|(id, xml)| (id.to_string(), xml.clone()))
                    .collect(),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl LocaleSource for MapSource {
        fn retrieve_locale(&self, locale: &str) -> Option<String> {
            self.requests.borrow_mut().push(locale.to_string());
            self.locales.get(locale).cloned()
        }
    }

    fn twelve(long: &str, short: Option<&str>) -> Vec<(String, Option<String>)> {
        (1..=12)
            .map(|i| (format!("{} {}", long, i), short.map(|s| format!("{}{}.", s, i))))
            .collect()
    }

    fn xml_for(lang: &str, long: &str, short: Option<&str>) -> String {
        let months = twelve(long, short);
        let borrowed: Vec<(&str, Option<&str>)> = months
            .iter()
            .map(|(l, s)| (l.as_str(), s.as_deref()))
            .collect();
        locale_xml(lang, &borrowed)
    }

    #[test]
    fn test_long_and_short_names() {
        let mut resolver = MonthNameResolver::new(BundledLocales, "en-US", 4);
        let long = resolver.month_names(MonthForm::Long, None).unwrap();
        assert_eq!(long[0].as_deref(), Some("January"));
        assert_eq!(long[11].as_deref(), Some("December"));

        let short = resolver.month_names(MonthForm::Short, None).unwrap();
        assert_eq!(short[0].as_deref(), Some("Jan"));
        assert_eq!(short[4].as_deref(), Some("May"));
        assert_eq!(short[8].as_deref(), Some("Sep"));
    }

    #[test]
    fn test_short_form_falls_back_to_long() {
        let xml = locale_xml("en-US", &[("Primero", None), ("Segundo", Some("Seg."))]);
        let terms = parse_locale_xml(&xml).unwrap();
        let table = MonthTable::from_terms("en-US", &terms);

        assert_eq!(table.names(MonthForm::Short)[0].as_deref(), Some("Primero"));
        assert_eq!(table.names(MonthForm::Short)[1].as_deref(), Some("Seg"));
        // Months the locale omits stay unset.
        assert_eq!(table.names(MonthForm::Long)[2], None);
        assert_eq!(table.names(MonthForm::Short)[11], None);
    }

    #[test]
    fn test_only_trailing_periods_stripped() {
        let xml = locale_xml("en-US", &[("January", Some("J.a.n."))]);
        let terms = parse_locale_xml(&xml).unwrap();
        let table = MonthTable::from_terms("en-US", &terms);
        assert_eq!(table.names(MonthForm::Short)[0].as_deref(), Some("J.a.n"));
    }

    #[test]
    fn test_dialect_falls_back_to_bare_language() {
        let source = MapSource::new(&[
            ("de", xml_for("de", "Monat", Some("Mon"))),
            ("en-US", xml_for("en-US", "Month", None)),
        ]);
        let mut resolver = MonthNameResolver::new(source, "en-US", 4);
        let resolution = resolver.load_locale("de-AT").unwrap();

        assert_eq!(resolution.locale, "de-AT");
        assert!(resolution.fallbacks.is_empty());
        assert!(resolver.registry().contains("de-AT"));
        assert_eq!(*resolver.source.requests.borrow(), vec!["de-AT", "de"]);
    }

    #[test]
    fn test_unresolvable_locale_uses_default() {
        let source = MapSource::new(&[("en-US", xml_for("en-US", "Month", None))]);
        let mut resolver = MonthNameResolver::new(source, "en-US", 4);

        let resolution = resolver.load_locale("xx-YY").unwrap();
        assert_eq!(resolution.locale, "en-US");
        assert_eq!(resolution.fallbacks, vec!["xx-YY"]);

        let names = resolver.month_names(MonthForm::Long, Some("xx-YY")).unwrap();
        assert_eq!(names[0].as_deref(), Some("Month 1"));
    }

    #[test]
    fn test_missing_default_locale_is_error() {
        let source = |_: &str| -> Option<String> { None };
        let mut resolver = MonthNameResolver::new(source, "en-US", 4);
        let err = resolver.month_names(MonthForm::Long, Some("fr")).unwrap_err();
        assert!(
            matches!(err, Error::LocaleDataMissing { ref locale } if locale == "en-US"),
            "Got: {:?}",
            err
        );
    }

    #[test]
    fn test_unparsable_locale_counts_as_missing() {
        let source = MapSource::new(&[
            ("fr-FR", "<locale><terms>".to_string()),
            ("en-US", xml_for("en-US", "Month", None)),
        ]);
        let mut resolver = MonthNameResolver::new(source, "en-US", 4);
        let resolution = resolver.load_locale("fr").unwrap();
        assert_eq!(resolution.locale, "en-US");
        assert_eq!(resolution.fallbacks, vec!["fr-FR"]);
    }

    #[test]
    fn test_month_tables_are_cached() {
        let source = MapSource::new(&[("en-US", xml_for("en-US", "Month", None))]);
        let mut resolver = MonthNameResolver::new(source, "en-US", 4);

        let first = resolver.month_table(Some("en")).unwrap();
        let second = resolver.month_table(Some("en")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.cache().stats().hits, 1);
        assert_eq!(resolver.source.requests.borrow().len(), 1);

        // A different request identifier reuses the registered locale.
        resolver.month_table(None).unwrap();
        assert_eq!(resolver.source.requests.borrow().len(), 1);
    }

    #[test]
    fn test_month_form_from_str() {
        assert_eq!("short".parse::<MonthForm>().unwrap(), MonthForm::Short);
        assert!("narrow".parse::<MonthForm>().is_err());
    }
}
