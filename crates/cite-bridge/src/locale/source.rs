//! Where locale XML comes from.

use rust_embed::Embed;
use std::path::{Path, PathBuf};

/// Retrieves raw locale XML by identifier.
///
/// Returning `None` means the locale is not available from this source; the
/// resolver then moves on to the next identifier in its fallback chain.
pub trait LocaleSource {
    fn retrieve_locale(&self, locale: &str) -> Option<String>;
}

impl<F> LocaleSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn retrieve_locale(&self, locale: &str) -> Option<String> {
        self(locale)
    }
}

fn locale_file_name(locale: &str) -> String {
    format!("locales-{}.xml", locale)
}

/// Embedded locale files from the locales/ directory.
#[derive(Embed)]
#[folder = "locales/"]
#[include = "*.xml"]
struct LocaleFiles;

/// Locales compiled into the crate: en-US, en-GB, de-DE and fr-FR.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledLocales;

impl BundledLocales {
    /// Identifiers of every bundled locale.
    pub fn available() -> Vec<String> {
        let mut locales: Vec<String> = LocaleFiles::iter()
            .filter_map(|file| {
                file.strip_prefix("locales-")
                    .and_then(|rest| rest.strip_suffix(".xml"))
                    .map(str::to_string)
            })
            .collect();
        locales.sort();
        locales
    }
}

impl LocaleSource for BundledLocales {
    fn retrieve_locale(&self, locale: &str) -> Option<String> {
        let file = LocaleFiles::get(&locale_file_name(locale))?;
        String::from_utf8(file.data.into_owned()).ok()
    }
}

/// Reads `locales-<id>.xml` files from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryLocaleSource {
    dir: PathBuf,
}

impl DirectoryLocaleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LocaleSource for DirectoryLocaleSource {
    fn retrieve_locale(&self, locale: &str) -> Option<String> {
        let path = self.dir.join(locale_file_name(locale));
        match std::fs::read_to_string(&path) {
            Ok(xml) => Some(xml),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "locale file not readable");
                None
            }
        }
    }
}
