//! Configuration for the mapper and the locale resolver.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! default-locale = "en-GB"
//! item-cache-capacity = 2048
//! month-cache-capacity = 8
//! cite-paper-journal-article-url = false
//! include-short-forms = true
//! ```
//!
//! Every key is optional.

use crate::error::{Error, Result};
use crate::mapper::MapperOptions;
use serde::Deserialize;
use std::path::Path;

/// Default locale used when none is requested and as the last fallback.
pub const DEFAULT_LOCALE: &str = "en-US";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BridgeConfig {
    pub default_locale: String,
    pub item_cache_capacity: usize,
    pub month_cache_capacity: usize,
    /// Keep URLs on journal, magazine and newspaper articles that have page numbers.
    pub cite_paper_journal_article_url: bool,
    /// Also emit `<variable>-short` text variables.
    pub include_short_forms: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            item_cache_capacity: 1024,
            month_cache_capacity: 16,
            cite_paper_journal_article_url: false,
            include_short_forms: false,
        }
    }
}

impl BridgeConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BridgeConfig = toml::from_str(content).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.item_cache_capacity == 0 {
            return Err(Error::Config {
                message: "item-cache-capacity must be at least 1".to_string(),
            });
        }
        if self.month_cache_capacity == 0 {
            return Err(Error::Config {
                message: "month-cache-capacity must be at least 1".to_string(),
            });
        }
        if self.default_locale.trim().is_empty() {
            return Err(Error::Config {
                message: "default-locale must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn mapper_options(&self) -> MapperOptions {
        MapperOptions {
            cite_paper_journal_article_url: self.cite_paper_journal_article_url,
            include_short_forms: self.include_short_forms,
        }
    }
}
