//! Mapping of bibliographic records to CSL-JSON items.
//!
//! The mapper walks the static tables in [`crate::tables`]: text variables take
//! the first non-empty field of their fallback list, creators are grouped into
//! name variables in their stored order, and date fields are parsed into
//! `date-parts` (or kept literal when they carry a non-date qualifier and no
//! month). Results are cached per record identifier.

use crate::cache::BoundedCache;
use crate::config::BridgeConfig;
use crate::csl_item::{CslItem, DateVariable, Name};
use crate::error::{Error, Result};
use crate::record::{Record, RecordId, RecordRef, RecordStore};
use crate::tables::{
    DATE_FIELDS, FieldForm, PRIMARY_ROLE, URL_VARIABLE, field_map, name_variable,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^".+"$"#).unwrap());

/// Preferences that change how records are mapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapperOptions {
    /// Keep the URL of paginated journal, magazine and newspaper articles.
    pub cite_paper_journal_article_url: bool,
    /// Emit `<variable>-short` variables from the short field map.
    pub include_short_forms: bool,
}

/// Cache of mapped items keyed by record identifier.
pub type ItemCache = BoundedCache<RecordId, CslItem>;

/// Converts records from a [`RecordStore`] into CSL-JSON items.
pub struct RecordMapper<S> {
    store: S,
    cache: ItemCache,
    options: MapperOptions,
}

impl<S: RecordStore> RecordMapper<S> {
    pub fn new(store: S, cache: ItemCache, options: MapperOptions) -> Self {
        Self {
            store,
            cache,
            options,
        }
    }

    /// Build a mapper with the cache size and preferences from `config`.
    pub fn from_config(store: S, config: &BridgeConfig) -> Self {
        Self::new(
            store,
            ItemCache::new(config.item_cache_capacity),
            config.mapper_options(),
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &ItemCache {
        &self.cache
    }

    pub fn options(&self) -> MapperOptions {
        self.options
    }

    /// Map a record (or the record behind an identifier) to a CSL-JSON item.
    ///
    /// A cached item is returned as-is, without touching the store.
    pub fn map_record<'a>(
        &mut self,
        record: impl Into<RecordRef<'a, S::Record>>,
    ) -> Result<Arc<CslItem>>
    where
        S::Record: 'a,
    {
        let record = record.into();
        let id = record.id();

        if let Some(item) = self.cache.get(&id) {
            tracing::debug!(record = %id, "CSL item cache hit");
            return Ok(item);
        }

        let item = match record {
            RecordRef::Id(id) => {
                let resolved = self.store.get(id).ok_or(Error::InvalidRecord { id })?;
                build_item(&self.store, resolved, &self.options)
            }
            RecordRef::Record(resolved) => build_item(&self.store, resolved, &self.options),
        };

        tracing::debug!(record = %id, csl_type = %item.item_type, "mapped record");
        Ok(self.cache.insert(id, item))
    }

    /// Map several records by identifier, preserving order.
    pub fn map_records(&mut self, ids: &[RecordId]) -> Result<Vec<Arc<CslItem>>> {
        ids.iter().map(|id| self.map_record(*id)).collect()
    }
}

fn build_item<S: RecordStore>(store: &S, record: &S::Record, options: &MapperOptions) -> CslItem {
    let item_type = record.item_type();
    let mut item = CslItem::new(record.id(), item_type.csl_type());

    let ignore_url = suppresses_url(record, options);

    for (variable, fields) in field_map(FieldForm::Long) {
        if *variable == URL_VARIABLE && ignore_url {
            continue;
        }
        if let Some(value) = first_value(record, fields) {
            item.set_text(variable, value);
        }
    }

    if options.include_short_forms {
        for (variable, fields) in field_map(FieldForm::Short) {
            if let Some(value) = first_value(record, fields) {
                item.set_text(&format!("{}-short", variable), value);
            }
        }
    }

    let primary_role = record.primary_creator_role();
    for creator in record.creators() {
        let role = if creator.role == primary_role {
            PRIMARY_ROLE
        } else {
            creator.role.as_str()
        };
        let Some(variable) = name_variable(role) else {
            continue;
        };
        item.push_name(
            variable,
            Name {
                family: creator.last_name.clone(),
                given: creator.first_name.clone(),
            },
        );
    }

    for (variable, field) in DATE_FIELDS {
        let Some(raw) = non_empty(record.field(field, false, true)) else {
            continue;
        };
        let date = store.parse_date(&raw);
        let value = if date.part.is_some() && date.month.is_none() {
            DateVariable::literal(raw.trim())
        } else {
            DateVariable::from_parts(
                date.year,
                date.month.map(|m| m as i32 + 1),
                date.day.map(|d| d as i32),
            )
        };
        item.set_date(variable, value);
    }

    item
}

/// Journal-style articles with page numbers are cited like print articles, so
/// their URL is dropped unless the preference asks to keep it.
fn suppresses_url<R: Record>(record: &R, options: &MapperOptions) -> bool {
    if options.cite_paper_journal_article_url || !record.item_type().is_paginated_periodical() {
        return false;
    }
    let has_locator = non_empty(record.field("accessDate", true, true)).is_some()
        || non_empty(record.field("url", true, true)).is_some();
    has_locator && non_empty(record.field("pages", false, false)).is_some()
}

fn first_value<R: Record>(record: &R, mapping: &[&str]) -> Option<String> {
    mapping.iter().find_map(|field| {
        let value = clean_value(&record.field(field, false, true)?);
        if value.is_empty() {
            None
        } else {
            Some(strip_enclosing_quotes(value))
        }
    })
}

fn clean_value(raw: &str) -> String {
    raw.trim().replace("\\\"", "\"")
}

fn strip_enclosing_quotes(value: String) -> String {
    if QUOTED_RE.is_match(&value) {
        value[1..value.len() - 1].to_string()
    } else {
        value
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
