//! Accessors the mapper reads bibliographic records through.
//!
//! The record store itself lives outside this crate. Anything that can answer
//! field, creator and type queries can be mapped to CSL-JSON by implementing
//! [`Record`] and [`RecordStore`].

use crate::date::{ParsedDate, parse_date};
use crate::tables::ItemType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a record in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}

/// A creator attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Creator role name (e.g. "author", "editor", "seriesEditor").
    #[serde(rename = "creatorType")]
    pub role: String,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
}

impl Creator {
    pub fn new(role: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Read access to a single bibliographic record.
pub trait Record {
    /// The record's identifier.
    fn id(&self) -> RecordId;

    /// The record's item type.
    fn item_type(&self) -> ItemType;

    /// Fetch a field value.
    ///
    /// `unformatted` asks for the stored value rather than its display form;
    /// `include_base_field` lets type-specific fields answer for their base
    /// field (e.g. `publicationTitle` answered by a website title).
    fn field(&self, name: &str, unformatted: bool, include_base_field: bool) -> Option<String>;

    /// Creators in their stored order.
    fn creators(&self) -> &[Creator];

    /// The role that acts as the primary creator for this record's item type.
    fn primary_creator_role(&self) -> &str;
}

/// Lookup of records by identifier.
pub trait RecordStore {
    type Record: Record;

    /// Resolve an identifier to a record.
    fn get(&self, id: RecordId) -> Option<&Self::Record>;

    /// Parse a date string into its structured parts.
    fn parse_date(&self, value: &str) -> ParsedDate {
        parse_date(value)
    }
}

/// Either a record identifier or the record itself.
///
/// Identifiers are resolved through the mapper's [`RecordStore`] before any
/// mapping logic runs.
#[derive(Debug)]
pub enum RecordRef<'a, R> {
    Id(RecordId),
    Record(&'a R),
}

impl<R: Record> RecordRef<'_, R> {
    /// The identifier this reference points at.
    pub fn id(&self) -> RecordId {
        match self {
            RecordRef::Id(id) => *id,
            RecordRef::Record(record) => record.id(),
        }
    }
}

impl<R> From<RecordId> for RecordRef<'_, R> {
    fn from(id: RecordId) -> Self {
        RecordRef::Id(id)
    }
}

impl<'a, R: Record> From<&'a R> for RecordRef<'a, R> {
    fn from(record: &'a R) -> Self {
        RecordRef::Record(record)
    }
}
