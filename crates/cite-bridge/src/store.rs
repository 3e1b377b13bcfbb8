//! In-memory record store backed by JSON record exports.
//!
//! Records look like:
//!
//! ```json
//! {
//!   "id": 7,
//!   "itemType": "journalArticle",
//!   "fields": {"title": "Mapping Things", "pages": "1-10"},
//!   "creators": [{"creatorType": "author", "firstName": "Ada", "lastName": "Byron"}]
//! }
//! ```

use crate::error::{Error, Result};
use crate::record::{Creator, Record, RecordId, RecordStore};
use crate::tables::ItemType;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Type-specific fields that can answer for a base field.
const BASE_FIELDS: &[(&str, &[&str])] = &[
    (
        "publicationTitle",
        &[
            "websiteTitle",
            "blogTitle",
            "forumTitle",
            "proceedingsTitle",
            "bookTitle",
            "encyclopediaTitle",
            "dictionaryTitle",
            "programTitle",
        ],
    ),
    (
        "publisher",
        &["label", "studio", "network", "university", "institution", "company"],
    ),
    (
        "type",
        &[
            "thesisType",
            "reportType",
            "letterType",
            "manuscriptType",
            "mapType",
            "websiteType",
            "postType",
            "presentationType",
            "genre",
        ],
    ),
    (
        "number",
        &["billNumber", "docketNumber", "patentNumber", "reportNumber", "episodeNumber"],
    ),
    ("date", &["dateDecided", "dateEnacted", "issueDate"]),
    (
        "medium",
        &["audioRecordingFormat", "videoRecordingFormat", "interviewMedium", "artworkMedium"],
    ),
    ("pages", &["codePages", "firstPage"]),
];

/// The creator role that is primary for an item type.
pub fn default_primary_role(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::Film
        | ItemType::VideoRecording
        | ItemType::TvBroadcast
        | ItemType::RadioBroadcast => "director",
        ItemType::Artwork => "artist",
        ItemType::Interview => "interviewee",
        ItemType::Podcast => "podcaster",
        ItemType::Presentation => "presenter",
        ItemType::AudioRecording => "performer",
        ItemType::ComputerProgram => "programmer",
        ItemType::Bill => "sponsor",
        ItemType::Hearing => "contributor",
        ItemType::Patent => "inventor",
        ItemType::Map => "cartographer",
        _ => "author",
    }
}

/// A record held in memory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    pub id: RecordId,
    #[serde(deserialize_with = "deserialize_item_type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub fields: HashMap<String, String>,
    #[serde(default)]
    pub creators: Vec<Creator>,
    /// Overrides the item type's default primary creator role.
    #[serde(default)]
    pub primary_creator_type: Option<String>,
}

fn deserialize_item_type<'de, D>(deserializer: D) -> std::result::Result<ItemType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    // Unrecognized names parse to ItemType::Other; parsing never fails.
    Ok(name.parse().unwrap_or(ItemType::Other))
}

impl MemoryRecord {
    pub fn new(id: u64, item_type: ItemType) -> Self {
        Self {
            id: RecordId(id),
            item_type,
            fields: HashMap::new(),
            creators: Vec::new(),
            primary_creator_type: None,
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    /// Builder-style creator append.
    pub fn with_creator(mut self, creator: Creator) -> Self {
        self.creators.push(creator);
        self
    }

    fn base_field(&self, name: &str) -> Option<&str> {
        let (_, mapped) = BASE_FIELDS.iter().find(|(base, _)| *base == name)?;
        mapped
            .iter()
            .find_map(|field| self.fields.get(*field))
            .map(String::as_str)
    }
}

impl Record for MemoryRecord {
    fn id(&self) -> RecordId {
        self.id
    }

    fn item_type(&self) -> ItemType {
        self.item_type
    }

    // Only one representation is stored, so `unformatted` has no effect.
    fn field(&self, name: &str, _unformatted: bool, include_base_field: bool) -> Option<String> {
        let stored = self.fields.get(name);
        if let Some(value) = stored.filter(|value| !value.trim().is_empty()) {
            return Some(value.clone());
        }
        // An empty stored value does not hide a type-specific field.
        let base = if include_base_field {
            self.base_field(name)
        } else {
            None
        };
        base.map(str::to_string).or_else(|| stored.cloned())
    }

    fn creators(&self) -> &[Creator] {
        &self.creators
    }

    fn primary_creator_role(&self) -> &str {
        self.primary_creator_type
            .as_deref()
            .unwrap_or_else(|| default_primary_role(self.item_type))
    }
}

/// A record store holding [`MemoryRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<RecordId, MemoryRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<MemoryRecord> = serde_json::from_str(json)?;
        Ok(records.into_iter().collect())
    }

    /// Load a JSON array of records from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, record: MemoryRecord) {
        self.records.insert(record.id, record);
    }

    /// Record identifiers in ascending order.
    pub fn ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<_> = self.records.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<MemoryRecord> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = MemoryRecord>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

impl RecordStore for MemoryStore {
    type Record = MemoryRecord;

    fn get(&self, id: RecordId) -> Option<&MemoryRecord> {
        self.records.get(&id)
    }
}
