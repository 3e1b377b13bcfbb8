//! Bridge between a reference manager's records and a CSL citation engine.
//!
//! This crate provides three translation services:
//! - [`RecordMapper`] turns stored records into CSL-JSON [`CslItem`]s
//! - [`format_bibliography`] assembles engine bibliography output as text,
//!   HTML or RTF
//! - [`MonthNameResolver`](locale::MonthNameResolver) loads CSL locale data
//!   and answers month-name queries with fallback to a default locale
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   RecordRef    ┌──────────────┐   CslItem    ┌──────────────┐
//! │ RecordStore  │ ─────────────▶ │ RecordMapper │ ───────────▶ │ citation     │
//! │ (records)    │                │ (+ LRU cache)│              │ engine       │
//! └──────────────┘                └──────────────┘              └──────┬───────┘
//!                                                                      │
//!        ┌──────────────────┐  entries + metadata                      │
//!        │ format_bibliography │ ◀──────────────────────────────────────┘
//!        └──────────────────┘
//!
//! ┌──────────────┐  locale XML   ┌───────────────────┐  month names
//! │ LocaleSource │ ────────────▶ │ MonthNameResolver │ ────────────▶
//! └──────────────┘               └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use cite_bridge::{MemoryRecord, MemoryStore, ItemType, RecordMapper, RecordId, BridgeConfig};
//!
//! let store: MemoryStore = [MemoryRecord::new(7, ItemType::Book)
//!     .with_field("title", "The Rust Programming Language")
//!     .with_field("date", "2019-08-12")]
//! .into_iter()
//! .collect();
//!
//! let mut mapper = RecordMapper::from_config(store, &BridgeConfig::default());
//! let item = mapper.map_record(RecordId(7)).unwrap();
//! assert_eq!(item.text("title"), Some("The Rust Programming Language"));
//! ```

pub mod bibliography;
pub mod cache;
pub mod config;
pub mod csl_item;
pub mod date;
pub mod error;
pub mod locale;
pub mod mapper;
pub mod record;
pub mod store;
pub mod tables;

// Re-export main types
pub use bibliography::{Bibliography, BibliographyMetadata, OutputFormat, format_bibliography};
pub use config::BridgeConfig;
pub use csl_item::{CslItem, CslValue, DateVariable, Name};
pub use error::{Error, Result};
pub use mapper::{MapperOptions, RecordMapper};
pub use record::{Creator, Record, RecordId, RecordRef, RecordStore};
pub use store::{MemoryRecord, MemoryStore};
pub use tables::{CslType, ItemType};
