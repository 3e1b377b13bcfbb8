//! Map command implementation.
//!
//! Loads a JSON record export and prints the mapped CSL-JSON items as a
//! JSON array.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use cite_bridge::{BridgeConfig, CslItem, MemoryStore, RecordId, RecordMapper};

/// Arguments for the map command
#[derive(Debug)]
pub struct MapArgs {
    /// Record export file
    pub records: PathBuf,
    /// Records to map; empty means all
    pub ids: Vec<u64>,
}

/// Execute the map command
pub fn execute(args: MapArgs, config: &BridgeConfig) -> Result<()> {
    let store = MemoryStore::load(&args.records)
        .with_context(|| format!("Failed to load records from {}", args.records.display()))?;

    let ids = selected_ids(&store, &args.ids);
    info!(count = ids.len(), "Mapping records");

    let mut mapper = RecordMapper::from_config(store, config);
    let items = mapper.map_records(&ids)?;
    let items: Vec<&CslItem> = items.iter().map(|item| item.as_ref()).collect();

    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

fn selected_ids(store: &MemoryStore, requested: &[u64]) -> Vec<RecordId> {
    if requested.is_empty() {
        store.ids()
    } else {
        requested.iter().copied().map(RecordId).collect()
    }
}
