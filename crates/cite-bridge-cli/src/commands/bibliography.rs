//! Bibliography command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use cite_bridge::bibliography::EntryOverrides;
use cite_bridge::{Bibliography, OutputFormat, format_bibliography};

/// Arguments for the bibliography command
#[derive(Debug)]
pub struct BibliographyArgs {
    /// Engine output file
    pub input: PathBuf,
    /// Output format name
    pub to: String,
    /// Entry override file
    pub overrides: Option<PathBuf>,
}

/// Execute the bibliography command
pub fn execute(args: BibliographyArgs) -> Result<()> {
    let format: OutputFormat = args.to.parse()?;

    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let bibliography = Bibliography::from_json(&json)
        .with_context(|| format!("Invalid bibliography in {}", args.input.display()))?;

    let overrides = args.overrides.as_deref().map(load_overrides).transpose()?;
    debug!(
        entries = bibliography.entries.len(),
        overrides = overrides.as_ref().map_or(0, |o| o.len()),
        %format,
        "Formatting bibliography"
    );

    print!(
        "{}",
        format_bibliography(&bibliography, format, overrides.as_ref())
    );
    Ok(())
}

fn load_overrides(path: &Path) -> Result<EntryOverrides> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read overrides from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid overrides in {}", path.display()))
}
