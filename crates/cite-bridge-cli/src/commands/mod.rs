//! Command implementations for the cite-bridge CLI
//!
//! Each command module handles the CLI interface and delegates to
//! cite-bridge for the actual work.

pub mod bibliography;
pub mod map;
pub mod months;
