//! Filesystem adapters: scan a packet store, assign identifiers, write the
//! renamed copy and its mapping table.
//!
//! This crate is allowed to do filesystem IO. Diagnostics are returned as
//! data (skip entries in the run summary); printing them is the CLI's job.

#![forbid(unsafe_code)]

pub mod csv;
mod rename;
mod resolve;

pub use rename::{rename_store, RenameOptions, RenameSummary, SkippedFile};
pub use resolve::resolve_packet_path;
