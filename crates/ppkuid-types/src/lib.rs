//! Stable DTOs and IDs used across the ppkuid workspace.
//!
//! This crate is intentionally boring:
//! - the `Uid` newtype and its formatting rules
//! - the mapping record emitted for every renamed packet
//! - stable string constants (default prefix, mapping file name)

#![forbid(unsafe_code)]

pub mod ids;
pub mod record;
pub mod uid;

pub use record::{AssignStatus, MappingRecord};
pub use uid::Uid;
