//! Stable string constants shared by the store and CLI layers.
//!
//! The prefix is part of every assigned identifier, so changing it is a
//! breaking change for any store renamed with the old value.

/// Default identifier prefix: `PPK-<fingerprint>`.
pub const DEFAULT_PREFIX: &str = "PPK";

/// Name of the audit table written at the destination root.
pub const MAPPING_FILE_NAME: &str = "mapping.csv";

/// Header row of the mapping table, in column order.
pub const MAPPING_HEADER: [&str; 4] = ["source_path", "dest_path", "assigned_id", "status"];

/// Hex characters kept from the content digest.
pub const FINGERPRINT_LEN: usize = 12;

/// Hex characters kept from the path digest used for collision fallback.
pub const PATH_HASH_LEN: usize = 6;
