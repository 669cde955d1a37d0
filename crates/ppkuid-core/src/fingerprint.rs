use ppkuid_types::ids::{FINGERPRINT_LEN, PATH_HASH_LEN};
use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a packet.
///
/// The digest is taken over the canonical serialization of the document:
/// object keys sorted lexicographically, compact separators. Two documents
/// that differ only in key order or whitespace fingerprint identically.
///
/// Truncated to 12 hex characters: for a store of hundreds to low thousands
/// of packets the collision probability is negligible, and collisions are
/// resolved by the assigner anyway. Callers needing the full digest should
/// hash the canonical form themselves.
pub fn fingerprint(doc: &JsonValue) -> String {
    // serde_json object maps are BTreeMap-backed (no `preserve_order`),
    // so `to_string` on a Value is already the canonical form.
    let canonical = doc.to_string();
    truncated_sha256(canonical.as_bytes(), FINGERPRINT_LEN)
}

/// Short digest of a source location's string form, used to extend an
/// identifier when two distinct files share a content fingerprint.
pub fn short_path_hash(source: &str) -> String {
    truncated_sha256(source.as_bytes(), PATH_HASH_LEN)
}

fn truncated_sha256(bytes: &[u8], len: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut hex = hex::encode(digest);
    hex.truncate(len);
    hex
}
