use crate::fingerprint::{fingerprint, short_path_hash};
use ppkuid_types::Uid;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Run-scoped record of identifiers already claimed and by which source.
///
/// Created empty at run start and discarded at run end; its only job is to
/// keep assignments unique within one batch. Not persisted — the mapping
/// table written by the store layer records the net effect.
#[derive(Clone, Debug, Default)]
pub struct AssignmentTable {
    claims: BTreeMap<Uid, String>,
}

impl AssignmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    fn is_claimed(&self, uid: &Uid) -> bool {
        self.claims.contains_key(uid)
    }

    fn is_claimed_by(&self, uid: &Uid, source: &str) -> bool {
        self.claims.get(uid).is_some_and(|owner| owner == source)
    }

    fn claim(&mut self, uid: Uid, source: &str) {
        self.claims.insert(uid, source.to_string());
    }
}

/// Result of one assignment. `collision` means the content fingerprint was
/// already claimed by a different source and the identifier was extended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub uid: Uid,
    pub collision: bool,
}

/// Assign a content-derived identifier to `doc`, unique within `table`.
///
/// - Fresh fingerprint: claim `<prefix>-<fingerprint>` and return it.
/// - Same fingerprint re-submitted from the same source: return the claimed
///   identifier unchanged (idempotent re-run).
/// - Same fingerprint from a different source: extend with a 6-hex digest of
///   the source location, then with `-2`, `-3`, … until unclaimed. The
///   numeric fallback is unbounded and its tie-break under several
///   simultaneous collisions depends on insertion order; accepted for this
///   pathological case.
pub fn assign_uid(
    doc: &JsonValue,
    source: &str,
    table: &mut AssignmentTable,
    prefix: &str,
) -> Assignment {
    let base = Uid::new(format!("{prefix}-{}", fingerprint(doc)));
    if !table.is_claimed(&base) {
        table.claim(base.clone(), source);
        return Assignment {
            uid: base,
            collision: false,
        };
    }
    if table.is_claimed_by(&base, source) {
        return Assignment {
            uid: base,
            collision: false,
        };
    }

    // Genuine collision between two distinct source files.
    let alt = format!("{}-{}", base.as_str(), short_path_hash(source));
    let mut candidate = Uid::new(alt.clone());
    let mut suffix = 2u32;
    while table.is_claimed(&candidate) && !table.is_claimed_by(&candidate, source) {
        candidate = Uid::new(format!("{alt}-{suffix}"));
        suffix += 1;
    }
    table.claim(candidate.clone(), source);
    Assignment {
        uid: candidate,
        collision: true,
    }
}
