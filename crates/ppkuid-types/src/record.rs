use crate::Uid;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Outcome of one identifier assignment.
///
/// `Collision` is not an error: it means the content fingerprint was already
/// claimed by a different source file and the identifier was extended to stay
/// unique. Recorded in the mapping table for observability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignStatus {
    Ok,
    Collision,
}

impl AssignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignStatus::Ok => "ok",
            AssignStatus::Collision => "collision",
        }
    }

    pub fn from_collision_flag(collided: bool) -> Self {
        if collided {
            AssignStatus::Collision
        } else {
            AssignStatus::Ok
        }
    }
}

/// One row of the mapping table: where a packet came from, where its renamed
/// copy went, and under which identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub source_path: Utf8PathBuf,
    pub dest_path: Utf8PathBuf,
    pub assigned_id: Uid,
    pub status: AssignStatus,
}
