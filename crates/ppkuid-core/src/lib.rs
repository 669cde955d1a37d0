//! Pure identifier assignment (no IO).
//!
//! Input: parsed packet JSON plus the source location it was read from.
//! Output: a unique, content-derived identifier and the run-scoped table of
//! claims used to keep it unique.

#![forbid(unsafe_code)]

pub mod assign;
pub mod fingerprint;
pub mod packet;

pub use assign::{assign_uid, Assignment, AssignmentTable};
pub use fingerprint::{fingerprint, short_path_hash};
pub use packet::{
    gene_guess_matches, phenotype_summary, set_subject_id, to_pretty_string, truth_gene_symbols,
};
