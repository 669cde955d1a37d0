//! Field edits and read-outs on phenopacket JSON.
//!
//! Packets are treated as loosely structured `serde_json::Value`s; none of
//! these helpers require a schema and all of them tolerate missing or
//! malformed sections.

use ppkuid_types::Uid;
use serde_json::{json, Value as JsonValue};
use std::collections::BTreeSet;

/// Fallback text when a packet carries no phenotypic features.
pub const NO_FEATURES_SUMMARY: &str = "No phenotypic features provided.";

/// Rewrite `subject.id` to carry the assigned identifier.
///
/// A missing or non-object `subject` is replaced with `{"id": <uid>}`.
/// Non-object documents are left untouched; they still get renamed on disk.
pub fn set_subject_id(doc: &mut JsonValue, uid: &Uid) {
    let Some(root) = doc.as_object_mut() else {
        return;
    };
    match root.get_mut("subject").and_then(JsonValue::as_object_mut) {
        Some(subject) => {
            subject.insert("id".to_string(), JsonValue::String(uid.as_str().to_string()));
        }
        None => {
            root.insert("subject".to_string(), json!({"id": uid.as_str()}));
        }
    }
}

/// Ground-truth diagnostic gene symbols recorded in a packet, trimmed and
/// upper-cased.
///
/// Walks `interpretations[].diagnosis.genomicInterpretations[]
/// .variantInterpretation.variationDescriptor.geneContext.symbol`.
pub fn truth_gene_symbols(doc: &JsonValue) -> BTreeSet<String> {
    let mut symbols = BTreeSet::new();
    let interpretations = doc
        .get("interpretations")
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for interpretation in interpretations {
        let genomic = interpretation
            .get("diagnosis")
            .and_then(|d| d.get("genomicInterpretations"))
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for gi in genomic {
            let symbol = gi
                .get("variantInterpretation")
                .and_then(|v| v.get("variationDescriptor"))
                .and_then(|v| v.get("geneContext"))
                .and_then(|g| g.get("symbol"))
                .and_then(JsonValue::as_str);
            if let Some(symbol) = symbol {
                let normalized = symbol.trim().to_uppercase();
                if !normalized.is_empty() {
                    symbols.insert(normalized);
                }
            }
        }
    }
    symbols
}

/// Case-insensitive check whether any ground-truth gene appears in `guesses`.
/// Empty truth set or empty (after trimming) guess list is a non-match.
pub fn gene_guess_matches<S: AsRef<str>>(doc: &JsonValue, guesses: &[S]) -> bool {
    let truth = truth_gene_symbols(doc);
    if truth.is_empty() {
        return false;
    }
    guesses
        .iter()
        .map(|g| g.as_ref().trim().to_uppercase())
        .filter(|g| !g.is_empty())
        .any(|g| truth.contains(&g))
}

/// Short phenotype summary: the labels of `phenotypicFeatures[].type`,
/// falling back to the term id, joined with `", "`.
pub fn phenotype_summary(doc: &JsonValue) -> String {
    let features = doc
        .get("phenotypicFeatures")
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let labels: Vec<&str> = features
        .iter()
        .filter_map(|feature| {
            let term = feature.get("type")?;
            term.get("label")
                .and_then(JsonValue::as_str)
                .or_else(|| term.get("id").and_then(JsonValue::as_str))
        })
        .collect();

    if labels.is_empty() {
        NO_FEATURES_SUMMARY.to_string()
    } else {
        labels.join(", ")
    }
}

/// Render a packet the way the store writes it: 2-space indent, sorted keys,
/// trailing newline.
pub fn to_pretty_string(doc: &JsonValue) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    Ok(out)
}
