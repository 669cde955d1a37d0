use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use ppkuid_core::{assign_uid, packet, AssignmentTable};
use ppkuid_types::ids::MAPPING_FILE_NAME;
use ppkuid_types::{AssignStatus, MappingRecord, Uid};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Inputs for one batch run over a store.
///
/// Expected source layout: `source_dir/<GROUP>/<file>.json`, one group
/// directory per gene.
#[derive(Clone, Debug)]
pub struct RenameOptions {
    pub source_dir: Utf8PathBuf,
    pub dest_dir: Utf8PathBuf,
    /// Identifier prefix, e.g. `PPK`.
    pub prefix: String,
    /// Write all output files directly under `dest_dir` instead of mirroring
    /// the group directories.
    pub flat: bool,
}

/// A file that contributed no mapping row and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: Utf8PathBuf,
    pub reason: String,
}

/// Net effect of a batch run: one record per renamed packet, in processing
/// order, plus the files that were skipped.
#[derive(Clone, Debug, Default)]
pub struct RenameSummary {
    pub records: Vec<MappingRecord>,
    pub skipped: Vec<SkippedFile>,
}

/// Copy a packet store to `dest_dir` with every file renamed to its assigned
/// identifier and `subject.id` rewritten to match.
///
/// Group directories and their entries are processed in lexicographic order
/// so identifier assignment is reproducible run to run. Files that fail JSON
/// parsing are skipped and recorded in the summary; a missing or non-directory
/// source is a fatal error before any processing. `mapping.csv` is written at
/// the destination root after the walk.
pub fn rename_store(options: &RenameOptions) -> anyhow::Result<RenameSummary> {
    if !options.source_dir.is_dir() {
        anyhow::bail!(
            "source directory does not exist or is not a directory: {}",
            options.source_dir
        );
    }
    std::fs::create_dir_all(&options.dest_dir)
        .with_context(|| format!("create destination: {}", options.dest_dir))?;

    let mut table = AssignmentTable::new();
    let mut summary = RenameSummary::default();

    for group_dir in sorted_entries(&options.source_dir, EntryKind::Dir)? {
        let group_name = group_dir.file_name().unwrap_or_default();
        let target_dir = if options.flat {
            options.dest_dir.clone()
        } else {
            options.dest_dir.join(group_name)
        };
        for entry in sorted_entries(&group_dir, EntryKind::File)? {
            process_file(&entry, &target_dir, &mut table, options, &mut summary)?;
        }
    }

    let mapping_path = options.dest_dir.join(MAPPING_FILE_NAME);
    std::fs::write(&mapping_path, crate::csv::render_mapping(&summary.records))
        .with_context(|| format!("write {}", mapping_path))?;

    Ok(summary)
}

fn process_file(
    src_file: &Utf8Path,
    target_dir: &Utf8Path,
    table: &mut AssignmentTable,
    options: &RenameOptions,
    summary: &mut RenameSummary,
) -> anyhow::Result<()> {
    if !src_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        return Ok(());
    }

    let text =
        std::fs::read_to_string(src_file).with_context(|| format!("read {}", src_file))?;
    let mut doc: JsonValue = match serde_json::from_str(&text) {
        Ok(doc) => doc,
        Err(err) => {
            summary.skipped.push(SkippedFile {
                path: src_file.to_owned(),
                reason: format!("invalid JSON: {err}"),
            });
            return Ok(());
        }
    };

    let assignment = assign_uid(&doc, src_file.as_str(), table, &options.prefix);
    packet::set_subject_id(&mut doc, &assignment.uid);

    let dest_file = write_packet(target_dir, &assignment.uid, &doc)?;

    summary.records.push(MappingRecord {
        source_path: src_file.to_owned(),
        dest_path: dest_file,
        assigned_id: assignment.uid,
        status: AssignStatus::from_collision_flag(assignment.collision),
    });
    Ok(())
}

fn write_packet(target_dir: &Utf8Path, uid: &Uid, doc: &JsonValue) -> anyhow::Result<Utf8PathBuf> {
    std::fs::create_dir_all(target_dir)
        .with_context(|| format!("create directory: {}", target_dir))?;
    let dest_file = target_dir.join(uid.file_name());
    let rendered = packet::to_pretty_string(doc).context("render packet")?;
    std::fs::write(&dest_file, rendered).with_context(|| format!("write {}", dest_file))?;
    Ok(dest_file)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

/// Directory entries of one kind, lexicographically sorted. Sorting is load
/// bearing: numeric-suffix tie-breaks depend on table insertion order.
fn sorted_entries(dir: &Utf8Path, kind: EntryKind) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("read directory: {}", dir))? {
        let entry = entry.with_context(|| format!("read directory entry in {}", dir))?;
        let is_dir = entry
            .file_type()
            .with_context(|| format!("stat {}", entry.path().display()))?
            .is_dir();
        if (kind == EntryKind::Dir) != is_dir {
            continue;
        }
        out.push(pathbuf_to_utf8(entry.path())?);
    }
    out.sort();
    Ok(out)
}

fn pathbuf_to_utf8(path: PathBuf) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow::anyhow!("non-UTF-8 path: {}", p.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    fn options(root: &Utf8Path, flat: bool) -> RenameOptions {
        RenameOptions {
            source_dir: root.join("cases"),
            dest_dir: root.join("out"),
            prefix: "PPK".to_string(),
            flat,
        }
    }

    #[test]
    fn renames_packets_and_rewrites_subject_id() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(
            &root.join("cases/FBN1/case1.json"),
            r#"{"subject": {"id": "patient-1"}}"#,
        );

        let summary = rename_store(&options(&root, false)).expect("rename");
        assert_eq!(summary.records.len(), 1);
        assert!(summary.skipped.is_empty());

        let record = &summary.records[0];
        assert_eq!(record.status, AssignStatus::Ok);
        assert_eq!(record.dest_path, root.join("out/FBN1").join(record.assigned_id.file_name()));

        let written: JsonValue =
            serde_json::from_str(&std::fs::read_to_string(&record.dest_path).expect("read dest"))
                .expect("parse dest");
        assert_eq!(written["subject"]["id"], record.assigned_id.as_str());
    }

    #[test]
    fn flat_layout_drops_group_directories() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("cases/FBN1/a.json"), r#"{"n": 1}"#);
        write_file(&root.join("cases/TP53/b.json"), r#"{"n": 2}"#);

        let summary = rename_store(&options(&root, true)).expect("rename");
        assert_eq!(summary.records.len(), 2);
        for record in &summary.records {
            assert_eq!(record.dest_path.parent(), Some(root.join("out").as_path()));
        }
    }

    #[test]
    fn identical_content_across_groups_is_collision_resolved() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        // Byte-identical apart from key order: same fingerprint.
        write_file(&root.join("cases/G1/a.json"), r#"{"a":1,"b":2}"#);
        write_file(&root.join("cases/G2/b.json"), r#"{"b":2,"a":1}"#);

        let summary = rename_store(&options(&root, false)).expect("rename");
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.records[0].status, AssignStatus::Ok);
        assert_eq!(summary.records[1].status, AssignStatus::Collision);
        assert_ne!(summary.records[0].assigned_id, summary.records[1].assigned_id);
        // The collided identifier extends the base with a 6-hex path digest.
        let base = summary.records[0].assigned_id.as_str();
        let collided = summary.records[1].assigned_id.as_str();
        assert!(collided.starts_with(base));
        assert_eq!(collided.len(), base.len() + 7);
    }

    #[test]
    fn malformed_json_is_skipped_not_fatal() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("cases/G1/bad.json"), "{not json");
        write_file(&root.join("cases/G1/good.json"), r#"{"ok": true}"#);

        let summary = rename_store(&options(&root, false)).expect("rename");
        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].path, root.join("cases/G1/bad.json"));
        assert!(summary.skipped[0].reason.contains("invalid JSON"));
    }

    #[test]
    fn non_json_extensions_are_ignored() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("cases/G1/notes.txt"), "notes");
        write_file(&root.join("cases/G1/case.JSON"), r#"{"ok": true}"#);

        let summary = rename_store(&options(&root, false)).expect("rename");
        assert_eq!(summary.records.len(), 1);
        assert!(summary.skipped.is_empty());
    }

    #[test]
    fn missing_source_dir_is_fatal_before_processing() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        let err = rename_store(&options(&root, false)).unwrap_err();
        assert!(err.to_string().contains("source directory"));
        assert!(!root.join("out").exists());
    }

    #[test]
    fn mapping_csv_records_every_processed_file() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("cases/G1/a.json"), r#"{"n": 1}"#);
        write_file(&root.join("cases/G1/bad.json"), "oops");
        write_file(&root.join("cases/G2/b.json"), r#"{"n": 2}"#);

        let summary = rename_store(&options(&root, false)).expect("rename");
        let text = std::fs::read_to_string(root.join("out/mapping.csv")).expect("read mapping");
        let rows = crate::csv::parse_rows(&text);
        assert_eq!(rows[0], vec!["source_path", "dest_path", "assigned_id", "status"]);
        // Skipped files contribute no row.
        assert_eq!(rows.len(), 1 + summary.records.len());
        assert_eq!(rows[1][0], root.join("cases/G1/a.json").as_str());
        assert_eq!(rows[2][0], root.join("cases/G2/b.json").as_str());
    }

    #[test]
    fn processing_order_is_lexicographic() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("cases/B/z.json"), r#"{"n": 1}"#);
        write_file(&root.join("cases/A/b.json"), r#"{"n": 2}"#);
        write_file(&root.join("cases/A/a.json"), r#"{"n": 3}"#);

        let summary = rename_store(&options(&root, false)).expect("rename");
        let sources: Vec<String> = summary
            .records
            .iter()
            .map(|r| r.source_path.as_str().to_string())
            .collect();
        assert_eq!(
            sources,
            vec![
                root.join("cases/A/a.json").as_str().to_string(),
                root.join("cases/A/b.json").as_str().to_string(),
                root.join("cases/B/z.json").as_str().to_string(),
            ]
        );
    }

    #[test]
    fn rewritten_packet_round_trips_to_example_uid() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(
            &root.join("cases/G/x.json"),
            r#"{"subject": {"id": "x"}}"#,
        );

        let summary = rename_store(&options(&root, false)).expect("rename");
        // Fingerprint of `{"subject":{"id":"x"}}` with the default prefix.
        assert_eq!(summary.records[0].assigned_id.as_str(), "PPK-8c553e9d7d59");
    }
}
