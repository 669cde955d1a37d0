use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use ppkuid_types::ids::MAPPING_FILE_NAME;

/// Resolve a UID or path to a packet file.
///
/// Fallback ladder, cheapest first — the order is part of the contract:
/// 1. the input is itself a path to an existing file;
/// 2. `base_dir/<input>.json` exists;
/// 3. the `mapping.csv` at `base_dir` has a row for the identifier, in which
///    case its recorded `dest_path` is returned as-is.
///
/// A missing mapping table is a plain "not found", not an error.
pub fn resolve_packet_path(
    uid_or_path: &str,
    base_dir: &Utf8Path,
) -> anyhow::Result<Option<Utf8PathBuf>> {
    let direct = Utf8Path::new(uid_or_path);
    if direct.is_file() {
        return Ok(Some(direct.to_owned()));
    }

    let by_uid = base_dir.join(format!("{uid_or_path}.json"));
    if by_uid.is_file() {
        return Ok(Some(by_uid));
    }

    let mapping_path = base_dir.join(MAPPING_FILE_NAME);
    if !mapping_path.is_file() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&mapping_path)
        .with_context(|| format!("read {}", mapping_path))?;
    Ok(crate::csv::find_dest_for_uid(&text, uid_or_path).map(Utf8PathBuf::from))
}
