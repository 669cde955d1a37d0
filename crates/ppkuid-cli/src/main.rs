//! CLI entry point for ppkuid.
//!
//! This module is intentionally thin: it handles argument parsing, IO, and
//! exit codes. Assignment logic lives in `ppkuid-core`, filesystem work in
//! `ppkuid-store`.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use ppkuid_core::packet;
use ppkuid_store::{rename_store, resolve_packet_path, RenameOptions};
use ppkuid_types::ids;
use serde_json::Value as JsonValue;

#[derive(Parser, Debug)]
#[command(
    name = "ppkuid",
    version,
    about = "Content-addressed identifiers for phenopacket stores"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a UID-named copy of a packet store and write its mapping table.
    Rename {
        /// Source store (contains per-gene subdirectories of JSON files).
        #[arg(long)]
        source_dir: Utf8PathBuf,

        /// Destination directory for the UID-named copies.
        #[arg(long)]
        dest_dir: Utf8PathBuf,

        /// Prefix for assigned identifiers.
        #[arg(long, default_value = ids::DEFAULT_PREFIX)]
        prefix: String,

        /// Write all output files into a single flat directory (no gene
        /// subfolders).
        #[arg(long)]
        flat: bool,
    },

    /// Resolve a UID (or direct path) to a packet file.
    Resolve {
        uid_or_path: String,

        /// Directory holding UID-named packets and mapping.csv.
        #[arg(long, default_value = ".")]
        base_dir: Utf8PathBuf,
    },

    /// Check guessed gene symbols against a packet's ground-truth diagnosis.
    /// Prints `Yes` or `No`; an unresolvable or unreadable packet is `No`.
    CheckGenes {
        uid_or_path: String,

        /// Comma-separated gene symbols (HGNC), case-insensitive.
        #[arg(long, value_delimiter = ',', required = true)]
        genes: Vec<String>,

        #[arg(long, default_value = ".")]
        base_dir: Utf8PathBuf,
    },

    /// Print a packet's subject id, phenotype summary, and truth genes.
    Info {
        uid_or_path: String,

        #[arg(long, default_value = ".")]
        base_dir: Utf8PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Rename {
            source_dir,
            dest_dir,
            prefix,
            flat,
        } => cmd_rename(source_dir, dest_dir, prefix, flat),
        Commands::Resolve {
            uid_or_path,
            base_dir,
        } => cmd_resolve(&uid_or_path, &base_dir),
        Commands::CheckGenes {
            uid_or_path,
            genes,
            base_dir,
        } => cmd_check_genes(&uid_or_path, &genes, &base_dir),
        Commands::Info {
            uid_or_path,
            base_dir,
        } => cmd_info(&uid_or_path, &base_dir),
    }
}

fn cmd_rename(
    source_dir: Utf8PathBuf,
    dest_dir: Utf8PathBuf,
    prefix: String,
    flat: bool,
) -> anyhow::Result<()> {
    println!("Source: {source_dir}");
    println!("Destination: {dest_dir}");
    println!("ID prefix: {prefix}");

    let summary = rename_store(&RenameOptions {
        source_dir,
        dest_dir,
        prefix,
        flat,
    })?;

    for skipped in &summary.skipped {
        eprintln!("Skipping {}: {}", skipped.path, skipped.reason);
    }
    let collisions = summary
        .records
        .iter()
        .filter(|r| r.status == ppkuid_types::AssignStatus::Collision)
        .count();
    println!(
        "Done. {} packets renamed, {} collisions resolved, {} skipped.",
        summary.records.len(),
        collisions,
        summary.skipped.len()
    );
    Ok(())
}

fn cmd_resolve(uid_or_path: &str, base_dir: &Utf8PathBuf) -> anyhow::Result<()> {
    match resolve_packet_path(uid_or_path, base_dir)? {
        Some(path) => {
            println!("{path}");
            Ok(())
        }
        None => {
            eprintln!("ppkuid: no packet found for: {uid_or_path}");
            std::process::exit(1);
        }
    }
}

fn cmd_check_genes(
    uid_or_path: &str,
    genes: &[String],
    base_dir: &Utf8PathBuf,
) -> anyhow::Result<()> {
    // Mirrors the checker contract: any failure to locate or parse the
    // packet is a plain "No", never an error.
    let answer = match load_packet(uid_or_path, base_dir) {
        Some(doc) => packet::gene_guess_matches(&doc, genes),
        None => false,
    };
    println!("{}", if answer { "Yes" } else { "No" });
    Ok(())
}

fn cmd_info(uid_or_path: &str, base_dir: &Utf8PathBuf) -> anyhow::Result<()> {
    let path = resolve_packet_path(uid_or_path, base_dir)?
        .with_context(|| format!("no packet found for: {uid_or_path}"))?;
    let text = std::fs::read_to_string(&path).with_context(|| format!("read {}", path))?;
    let doc: JsonValue =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path))?;

    let subject_id = doc
        .get("subject")
        .and_then(|s| s.get("id"))
        .and_then(JsonValue::as_str)
        .unwrap_or("(none)");
    println!("Packet: {path}");
    println!("Subject: {subject_id}");
    println!("Phenotypes: {}", packet::phenotype_summary(&doc));

    let genes = packet::truth_gene_symbols(&doc);
    if genes.is_empty() {
        println!("Truth genes: (none)");
    } else {
        println!(
            "Truth genes: {}",
            genes.into_iter().collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}

fn load_packet(uid_or_path: &str, base_dir: &Utf8PathBuf) -> Option<JsonValue> {
    let path = resolve_packet_path(uid_or_path, base_dir).ok()??;
    let text = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&text).ok()
}
