//! List the patches in bank files as `bank: NNN: name`, positions 1-based.
//!
//! Usage:
//!   list_bank FILES...

use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use syxbank::Repository;

fn main() -> anyhow::Result<()> {
    let mut files: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if files.is_empty() {
        bail!("no patch files given");
    }
    files.sort();

    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        sources.push((bank_name(path), bytes));
    }
    let repo = Repository::build(sources)?;
    for warning in repo.warnings() {
        eprintln!("WARNING: {warning}");
    }

    for bank in repo.banks() {
        for (i, patch) in bank.patches.iter().enumerate() {
            println!("{}: {:03}: {}", bank.name, i + 1, patch.name());
        }
    }
    Ok(())
}

fn bank_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
