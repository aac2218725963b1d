//! Inverted name index: report patch names that occur at more than one bank
//! position, listing every occurrence.
//!
//! Usage:
//!   invert_bank FILES...

use anyhow::{bail, Context};
use std::collections::BTreeMap;
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

    let mut occurrences: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in repo.named() {
        occurrences
            .entry(entry.name.to_string())
            .or_default()
            .push(format!("{}: {:03}", entry.bank.name, entry.pos + 1));
    }
    for (name, places) in occurrences {
        if places.len() > 1 {
            println!("{}: {}", name, places.join(", "));
        }
    }
    Ok(())
}

fn bank_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
