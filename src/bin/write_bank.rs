//! Write a new bulk dump from selected patches.
//!
//! Usage:
//!   write_bank FILES... [-c|--command-file FILE] [-o|--output FILE]
//!
//! Selection commands come from the command file, or stdin when none is given:
//! one token per line, `#` starts a comment. Patch files are sorted
//! lexicographically before loading so repeated runs over the same inputs are
//! reproducible. If any token fails to resolve, every error is reported and
//! nothing is written.

use anyhow::{bail, Context};
use std::io::Read;
use std::path::{Path, PathBuf};
use syxbank::{assemble, resolve_batch, tokens, Patch, Repository, MAX_PATCHES};

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let command_file = take_value(&mut args, "--command-file", "-c")?.map(PathBuf::from);
    let output = take_value(&mut args, "--output", "-o")?.map(PathBuf::from);

    let mut files: Vec<PathBuf> = args.into_iter().map(PathBuf::from).collect();
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

    let text = match &command_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let batch = resolve_batch(&repo, tokens(&text));
    for error in &batch.errors {
        eprintln!("ERROR: {error}");
    }
    if !batch.is_ok() {
        std::process::exit(1);
    }

    let selection: Vec<Patch> = batch.patches.into_iter().cloned().collect();
    let assembled = assemble(selection);
    if let Some(n) = assembled.truncated_from {
        eprintln!("WARNING: number of patches truncated from {n} to {MAX_PATCHES}");
    }

    let output = output.unwrap_or_else(default_output);
    std::fs::write(&output, &assembled.bytes)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

/// Remove `long`/`short` and its value from the argument list, if present.
fn take_value(
    args: &mut Vec<String>,
    long: &str,
    short: &str,
) -> anyhow::Result<Option<String>> {
    let pos = match args.iter().position(|a| a == long || a == short) {
        Some(pos) => pos,
        None => return Ok(None),
    };
    let flag = args.remove(pos);
    if pos >= args.len() {
        bail!("{flag} requires a value");
    }
    Ok(Some(args.remove(pos)))
}

fn bank_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn default_output() -> PathBuf {
    PathBuf::from(format!("{}.syx", chrono::Local::now().format("%Y%m%d_%H%M%S")))
}
