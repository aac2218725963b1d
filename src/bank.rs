//! Aggregate records from multiple named sources into banks plus a flattened
//! name index.
//!
//! The repository is built once per run and is read-only afterwards; resolution
//! borrows from it. Duplicate patch names and colliding bank names are kept and
//! surfaced as warnings, never deduplicated: ambiguity is the resolver's problem.

use std::collections::HashMap;

use crate::patch::Patch;
use crate::scan::{scan_stream, FramingError};

/// A scan or format failure, tagged with the source it came from.
#[derive(Debug, thiserror::Error)]
#[error("{name}: {error}")]
pub struct SourceError {
    pub name: String,
    #[source]
    pub error: FramingError,
}

/// One ordered collection of records from a single source. Order is on-disk
/// order; the name is derived from the source (file stem).
#[derive(Debug)]
pub struct Bank {
    pub name: String,
    pub patches: Vec<Patch>,
}

/// All banks of one run, in the caller-supplied source order, plus the
/// flattened name index used by fuzzy lookup.
#[derive(Debug)]
pub struct Repository {
    banks: Vec<Bank>,
    /// (lookup name, bank position, patch position), in build order.
    names: Vec<(String, usize, usize)>,
    warnings: Vec<String>,
}

impl Repository {
    /// Build from `(name, bytes)` sources. Callers supply sources in a
    /// deterministic order (the bins sort file paths) so repeated runs over the
    /// same inputs are reproducible. The first scan failure aborts the build.
    pub fn build<I>(sources: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let mut banks = Vec::new();
        let mut names = Vec::new();
        let mut warnings = Vec::new();

        for (name, bytes) in sources {
            let patches = scan_stream(&bytes).map_err(|error| SourceError {
                name: name.clone(),
                error,
            })?;
            if banks.iter().any(|b: &Bank| b.name == name) {
                warnings.push(format!("bank name collision: {name}"));
            }
            let bank_pos = banks.len();
            for (pos, patch) in patches.iter().enumerate() {
                names.push((lookup_name(patch), bank_pos, pos));
            }
            banks.push(Bank { name, patches });
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (name, _, _) in &names {
            *counts.entry(name).or_insert(0) += 1;
        }
        let mut duplicates: Vec<&str> = counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(name, _)| name)
            .collect();
        duplicates.sort_unstable();
        for name in duplicates {
            warnings.push(format!("duplicate patch name: {name}"));
        }

        Ok(Repository {
            banks,
            names,
            warnings,
        })
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    /// Case-insensitive bank lookup by name (a single letter in explicit
    /// selection syntax, but any source stem works).
    pub fn bank(&self, name: &str) -> Option<&Bank> {
        self.banks.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// The flattened name index in deterministic build order.
    pub fn named(&self) -> impl Iterator<Item = NamedPatch<'_>> {
        self.names.iter().map(|(name, bank, pos)| NamedPatch {
            name: name.as_str(),
            bank: &self.banks[*bank],
            pos: *pos,
        })
    }

    /// Non-fatal diagnostics gathered during the build.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// One entry of the flattened name index.
#[derive(Debug, Clone, Copy)]
pub struct NamedPatch<'r> {
    /// Lookup name: the record name with trailing padding trimmed.
    pub name: &'r str,
    pub bank: &'r Bank,
    pub pos: usize,
}

impl<'r> NamedPatch<'r> {
    pub fn patch(&self) -> &'r Patch {
        &self.bank.patches[self.pos]
    }

    /// `bank: NNN: name`, the same shape the list command prints.
    pub fn location(&self) -> String {
        format!("{}: {:03}: {}", self.bank.name, self.pos + 1, self.name)
    }
}

/// Names are stored padded to 8 bytes on the instrument; lookups use the
/// trimmed form so human-typed fragments compare naturally.
fn lookup_name(patch: &Patch) -> String {
    patch
        .name()
        .trim_end_matches(|c| c == ' ' || c == '\0')
        .to_string()
}
