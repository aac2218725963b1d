//! Resolve one selection token into an ordered list of records.
//!
//! Precedence is strict: explicit bank+position syntax first (recognized by the
//! pest grammar in `grammar.pest`), then fuzzy name lookup. The explicit branch
//! only *errors* on out-of-range positions; an unknown bank letter, a foreign
//! letter on the range end, or an unparseable number falls through to fuzzy
//! lookup, because the token might still be a name fragment.
//!
//! Fuzzy lookup walks a fixed rule chain and stops at the first rule with at
//! least one match; later rules are never consulted. The chain is an ordered
//! array of predicates so the precedence stays one testable data structure.

use pest::Parser;
use pest_derive::Parser as PestParser;

use crate::bank::{NamedPatch, Repository};
use crate::patch::Patch;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct SelectionParser;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("\"{token}\": positions must satisfy 0 < n < {last} (got {begin} and {end})")]
    Range {
        token: String,
        begin: usize,
        end: usize,
        last: usize,
    },
    #[error("ambiguous name \"{token}\": {}", .matches.join(", "))]
    Ambiguous { token: String, matches: Vec<String> },
    #[error("no matches for \"{token}\"")]
    NoMatch { token: String },
}

/// Resolve a single token against the repository. Returns the selected records
/// in order; a range with `begin > end` comes back descending.
pub fn resolve<'r>(repo: &'r Repository, token: &str) -> Result<Vec<&'r Patch>, ResolveError> {
    if let Some(range) = parse_range_token(token) {
        if let Some(patches) = explicit_range(repo, token, &range)? {
            return Ok(patches);
        }
    }
    fuzzy(repo, token)
}

/// Accumulated result of resolving a whole command batch. Output may only be
/// produced when `errors` is empty; successful tokens still accumulate so the
/// caller can report every failure in one pass.
#[derive(Debug)]
pub struct Batch<'r> {
    pub patches: Vec<&'r Patch>,
    pub errors: Vec<ResolveError>,
}

impl Batch<'_> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve each token independently; failures are recorded and resolution
/// continues with the next token.
pub fn resolve_batch<'r, I, S>(repo: &'r Repository, tokens: I) -> Batch<'r>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut patches = Vec::new();
    let mut errors = Vec::new();
    for token in tokens {
        match resolve(repo, token.as_ref()) {
            Ok(mut found) => patches.append(&mut found),
            Err(error) => errors.push(error),
        }
    }
    Batch { patches, errors }
}

struct RangeToken {
    bank: char,
    begin: String,
    end_bank: Option<char>,
    end: Option<String>,
}

fn parse_range_token(token: &str) -> Option<RangeToken> {
    let mut pairs = SelectionParser::parse(Rule::selection, token).ok()?;
    let selection = pairs.next()?;

    let mut bank = None;
    let mut begin = None;
    let mut end_bank = None;
    let mut end = None;
    for inner in selection.into_inner() {
        match inner.as_rule() {
            Rule::bank => bank = inner.as_str().chars().next(),
            Rule::number => begin = Some(inner.as_str().to_string()),
            Rule::span => {
                for part in inner.into_inner() {
                    match part.as_rule() {
                        Rule::bank => end_bank = part.as_str().chars().next(),
                        Rule::number => end = Some(part.as_str().to_string()),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    Some(RangeToken {
        bank: bank?,
        begin: begin?,
        end_bank,
        end,
    })
}

/// The explicit branch. `Ok(None)` means "not actually an explicit selection,
/// try fuzzy"; only out-of-range positions are a hard error.
fn explicit_range<'r>(
    repo: &'r Repository,
    token: &str,
    range: &RangeToken,
) -> Result<Option<Vec<&'r Patch>>, ResolveError> {
    let bank = match repo.bank(&range.bank.to_string()) {
        Some(b) => b,
        None => return Ok(None),
    };
    if let Some(letter) = range.end_bank {
        // Only a repeated bank letter is stripped; B1-A9 is a name fragment.
        if !letter.eq_ignore_ascii_case(&range.bank) {
            return Ok(None);
        }
    }
    let begin: usize = match range.begin.parse() {
        Ok(n) => n,
        Err(_) => return Ok(None),
    };
    let end: usize = match &range.end {
        Some(text) => match text.parse() {
            Ok(n) => n,
            Err(_) => return Ok(None),
        },
        None => begin,
    };

    // Slot 0 and the last slot are reserved on the instrument and can never be
    // addressed explicitly.
    let last = bank.patches.len().saturating_sub(1);
    if !(0 < begin && begin < last && 0 < end && end < last) {
        return Err(ResolveError::Range {
            token: token.to_string(),
            begin,
            end,
            last,
        });
    }

    let patches: Vec<&Patch> = if begin <= end {
        (begin..=end).map(|i| &bank.patches[i]).collect()
    } else {
        (end..=begin).rev().map(|i| &bank.patches[i]).collect()
    };
    Ok(Some(patches))
}

type NameRule = fn(&str, &str) -> bool;

fn exact(name: &str, token: &str) -> bool {
    name == token
}

fn exact_ci(name: &str, token: &str) -> bool {
    name.to_lowercase() == token.to_lowercase()
}

fn prefix(name: &str, token: &str) -> bool {
    name.starts_with(token)
}

fn prefix_ci(name: &str, token: &str) -> bool {
    name.to_lowercase().starts_with(&token.to_lowercase())
}

fn substring(name: &str, token: &str) -> bool {
    name.contains(token)
}

fn substring_ci(name: &str, token: &str) -> bool {
    name.to_lowercase().contains(&token.to_lowercase())
}

/// Ordered precedence chain: first rule with a non-empty match set wins.
const NAME_RULES: [NameRule; 6] = [exact, exact_ci, prefix, prefix_ci, substring, substring_ci];

fn fuzzy<'r>(repo: &'r Repository, token: &str) -> Result<Vec<&'r Patch>, ResolveError> {
    for rule in NAME_RULES {
        let matches: Vec<NamedPatch<'r>> =
            repo.named().filter(|entry| rule(entry.name, token)).collect();
        match matches.as_slice() {
            [] => continue,
            [only] => return Ok(vec![only.patch()]),
            _ => {
                return Err(ResolveError::Ambiguous {
                    token: token.to_string(),
                    matches: matches.iter().map(NamedPatch::location).collect(),
                })
            }
        }
    }
    Err(ResolveError::NoMatch {
        token: token.to_string(),
    })
}
