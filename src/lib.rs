//! # syxbank — VL70-m voice-bank librarian core
//!
//! Scan SysEx bulk-dump files into banks of fixed-format voice records, resolve
//! human-typed selection commands against them, and reassemble the selection
//! into a new dump ready to send back to the instrument.
//!
//! ## Pipeline
//!
//! - **Scan**: split a raw byte stream on `F0`/`F7` framing markers into
//!   174-byte records ([`scan_stream`])
//! - **Repository**: aggregate records from named sources into banks plus a
//!   flattened name index ([`Repository`])
//! - **Resolve**: turn selection tokens into ordered record lists
//!   ([`resolve`], [`resolve_batch`])
//! - **Assemble**: re-index the selection and concatenate it into one output
//!   stream ([`assemble`])
//!
//! ## Selection tokens
//!
//! One token per non-empty command line; `#` starts a comment.
//!
//! ```text
//! A003           # position 3 of bank A
//! B096-108       # inclusive range, ascending
//! b108-B096      # same range, descending
//! Epic Lead      # fuzzy name lookup
//! ```
//!
//! Explicit syntax is tried first (case-insensitive bank letter, optional `:`
//! separator, optional repeated letter on the range end). A token that is not
//! an explicit selection falls through to fuzzy name lookup: exact, then
//! case-insensitive exact, prefix, case-insensitive prefix, substring,
//! case-insensitive substring. The first rule with a match wins, and a rule
//! that matches more than one record is an ambiguity error.
//!
//! ## Usage
//!
//! See the `write_bank`, `list_bank`, and `invert_bank` binaries and
//! `tests/integration.rs` for full examples.

pub mod bank;
pub mod commands;
pub mod export;
pub mod patch;
pub mod scan;
pub mod select;

pub use bank::{Bank, NamedPatch, Repository, SourceError};
pub use commands::tokens;
pub use export::{assemble, Assembled, MAX_PATCHES};
pub use patch::{FormatError, Patch, HEADER, PATCH_LEN, TERMINATOR};
pub use scan::{scan_stream, FramingError};
pub use select::{resolve, resolve_batch, Batch, ResolveError};
