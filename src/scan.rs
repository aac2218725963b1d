//! Split a raw byte stream into individual records by framing markers.
//!
//! Records never nest: the i-th `F0` start marker pairs with the i-th `F7` end
//! marker across the whole stream. Any count or ordering mismatch fails the
//! whole source; there is no per-record skipping.

use crate::patch::{FormatError, Patch, HEADER, TERMINATOR};

#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("marker count mismatch: {begins} start marker(s), {ends} end marker(s)")]
    MarkerCount { begins: usize, ends: usize },
    #[error("end marker at offset {end} precedes its start marker at offset {begin}")]
    MarkerOrder { begin: usize, end: usize },
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Scan `bytes` for concatenated records and decode each one.
pub fn scan_stream(bytes: &[u8]) -> Result<Vec<Patch>, FramingError> {
    let begins: Vec<usize> = marker_offsets(bytes, HEADER[0]);
    let ends: Vec<usize> = marker_offsets(bytes, TERMINATOR);
    if begins.len() != ends.len() {
        return Err(FramingError::MarkerCount {
            begins: begins.len(),
            ends: ends.len(),
        });
    }
    let mut patches = Vec::with_capacity(begins.len());
    for (&begin, &end) in begins.iter().zip(&ends) {
        if begin >= end {
            return Err(FramingError::MarkerOrder { begin, end });
        }
        patches.push(Patch::decode(&bytes[begin..=end])?);
    }
    Ok(patches)
}

fn marker_offsets(bytes: &[u8], marker: u8) -> Vec<usize> {
    bytes
        .iter()
        .enumerate()
        .filter(|(_, &b)| b == marker)
        .map(|(i, _)| i)
        .collect()
}
