//! Reassemble an ordered selection into one output byte stream.
//!
//! Export re-normalizes: each record gets its 0-based output position as its
//! index, with the checksum compensated by the setter. The instrument accepts
//! at most 64 voices per bank, so longer selections are truncated with a
//! warning, never an error.

use crate::patch::{Patch, PATCH_LEN};

/// Hardware bank-size limit of the target instrument.
pub const MAX_PATCHES: usize = 64;

/// Result of assembling a selection.
#[derive(Debug)]
pub struct Assembled {
    /// Concatenated record buffers, ready to write to a sink.
    pub bytes: Vec<u8>,
    /// Original selection length when it exceeded [`MAX_PATCHES`].
    pub truncated_from: Option<usize>,
}

/// Re-index the selection sequentially and concatenate the encoded records.
pub fn assemble(mut patches: Vec<Patch>) -> Assembled {
    let truncated_from = if patches.len() > MAX_PATCHES {
        let original = patches.len();
        patches.truncate(MAX_PATCHES);
        Some(original)
    } else {
        None
    };

    let mut bytes = Vec::with_capacity(patches.len() * PATCH_LEN);
    for (position, patch) in patches.iter_mut().enumerate() {
        patch.set_index(position as u8);
        bytes.extend_from_slice(patch.bytes());
    }
    Assembled {
        bytes,
        truncated_from,
    }
}
