//! One VL70-m voice record: a fixed 174-byte SysEx bulk-dump buffer.
//!
//! Field layout (byte offsets): signature 0-1, device number 2, header tail 3-7,
//! index 8, name 9-16, opaque parameter payload, checksum at 172, `F7` terminator
//! at 173. The checksum is a 7-bit value over bytes 7..172; the index byte sits
//! inside that range, so the index setter compensates the checksum in O(1)
//! instead of re-summing the buffer.

use std::borrow::Cow;
use std::fmt;

/// Total size of one bulk-dump record.
pub const PATCH_LEN: usize = 174;

/// Full dump header as the instrument transmits it. Decoding validates only the
/// first two bytes (SysEx start + manufacturer id); the rest varies with the
/// device number and dump address.
pub const HEADER: [u8; 8] = [0xF0, 0x43, 0x00, 0x57, 0x01, 0x23, 0x40, 0x00];

/// End-of-exclusive terminator.
pub const TERMINATOR: u8 = 0xF7;

const DEVICE_OFFSET: usize = 2;
const INDEX_OFFSET: usize = 8;
const NAME_RANGE: std::ops::Range<usize> = 9..17;
const CHECKED_START: usize = 7;
const CHECKSUM_OFFSET: usize = PATCH_LEN - 2;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("record must be {PATCH_LEN} bytes, got {0}")]
    Length(usize),
    #[error("bad signature {0:02x?}, expected [f0, 43]")]
    Signature([u8; 2]),
}

/// A single voice record. The buffer is canonical; all reads and writes go
/// through accessors so the checksum stays consistent on every mutation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    data: [u8; PATCH_LEN],
}

impl Patch {
    /// Decode a record from raw bytes. All-or-nothing: wrong length or a
    /// signature mismatch rejects the whole buffer.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        let data: [u8; PATCH_LEN] = bytes
            .try_into()
            .map_err(|_| FormatError::Length(bytes.len()))?;
        if data[..2] != HEADER[..2] {
            return Err(FormatError::Signature([data[0], data[1]]));
        }
        Ok(Patch { data })
    }

    /// The record's current bytes, verbatim. Encoding is identity once decoded;
    /// nothing is recomputed here.
    pub fn bytes(&self) -> &[u8; PATCH_LEN] {
        &self.data
    }

    /// The byte range covered by the checksum: byte 7 up to (not including) the
    /// checksum and terminator.
    pub fn checked_bytes(&self) -> &[u8] {
        &self.data[CHECKED_START..CHECKSUM_OFFSET]
    }

    pub fn checksum(&self) -> u8 {
        self.data[CHECKSUM_OFFSET]
    }

    pub fn set_checksum(&mut self, checksum: u8) {
        self.data[CHECKSUM_OFFSET] = checksum % 128;
    }

    pub fn device_number(&self) -> u8 {
        self.data[DEVICE_OFFSET]
    }

    /// Byte 2 lies outside the checked range, so the checksum is untouched.
    pub fn set_device_number(&mut self, device_number: u8) {
        self.data[DEVICE_OFFSET] = device_number % 128;
    }

    pub fn index(&self) -> u8 {
        self.data[INDEX_OFFSET]
    }

    /// Store `index` (mod 128) and compensate the checksum by the raw delta, so
    /// the record's 7-bit checksum stays valid without re-summing the buffer.
    pub fn set_index(&mut self, index: u8) {
        let delta = index.wrapping_sub(self.index());
        let adjusted = self.checksum().wrapping_sub(delta);
        self.set_checksum(adjusted);
        self.data[INDEX_OFFSET] = index % 128;
    }

    /// Fixed-width 8-byte name, decoded lossily and not trimmed.
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data[NAME_RANGE])
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.device_number())
    }
}
