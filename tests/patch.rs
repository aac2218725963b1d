//! Record codec and stream scanner tests: decode/encode identity, checksum
//! compensation on index mutation, framing failures.

use syxbank::{scan_stream, FormatError, FramingError, Patch, HEADER, PATCH_LEN, TERMINATOR};

/// A well-formed record: full dump header, zeroed payload, checksum chosen so
/// the 7-bit sum over bytes 7..172 plus the checksum is zero.
fn record_bytes(name: &str, index: u8) -> Vec<u8> {
    let mut data = vec![0u8; PATCH_LEN];
    data[..8].copy_from_slice(&HEADER);
    data[8] = index;
    let mut field = [b' '; 8];
    for (dst, src) in field.iter_mut().zip(name.bytes()) {
        *dst = src;
    }
    data[9..17].copy_from_slice(&field);
    let sum: u32 = data[7..PATCH_LEN - 2].iter().map(|&b| u32::from(b)).sum();
    data[PATCH_LEN - 2] = ((128 - sum % 128) % 128) as u8;
    data[PATCH_LEN - 1] = TERMINATOR;
    data
}

fn checksum_consistent(patch: &Patch) -> bool {
    let sum: u32 = patch.checked_bytes().iter().map(|&b| u32::from(b)).sum();
    (sum + u32::from(patch.checksum())) % 128 == 0
}

// ==================== Codec ====================

#[test]
fn decode_encode_identity() {
    let bytes = record_bytes("Lead 1", 5);
    let patch = Patch::decode(&bytes).expect("decode");
    assert_eq!(patch.bytes().as_slice(), bytes.as_slice());
}

#[test]
fn decode_rejects_wrong_length() {
    let bytes = record_bytes("Lead 1", 5);
    assert!(matches!(
        Patch::decode(&bytes[..PATCH_LEN - 1]),
        Err(FormatError::Length(n)) if n == PATCH_LEN - 1
    ));
    let mut long = bytes.clone();
    long.push(0);
    assert!(matches!(
        Patch::decode(&long),
        Err(FormatError::Length(n)) if n == PATCH_LEN + 1
    ));
}

#[test]
fn decode_rejects_bad_signature() {
    let mut bytes = record_bytes("Lead 1", 5);
    bytes[1] = 0x42;
    assert!(matches!(
        Patch::decode(&bytes),
        Err(FormatError::Signature([0xF0, 0x42]))
    ));
}

#[test]
fn accessors() {
    let patch = Patch::decode(&record_bytes("Lead 1", 5)).expect("decode");
    assert_eq!(patch.index(), 5);
    assert_eq!(patch.device_number(), 0);
    assert_eq!(patch.name(), "Lead 1  ");
    assert_eq!(patch.checked_bytes().len(), PATCH_LEN - 9);
    assert!(checksum_consistent(&patch));
}

#[test]
fn display_shows_name_and_device() {
    let patch = Patch::decode(&record_bytes("Lead 1", 5)).expect("decode");
    assert_eq!(patch.to_string(), "Lead 1   (0)");
}

#[test]
fn set_index_compensates_checksum() {
    let mut patch = Patch::decode(&record_bytes("Lead 1", 5)).expect("decode");
    patch.set_index(42);
    assert_eq!(patch.index(), 42);
    assert!(checksum_consistent(&patch));
}

#[test]
fn set_index_is_reversible() {
    let mut patch = Patch::decode(&record_bytes("Lead 1", 5)).expect("decode");
    let original = patch.checksum();
    patch.set_index(5 + 17);
    patch.set_index(5);
    assert_eq!(patch.checksum(), original);
}

#[test]
fn set_index_wraps_mod_128() {
    let mut patch = Patch::decode(&record_bytes("Lead 1", 5)).expect("decode");
    let original = patch.checksum();
    patch.set_index(200);
    assert_eq!(patch.index(), 200 % 128);
    assert!(checksum_consistent(&patch));
    patch.set_index(5);
    assert_eq!(patch.checksum(), original);
}

#[test]
fn repeated_index_mutation_keeps_consistency() {
    let mut patch = Patch::decode(&record_bytes("Lead 1", 5)).expect("decode");
    for index in [0u8, 63, 127, 1, 90, 5] {
        patch.set_index(index);
        assert!(checksum_consistent(&patch), "after set_index({index})");
    }
}

// The device number sits at byte 2, outside the checked range, so its setter
// leaves the checksum alone. This asymmetry with set_index is intentional.
#[test]
fn set_device_number_leaves_checksum_alone() {
    let mut patch = Patch::decode(&record_bytes("Lead 1", 5)).expect("decode");
    let original = patch.checksum();
    patch.set_device_number(99);
    assert_eq!(patch.device_number(), 99);
    assert_eq!(patch.checksum(), original);
    assert!(checksum_consistent(&patch));
    patch.set_device_number(130);
    assert_eq!(patch.device_number(), 2);
}

// ==================== Scanner ====================

#[test]
fn scan_splits_concatenated_records() {
    let mut stream = record_bytes("First", 0);
    stream.extend(record_bytes("Second", 1));
    let patches = scan_stream(&stream).expect("scan");
    assert_eq!(patches.len(), 2);
    assert_eq!(patches[0].name(), "First   ");
    assert_eq!(patches[1].name(), "Second  ");
}

#[test]
fn scan_empty_stream() {
    assert!(scan_stream(&[]).expect("scan").is_empty());
}

#[test]
fn scan_rejects_unbalanced_markers() {
    let mut stream = record_bytes("First", 0);
    stream.push(TERMINATOR); // stray end marker
    assert!(matches!(
        scan_stream(&stream),
        Err(FramingError::MarkerCount { begins: 1, ends: 2 })
    ));
}

#[test]
fn scan_rejects_inverted_markers() {
    let stream = [TERMINATOR, HEADER[0]];
    assert!(matches!(
        scan_stream(&stream),
        Err(FramingError::MarkerOrder { begin: 1, end: 0 })
    ));
}

#[test]
fn scan_rejects_short_record() {
    let mut stream = vec![HEADER[0], HEADER[1]];
    stream.extend([0u8; 40]);
    stream.push(TERMINATOR);
    assert!(matches!(
        scan_stream(&stream),
        Err(FramingError::Format(FormatError::Length(43)))
    ));
}
