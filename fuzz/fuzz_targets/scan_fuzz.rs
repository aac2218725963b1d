//! Scanner fuzz target: feed arbitrary bytes to the stream scanner.
//! The scanner must not panic; it returns Ok(patches) or a framing error.
//! Build with: cargo fuzz run scan_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let _ = syxbank::scan_stream(data);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run scan_fuzz");
}
