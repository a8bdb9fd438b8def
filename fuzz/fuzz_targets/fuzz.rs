#![no_main]

use libfuzzer_sys::fuzz_target;
use pglz::{Strategy, compress_with_strategy, decompress};

/// Verifies that the decompressor safely handles arbitrary, potentially
/// malformed input.
///
/// # Invariant
/// The decompressor must return either `Ok(_)` or `Err(_)`. It must
/// **never** panic or read outside the destination region, regardless of
/// the input bytes, the declared raw size, or the completeness flag.
fn verify_decompression_robustness(data: &[u8]) {
    for raw_size in [0, 1, data.len(), data.len() * 3, 4096] {
        let mut output = Vec::new();
        // Whether decoding succeeds (coincidentally valid) or fails is
        // irrelevant; we only assert that it returns.
        let _ = decompress(data, raw_size, &mut output, true);
        assert!(output.len() <= raw_size);

        let mut sliced = Vec::new();
        let _ = decompress(data, raw_size, &mut sliced, false);
        assert!(sliced.len() <= raw_size);
    }
}

/// Verifies the lossless round-trip property.
///
/// # Invariant
/// Whenever the compressor accepts an input, decompressing its output must
/// reproduce the input exactly. `Incompressible` is a legal outcome and
/// proves nothing either way.
///
/// # Panics
/// Panics if decompression rejects a compressor-produced stream or the
/// reconstruction differs from the input; both signal a fuzzing failure.
fn verify_round_trip(data: &[u8]) {
    let mut compressed = Vec::new();
    if compress_with_strategy(data, &mut compressed, &Strategy::ALWAYS).is_err() {
        return;
    }

    let mut decompressed = Vec::new();
    match decompress(&compressed, data.len(), &mut decompressed, true) {
        Ok(_) => {
            if decompressed != data {
                panic!(
                    "Round-trip mismatch!\nInput len: {}\nCompressed len: {}\nDecompressed len: {}",
                    data.len(),
                    compressed.len(),
                    decompressed.len()
                );
            }
        }
        Err(e) => {
            panic!(
                "Round-trip failed! Decompressor rejected valid compressed data.\nError: {:?}\nInput len: {}",
                e,
                data.len()
            );
        }
    }
}

fuzz_target!(|data: &[u8]| {
    // 1. Robustness: random noise must not crash the decompressor.
    verify_decompression_robustness(data);

    // 2. Correctness: accepted inputs must survive a full cycle.
    verify_round_trip(data);
});
