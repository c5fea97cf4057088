#![no_main]
use huffer::decode;
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must either decode or fail cleanly; never panic.
fuzz_target!(|data: &[u8]| {
    let mut out = Vec::new();
    let _ = decode(data, &mut out);
});
