#![no_main]
use std::io::Cursor;

use huffer::{decode, encode, SymbolSize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, u8)| {
    let (input, raw_size) = data;
    let size = SymbolSize::new(raw_size % 8 + 1).unwrap();

    let mut compressed = Vec::new();
    encode(Cursor::new(&input), &mut compressed, size).unwrap();

    let mut restored = Vec::new();
    decode(compressed.as_slice(), &mut restored).unwrap();

    assert_eq!(input, restored);
});
