#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as an uploaded logo must not panic.
    let _ = gstbill::assets::ImageAsset::from_bytes(data);
});
