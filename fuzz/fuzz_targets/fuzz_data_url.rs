#![no_main]

use gstbill::assets::{AssetKind, AssetPayload, load_asset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text as a file-reader data URL must not panic.
    if let Ok(url) = std::str::from_utf8(data) {
        let _ = load_asset(AssetKind::Signature, &AssetPayload::DataUrl(url.to_string()));
    }
});
