#![no_main]

use gstbill::core::{MAX_AMOUNT, RateScheme, classify_tax, coerce_amount, net_amount, parse_amount};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary form text as a price or quantity must not panic, and the
    // lenient path stays within [0, MAX_AMOUNT].
    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = parse_amount(raw);
        let value = coerce_amount(raw);
        assert!(!value.is_sign_negative() || value.is_zero());
        assert!(value <= MAX_AMOUNT);

        let net = net_amount(value, value);
        let _ = classify_tax(net, "KA", "KA", RateScheme::STANDARD);
    }
});
