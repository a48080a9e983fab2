use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::tax::round_half_up;

const ONES: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spell out a rupee amount using the Indian numbering system.
///
/// `1234567.50` → `"Rupees Twelve Lakh Thirty Four Thousand Five Hundred
/// Sixty Seven and Fifty Paise Only"`. Negative amounts are spelled by
/// magnitude. Returns `None` if the rupee part does not fit in `u64`.
pub fn amount_in_words(amount: Decimal) -> Option<String> {
    let amount = round_half_up(amount).abs();
    let rupees = amount.trunc().to_u64()?;
    let paise = ((amount - amount.trunc()) * Decimal::ONE_HUNDRED).to_u64()?;

    let mut out = format!("Rupees {}", spell(rupees));
    if paise > 0 {
        out.push_str(" and ");
        out.push_str(&spell(paise));
        out.push_str(" Paise");
    }
    out.push_str(" Only");
    Some(out)
}

fn spell(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let crore = n / 10_000_000;
    let rest = n % 10_000_000;

    if crore > 0 {
        // Above 99 crore the crore count itself is spelled in lakh/crore.
        parts.push(format!("{} Crore", spell(crore)));
    }

    let lakh = rest / 100_000;
    let thousand = (rest / 1_000) % 100;
    let hundred = (rest / 100) % 10;
    let below_hundred = rest % 100;

    if lakh > 0 {
        parts.push(format!("{} Lakh", two_digits(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", two_digits(thousand)));
    }
    if hundred > 0 {
        parts.push(format!("{} Hundred", ONES[hundred as usize]));
    }
    if below_hundred > 0 {
        parts.push(two_digits(below_hundred));
    }

    parts.join(" ")
}

fn two_digits(n: u64) -> String {
    debug_assert!(n < 100);
    let n = n as usize;
    if n < 20 {
        ONES[n].to_string()
    } else if n % 10 == 0 {
        TENS[n / 10].to_string()
    } else {
        format!("{} {}", TENS[n / 10], ONES[n % 10])
    }
}
