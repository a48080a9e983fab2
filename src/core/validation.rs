use super::error::ValidationError;
use super::types::*;

const GSTIN_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Check an invoice for missing or malformed header data.
///
/// Nothing reported here blocks computation or rendering: missing fields
/// render as empty. Returns all findings (not just the first).
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    require(&invoice.seller.name, "seller.name", "company name", &mut errors);
    require(&invoice.buyer.name, "buyer.name", "customer name", &mut errors);
    require(
        &invoice.invoice_number,
        "invoice_number",
        "invoice number",
        &mut errors,
    );
    require(
        &invoice.place_of_supply,
        "place_of_supply",
        "place of supply",
        &mut errors,
    );
    require(
        &invoice.place_of_delivery,
        "place_of_delivery",
        "place of delivery",
        &mut errors,
    );

    if invoice.invoice_date.is_none() {
        errors.push(ValidationError::with_rule(
            "invoice_date",
            "invoice date is missing",
            "REQUIRED",
        ));
    }

    if let (Some(order), Some(issued)) = (invoice.order_date, invoice.invoice_date) {
        if issued < order {
            errors.push(ValidationError::new(
                "invoice_date",
                format!("invoice date {issued} is before order date {order}"),
            ));
        }
    }

    if !invoice.pan.is_empty() && !is_valid_pan(&invoice.pan) {
        errors.push(ValidationError::with_rule(
            "pan",
            format!(
                "PAN '{}' must be 5 letters, 4 digits, 1 letter (e.g. AAPFU0939F)",
                invoice.pan
            ),
            "PAN-FORMAT",
        ));
    }

    if !invoice.gst_number.is_empty() {
        validate_gstin(invoice, &mut errors);
    }

    // Exact comparison decides the tax type; flag near-misses so the user
    // can fix the text, but do not reinterpret them.
    if invoice.place_of_supply != invoice.place_of_delivery
        && invoice
            .place_of_supply
            .trim()
            .eq_ignore_ascii_case(invoice.place_of_delivery.trim())
    {
        errors.push(ValidationError::with_rule(
            "place_of_delivery",
            format!(
                "'{}' and '{}' differ only in case or whitespace; they are treated as different states (IGST)",
                invoice.place_of_supply, invoice.place_of_delivery
            ),
            "PLACE-MISMATCH",
        ));
    }

    for (i, item) in invoice.items.iter().enumerate() {
        if item.unit_price.is_sign_negative() && !item.unit_price.is_zero() {
            errors.push(ValidationError::new(
                format!("items[{i}].unit_price"),
                "unit price must not be negative",
            ));
        }
        if item.quantity.is_sign_negative() && !item.quantity.is_zero() {
            errors.push(ValidationError::new(
                format!("items[{i}].quantity"),
                "quantity must not be negative",
            ));
        }
    }

    errors
}

/// `AAAAA9999A`: five letters, four digits, one letter.
pub fn is_valid_pan(pan: &str) -> bool {
    let b = pan.as_bytes();
    b.len() == 10
        && b[..5].iter().all(u8::is_ascii_uppercase)
        && b[5..9].iter().all(u8::is_ascii_digit)
        && b[9].is_ascii_uppercase()
}

/// Structural and checksum validation of a 15-character GSTIN.
pub fn is_valid_gstin(gstin: &str) -> bool {
    let b = gstin.as_bytes();
    if b.len() != 15 || !gstin.is_ascii() {
        return false;
    }
    if !b[..2].iter().all(u8::is_ascii_digit) {
        return false;
    }
    if !is_valid_pan(&gstin[2..12]) {
        return false;
    }
    if !(b[12].is_ascii_digit() || b[12].is_ascii_uppercase()) || b[12] == b'0' {
        return false;
    }
    if b[13] != b'Z' {
        return false;
    }
    gstin_check_char(&b[..14]) == Some(b[14])
}

/// Mod-36 check character over the first 14 characters.
fn gstin_check_char(body: &[u8]) -> Option<u8> {
    let mut sum = 0u32;
    for (i, c) in body.iter().enumerate() {
        let value = GSTIN_ALPHABET.iter().position(|a| a == c)? as u32;
        let product = value * if i % 2 == 0 { 1 } else { 2 };
        sum += product / 36 + product % 36;
    }
    Some(GSTIN_ALPHABET[((36 - sum % 36) % 36) as usize])
}

fn validate_gstin(invoice: &Invoice, errors: &mut Vec<ValidationError>) {
    let gstin = invoice.gst_number.as_str();
    if !is_valid_gstin(gstin) {
        errors.push(ValidationError::with_rule(
            "gst_number",
            format!("GSTIN '{gstin}' is not a valid 15-character GST identification number"),
            "GSTIN-FORMAT",
        ));
        return;
    }

    let state = &gstin[..2];
    let code = invoice.state_code.trim();
    if !code.is_empty() && code != state {
        errors.push(ValidationError::with_rule(
            "state_code",
            format!("state code '{code}' does not match GSTIN state prefix '{state}'"),
            "GSTIN-STATE",
        ));
    }

    let embedded_pan = &gstin[2..12];
    if !invoice.pan.is_empty() && invoice.pan != embedded_pan {
        errors.push(ValidationError::with_rule(
            "pan",
            format!(
                "PAN '{}' does not match the PAN embedded in the GSTIN ('{embedded_pan}')",
                invoice.pan
            ),
            "GSTIN-PAN",
        ));
    }
}

fn require(value: &str, field: &str, what: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            field,
            format!("{what} is missing"),
            "REQUIRED",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn complete_invoice() -> Invoice {
        Invoice::new()
            .with_header(HeaderField::CompanyName, "Uttam Foods")
            .with_header(HeaderField::CustomerName, "Kiran Stores")
            .with_header(HeaderField::InvoiceNumber, "INV-001")
            .with_header(HeaderField::PlaceOfSupply, "MH")
            .with_header(HeaderField::PlaceOfDelivery, "MH")
            .with_header(HeaderField::Pan, "AAPFU0939F")
            .with_header(HeaderField::GstNumber, "27AAPFU0939F1ZV")
            .with_header(HeaderField::StateCode, "27")
            .with_invoice_date(NaiveDate::from_ymd_opt(2024, 4, 2))
    }

    #[test]
    fn complete_invoice_has_no_findings() {
        let errors = validate_invoice(&complete_invoice());
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn blank_invoice_reports_missing_fields() {
        let errors = validate_invoice(&Invoice::new());
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"seller.name"));
        assert!(fields.contains(&"buyer.name"));
        assert!(fields.contains(&"invoice_number"));
        assert!(fields.contains(&"invoice_date"));
    }

    #[test]
    fn pan_format() {
        assert!(is_valid_pan("AAPFU0939F"));
        assert!(!is_valid_pan("aapfu0939f"));
        assert!(!is_valid_pan("AAPF00939F"));
        assert!(!is_valid_pan("AAPFU0939"));
    }

    #[test]
    fn gstin_checksum() {
        assert!(is_valid_gstin("27AAPFU0939F1ZV"));
        assert!(is_valid_gstin("29AAGCB7383J1Z4"));
        assert!(!is_valid_gstin("27AAPFU0939F1ZA"));
        assert!(!is_valid_gstin("27AAPFU0939F1Y V"));
    }

    #[test]
    fn gstin_state_mismatch() {
        let inv = complete_invoice().with_header(HeaderField::StateCode, "29");
        let errors = validate_invoice(&inv);
        assert!(errors.iter().any(|e| e.rule.as_deref() == Some("GSTIN-STATE")));
    }

    #[test]
    fn near_miss_places_flagged() {
        let inv = complete_invoice().with_header(HeaderField::PlaceOfDelivery, "mh ");
        let errors = validate_invoice(&inv);
        assert!(
            errors
                .iter()
                .any(|e| e.rule.as_deref() == Some("PLACE-MISMATCH"))
        );
    }
}
