use chrono::NaiveDate;
use gstbill::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn default_invoice_shape() {
    let inv = Invoice::new();
    assert_eq!(inv.items.len(), 1);
    assert_eq!(inv.items[0], LineItem::default());
    assert_eq!(inv.reverse_charge, ReverseCharge::No);
    assert_eq!(inv.rate_scheme, RateScheme::STANDARD);
    assert!(inv.order_date.is_none() && inv.invoice_date.is_none());
    for field in HeaderField::ALL {
        assert_eq!(field.get(&inv), "", "{}", field.label());
    }
}

#[test]
fn header_edits_leave_original_untouched() {
    let original = Invoice::new();
    let mut current = original.clone();
    for (i, field) in HeaderField::ALL.into_iter().enumerate() {
        let next = current.with_header(field, format!("value {i}"));
        assert_eq!(field.get(&next), format!("value {i}"));
        assert_eq!(field.get(&current), "");
        current = next;
    }
    assert_eq!(original, Invoice::new());
    assert_eq!(current.seller.name, "value 0");
    assert_eq!(current.amount_in_words, "value 12");
}

#[test]
fn line_edits_are_copy_on_write() {
    let base = Invoice::new();
    let edited = base
        .with_line_edit(0, LineEdit::Description("Rice".into()))
        .unwrap()
        .with_line_edit(0, LineEdit::UnitPrice(dec!(45)))
        .unwrap()
        .with_line_edit(0, LineEdit::Quantity(dec!(2)))
        .unwrap();

    assert_eq!(base.items[0], LineItem::default());
    assert_eq!(edited.items[0], LineItem::new("Rice", dec!(45), dec!(2)));
}

#[test]
fn append_and_remove() {
    let base = Invoice::new().with_line(0, LineItem::new("A", dec!(1), dec!(1))).unwrap();
    let three = base
        .with_line_appended(LineItem::new("B", dec!(2), dec!(1)))
        .with_line_appended(LineItem::new("C", dec!(3), dec!(1)));
    assert_eq!(base.items.len(), 1);
    assert_eq!(three.items.len(), 3);

    let removed = three.without_line(1).unwrap();
    let names: Vec<&str> = removed.items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(names, ["A", "C"]);
    assert_eq!(three.items.len(), 3);

    let figures = compute_invoice(&removed);
    assert_eq!(figures.lines[1].serial, 2);

    let blank = removed.with_line_added();
    assert_eq!(blank.items.last(), Some(&LineItem::default()));
}

#[test]
fn removing_last_item_leaves_empty_invoice() {
    let empty = Invoice::new().without_line(0).unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(compute_invoice(&empty).grand_total, dec!(0.00));
}

#[test]
fn out_of_range_index() {
    let inv = Invoice::new();
    match inv.with_line_edit(3, LineEdit::Quantity(dec!(1))) {
        Err(InvoiceError::LineIndex { index, len }) => {
            assert_eq!(index, 3);
            assert_eq!(len, 1);
        }
        other => panic!("expected LineIndex, got {other:?}"),
    }
    assert!(inv.without_line(1).is_err());
    assert!(inv.with_line(5, LineItem::default()).is_err());
}

#[test]
fn non_text_fields() {
    let base = Invoice::new();
    let next = base
        .with_order_date(Some(date(2024, 3, 28)))
        .with_invoice_date(Some(date(2024, 4, 2)))
        .with_reverse_charge(ReverseCharge::Yes)
        .with_rate_scheme(RateScheme::REDUCED);

    assert_eq!(next.order_date, Some(date(2024, 3, 28)));
    assert_eq!(next.invoice_date, Some(date(2024, 4, 2)));
    assert_eq!(next.reverse_charge.label(), "Yes");
    assert_eq!(next.rate_scheme, RateScheme::REDUCED);
    assert_eq!(base, Invoice::new());

    assert_eq!(next.with_order_date(None).order_date, None);
}

#[test]
fn reverse_charge_labels() {
    assert_eq!(ReverseCharge::from_label("Yes"), Some(ReverseCharge::Yes));
    assert_eq!(ReverseCharge::from_label("No"), Some(ReverseCharge::No));
    assert_eq!(ReverseCharge::from_label("maybe"), None);
}

#[test]
fn snapshot_stays_valid_while_editing() {
    let live = Invoice::new()
        .with_header(HeaderField::PlaceOfSupply, "KA")
        .with_header(HeaderField::PlaceOfDelivery, "KA")
        .with_line(0, LineItem::new("Pen", dec!(10), dec!(3)))
        .unwrap();
    let snapshot = live.clone();
    let before = compute_invoice(&snapshot);

    let live = live
        .with_header(HeaderField::PlaceOfDelivery, "MH")
        .with_line_edit(0, LineEdit::Quantity(dec!(30)))
        .unwrap();

    assert_eq!(compute_invoice(&snapshot), before);
    assert_eq!(before.grand_total, dec!(35.40));
    assert_eq!(compute_invoice(&live).grand_total, dec!(354.00));
}
