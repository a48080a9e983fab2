//! Document renderer tests: layout content, pagination and PDF output.
//!
//! Run with: `cargo test --features all --test pdf_tests`

#![cfg(all(feature = "pdf", feature = "form"))]

use chrono::NaiveDate;
use gstbill::assets::{Assets, ImageAsset};
use gstbill::core::*;
use gstbill::form::{FormEvent, InvoiceForm};
use gstbill::pdf::*;
use lopdf::content::Content;
use lopdf::{Document, Object};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_invoice() -> Invoice {
    InvoiceBuilder::new("INV-2024-017")
        .seller("Uttam Foods", "Plot 4, MIDC Bhosari\nPune 411026")
        .buyer("Kiran Stores", "4 Brigade Road\nBengaluru 560025")
        .pan("AAPFU0939F")
        .gst_number("27AAPFU0939F1ZV")
        .state_code("27")
        .places("MH", "MH")
        .order("PO-881", date(2024, 3, 28))
        .invoice_date(date(2024, 4, 2))
        .details("Delivered by road")
        .amount_in_words("Rupees Two Thousand Six Hundred Twenty Eight and Forty Six Paise Only")
        .add_line(LineItemBuilder::new("Basmati rice 5kg", dec!(450), dec!(4)).build())
        .add_line(LineItemBuilder::new("Toor dal 1kg", dec!(142.50), dec!(3)).build())
        .build()
        .unwrap()
}

fn many_items(n: usize) -> Invoice {
    let mut builder = InvoiceBuilder::new("INV-BULK")
        .seller("Uttam Foods", "Pune")
        .buyer("Kiran Stores", "Bengaluru")
        .places("MH", "KA");
    for i in 0..n {
        builder = builder.add_line(
            LineItemBuilder::new(format!("Assorted spice pack {i}"), dec!(99.90), dec!(2)).build(),
        );
    }
    builder.build().unwrap()
}

fn rgba_png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_image_data(&vec![0x40_u8; (width * height * 4) as usize])
            .unwrap();
    }
    out
}

fn jpeg_header(width: u16, height: u16) -> Vec<u8> {
    let mut b = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08];
    b.extend_from_slice(&height.to_be_bytes());
    b.extend_from_slice(&width.to_be_bytes());
    b.push(3);
    b.extend_from_slice(&[1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
    b.extend_from_slice(&[0xFF, 0xD9]);
    b
}

fn with_images() -> Assets {
    Assets {
        logo: Some(ImageAsset::from_bytes(&rgba_png(8, 4)).unwrap()),
        signature: Some(ImageAsset::from_bytes(&jpeg_header(120, 40)).unwrap()),
    }
}

/// All strings drawn with `Tj`, page by page.
fn pdf_strings(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

// --- Layout ---

#[test]
fn layout_has_document_sections() {
    let doc = layout(&sample_invoice(), &Assets::none(), &RenderOptions::default());
    assert_eq!(doc.pages.len(), 1);
    assert_eq!((doc.page_width, doc.page_height), (595.0, 842.0));

    let texts: Vec<&str> = doc.texts().collect();
    for expected in [
        "Tax Invoice/Bill of Supply/Cash Memo",
        "(Original for Recipient)",
        "Sold By:",
        "Billing Address:",
        "Uttam Foods",
        "Pune 411026",
        "PAN No: AAPFU0939F",
        "GST Registration No: 27AAPFU0939F1ZV",
        "State/UT Code: 27",
        "Place of Supply: MH",
        "Place of Delivery: MH",
        "Order Number: PO-881",
        "Order Date: 2024-03-28",
        "Invoice Number: INV-2024-017",
        "Invoice Details: Delivered by road",
        "Invoice Date: 2024-04-02",
        "Sl. No",
        "Description",
        "Unit Price",
        "Tax Type",
        "Total Amount: \u{20b9}2628.46",
        "For Uttam Foods:",
        "Authorized Signatory",
        "Whether the tax payable under reverse charge: No",
        "Page 1 of 1",
    ] {
        assert!(texts.contains(&expected), "missing {expected:?} in {texts:?}");
    }
}

#[test]
fn layout_matches_form_figures() {
    let form = InvoiceForm::with_invoice(sample_invoice())
        .apply_all([
            FormEvent::AddItem,
            FormEvent::Description {
                index: 2,
                value: "Sachet".into(),
            },
            FormEvent::UnitPrice {
                index: 2,
                raw: "0.05".into(),
            },
            FormEvent::Quantity {
                index: 2,
                raw: "1".into(),
            },
            FormEvent::RemoveItem(0),
        ])
        .unwrap();
    let view = form.view();
    let export = form.export();
    let doc = layout(&export.invoice, &export.assets, &RenderOptions::default());

    assert_eq!(doc.figures, compute_invoice(&export.invoice));
    let texts: Vec<&str> = doc.texts().collect();
    for row in &view.rows {
        for cell in [
            &row.unit_price,
            &row.quantity,
            &row.net_amount,
            &row.tax_type,
            &row.tax_amount,
            &row.total_amount,
        ] {
            assert!(texts.contains(&cell.as_str()), "missing {cell:?}");
        }
    }
    let grand = format!("Total Amount: {}", view.grand_total_label);
    assert!(texts.contains(&grand.as_str()));
}

#[test]
fn long_tables_paginate_with_repeated_header() {
    let inv = many_items(120);
    let doc = layout(&inv, &Assets::none(), &RenderOptions::default());
    let n = doc.pages.len();
    assert!(n > 2, "expected several pages, got {n}");

    for (i, page) in doc.pages.iter().enumerate() {
        let texts: Vec<&str> = page.texts().collect();
        if texts.contains(&"IGST") {
            assert!(texts.contains(&"Sl. No"), "page {} lacks table header", i + 1);
        }
        let footer = format!("Page {} of {}", i + 1, n);
        assert!(texts.contains(&footer.as_str()));
    }
    assert!(doc.pages[0].texts().any(|t| t == "Sl. No"));
    assert!(doc.pages[1].texts().any(|t| t == "Sl. No"));

    let serials: Vec<&str> = doc
        .texts()
        .filter(|t| t.parse::<usize>().is_ok())
        .collect();
    assert!(serials.contains(&"1") && serials.contains(&"120"));

    assert!(doc.texts().any(|t| t == "Authorized Signatory"));
    let last: Vec<&str> = doc.pages[n - 1].texts().collect();
    assert!(last.contains(&"Whether the tax payable under reverse charge: No"));
}

#[test]
fn text_stays_inside_margins() {
    let mut inv = many_items(40);
    inv.items[3].description =
        "Extra long description of a hamper containing saffron, cardamom, cloves and cinnamon"
            .repeat(2);
    inv.seller.address = "A very long warehouse address line that will need wrapping ".repeat(3);
    inv.items[10].description = (0..3000).map(|i| format!("zq{i}")).collect::<Vec<_>>().join(" ");
    let opts = RenderOptions::default();
    let doc = layout(&inv, &Assets::none(), &opts);

    for page in &doc.pages {
        for el in &page.elements {
            if let Element::Text {
                x,
                y,
                font,
                size,
                text,
            } = el
            {
                let w = text_width(text, *font, *size);
                assert!(*x >= opts.margin - 0.01, "{text:?} starts at {x}");
                assert!(x + w <= doc.page_width - opts.margin + 0.01, "{text:?} overflows");
                assert!(*y >= opts.margin - 0.01, "{text:?} below margin at {y}");
                assert!(*y <= doc.page_height - opts.margin, "{text:?} above margin");
            }
        }
    }
}

#[test]
fn row_taller_than_a_page_is_split() {
    let mut inv = many_items(3);
    inv.items[1].description = (0..3000).map(|i| format!("zq{i}")).collect::<Vec<_>>().join(" ");
    let doc = layout(&inv, &Assets::none(), &RenderOptions::default());
    assert!(doc.pages.len() >= 3, "pages = {}", doc.pages.len());

    let words: std::collections::HashSet<String> = doc
        .texts()
        .flat_map(str::split_whitespace)
        .filter(|w| w.starts_with("zq"))
        .map(String::from)
        .collect();
    assert_eq!(words.len(), 3000);

    // Every page carrying part of the long row repeats the column titles.
    for page in &doc.pages {
        let texts: Vec<&str> = page.texts().collect();
        if texts.iter().any(|t| t.starts_with("zq")) {
            assert!(texts.contains(&"Sl. No"), "{texts:?}");
        }
    }

    // Rows after the long one still render.
    assert!(doc.texts().any(|t| t == "Assorted spice pack 2"));
}

#[test]
fn out_of_range_amounts_still_render() {
    let inv = InvoiceBuilder::new("INV-HUGE")
        .places("MH", "MH")
        .add_line(LineItemBuilder::new("Huge", rust_decimal::Decimal::MAX, dec!(2)).build())
        .add_line(LineItemBuilder::new("Small", dec!(10), dec!(1)).build())
        .build_unchecked();
    let bytes = render(&inv, &Assets::none(), &RenderOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    let doc = layout(&inv, &Assets::none(), &RenderOptions::default());
    assert!(doc.texts().any(|t| t == "11.80"));
}

#[test]
fn images_are_placed_when_present() {
    let doc = layout(&sample_invoice(), &with_images(), &RenderOptions::default());
    let images: Vec<_> = doc
        .pages
        .iter()
        .flat_map(|p| &p.elements)
        .filter_map(|e| match e {
            Element::Image {
                kind,
                width,
                height,
                ..
            } => Some((*kind, *width, *height)),
            _ => None,
        })
        .collect();
    assert_eq!(images.len(), 2);
    // 8x4 logo at 50pt high keeps its 2:1 aspect ratio.
    assert!((images[0].1 - 100.0).abs() < 0.01);
    assert!((images[0].2 - 50.0).abs() < 0.01);
}

#[test]
fn empty_invoice_still_lays_out() {
    let doc = layout(&Invoice::new(), &Assets::none(), &RenderOptions::default());
    let texts: Vec<&str> = doc.texts().collect();
    assert!(texts.contains(&"Total Amount: \u{20b9}0.00"));
    assert!(texts.contains(&"PAN No:"));
}

// --- PDF output ---

#[test]
fn render_produces_parseable_pdf() {
    let bytes = render(&sample_invoice(), &Assets::none(), &RenderOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));

    let pages = pdf_strings(&bytes);
    assert_eq!(pages.len(), 1);
    let strings = &pages[0];
    assert!(strings.contains(&"Tax Invoice/Bill of Supply/Cash Memo".to_string()));
    assert!(strings.contains(&"Total Amount: Rs.2628.46".to_string()));
    assert!(strings.contains(&"38.48 + 38.48".to_string()));
    assert!(strings.contains(&"504.46".to_string()));
}

#[test]
fn render_paginates() {
    let bytes = render(&many_items(120), &Assets::none(), &RenderOptions::default()).unwrap();
    let pages = pdf_strings(&bytes);
    assert!(pages.len() > 2);
    let n = pages.len();
    assert!(pages[n - 1].contains(&format!("Page {n} of {n}")));
}

#[test]
fn render_embeds_images() {
    let bytes = render(&sample_invoice(), &with_images(), &RenderOptions::default()).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    let mut filters = Vec::new();
    let mut smasks = 0;
    for object in doc.objects.values() {
        if let Object::Stream(stream) = object {
            let is_image = matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image");
            if !is_image {
                continue;
            }
            if let Ok(Object::Name(f)) = stream.dict.get(b"Filter") {
                filters.push(String::from_utf8_lossy(f).into_owned());
            }
            if stream.dict.get(b"SMask").is_ok() {
                smasks += 1;
            }
        }
    }
    assert_eq!(filters, vec!["DCTDecode".to_string()]);
    assert_eq!(smasks, 1);

    let page_id = *doc.get_pages().values().next().unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let drawn = content
        .operations
        .iter()
        .filter(|op| op.operator == "Do")
        .count();
    assert_eq!(drawn, 2);
}

#[test]
fn render_to_file_uses_configured_name() {
    let dir = std::env::temp_dir().join(format!("gstbill-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let path = render_to_file(&sample_invoice(), &Assets::none(), &RenderOptions::default(), &dir)
        .unwrap();
    assert_eq!(path.file_name().unwrap(), DEFAULT_FILE_NAME);
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));

    let opts = RenderOptions::default().file_name("INV-2024-017.pdf");
    let path = render_to_file(&sample_invoice(), &Assets::none(), &opts, &dir).unwrap();
    assert!(path.ends_with("INV-2024-017.pdf"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn options_are_validated() {
    let too_wide = RenderOptions::default().margin(250.0);
    assert!(matches!(
        render(&sample_invoice(), &Assets::none(), &too_wide),
        Err(InvoiceError::Render(_))
    ));
    let nameless = RenderOptions::default().file_name(" ");
    assert!(nameless.validate().is_err());

    let letter = RenderOptions::default().page_size(PageSize::Letter);
    let doc = layout(&sample_invoice(), &Assets::none(), &letter);
    assert_eq!((doc.page_width, doc.page_height), (612.0, 792.0));
}
