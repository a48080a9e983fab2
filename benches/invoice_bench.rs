use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use gstbill::core::*;

fn build_invoice(lines: usize, supply: &str, delivery: &str) -> Invoice {
    let mut builder = InvoiceBuilder::new("BENCH-001")
        .seller("Uttam Foods", "Plot 4, MIDC Bhosari, Pune")
        .buyer("Kiran Stores", "4 Brigade Road, Bengaluru")
        .places(supply, delivery);

    for i in 1..=lines {
        builder = builder.add_line(
            LineItemBuilder::new(format!("Item {i}"), dec!(142.50), dec!(3)).build(),
        );
    }

    builder.build().unwrap()
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_tax_intra", |b| {
        b.iter(|| {
            black_box(classify_tax(
                black_box(dec!(427.50)),
                "KA",
                "KA",
                RateScheme::STANDARD,
            ))
        });
    });
}

fn bench_compute_invoice(c: &mut Criterion) {
    let small = build_invoice(10, "MH", "MH");
    c.bench_function("compute_invoice_10_lines", |b| {
        b.iter(|| black_box(compute_invoice(black_box(&small))));
    });

    let large = build_invoice(1000, "MH", "KA");
    c.bench_function("compute_invoice_1000_lines", |b| {
        b.iter(|| black_box(compute_invoice(black_box(&large))));
    });
}

fn bench_invoice_total(c: &mut Criterion) {
    let invoice = build_invoice(1000, "MH", "MH");
    c.bench_function("invoice_total_1000_lines", |b| {
        b.iter(|| {
            black_box(invoice_total(
                black_box(&invoice.items),
                &invoice.place_of_supply,
                &invoice.place_of_delivery,
                invoice.rate_scheme,
            ))
        });
    });
}

fn bench_edit(c: &mut Criterion) {
    let invoice = build_invoice(100, "MH", "MH");
    c.bench_function("copy_on_write_line_edit_100_lines", |b| {
        b.iter(|| {
            black_box(
                invoice
                    .with_line_edit(50, LineEdit::Quantity(dec!(7)))
                    .unwrap(),
            )
        });
    });
}

#[cfg(feature = "pdf")]
fn bench_render(c: &mut Criterion) {
    use gstbill::assets::Assets;
    use gstbill::pdf::{RenderOptions, render};

    let invoice = build_invoice(100, "MH", "KA");
    let opts = RenderOptions::default();
    c.bench_function("render_pdf_100_lines", |b| {
        b.iter(|| black_box(render(black_box(&invoice), &Assets::none(), &opts)));
    });
}

#[cfg(not(feature = "pdf"))]
fn bench_render(_: &mut Criterion) {}

criterion_group!(
    benches,
    bench_classify,
    bench_compute_invoice,
    bench_invoice_total,
    bench_edit,
    bench_render,
);
criterion_main!(benches);
