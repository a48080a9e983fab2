use gstbill::core::*;
use gstbill::form::{FormEvent, InvoiceForm};
use gstbill::pdf::{RenderOptions, render_to_file};
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=gstbill=debug shows recomputation and rendering events
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let form = InvoiceForm::new()
        .apply_all([
            FormEvent::Header(HeaderField::CompanyName, "Uttam Foods".into()),
            FormEvent::Header(
                HeaderField::CompanyAddress,
                "Plot 4, MIDC Bhosari\nPune 411026".into(),
            ),
            FormEvent::Header(HeaderField::CustomerName, "Kiran Stores".into()),
            FormEvent::Header(
                HeaderField::CustomerAddress,
                "4 Brigade Road\nBengaluru 560025".into(),
            ),
            FormEvent::Header(HeaderField::Pan, "AAPFU0939F".into()),
            FormEvent::Header(HeaderField::GstNumber, "27AAPFU0939F1ZV".into()),
            FormEvent::Header(HeaderField::StateCode, "27".into()),
            FormEvent::Header(HeaderField::PlaceOfSupply, "Maharashtra".into()),
            FormEvent::Header(HeaderField::PlaceOfDelivery, "Karnataka".into()),
            FormEvent::Header(HeaderField::OrderNumber, "PO-881".into()),
            FormEvent::OrderDate("2024-03-28".into()),
            FormEvent::Header(HeaderField::InvoiceNumber, "INV-2024-017".into()),
            FormEvent::InvoiceDate("2024-04-02".into()),
            FormEvent::Description {
                index: 0,
                value: "Basmati rice 5kg".into(),
            },
            FormEvent::UnitPrice {
                index: 0,
                raw: "450".into(),
            },
            FormEvent::Quantity {
                index: 0,
                raw: "4".into(),
            },
            FormEvent::AddItem,
            FormEvent::Description {
                index: 1,
                value: "Toor dal 1kg".into(),
            },
            FormEvent::UnitPrice {
                index: 1,
                raw: "142.50".into(),
            },
            FormEvent::Quantity {
                index: 1,
                raw: "3".into(),
            },
        ])
        .expect("every event targets an existing line");

    let view = form.view();
    println!("Invoice: {}", form.invoice().invoice_number);
    println!("---");
    for row in &view.rows {
        println!(
            "  {:>2}. {} {} x {} = {} | {} {} | {}",
            row.serial,
            row.description,
            row.quantity,
            row.unit_price,
            row.net_amount,
            row.tax_type,
            row.tax_amount,
            row.total_amount
        );
    }
    println!("---");
    println!("Total:   {}", view.grand_total_label);

    let form = match view.suggested_amount_in_words {
        Some(words) => {
            println!("Words:   {words}");
            form.apply(FormEvent::Header(HeaderField::AmountInWords, words))
                .expect("header events cannot fail")
        }
        None => form,
    };

    for finding in &view.findings {
        println!("Check:   {finding}");
    }

    let export = form.export();
    let path = render_to_file(&export.invoice, &export.assets, &RenderOptions::default(), ".")
        .expect("PDF should render");
    println!("Wrote {}", path.display());
}
