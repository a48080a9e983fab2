use crate::assets::to_data_url;
use crate::core::*;

use super::slot::AssetSlot;

/// Prefix shown before the grand total.
pub const RUPEE_SIGN: &str = "\u{20b9}";

/// One table row as the form displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub serial: usize,
    pub description: String,
    pub unit_price: String,
    pub quantity: String,
    pub net_amount: String,
    pub tax_type: String,
    pub tax_amount: String,
    pub total_amount: String,
}

/// Everything the form shows that is derived from the invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub rows: Vec<RowView>,
    /// Grand total, two decimals, no currency sign.
    pub grand_total: String,
    /// Grand total with the rupee sign, as shown under the table.
    pub grand_total_label: String,
    /// Spelled-out grand total, offered when the field is blank.
    pub suggested_amount_in_words: Option<String>,
    pub reverse_charge: &'static str,
    /// Logo as a data URL, if loaded.
    pub logo: Option<String>,
    pub signature: Option<String>,
    pub logo_pending: bool,
    pub signature_pending: bool,
    /// Non-fatal header findings.
    pub findings: Vec<ValidationError>,
}

impl FormView {
    pub(crate) fn build(invoice: &Invoice, logo: &AssetSlot, signature: &AssetSlot) -> Self {
        let figures = compute_invoice(invoice);

        let rows = invoice
            .items
            .iter()
            .zip(&figures.lines)
            .map(|(item, line)| {
                let [net_amount, tax_type, tax_amount, total_amount] = line.cells();
                RowView {
                    serial: line.serial,
                    description: item.description.clone(),
                    unit_price: format_plain(item.unit_price),
                    quantity: format_plain(item.quantity),
                    net_amount,
                    tax_type,
                    tax_amount,
                    total_amount,
                }
            })
            .collect();

        let grand_total = format_amount(figures.grand_total);
        let suggested_amount_in_words = if invoice.amount_in_words.trim().is_empty() {
            amount_in_words(figures.grand_total)
        } else {
            None
        };

        Self {
            rows,
            grand_total_label: format!("{RUPEE_SIGN}{grand_total}"),
            grand_total,
            suggested_amount_in_words,
            reverse_charge: invoice.reverse_charge.label(),
            logo: logo.asset().map(to_data_url),
            signature: signature.asset().map(to_data_url),
            logo_pending: matches!(logo, AssetSlot::Pending(_)),
            signature_pending: matches!(signature, AssetSlot::Pending(_)),
            findings: validate_invoice(invoice),
        }
    }
}
