//! GST computation: net amount, CGST/SGST vs IGST classification, totals.
//!
//! Every function here is pure. Both the form and the document renderer
//! call into this module, so a given [`Invoice`] always yields the same
//! figures wherever it is displayed.
//!
//! Rounding is half-up to two decimals and happens at fixed points only:
//! after the price × quantity product, on each tax component, on the sum of
//! the rounded components, and on net + tax. The invoice total is the sum of
//! already-rounded line totals.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::{Invoice, LineItem};

/// A GST rate scheme: CGST and SGST at `component_rate` each for
/// intra-state supplies, IGST at twice that for inter-state supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateScheme {
    component_rate: Decimal,
}

impl RateScheme {
    /// CGST 9% + SGST 9%, IGST 18%.
    pub const STANDARD: Self = Self {
        component_rate: dec!(9),
    };

    /// CGST 2.5% + SGST 2.5%, IGST 5%.
    pub const REDUCED: Self = Self {
        component_rate: dec!(2.5),
    };

    /// CGST (and SGST) rate in percent.
    pub fn component_rate(&self) -> Decimal {
        self.component_rate
    }

    /// IGST rate in percent; equals CGST + SGST.
    pub fn igst_rate(&self) -> Decimal {
        self.component_rate * dec!(2)
    }
}

impl Default for RateScheme {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Intra-state split tax or inter-state single tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    /// Place of supply equals place of delivery.
    CgstSgst,
    /// Places differ.
    Igst,
}

impl TaxType {
    /// Column label: `"CGST + SGST"` or `"IGST"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CgstSgst => "CGST + SGST",
            Self::Igst => "IGST",
        }
    }
}

/// Which tax a [`TaxComponent`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Cgst,
    Sgst,
    Igst,
}

impl ComponentKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cgst => "CGST",
            Self::Sgst => "SGST",
            Self::Igst => "IGST",
        }
    }
}

/// One tax component, already rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponent {
    pub kind: ComponentKind,
    /// Rate in percent.
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Result of [`classify_tax`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub tax_type: TaxType,
    /// CGST then SGST, or a single IGST.
    pub components: Vec<TaxComponent>,
    /// Rounded sum of the rounded components.
    pub tax_amount: Decimal,
}

impl TaxBreakdown {
    /// Tax amount cell text: `"9.00 + 9.00"` or `"18.00"`.
    pub fn component_display(&self) -> String {
        self.components
            .iter()
            .map(|c| format_amount(c.amount))
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Amount of the given component, if present.
    pub fn component(&self, kind: ComponentKind) -> Option<Decimal> {
        self.components
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.amount)
    }
}

/// `unit_price × quantity`, rounded once at the end.
///
/// Both inputs are expected to be non-negative; use
/// [`coerce_amount`](super::coerce_amount) or [`parse_amount`](super::parse_amount)
/// at the input boundary.
///
/// A product beyond the range of [`Decimal`] saturates instead of panicking.
pub fn net_amount(unit_price: Decimal, quantity: Decimal) -> Decimal {
    round_half_up(mul(unit_price, quantity))
}

/// Whether a supply is intra-state: the two places compare exactly.
///
/// No trimming or case folding: `"KA"` and `"ka"` are different places.
pub fn is_intra_state(place_of_supply: &str, place_of_delivery: &str) -> bool {
    place_of_supply == place_of_delivery
}

/// Classify a line's tax using [`is_intra_state`].
pub fn classify_tax(
    net_amount: Decimal,
    place_of_supply: &str,
    place_of_delivery: &str,
    scheme: RateScheme,
) -> TaxBreakdown {
    if is_intra_state(place_of_supply, place_of_delivery) {
        let rate = scheme.component_rate();
        let cgst = percent_of(net_amount, rate);
        let sgst = percent_of(net_amount, rate);
        TaxBreakdown {
            tax_type: TaxType::CgstSgst,
            components: vec![
                TaxComponent {
                    kind: ComponentKind::Cgst,
                    rate,
                    amount: cgst,
                },
                TaxComponent {
                    kind: ComponentKind::Sgst,
                    rate,
                    amount: sgst,
                },
            ],
            tax_amount: round_half_up(add(cgst, sgst)),
        }
    } else {
        let rate = scheme.igst_rate();
        let igst = percent_of(net_amount, rate);
        TaxBreakdown {
            tax_type: TaxType::Igst,
            components: vec![TaxComponent {
                kind: ComponentKind::Igst,
                rate,
                amount: igst,
            }],
            tax_amount: igst,
        }
    }
}

/// Line total: `net_amount + tax_amount`, rounded.
pub fn total_amount(net_amount: Decimal, tax_amount: Decimal) -> Decimal {
    round_half_up(add(round_half_up(net_amount), round_half_up(tax_amount)))
}

/// Grand total: each line goes through net → tax → total on its own,
/// then the line totals are added.
pub fn invoice_total(
    items: &[LineItem],
    place_of_supply: &str,
    place_of_delivery: &str,
    scheme: RateScheme,
) -> Decimal {
    let sum = items
        .iter()
        .map(|item| {
            let net = net_amount(item.unit_price, item.quantity);
            let tax = classify_tax(net, place_of_supply, place_of_delivery, scheme);
            total_amount(net, tax.tax_amount)
        })
        .fold(Decimal::ZERO, add);
    round_half_up(sum)
}

/// Derived figures for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFigures {
    /// 1-based serial number (Sl. No).
    pub serial: usize,
    pub net_amount: Decimal,
    pub tax: TaxBreakdown,
    pub total_amount: Decimal,
}

impl LineFigures {
    /// Display strings for the computed columns, in table order:
    /// net amount, tax type, tax amount, total amount.
    pub fn cells(&self) -> [String; 4] {
        [
            format_amount(self.net_amount),
            self.tax.tax_type.label().to_string(),
            self.tax.component_display(),
            format_amount(self.total_amount),
        ]
    }
}

/// Derived figures for a whole invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFigures {
    pub lines: Vec<LineFigures>,
    pub grand_total: Decimal,
}

/// Compute the figures for a single line.
pub fn compute_line(
    item: &LineItem,
    serial: usize,
    place_of_supply: &str,
    place_of_delivery: &str,
    scheme: RateScheme,
) -> LineFigures {
    let net = net_amount(item.unit_price, item.quantity);
    let tax = classify_tax(net, place_of_supply, place_of_delivery, scheme);
    let total = total_amount(net, tax.tax_amount);
    LineFigures {
        serial,
        net_amount: net,
        tax,
        total_amount: total,
    }
}

/// Compute every line's figures and the grand total for an invoice.
pub fn compute_invoice(invoice: &Invoice) -> InvoiceFigures {
    let lines: Vec<LineFigures> = invoice
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            compute_line(
                item,
                i + 1,
                &invoice.place_of_supply,
                &invoice.place_of_delivery,
                invoice.rate_scheme,
            )
        })
        .collect();

    let grand_total = invoice_total(
        &invoice.items,
        &invoice.place_of_supply,
        &invoice.place_of_delivery,
        invoice.rate_scheme,
    );

    tracing::debug!(
        lines = lines.len(),
        grand_total = %grand_total,
        "recomputed invoice figures"
    );

    InvoiceFigures { lines, grand_total }
}

/// Render an amount with exactly two decimals (`30` → `"30.00"`).
pub fn format_amount(value: Decimal) -> String {
    let mut v = round_half_up(value);
    v.rescale(2);
    v.to_string()
}

/// Render a price or quantity as entered, without trailing zeros
/// (`19.990` → `"19.99"`, `3.0` → `"3"`).
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}

fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    round_half_up(mul(amount, rate) / dec!(100))
}

fn mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        tracing::warn!(lhs = %a, rhs = %b, "product out of range, saturating");
        a.saturating_mul(b)
    })
}

fn add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!(lhs = %a, rhs = %b, "sum out of range, saturating");
        a.saturating_add(b)
    })
}

/// Round to 2 decimal places, midpoint away from zero (commercial rounding).
pub(crate) fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
