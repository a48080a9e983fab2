use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax::RateScheme;

/// A GST tax invoice as held by the form and handed to the renderer.
///
/// Derived figures (net amounts, tax, totals) are not stored;
/// see [`compute_invoice`](super::compute_invoice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// "Sold By" block.
    pub seller: Party,
    /// "Billing Address" block.
    pub buyer: Party,
    /// Seller PAN (permanent account number).
    pub pan: String,
    /// Seller GST registration number (GSTIN).
    pub gst_number: String,
    /// State/UT code.
    pub state_code: String,
    /// Place of supply. Compared byte-for-byte with `place_of_delivery`.
    pub place_of_supply: String,
    /// Place of delivery.
    pub place_of_delivery: String,
    /// Purchase order number.
    pub order_number: String,
    /// Purchase order date.
    pub order_date: Option<NaiveDate>,
    /// Invoice number.
    pub invoice_number: String,
    /// Invoice issue date.
    pub invoice_date: Option<NaiveDate>,
    /// Free-text invoice detail note.
    pub invoice_details: String,
    /// Free-text amount in words.
    pub amount_in_words: String,
    /// Whether tax is payable under reverse charge.
    pub reverse_charge: ReverseCharge,
    /// CGST/SGST/IGST rates applied to every line.
    pub rate_scheme: RateScheme,
    /// Line items in display order (position + 1 = Sl. No).
    pub items: Vec<LineItem>,
}

impl Default for Invoice {
    fn default() -> Self {
        Self {
            seller: Party::default(),
            buyer: Party::default(),
            pan: String::new(),
            gst_number: String::new(),
            state_code: String::new(),
            place_of_supply: String::new(),
            place_of_delivery: String::new(),
            order_number: String::new(),
            order_date: None,
            invoice_number: String::new(),
            invoice_date: None,
            invoice_details: String::new(),
            amount_in_words: String::new(),
            reverse_charge: ReverseCharge::No,
            rate_scheme: RateScheme::STANDARD,
            items: vec![LineItem::default()],
        }
    }
}

impl Invoice {
    /// A freshly mounted invoice: empty header, one blank line item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether place of supply and place of delivery match exactly.
    pub fn is_intra_state(&self) -> bool {
        super::tax::is_intra_state(&self.place_of_supply, &self.place_of_delivery)
    }
}

/// Seller or buyer: a name and a free-form (multi-line) address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub address: String,
}

/// One row of the invoice table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub description: String,
    /// Price per unit, non-negative.
    pub unit_price: Decimal,
    /// Quantity, non-negative (whole or fractional).
    pub quantity: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, unit_price: Decimal, quantity: Decimal) -> Self {
        Self {
            description: description.into(),
            unit_price,
            quantity,
        }
    }
}

/// "Whether the tax is payable under reverse charge".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReverseCharge {
    Yes,
    #[default]
    No,
}

impl ReverseCharge {
    /// Display label, `"Yes"` or `"No"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parse `"Yes"`/`"No"` (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }
}

/// Free-text header fields addressable by a single structural update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderField {
    CompanyName,
    CompanyAddress,
    CustomerName,
    CustomerAddress,
    Pan,
    GstNumber,
    StateCode,
    PlaceOfSupply,
    PlaceOfDelivery,
    OrderNumber,
    InvoiceNumber,
    InvoiceDetails,
    AmountInWords,
}

impl HeaderField {
    /// All text header fields in form order.
    pub const ALL: [Self; 13] = [
        Self::CompanyName,
        Self::CompanyAddress,
        Self::CustomerName,
        Self::CustomerAddress,
        Self::Pan,
        Self::GstNumber,
        Self::StateCode,
        Self::PlaceOfSupply,
        Self::PlaceOfDelivery,
        Self::OrderNumber,
        Self::InvoiceNumber,
        Self::InvoiceDetails,
        Self::AmountInWords,
    ];

    /// Label used by the form placeholder and the document.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "Company Name",
            Self::CompanyAddress => "Company Address",
            Self::CustomerName => "Customer Name",
            Self::CustomerAddress => "Customer Address",
            Self::Pan => "PAN No",
            Self::GstNumber => "GST Registration No",
            Self::StateCode => "State/UT Code",
            Self::PlaceOfSupply => "Place of Supply",
            Self::PlaceOfDelivery => "Place of Delivery",
            Self::OrderNumber => "Order Number",
            Self::InvoiceNumber => "Invoice Number",
            Self::InvoiceDetails => "Invoice Details",
            Self::AmountInWords => "Amount in Words",
        }
    }

    /// Read the field's current value.
    pub fn get<'a>(&self, invoice: &'a Invoice) -> &'a str {
        match self {
            Self::CompanyName => &invoice.seller.name,
            Self::CompanyAddress => &invoice.seller.address,
            Self::CustomerName => &invoice.buyer.name,
            Self::CustomerAddress => &invoice.buyer.address,
            Self::Pan => &invoice.pan,
            Self::GstNumber => &invoice.gst_number,
            Self::StateCode => &invoice.state_code,
            Self::PlaceOfSupply => &invoice.place_of_supply,
            Self::PlaceOfDelivery => &invoice.place_of_delivery,
            Self::OrderNumber => &invoice.order_number,
            Self::InvoiceNumber => &invoice.invoice_number,
            Self::InvoiceDetails => &invoice.invoice_details,
            Self::AmountInWords => &invoice.amount_in_words,
        }
    }

    pub(crate) fn slot<'a>(&self, invoice: &'a mut Invoice) -> &'a mut String {
        match self {
            Self::CompanyName => &mut invoice.seller.name,
            Self::CompanyAddress => &mut invoice.seller.address,
            Self::CustomerName => &mut invoice.buyer.name,
            Self::CustomerAddress => &mut invoice.buyer.address,
            Self::Pan => &mut invoice.pan,
            Self::GstNumber => &mut invoice.gst_number,
            Self::StateCode => &mut invoice.state_code,
            Self::PlaceOfSupply => &mut invoice.place_of_supply,
            Self::PlaceOfDelivery => &mut invoice.place_of_delivery,
            Self::OrderNumber => &mut invoice.order_number,
            Self::InvoiceNumber => &mut invoice.invoice_number,
            Self::InvoiceDetails => &mut invoice.invoice_details,
            Self::AmountInWords => &mut invoice.amount_in_words,
        }
    }
}

/// A single-field edit of one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEdit {
    Description(String),
    UnitPrice(Decimal),
    Quantity(Decimal),
}
