use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::input::MAX_AMOUNT;
use super::tax::RateScheme;
use super::types::*;

/// Upper bound on line items accepted by [`InvoiceBuilder::build`].
pub const MAX_LINE_ITEMS: usize = 10_000;

/// Builder for constructing invoices in code (tests, imports, demos).
///
/// The form edits invoices through the copy-on-write methods on
/// [`Invoice`]; this builder is the programmatic equivalent.
///
/// ```
/// use gstbill::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new("INV-2024-001")
///     .seller("Uttam Foods", "12 MG Road, Pune")
///     .buyer("Kiran Stores", "4 Brigade Road, Bengaluru")
///     .places("MH", "KA")
///     .add_line(LineItemBuilder::new("Basmati rice 5kg", dec!(450), dec!(4)).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(compute_invoice(&invoice).grand_total, dec!(2124.00));
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceBuilder {
    invoice: Invoice,
}

impl InvoiceBuilder {
    /// Start an invoice with the given number and no line items.
    pub fn new(invoice_number: impl Into<String>) -> Self {
        Self {
            invoice: Invoice {
                invoice_number: invoice_number.into(),
                items: Vec::new(),
                ..Invoice::default()
            },
        }
    }

    pub fn seller(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.invoice.seller = Party {
            name: name.into(),
            address: address.into(),
        };
        self
    }

    pub fn buyer(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.invoice.buyer = Party {
            name: name.into(),
            address: address.into(),
        };
        self
    }

    pub fn pan(mut self, pan: impl Into<String>) -> Self {
        self.invoice.pan = pan.into();
        self
    }

    pub fn gst_number(mut self, gstin: impl Into<String>) -> Self {
        self.invoice.gst_number = gstin.into();
        self
    }

    pub fn state_code(mut self, code: impl Into<String>) -> Self {
        self.invoice.state_code = code.into();
        self
    }

    /// Place of supply and place of delivery.
    pub fn places(mut self, supply: impl Into<String>, delivery: impl Into<String>) -> Self {
        self.invoice.place_of_supply = supply.into();
        self.invoice.place_of_delivery = delivery.into();
        self
    }

    pub fn order(mut self, number: impl Into<String>, date: NaiveDate) -> Self {
        self.invoice.order_number = number.into();
        self.invoice.order_date = Some(date);
        self
    }

    pub fn invoice_date(mut self, date: NaiveDate) -> Self {
        self.invoice.invoice_date = Some(date);
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.invoice.invoice_details = details.into();
        self
    }

    pub fn amount_in_words(mut self, words: impl Into<String>) -> Self {
        self.invoice.amount_in_words = words.into();
        self
    }

    pub fn reverse_charge(mut self, reverse_charge: ReverseCharge) -> Self {
        self.invoice.reverse_charge = reverse_charge;
        self
    }

    pub fn rate_scheme(mut self, scheme: RateScheme) -> Self {
        self.invoice.rate_scheme = scheme;
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.invoice.items.push(line);
        self
    }

    /// Build the invoice, rejecting negative or oversized amounts and
    /// oversized item lists.
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        if self.invoice.items.len() > MAX_LINE_ITEMS {
            return Err(InvoiceError::Builder(format!(
                "invoice cannot have more than {MAX_LINE_ITEMS} line items"
            )));
        }

        for (i, item) in self.invoice.items.iter().enumerate() {
            if is_negative(item.unit_price) {
                return Err(InvoiceError::Builder(format!(
                    "line {}: unit price {} is negative",
                    i + 1,
                    item.unit_price
                )));
            }
            if is_negative(item.quantity) {
                return Err(InvoiceError::Builder(format!(
                    "line {}: quantity {} is negative",
                    i + 1,
                    item.quantity
                )));
            }
            if item.unit_price > MAX_AMOUNT || item.quantity > MAX_AMOUNT {
                return Err(InvoiceError::Builder(format!(
                    "line {}: unit price and quantity must not exceed {MAX_AMOUNT}",
                    i + 1
                )));
            }
        }

        Ok(self.invoice)
    }

    /// Build without checks, for tests or importing external data.
    pub fn build_unchecked(self) -> Invoice {
        self.invoice
    }
}

/// Builder for [`LineItem`].
#[derive(Debug, Clone)]
pub struct LineItemBuilder {
    item: LineItem,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>, unit_price: Decimal, quantity: Decimal) -> Self {
        Self {
            item: LineItem::new(description, unit_price, quantity),
        }
    }

    pub fn unit_price(mut self, price: Decimal) -> Self {
        self.item.unit_price = price;
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.item.quantity = quantity;
        self
    }

    pub fn build(self) -> LineItem {
        self.item
    }
}

fn is_negative(value: Decimal) -> bool {
    value.is_sign_negative() && !value.is_zero()
}
