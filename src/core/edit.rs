//! Copy-on-write updates. Every method borrows the current invoice and
//! returns a new value; the receiver is never modified, so a snapshot taken
//! for export stays valid while the form keeps editing.

use chrono::NaiveDate;

use super::error::InvoiceError;
use super::tax::RateScheme;
use super::types::*;

impl Invoice {
    /// Replace one free-text header field.
    pub fn with_header(&self, field: HeaderField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *field.slot(&mut next) = value.into();
        next
    }

    pub fn with_order_date(&self, date: Option<NaiveDate>) -> Self {
        Self {
            order_date: date,
            ..self.clone()
        }
    }

    pub fn with_invoice_date(&self, date: Option<NaiveDate>) -> Self {
        Self {
            invoice_date: date,
            ..self.clone()
        }
    }

    pub fn with_reverse_charge(&self, reverse_charge: ReverseCharge) -> Self {
        Self {
            reverse_charge,
            ..self.clone()
        }
    }

    pub fn with_rate_scheme(&self, rate_scheme: RateScheme) -> Self {
        Self {
            rate_scheme,
            ..self.clone()
        }
    }

    /// Change one field of the line item at `index`.
    pub fn with_line_edit(&self, index: usize, edit: LineEdit) -> Result<Self, InvoiceError> {
        self.check_index(index)?;
        let mut next = self.clone();
        let item = &mut next.items[index];
        match edit {
            LineEdit::Description(description) => item.description = description,
            LineEdit::UnitPrice(price) => item.unit_price = price,
            LineEdit::Quantity(quantity) => item.quantity = quantity,
        }
        Ok(next)
    }

    /// Replace the whole line item at `index`.
    pub fn with_line(&self, index: usize, item: LineItem) -> Result<Self, InvoiceError> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.items[index] = item;
        Ok(next)
    }

    /// Append a blank line item.
    pub fn with_line_added(&self) -> Self {
        self.with_line_appended(LineItem::default())
    }

    /// Append the given line item.
    pub fn with_line_appended(&self, item: LineItem) -> Self {
        let mut next = self.clone();
        next.items.push(item);
        next
    }

    /// Remove the line item at `index`; later items shift up one position.
    pub fn without_line(&self, index: usize) -> Result<Self, InvoiceError> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.items.remove(index);
        Ok(next)
    }

    fn check_index(&self, index: usize) -> Result<(), InvoiceError> {
        if index >= self.items.len() {
            return Err(InvoiceError::LineIndex {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}
