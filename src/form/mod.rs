//! Headless interactive form state.
//!
//! [`InvoiceForm`] is an immutable value: every [`FormEvent`] produces a new
//! form, so a UI can keep the previous state for undo or hand a snapshot to
//! the renderer while editing continues. Figures are never stored; [`view`]
//! recomputes them from the current invoice every time.
//!
//! [`view`]: InvoiceForm::view

mod slot;
mod view;

pub use slot::{AssetSlot, UploadTicket};
pub use view::{FormView, RUPEE_SIGN, RowView};

use crate::assets::{AssetKind, AssetPayload, Assets, load_asset};
use crate::core::*;

/// One user action on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Free-text header input.
    Header(HeaderField, String),
    /// Raw date input; empty clears.
    OrderDate(String),
    InvoiceDate(String),
    ReverseCharge(ReverseCharge),
    RateScheme(RateScheme),
    Description { index: usize, value: String },
    /// Raw numeric text; malformed input counts as zero.
    UnitPrice { index: usize, raw: String },
    Quantity { index: usize, raw: String },
    AddItem,
    RemoveItem(usize),
}

/// The exported result: a frozen invoice and whatever images were loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub invoice: Invoice,
    pub assets: Assets,
}

/// Editable invoice plus logo/signature upload slots.
#[derive(Debug, Clone, Default)]
pub struct InvoiceForm {
    invoice: Invoice,
    logo: AssetSlot,
    signature: AssetSlot,
    next_ticket: u64,
}

impl InvoiceForm {
    /// Form as first mounted: blank header, one blank line item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing invoice.
    pub fn with_invoice(invoice: Invoice) -> Self {
        Self {
            invoice,
            ..Self::default()
        }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn slot(&self, kind: AssetKind) -> &AssetSlot {
        match kind {
            AssetKind::Logo => &self.logo,
            AssetKind::Signature => &self.signature,
        }
    }

    /// Apply one event, returning the next form state.
    ///
    /// Only line-index errors are reported; malformed numbers and dates are
    /// coerced (to zero and to "no date") with a warning.
    pub fn apply(&self, event: FormEvent) -> Result<Self, InvoiceError> {
        tracing::debug!(?event, "form event");
        let inv = &self.invoice;
        let next = match event {
            FormEvent::Header(field, value) => inv.with_header(field, value),
            FormEvent::OrderDate(raw) => inv.with_order_date(lenient_date("order_date", &raw)),
            FormEvent::InvoiceDate(raw) => {
                inv.with_invoice_date(lenient_date("invoice_date", &raw))
            }
            FormEvent::ReverseCharge(rc) => inv.with_reverse_charge(rc),
            FormEvent::RateScheme(scheme) => inv.with_rate_scheme(scheme),
            FormEvent::Description { index, value } => {
                inv.with_line_edit(index, LineEdit::Description(value))?
            }
            FormEvent::UnitPrice { index, raw } => {
                inv.with_line_edit(index, LineEdit::UnitPrice(coerce_amount(&raw)))?
            }
            FormEvent::Quantity { index, raw } => {
                inv.with_line_edit(index, LineEdit::Quantity(coerce_amount(&raw)))?
            }
            FormEvent::AddItem => inv.with_line_added(),
            FormEvent::RemoveItem(index) => inv.without_line(index)?,
        };
        Ok(Self {
            invoice: next,
            ..self.clone()
        })
    }

    /// Apply a sequence of events, stopping at the first error.
    pub fn apply_all(
        &self,
        events: impl IntoIterator<Item = FormEvent>,
    ) -> Result<Self, InvoiceError> {
        events
            .into_iter()
            .try_fold(self.clone(), |form, event| form.apply(event))
    }

    /// Mark a slot as loading and hand out the ticket that may fill it.
    ///
    /// Any earlier ticket for the same slot becomes stale.
    pub fn begin_upload(&self, kind: AssetKind) -> (Self, UploadTicket) {
        let ticket = UploadTicket::new(kind, self.next_ticket);
        let mut next = self.clone();
        next.next_ticket += 1;
        *next.slot_mut(kind) = AssetSlot::Pending(ticket);
        tracing::debug!(kind = kind.label(), ticket = ticket.id(), "upload started");
        (next, ticket)
    }

    /// Deliver the result of an upload.
    ///
    /// A stale ticket is ignored (the latest upload wins). A payload that
    /// fails to decode leaves the slot empty.
    pub fn complete_upload(&self, ticket: UploadTicket, payload: &AssetPayload) -> Self {
        let kind = ticket.kind();
        if !self.slot(kind).is_pending(ticket) {
            tracing::debug!(
                kind = kind.label(),
                ticket = ticket.id(),
                "ignoring stale upload"
            );
            return self.clone();
        }
        let mut next = self.clone();
        *next.slot_mut(kind) = match load_asset(kind, payload) {
            Some(asset) => AssetSlot::Ready(asset),
            None => AssetSlot::Empty,
        };
        next
    }

    /// Remove a loaded image (or cancel a pending one).
    pub fn clear_asset(&self, kind: AssetKind) -> Self {
        let mut next = self.clone();
        *next.slot_mut(kind) = AssetSlot::Empty;
        next
    }

    /// Live figures and display strings for the current state.
    pub fn view(&self) -> FormView {
        FormView::build(&self.invoice, &self.logo, &self.signature)
    }

    /// Freeze the invoice and loaded images for the renderer. Pending
    /// uploads are exported as absent.
    pub fn export(&self) -> Export {
        tracing::debug!(
            invoice_number = %self.invoice.invoice_number,
            items = self.invoice.items.len(),
            "exporting invoice snapshot"
        );
        Export {
            invoice: self.invoice.clone(),
            assets: Assets {
                logo: self.logo.asset().cloned(),
                signature: self.signature.asset().cloned(),
            },
        }
    }

    fn slot_mut(&mut self, kind: AssetKind) -> &mut AssetSlot {
        match kind {
            AssetKind::Logo => &mut self.logo,
            AssetKind::Signature => &mut self.signature,
        }
    }
}

fn lenient_date(field: &str, raw: &str) -> Option<chrono::NaiveDate> {
    parse_date(raw).unwrap_or_else(|e| {
        tracing::warn!(field, error = %e, "clearing unparseable date");
        None
    })
}
