//! Core invoice model, GST computation, input coercion and header checks.
//!
//! [`tax`] is the single source of the arithmetic; the form and the
//! document renderer both call [`compute_invoice`] on the same [`Invoice`].

mod builder;
mod edit;
mod error;
mod input;
pub mod tax;
mod types;
mod validation;
mod words;

pub use builder::*;
pub use error::*;
pub use input::*;
pub use tax::{
    ComponentKind, InvoiceFigures, LineFigures, RateScheme, TaxBreakdown, TaxComponent, TaxType,
    classify_tax, compute_invoice, compute_line, format_amount, format_plain, invoice_total,
    is_intra_state, net_amount, total_amount,
};
pub use types::*;
pub use validation::*;
pub use words::amount_in_words;
