//! # gstbill
//!
//! GST tax-invoice engine: an invoice model, the CGST/SGST vs IGST
//! computation, a headless editing form and a paginated PDF renderer.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Amounts are rounded half-up to two decimals at fixed points (see
//! [`core::tax`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gstbill::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV-001")
//!     .seller("Acme Traders", "12 MG Road, Bengaluru")
//!     .places("Karnataka", "Karnataka")
//!     .invoice_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
//!     .add_line(LineItemBuilder::new("Widget", dec!(100), dec!(3)).build())
//!     .build()
//!     .unwrap();
//!
//! let figures = compute_invoice(&invoice);
//! assert_eq!(figures.lines[0].tax.component_display(), "27.00 + 27.00");
//! assert_eq!(figures.grand_total, dec!(354.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice model, GST computation, input parsing, header checks |
//! | `assets` | Logo/signature decoding from data URLs (PNG, JPEG) |
//! | `form` | Immutable form state driven by edit events |
//! | `pdf` | Paginated PDF rendering |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "assets")]
pub mod assets;

#[cfg(feature = "form")]
pub mod form;

#[cfg(feature = "pdf")]
pub mod pdf;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
