//! Paginated PDF rendering of an invoice.
//!
//! The renderer does not trust figures computed elsewhere: [`layout`] calls
//! [`compute_invoice`](crate::core::compute_invoice) on the invoice it is
//! given and formats the results with the same helpers the form uses, so
//! the document and the live form always show the same strings.
//!
//! ```no_run
//! use gstbill::assets::Assets;
//! use gstbill::core::Invoice;
//! use gstbill::pdf::{RenderOptions, render};
//!
//! let bytes = render(&Invoice::new(), &Assets::none(), &RenderOptions::default()).unwrap();
//! std::fs::write("invoice.pdf", bytes).unwrap();
//! ```

mod layout;
mod text;
mod writer;

use std::path::{Path, PathBuf};

use crate::assets::Assets;
use crate::core::{Invoice, InvoiceError};

pub use layout::{DocumentLayout, Element, PageLayout, layout};
pub use text::{Font, encode_win_ansi, text_width, wrap};

/// Suggested download name.
pub const DEFAULT_FILE_NAME: &str = "invoice.pdf";

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    /// 595 × 842 pt.
    A4,
    /// 612 × 792 pt.
    Letter,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            Self::A4 => (595.0, 842.0),
            Self::Letter => (612.0, 792.0),
            Self::Custom { width, height } => (*width, *height),
        }
    }
}

/// Runtime rendering configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub page_size: PageSize,
    /// Margin on all four sides, in points.
    pub margin: f32,
    /// Body and table text size.
    pub font_size: f32,
    /// Document title size.
    pub title_size: f32,
    /// Maximum height of the logo and signature images.
    pub image_height: f32,
    /// File name used by [`render_to_file`].
    pub file_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 30.0,
            font_size: 9.0,
            title_size: 16.0,
            image_height: 50.0,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn title_size(mut self, size: f32) -> Self {
        self.title_size = size;
        self
    }

    pub fn image_height(mut self, height: f32) -> Self {
        self.image_height = height;
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Reject geometry that leaves no room for content.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        let (width, height) = self.page_size.dimensions();
        if !(self.font_size > 0.0 && self.title_size > 0.0 && self.image_height >= 0.0) {
            return Err(InvoiceError::Render(
                "font sizes must be positive and image height non-negative".into(),
            ));
        }
        if self.margin < 0.0 || width - 2.0 * self.margin < 200.0 || height - 2.0 * self.margin < 200.0
        {
            return Err(InvoiceError::Render(format!(
                "margin {} leaves too little room on a {width}x{height} page",
                self.margin
            )));
        }
        if self.file_name.trim().is_empty() {
            return Err(InvoiceError::Render("file name must not be empty".into()));
        }
        Ok(())
    }
}

/// Lay out and serialize the invoice as PDF bytes.
pub fn render(
    invoice: &Invoice,
    assets: &Assets,
    options: &RenderOptions,
) -> Result<Vec<u8>, InvoiceError> {
    options.validate()?;
    let doc = layout(invoice, assets, options);
    tracing::debug!(
        pages = doc.pages.len(),
        invoice_number = %invoice.invoice_number,
        "invoice laid out"
    );
    writer::write_pdf(&doc, assets, invoice)
}

/// Render into `dir`, named after [`RenderOptions::file_name`]. Returns the
/// written path.
pub fn render_to_file(
    invoice: &Invoice,
    assets: &Assets,
    options: &RenderOptions,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, InvoiceError> {
    let bytes = render(invoice, assets, options)?;
    let path = dir.as_ref().join(&options.file_name);
    std::fs::write(&path, &bytes)
        .map_err(|e| InvoiceError::Render(format!("failed to write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "invoice PDF written");
    Ok(path)
}
