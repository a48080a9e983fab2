use std::ops::Range;

use crate::assets::{AssetKind, Assets};
use crate::core::*;

use super::RenderOptions;
use super::text::{Font, text_width, wrap};

const TITLE: &str = "Tax Invoice/Bill of Supply/Cash Memo";
const SUBTITLE: &str = "(Original for Recipient)";
const FOOTER_SPACE: f32 = 18.0;
const CELL_PAD: f32 = 3.0;
const LINE_WIDTH: f32 = 0.5;

/// A positioned drawing instruction. Coordinates are PDF points with the
/// origin at the bottom-left; text `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
    },
    Image {
        kind: AssetKind,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub elements: Vec<Element>,
}

impl PageLayout {
    /// Text runs on this page in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// The laid-out document, before PDF serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<PageLayout>,
    /// Figures the renderer computed for itself.
    pub figures: InvoiceFigures,
}

impl DocumentLayout {
    /// All text runs across all pages.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(PageLayout::texts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

struct Column {
    title: &'static str,
    share: f32,
    align: Align,
}

const COLUMNS: [Column; 8] = [
    Column { title: "Sl. No", share: 0.06, align: Align::Center },
    Column { title: "Description", share: 0.245, align: Align::Left },
    Column { title: "Unit Price", share: 0.11, align: Align::Right },
    Column { title: "Qty", share: 0.08, align: Align::Right },
    Column { title: "Net Amount", share: 0.125, align: Align::Right },
    Column { title: "Tax Type", share: 0.125, align: Align::Right },
    Column { title: "Tax Amount", share: 0.135, align: Align::Right },
    Column { title: "Total Amount", share: 0.12, align: Align::Right },
];

/// Position every piece of the invoice on pages.
pub fn layout(invoice: &Invoice, assets: &Assets, options: &RenderOptions) -> DocumentLayout {
    let figures = compute_invoice(invoice);
    let (page_width, page_height) = options.page_size.dimensions();
    let mut c = Composer::new(options, page_width, page_height);

    c.header(assets);
    c.parties(invoice);
    c.identifiers(invoice);
    c.table(invoice, &figures);
    c.totals(invoice, &figures);
    c.signature(invoice, assets);
    c.reverse_charge(invoice);

    let pages = c.finish();
    DocumentLayout {
        page_width,
        page_height,
        pages,
        figures,
    }
}

struct Composer<'a> {
    opts: &'a RenderOptions,
    width: f32,
    height: f32,
    pages: Vec<PageLayout>,
    page: PageLayout,
    y: f32,
}

impl<'a> Composer<'a> {
    fn new(opts: &'a RenderOptions, width: f32, height: f32) -> Self {
        Self {
            opts,
            width,
            height,
            pages: Vec::new(),
            page: PageLayout::default(),
            y: height - opts.margin,
        }
    }

    fn left(&self) -> f32 {
        self.opts.margin
    }

    fn right(&self) -> f32 {
        self.width - self.opts.margin
    }

    fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    fn bottom(&self) -> f32 {
        self.opts.margin + FOOTER_SPACE
    }

    /// Vertical room between the top margin and the footer of a fresh page.
    fn page_room(&self) -> f32 {
        self.height - self.opts.margin - self.bottom()
    }

    fn leading(&self, size: f32) -> f32 {
        size * 1.3
    }

    fn new_page(&mut self) {
        let done = std::mem::take(&mut self.page);
        self.pages.push(done);
        self.y = self.height - self.opts.margin;
    }

    /// Start a new page unless `needed` points fit above the bottom margin.
    /// Returns true if a page break happened.
    fn ensure(&mut self, needed: f32) -> bool {
        if self.y - needed < self.bottom() {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn text(&mut self, x: f32, y: f32, font: Font, size: f32, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.page.elements.push(Element::Text {
            x,
            y,
            font,
            size,
            text,
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn aligned(
        &mut self,
        align: Align,
        left: f32,
        right: f32,
        y: f32,
        font: Font,
        size: f32,
        text: &str,
    ) {
        let w = text_width(text, font, size);
        let x = match align {
            Align::Left => left,
            Align::Center => left + ((right - left) - w) / 2.0,
            Align::Right => right - w,
        };
        self.text(x, y, font, size, text);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.page.elements.push(Element::Line {
            from,
            to,
            width: LINE_WIDTH,
        });
    }

    /// Wrapped paragraph flowing down from the cursor, breaking pages as needed.
    fn paragraph(&mut self, x: f32, max_width: f32, font: Font, size: f32, text: &str) {
        let leading = self.leading(size);
        for line in wrap(text, font, size, max_width) {
            self.ensure(leading);
            self.y -= leading;
            self.text(x, self.y, font, size, line);
        }
    }

    fn header(&mut self, assets: &Assets) {
        let top = self.y;
        let mut block = self.opts.title_size + self.opts.font_size * 2.0;

        if let Some(logo) = assets.logo.as_ref() {
            let height = self.opts.image_height;
            let width = (height * logo.aspect_ratio()).min(self.content_width() * 0.4);
            self.page.elements.push(Element::Image {
                kind: AssetKind::Logo,
                x: self.left(),
                y: top - height,
                width,
                height,
            });
            block = block.max(height);
        }

        let (left, right) = (self.left(), self.right());
        let title_y = top - self.opts.title_size;
        self.aligned(Align::Right, left, right, title_y, Font::Bold, self.opts.title_size, TITLE);
        let sub_y = title_y - self.leading(self.opts.font_size) - 2.0;
        self.aligned(Align::Right, left, right, sub_y, Font::Regular, self.opts.font_size, SUBTITLE);

        self.y = top - block - 12.0;
    }

    fn parties(&mut self, invoice: &Invoice) {
        let size = self.opts.font_size;
        let heading = size + 3.0;
        let gap = 12.0;
        let col_width = (self.content_width() - gap) / 2.0;
        let columns = [
            (self.left(), "Sold By:", &invoice.seller),
            (self.left() + col_width + gap, "Billing Address:", &invoice.buyer),
        ];

        let wrapped: Vec<(f32, &str, usize, Vec<String>)> = columns
            .iter()
            .map(|(x, title, party)| {
                let mut lines = wrap(&party.name, Font::Bold, size, col_width);
                let name_lines = lines.len();
                lines.extend(wrap(&party.address, Font::Regular, size, col_width));
                (*x, *title, name_lines, lines)
            })
            .collect();

        let rows = wrapped.iter().map(|(_, _, _, l)| l.len()).max().unwrap_or(0);
        let block = self.leading(heading) + rows as f32 * self.leading(size);
        self.ensure(block);

        let top = self.y;
        for (x, title, name_lines, lines) in wrapped {
            let mut y = top - self.leading(heading);
            self.text(x, y, Font::Bold, heading, title);
            for (i, line) in lines.into_iter().enumerate() {
                y -= self.leading(size);
                let font = if i < name_lines { Font::Bold } else { Font::Regular };
                self.text(x, y, font, size, line);
            }
        }
        self.y = top - block - 10.0;
    }

    fn identifiers(&mut self, invoice: &Invoice) {
        let size = self.opts.font_size;
        let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        let left = [
            ("PAN No", invoice.pan.clone()),
            ("GST Registration No", invoice.gst_number.clone()),
            ("State/UT Code", invoice.state_code.clone()),
            ("Place of Supply", invoice.place_of_supply.clone()),
            ("Place of Delivery", invoice.place_of_delivery.clone()),
        ];
        let right = [
            ("Order Number", invoice.order_number.clone()),
            ("Order Date", date(invoice.order_date)),
            ("Invoice Number", invoice.invoice_number.clone()),
            ("Invoice Details", invoice.invoice_details.clone()),
            ("Invoice Date", date(invoice.invoice_date)),
        ];

        let gap = 12.0;
        let col_width = (self.content_width() - gap) / 2.0;
        let render = |pairs: &[(&str, String)]| -> Vec<String> {
            pairs
                .iter()
                .flat_map(|(label, value)| {
                    wrap(&format!("{label}: {value}"), Font::Regular, size, col_width)
                })
                .collect()
        };
        let left_lines = render(&left);
        let right_lines = render(&right);

        let rows = left_lines.len().max(right_lines.len());
        let block = rows as f32 * self.leading(size);
        self.ensure(block);

        let top = self.y;
        let right_x = self.left() + col_width + gap;
        for (i, line) in left_lines.into_iter().enumerate() {
            let y = top - (i + 1) as f32 * self.leading(size);
            self.text(self.left(), y, Font::Regular, size, line);
        }
        for (i, line) in right_lines.into_iter().enumerate() {
            let y = top - (i + 1) as f32 * self.leading(size);
            self.text(right_x, y, Font::Regular, size, line);
        }
        self.y = top - block - 14.0;
    }

    fn column_bounds(&self) -> Vec<(f32, f32)> {
        let mut x = self.left();
        COLUMNS
            .iter()
            .map(|col| {
                let w = col.share * self.content_width();
                let bounds = (x, x + w);
                x += w;
                bounds
            })
            .collect()
    }

    /// One bordered table row; leaves the cursor on its bottom rule.
    ///
    /// A row taller than the room left on the page is split between pages.
    /// With `repeat_header` the column titles are drawn again above each
    /// continued part.
    fn table_row(&mut self, cells: &[String], font: Font, repeat_header: bool) {
        let size = self.opts.font_size;
        let leading = self.leading(size);
        let bounds = self.column_bounds();

        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(&bounds)
            .map(|(cell, (l, r))| wrap(cell, font, size, (r - l) - 2.0 * CELL_PAD))
            .collect();
        let total = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

        let mut start = 0;
        while start < total {
            let mut fit = self.lines_that_fit(leading);
            if fit == 0 {
                self.new_page();
                if repeat_header {
                    self.table_header();
                }
                // At least one line per page, or a tiny page would never finish.
                fit = self.lines_that_fit(leading).max(1);
            }
            let end = (start + fit).min(total);
            self.row_segment(&wrapped, &bounds, start..end, font);
            start = end;
        }
    }

    fn lines_that_fit(&self, leading: f32) -> usize {
        let room = self.y - self.bottom() - 2.0 * CELL_PAD;
        // Tolerates float drift when a row was sized to fit exactly.
        // Negative room saturates to zero.
        ((room + 1e-3) / leading).floor() as usize
    }

    fn row_segment(
        &mut self,
        wrapped: &[Vec<String>],
        bounds: &[(f32, f32)],
        lines: Range<usize>,
        font: Font,
    ) {
        let size = self.opts.font_size;
        let leading = self.leading(size);
        let top = self.y;
        let bottom = top - lines.len() as f32 * leading - 2.0 * CELL_PAD;
        for ((col, cell), (l, r)) in COLUMNS.iter().zip(wrapped).zip(bounds) {
            let shown = cell.iter().skip(lines.start).take(lines.len());
            for (i, line) in shown.enumerate() {
                let y = top - CELL_PAD - size - i as f32 * leading;
                self.aligned(col.align, l + CELL_PAD, r - CELL_PAD, y, font, size, line);
            }
        }

        let (left, right) = (self.left(), self.right());
        if lines.start > 0 {
            self.line((left, top), (right, top));
        }
        self.line((left, bottom), (right, bottom));
        for (l, _) in bounds {
            self.line((*l, top), (*l, bottom));
        }
        self.line((right, top), (right, bottom));
        self.y = bottom;
    }

    fn table_header(&mut self) {
        let (left, right) = (self.left(), self.right());
        let top = self.y;
        self.line((left, top), (right, top));
        let titles: Vec<String> = COLUMNS.iter().map(|c| c.title.to_string()).collect();
        self.table_row(&titles, Font::Bold, false);
    }

    fn row_height(&self, cells: &[String]) -> f32 {
        let size = self.opts.font_size;
        let lines = cells
            .iter()
            .zip(self.column_bounds())
            .map(|(cell, (l, r))| wrap(cell, Font::Regular, size, (r - l) - 2.0 * CELL_PAD).len())
            .max()
            .unwrap_or(1);
        lines as f32 * self.leading(size) + 2.0 * CELL_PAD
    }

    fn table(&mut self, invoice: &Invoice, figures: &InvoiceFigures) {
        let header_height = self.row_height(&COLUMNS.map(|c| c.title.to_string()));
        let first_row = invoice
            .items
            .first()
            .zip(figures.lines.first())
            .map(|(item, line)| self.row_height(&row_cells(item, line)))
            .unwrap_or(0.0);
        // Rows taller than a page split themselves instead of moving.
        let room_below_header = self.page_room() - header_height;
        self.ensure(header_height + first_row.min(room_below_header));
        self.table_header();

        for (item, line) in invoice.items.iter().zip(&figures.lines) {
            let cells = row_cells(item, line);
            let height = self.row_height(&cells);
            if height <= room_below_header && self.ensure(height) {
                self.table_header();
            }
            self.table_row(&cells, Font::Regular, true);
        }
        self.y -= 14.0;
    }

    fn totals(&mut self, invoice: &Invoice, figures: &InvoiceFigures) {
        let size = self.opts.font_size + 3.0;
        let leading = self.leading(size);
        self.ensure(leading);
        self.y -= leading;
        let total = format!("Total Amount: \u{20b9}{}", format_amount(figures.grand_total));
        let (left, right) = (self.left(), self.right());
        self.aligned(Align::Right, left, right, self.y, Font::Bold, size, &total);

        if !invoice.amount_in_words.trim().is_empty() {
            self.y -= 4.0;
            let text = format!("Amount in Words: {}", invoice.amount_in_words.trim());
            let width = self.content_width();
            self.paragraph(left, width, Font::Regular, self.opts.font_size, &text);
        }
        self.y -= 14.0;
    }

    fn signature(&mut self, invoice: &Invoice, assets: &Assets) {
        let size = self.opts.font_size;
        let leading = self.leading(size);
        let image_height = assets
            .signature
            .as_ref()
            .map(|_| self.opts.image_height + 6.0)
            .unwrap_or(leading * 2.0);
        self.ensure(leading * 2.0 + image_height);

        let (left, right) = (self.left(), self.right());
        self.y -= leading;
        let heading = format!("For {}:", invoice.seller.name);
        self.aligned(Align::Right, left, right, self.y, Font::Bold, size, &heading);

        match assets.signature.as_ref() {
            Some(sig) => {
                let height = self.opts.image_height;
                let width = (height * sig.aspect_ratio()).min(self.content_width() * 0.4);
                self.y -= height + 4.0;
                self.page.elements.push(Element::Image {
                    kind: AssetKind::Signature,
                    x: right - width,
                    y: self.y,
                    width,
                    height,
                });
                self.y -= 2.0;
            }
            None => self.y -= image_height,
        }

        self.y -= leading;
        self.aligned(Align::Right, left, right, self.y, Font::Regular, size, "Authorized Signatory");
        self.y -= 12.0;
    }

    fn reverse_charge(&mut self, invoice: &Invoice) {
        let text = format!(
            "Whether the tax payable under reverse charge: {}",
            invoice.reverse_charge.label()
        );
        let (x, width) = (self.left(), self.content_width());
        self.paragraph(x, width, Font::Regular, self.opts.font_size, &text);
    }

    /// Close the last page and stamp "Page i of n" footers.
    fn finish(mut self) -> Vec<PageLayout> {
        self.new_page();
        let count = self.pages.len();
        let size = self.opts.font_size - 1.0;
        let (left, right) = (self.left(), self.right());
        let y = self.opts.margin;
        for (i, page) in self.pages.iter_mut().enumerate() {
            let label = format!("Page {} of {}", i + 1, count);
            let w = text_width(&label, Font::Regular, size);
            page.elements.push(Element::Text {
                x: left + ((right - left) - w) / 2.0,
                y,
                font: Font::Regular,
                size,
                text: label,
            });
        }
        self.pages
    }
}

/// Table cells for one line: the entered values, then the computed columns.
fn row_cells(item: &LineItem, line: &LineFigures) -> Vec<String> {
    let [net, tax_type, tax_amount, total] = line.cells();
    vec![
        line.serial.to_string(),
        item.description.clone(),
        format_plain(item.unit_price),
        format_plain(item.quantity),
        net,
        tax_type,
        tax_amount,
        total,
    ]
}
