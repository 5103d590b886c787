//! PDF back end
//!
//! Rendering happens in two steps. [`PdfRenderer::layout`] turns the ledger
//! into a list of sheets with positioned text and rules (all coordinates in
//! millimetres from the bottom-left corner of an A4 page). The painter then
//! replays those operations with `printpdf`.
//!
//! Output bytes depend on the ledger only: document dates and the trailer
//! `/ID` are derived from the transactions instead of the clock.

use chrono::NaiveTime;
use printpdf::lopdf::{self, Object, StringFormat};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, OffsetDateTime, PdfDocument, PdfLayerReference, Point,
};
use std::collections::VecDeque;

use crate::ledger::{Ledger, Page};
use crate::render::metrics::{text_width, wrap_text};
use crate::render::sheet::*;
use crate::traits::DocumentRenderer;
use crate::types::*;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 10.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;

const LEDGER_COLUMNS: [f32; 5] = [26.0, 26.0, 76.0, 26.0, 26.0];
const SUMMARY_COLUMNS: [f32; 3] = [30.0, 40.0, 40.0];

const TITLE_SIZE: f32 = 18.0;
const TITLE_BLOCK: f32 = 14.0;
const FONT_SIZE: f32 = 8.0;
const NOTE_SIZE: f32 = 6.0;
const SUMMARY_FONT_SIZE: f32 = 10.0;
const FOOTER_SIZE: f32 = 9.0;
const FOOTER_Y: f32 = 12.0;

/// Distance between baselines of wrapped lines
const LEADING: f32 = 3.2;
const PADDING: f32 = 0.8;
/// Baseline offset below the top padding of a cell
const ASCENT: f32 = 2.3;
const SUMMARY_ROW_HEIGHT: f32 = 8.0;

const THICK: f32 = 1.2;
const THIN: f32 = 0.5;
const SUMMARY_BOX: f32 = 1.0;

/// A single drawing instruction on a sheet
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Rule {
        from: (f32, f32),
        to: (f32, f32),
        /// Line width in points
        thickness: f32,
    },
}

/// One physical PDF page
#[derive(Debug, Clone, PartialEq)]
pub struct PdfSheet {
    /// 1-based sheet number, printed in the footer
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl PdfSheet {
    /// All text drawn on this sheet, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

/// Renders a ledger directly into a paginated PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfRenderer {
    title: String,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl PdfRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Plan every sheet of the document without touching PDF objects.
    ///
    /// Each ledger page starts on a fresh sheet. A page whose rows do not fit
    /// above the bottom margin continues on the next sheet below a repeated
    /// heading.
    pub fn layout(&self, ledger: &Ledger) -> Vec<PdfSheet> {
        let mut sheets = SheetStack::default();
        let mut top = sheets.open_first(&self.title);

        for page in ledger.pages() {
            if page.number > 1 {
                top = sheets.open();
            }
            layout_page_table(&mut sheets, top, page);
        }

        if !ledger.is_empty() {
            top = sheets.open();
        }
        layout_summary(&mut sheets, top, &summary_rows(ledger));

        sheets.finish()
    }

    fn paint(&self, ledger: &Ledger, sheets: &[PdfSheet]) -> ConvertResult<Vec<u8>> {
        let stamp = document_date(ledger)?;
        let id = document_id(ledger);

        let (doc, first_page, first_layer) =
            PdfDocument::new(self.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let doc = doc
            .with_creation_date(stamp)
            .with_mod_date(stamp)
            .with_metadata_date(stamp)
            .with_document_id(id.clone());

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ConvertError::render(OutputFormat::Pdf, e))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ConvertError::render(OutputFormat::Pdf, e))?;

        for (idx, sheet) in sheets.iter().enumerate() {
            let layer = if idx == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };
            paint_sheet(&layer, sheet, &regular, &bold);
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| ConvertError::render(OutputFormat::Pdf, e))?;
        pin_trailer_id(&bytes, &id)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, ledger: &Ledger) -> ConvertResult<Vec<u8>> {
        let sheets = self.layout(ledger);
        log::debug!("laid out {} PDF sheet(s)", sheets.len());
        self.paint(ledger, &sheets)
    }
}

/// Midnight (UTC) of the latest booking date, or the Unix epoch for an empty ledger
fn document_date(ledger: &Ledger) -> ConvertResult<OffsetDateTime> {
    let Some(last) = ledger.transactions().map(|t| t.date).max() else {
        return Ok(OffsetDateTime::UNIX_EPOCH);
    };
    let seconds = last.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| ConvertError::render(OutputFormat::Pdf, e))
}

/// 32 character document id: transaction count, first and last booking day, page count
pub fn document_id(ledger: &Ledger) -> String {
    let day = |date: Option<chrono::NaiveDate>| {
        date.map(|d| d.format("%Y%m%d").to_string())
            .unwrap_or_else(|| "00000000".to_string())
    };
    let dates = || ledger.transactions().map(|t| t.date);
    format!(
        "{:08X}{}{}{:08X}",
        ledger.transaction_count(),
        day(dates().min()),
        day(dates().max()),
        ledger.page_count()
    )
}

/// `printpdf` writes a random instance id as the second half of the trailer
/// `/ID`; both halves are replaced with the document id.
fn pin_trailer_id(bytes: &[u8], id: &str) -> ConvertResult<Vec<u8>> {
    let mut document =
        lopdf::Document::load_mem(bytes).map_err(|e| ConvertError::render(OutputFormat::Pdf, e))?;
    let id = Object::String(id.as_bytes().to_vec(), StringFormat::Literal);
    document.trailer.set("ID", Object::Array(vec![id.clone(), id]));

    let mut out = Vec::new();
    document
        .save_to(&mut out)
        .map_err(|e| ConvertError::render(OutputFormat::Pdf, e))?;
    Ok(out)
}

fn paint_sheet(
    layer: &PdfLayerReference,
    sheet: &PdfSheet,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for op in &sheet.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                bold: is_bold,
                text,
            } => {
                let font = if *is_bold { bold } else { regular };
                layer.use_text(text.as_str(), *size, Mm(*x), Mm(*y), font);
            }
            DrawOp::Rule {
                from,
                to,
                thickness,
            } => {
                layer.set_outline_thickness(*thickness);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(from.0), Mm(from.1)), false),
                        (Point::new(Mm(to.0), Mm(to.1)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

/// Sheets under construction; every sheet gets its footer when it is opened
#[derive(Default)]
struct SheetStack {
    sheets: Vec<PdfSheet>,
}

impl SheetStack {
    /// Open the first sheet with the document title; returns the top of the free area
    fn open_first(&mut self, title: &str) -> f32 {
        let top = self.open();
        let baseline = top - 6.0;
        self.current().push(DrawOp::Text {
            x: centered_x(PAGE_WIDTH / 2.0, title, TITLE_SIZE, true),
            y: baseline,
            size: TITLE_SIZE,
            bold: true,
            text: title.to_string(),
        });
        top - TITLE_BLOCK
    }

    /// Open a new sheet; returns the top of the free area
    fn open(&mut self) -> f32 {
        let number = self.sheets.len() + 1;
        let footer = format!("Seite {}", number);
        self.sheets.push(PdfSheet {
            number,
            ops: vec![DrawOp::Text {
                x: centered_x(PAGE_WIDTH / 2.0, &footer, FOOTER_SIZE, false),
                y: FOOTER_Y,
                size: FOOTER_SIZE,
                bold: false,
                text: footer,
            }],
        });
        PAGE_HEIGHT - MARGIN_TOP
    }

    fn current(&mut self) -> &mut Vec<DrawOp> {
        if self.sheets.is_empty() {
            self.open();
        }
        let last = self.sheets.len() - 1;
        &mut self.sheets[last].ops
    }

    fn finish(self) -> Vec<PdfSheet> {
        self.sheets
    }
}

#[derive(Debug, Clone)]
struct CellLine {
    text: String,
    size: f32,
    bold: bool,
}

/// Wrapped cell text of one table row and the rule drawn below it
#[derive(Debug, Clone)]
struct RowCells {
    cells: Vec<Vec<CellLine>>,
    centered: bool,
    rule_below: f32,
}

impl RowCells {
    fn new(cells: Vec<Vec<CellLine>>, centered: bool, rule_below: f32) -> Self {
        Self {
            cells,
            centered,
            rule_below,
        }
    }

    fn line_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(1).max(1)
    }

    fn height(&self) -> f32 {
        self.line_count() as f32 * LEADING + 2.0 * PADDING
    }

    /// Keep the first `lines` lines of every cell; the returned row holds the rest
    fn split_off(&mut self, lines: usize) -> RowCells {
        let rest = self
            .cells
            .iter_mut()
            .map(|cell| {
                if cell.len() > lines {
                    cell.split_off(lines)
                } else {
                    Vec::new()
                }
            })
            .collect();
        RowCells::new(rest, self.centered, self.rule_below)
    }
}

/// Wrap `text` to the inner width of a ledger column
fn wrapped(text: &str, column: usize, size: f32, bold: bool) -> Vec<CellLine> {
    wrap_text(text, LEDGER_COLUMNS[column] - 2.0 * PADDING, size, bold)
        .into_iter()
        .map(|text| CellLine { text, size, bold })
        .collect()
}

fn table_width() -> f32 {
    PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn heading_row() -> RowCells {
    let cells = COLUMN_HEADINGS
        .iter()
        .enumerate()
        .map(|(column, heading)| {
            let mut lines: Vec<CellLine> = heading
                .lines
                .iter()
                .flat_map(|l| wrapped(l, column, FONT_SIZE, true))
                .collect();
            lines.extend(heading.note.iter().flat_map(|l| wrapped(l, column, NOTE_SIZE, true)));
            lines
        })
        .collect();
    RowCells::new(cells, false, THIN)
}

fn number_row() -> RowCells {
    let cells = (0..LEDGER_COLUMNS.len())
        .map(|column| wrapped(&(column + 1).to_string(), column, FONT_SIZE, true))
        .collect();
    RowCells::new(cells, true, THICK)
}

fn transaction_row(row: &SheetRow) -> RowCells {
    let texts = ["", row.date.as_str(), &row.counterparty, &row.income, &row.expense];
    let cells = texts
        .iter()
        .enumerate()
        .map(|(column, text)| wrapped(text, column, FONT_SIZE, false))
        .collect();
    RowCells::new(cells, false, THIN)
}

fn carried_forward_row(totals: &TotalsRow) -> RowCells {
    let texts = ["", "", CARRIED_FORWARD_LABEL, &totals.income, &totals.expense];
    let cells = texts
        .iter()
        .enumerate()
        .map(|(column, text)| wrapped(text, column, FONT_SIZE, true))
        .collect();
    RowCells::new(cells, false, THICK)
}

/// The part of a page table that lands on one sheet
struct TableSegment {
    top: f32,
    y: f32,
    /// Rows with the y coordinate of their upper edge
    rows: Vec<(f32, RowCells)>,
    body_rows: usize,
}

impl TableSegment {
    fn open(top: f32, header: &[RowCells]) -> Self {
        let mut segment = Self {
            top,
            y: top,
            rows: Vec::new(),
            body_rows: 0,
        };
        for row in header {
            segment.place(row.clone());
        }
        segment
    }

    fn place(&mut self, row: RowCells) {
        let height = row.height();
        self.rows.push((self.y, row));
        self.y -= height;
    }

    fn push(&mut self, row: RowCells) {
        self.place(row);
        self.body_rows += 1;
    }

    /// Height left above the bottom margin
    fn room(&self) -> f32 {
        self.y - MARGIN_BOTTOM
    }

    fn close(self, ops: &mut Vec<DrawOp>) {
        let left = MARGIN_LEFT;
        let right = left + table_width();
        let last = self.rows.len().saturating_sub(1);

        ops.push(rule(left, self.top, right, self.top, THICK));
        for (idx, (row_top, row)) in self.rows.iter().enumerate() {
            layout_row_text(ops, *row_top, row);
            let bottom = row_top - row.height();
            let thickness = if idx == last { THICK } else { row.rule_below };
            ops.push(rule(left, bottom, right, bottom, thickness));
        }

        let mut x = left;
        ops.push(rule(x, self.top, x, self.y, THICK));
        for (idx, width) in LEDGER_COLUMNS.iter().enumerate() {
            x += width;
            let thickness = if idx == LEDGER_COLUMNS.len() - 1 {
                THICK
            } else {
                THIN
            };
            ops.push(rule(x, self.top, x, self.y, thickness));
        }
    }
}

fn layout_row_text(ops: &mut Vec<DrawOp>, top: f32, row: &RowCells) {
    let mut x = MARGIN_LEFT;
    for (cell, width) in row.cells.iter().zip(LEDGER_COLUMNS) {
        for (line_idx, line) in cell.iter().enumerate() {
            let baseline = top - PADDING - ASCENT - line_idx as f32 * LEADING;
            let x_text = if row.centered {
                centered_x(x + width / 2.0, &line.text, line.size, line.bold)
            } else {
                x + PADDING
            };
            ops.push(text(x_text, baseline, line.size, line.bold, &line.text));
        }
        x += width;
    }
}

fn layout_page_table(sheets: &mut SheetStack, top: f32, page: &Page) {
    let header = [heading_row(), number_row()];

    let mut pending: VecDeque<RowCells> = sheet_rows(page).iter().map(transaction_row).collect();
    if let Some(last) = pending.back_mut() {
        last.rule_below = THICK;
    }
    pending.push_back(carried_forward_row(&TotalsRow::for_page(page)));

    let mut table = TableSegment::open(top, &header);
    while let Some(mut row) = pending.pop_front() {
        // the subtotal stays on the sheet of the last transaction
        let keep_with = if pending.len() == 1 {
            pending[0].height()
        } else {
            0.0
        };
        if row.height() + keep_with > table.room() && table.body_rows > 0 {
            table.close(sheets.current());
            table = TableSegment::open(sheets.open(), &header);
        }

        if row.height() > table.room() {
            let fitting = ((table.room() - 2.0 * PADDING) / LEADING).floor().max(1.0) as usize;
            let rest = row.split_off(fitting);
            table.push(row);
            pending.push_front(rest);
            table.close(sheets.current());
            table = TableSegment::open(sheets.open(), &header);
            continue;
        }

        table.push(row);
    }
    table.close(sheets.current());
}

fn layout_summary(sheets: &mut SheetStack, mut top: f32, rows: &[SummaryRow]) {
    let heading: Vec<String> = SUMMARY_HEADINGS.iter().map(|s| s.to_string()).collect();
    let body: Vec<(Vec<String>, bool)> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let cells = vec![
                row.label.clone(),
                row.totals.income.clone(),
                row.totals.expense.clone(),
            ];
            (cells, idx + 1 == rows.len())
        })
        .collect();

    let mut remaining = body.as_slice();
    loop {
        let capacity = (((top - MARGIN_BOTTOM) / SUMMARY_ROW_HEIGHT) as usize)
            .saturating_sub(1)
            .max(1);
        let take = capacity.min(remaining.len());
        let (chunk, rest) = remaining.split_at(take);
        layout_summary_chunk(sheets.current(), top, &heading, chunk);

        if rest.is_empty() {
            break;
        }
        remaining = rest;
        top = sheets.open();
    }
}

fn layout_summary_chunk(
    ops: &mut Vec<DrawOp>,
    top: f32,
    heading: &[String],
    rows: &[(Vec<String>, bool)],
) {
    let width: f32 = SUMMARY_COLUMNS.iter().sum();
    let left = MARGIN_LEFT + (table_width() - width) / 2.0;
    let right = left + width;
    let mut y = top;

    let all_rows = std::iter::once((heading, true, true)).chain(
        rows.iter()
            .map(|(cells, is_total)| (cells.as_slice(), *is_total, false)),
    );

    ops.push(rule(left, y, right, y, THICK));
    for (cells, bold, is_heading) in all_rows {
        if bold && !is_heading {
            ops.push(rule(left, y, right, y, THICK));
        }

        let baseline = y - SUMMARY_ROW_HEIGHT / 2.0 - 1.2;
        let mut x = left;
        for (cell, col_width) in cells.iter().zip(SUMMARY_COLUMNS) {
            if !cell.is_empty() {
                let x_text = centered_x(x + col_width / 2.0, cell, SUMMARY_FONT_SIZE, bold);
                ops.push(text(x_text, baseline, SUMMARY_FONT_SIZE, bold, cell));
            }
            x += col_width;
        }

        y -= SUMMARY_ROW_HEIGHT;
        let thickness = if bold && !is_heading { THICK } else { THIN };
        ops.push(rule(left, y, right, y, thickness));
    }

    let bottom = y;
    let mut x = left;
    ops.push(rule(x, top, x, bottom, SUMMARY_BOX));
    for (idx, col_width) in SUMMARY_COLUMNS.iter().enumerate() {
        x += col_width;
        let thickness = if idx == SUMMARY_COLUMNS.len() - 1 {
            SUMMARY_BOX
        } else {
            THIN
        };
        ops.push(rule(x, top, x, bottom, thickness));
    }
}

fn text(x: f32, y: f32, size: f32, bold: bool, text: &str) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        size,
        bold,
        text: text.to_string(),
    }
}

fn rule(x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) -> DrawOp {
    DrawOp::Rule {
        from: (x1, y1),
        to: (x2, y2),
        thickness,
    }
}

fn centered_x(center: f32, text: &str, size: f32, bold: bool) -> f32 {
    center - text_width(text, size, bold) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LedgerBuilder, ROWS_PER_PAGE};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn txn(day: u32, name: &str, amount: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            name,
            amount.parse().unwrap(),
        )
    }

    fn ledger_of(n: usize) -> Ledger {
        (0..n)
            .map(|i| {
                let amount = if i % 2 == 0 { "10.00" } else { "-2.50" };
                txn(1 + (i % 28) as u32, &format!("Partner {}", i), amount)
            })
            .collect()
    }

    /// Upper-case payee of roughly 200 characters built from numbered words
    fn long_payee(tag: usize) -> String {
        (0..24)
            .map(|w| format!("LASTSCHRIFT{}W{}", tag, w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn lowest_y(sheet: &PdfSheet) -> f32 {
        sheet
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } if *y > FOOTER_Y => Some(*y),
                DrawOp::Rule { from, to, .. } => Some(from.1.min(to.1)),
                _ => None,
            })
            .fold(f32::MAX, f32::min)
    }

    fn words_on(sheets: &[PdfSheet]) -> Vec<String> {
        sheets
            .iter()
            .flat_map(|s| s.texts())
            .flat_map(str::split_whitespace)
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_one_sheet_per_page_plus_summary() {
        let sheets = PdfRenderer::default().layout(&ledger_of(30));
        assert_eq!(sheets.len(), 3);

        for (idx, sheet) in sheets.iter().enumerate() {
            assert_eq!(sheet.number, idx + 1);
            let footer = format!("Seite {}", idx + 1);
            assert!(sheet.texts().any(|t| t == footer));
        }

        assert!(sheets[0].texts().any(|t| t == DEFAULT_TITLE));
        assert!(!sheets[1].texts().any(|t| t == DEFAULT_TITLE));
        assert_eq!(sheets[0].texts().filter(|t| *t == CARRIED_FORWARD_LABEL).count(), 1);
        assert!(sheets[2].texts().any(|t| t == GRAND_TOTAL_LABEL));
    }

    #[test]
    fn test_full_counterparty_is_laid_out() {
        let payee = long_payee(0);
        assert!(payee.len() >= 200);
        let ledger: Ledger = vec![txn(3, &payee, "-19.99")].into_iter().collect();

        let sheets = PdfRenderer::default().layout(&ledger);
        let drawn: Vec<&str> = sheets[0].texts().collect();
        assert!(drawn.join(" ").contains(&payee));
    }

    #[test]
    fn test_tall_rows_continue_on_next_sheet() {
        let ledger: Ledger = (0..ROWS_PER_PAGE)
            .map(|i| txn(1 + i as u32, &long_payee(i), "-1"))
            .collect();
        let sheets = PdfRenderer::default().layout(&ledger);
        let (tables, summary) = sheets.split_at(sheets.len() - 1);
        assert!(tables.len() > 1);

        for sheet in &sheets {
            assert!(lowest_y(sheet) >= MARGIN_BOTTOM - 1e-3, "sheet {}", sheet.number);
        }
        for sheet in tables {
            assert!(sheet.texts().any(|t| t == "Bezeichnung der Einnahme"));
        }

        let subtotals: Vec<usize> = tables
            .iter()
            .map(|s| s.texts().filter(|t| *t == CARRIED_FORWARD_LABEL).count())
            .collect();
        assert_eq!(subtotals.iter().sum::<usize>(), 1);
        assert_eq!(subtotals.last(), Some(&1));

        let words: HashSet<String> = words_on(tables).into_iter().collect();
        for i in 0..ROWS_PER_PAGE {
            for word in long_payee(i).split_whitespace() {
                assert!(words.contains(word), "{word} missing");
            }
        }
        assert!(summary[0].texts().any(|t| t == GRAND_TOTAL_LABEL));
    }

    #[test]
    fn test_oversized_row_is_split_across_sheets() {
        let payee: Vec<String> = (0..900).map(|w| format!("Wort{}", w)).collect();
        let ledger: Ledger = vec![txn(1, &payee.join(" "), "5")].into_iter().collect();
        let sheets = PdfRenderer::default().layout(&ledger);
        assert!(sheets.len() > 2);

        for sheet in &sheets {
            assert!(lowest_y(sheet) >= MARGIN_BOTTOM - 1e-3, "sheet {}", sheet.number);
        }
        let drawn: Vec<String> = words_on(&sheets)
            .into_iter()
            .filter(|w| w.starts_with("Wort"))
            .collect();
        assert_eq!(drawn, payee);
    }

    #[test]
    fn test_table_text_stays_inside_its_column() {
        let ledger: Ledger = (0..ROWS_PER_PAGE)
            .map(|i| {
                let payee = format!("WWW MMM {} {}", "W".repeat(40), long_payee(i));
                txn(1 + i as u32, &payee, "-98765.43")
            })
            .collect();
        let sheets = PdfRenderer::default().layout(&ledger);
        let tables = &sheets[..sheets.len() - 1];

        let mut checked = 0;
        for sheet in tables {
            for op in &sheet.ops {
                let DrawOp::Text { x, size, bold, text, .. } = op else {
                    continue;
                };
                if *size == TITLE_SIZE || *size == FOOTER_SIZE {
                    continue;
                }
                let mut right = MARGIN_LEFT;
                let mut column_right = None;
                for width in LEDGER_COLUMNS {
                    let left = right;
                    right += width;
                    if *x >= left && *x < right {
                        column_right = Some(right);
                    }
                }
                let column_right = column_right.unwrap();
                assert!(
                    x + text_width(text, *size, *bold) <= column_right + 1e-3,
                    "{text:?} overflows its column"
                );
                checked += 1;
            }
        }
        assert!(checked > ROWS_PER_PAGE * 4);
    }

    #[test]
    fn test_empty_ledger_has_summary_on_first_sheet() {
        let sheets = PdfRenderer::default().layout(&LedgerBuilder::new().build());
        assert_eq!(sheets.len(), 1);
        let texts: Vec<&str> = sheets[0].texts().collect();
        assert!(texts.contains(&DEFAULT_TITLE));
        assert!(texts.contains(&GRAND_TOTAL_LABEL));
        assert!(!texts.contains(&CARRIED_FORWARD_LABEL));
    }

    #[test]
    fn test_long_summary_continues_on_next_sheet() {
        let ledger = ledger_of(ROWS_PER_PAGE * 40);
        let sheets = PdfRenderer::default().layout(&ledger);
        assert!(sheets.len() > 41);

        let summary_sheets = &sheets[40..];
        for sheet in summary_sheets {
            assert!(sheet.texts().any(|t| t == "Seite"));
            assert!(lowest_y(sheet) >= MARGIN_BOTTOM);
        }
        let labels: usize = summary_sheets
            .iter()
            .map(|s| s.texts().filter(|t| t.parse::<usize>().is_ok()).count())
            .sum();
        assert_eq!(labels, 40);
        assert!(summary_sheets
            .last()
            .unwrap()
            .texts()
            .any(|t| t == GRAND_TOTAL_LABEL));
    }

    #[test]
    fn test_document_id_follows_ledger_content() {
        assert_eq!(
            document_id(&LedgerBuilder::new().build()),
            "00000000000000000000000000000000"
        );

        let id = document_id(&ledger_of(30));
        assert_eq!(id.len(), 32);
        assert_eq!(id, "0000001E202406012024062800000002");
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let ledger = ledger_of(3);
        let bytes = PdfRenderer::default().render(&ledger).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let id = document_id(&ledger);
        assert!(bytes.windows(id.len()).any(|w| w == id.as_bytes()));
    }

    #[test]
    fn test_render_is_byte_identical() {
        let ledger = ledger_of(30);
        let renderer = PdfRenderer::default();
        let first = renderer.render(&ledger).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let second = renderer.render(&ledger).unwrap();
        assert_eq!(first, second);
    }
}
