//! Cell contents shared by every back end.
//!
//! Renderers never format amounts or dates themselves; they lay out the rows
//! produced here, which keeps the LaTeX and PDF output numerically identical.

use crate::ledger::{Ledger, Page};
use crate::locale::{format_amount, format_date};
use crate::types::*;

/// Document title printed on top of the ledger
pub const DEFAULT_TITLE: &str = "Einnahmen und Ausgaben";

/// Label of the per-page subtotal row
pub const CARRIED_FORWARD_LABEL: &str = "Übertrag";

/// Label of the grand total row in the summary
pub const GRAND_TOTAL_LABEL: &str = "Gesamt";

/// Column headings of the page summary table
pub const SUMMARY_HEADINGS: [&str; 3] = ["Seite", "Einnahmen", "Ausgaben"];

/// Heading of one ledger column, split into printed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHeading {
    /// Bold heading lines
    pub lines: &'static [&'static str],
    /// Small print below the heading
    pub note: &'static [&'static str],
}

/// Headings of the five ledger columns, numbered 1 to 5 on the form
pub const COLUMN_HEADINGS: [ColumnHeading; 5] = [
    ColumnHeading {
        lines: &["Lfd. Nummer,", "zugleich", "Beleg-Nr."],
        note: &[],
    },
    ColumnHeading {
        lines: &["Datum des", "Eingangs bzw.", "der Auszahlung"],
        note: &[],
    },
    ColumnHeading {
        lines: &["Bezeichnung der Einnahme", "bzw. Ausgabe"],
        note: &[
            "(soweit aus den Belegen nicht ersichtlich,",
            "auch Einzahler bzw. Empfänger)",
        ],
    },
    ColumnHeading {
        lines: &["Einnahmen", "EUR"],
        note: &[],
    },
    ColumnHeading {
        lines: &["Ausgaben", "EUR"],
        note: &[],
    },
];

/// One transaction line of a ledger page.
///
/// The running number column stays blank; it is filled in by hand on the
/// printed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub date: String,
    /// Raw counterparty text, escaped by the renderer
    pub counterparty: String,
    pub income: String,
    pub expense: String,
}

impl SheetRow {
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            date: format_date(&transaction.date),
            counterparty: single_line(&transaction.counterparty),
            income: transaction.income().map(|v| format_amount(&v)).unwrap_or_default(),
            expense: transaction.expense().map(|v| format_amount(&v)).unwrap_or_default(),
        }
    }
}

/// Formatted pair of totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsRow {
    pub income: String,
    pub expense: String,
}

impl TotalsRow {
    /// Carried-forward totals of one page
    pub fn for_page(page: &Page) -> Self {
        Self {
            income: format_amount(&page.income_total),
            expense: format_amount(&page.expense_total),
        }
    }
}

/// One row of the closing summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Page number, or [`GRAND_TOTAL_LABEL`] for the last row
    pub label: String,
    pub totals: TotalsRow,
}

/// Transaction rows of a page in order
pub fn sheet_rows(page: &Page) -> Vec<SheetRow> {
    page.transactions.iter().map(SheetRow::from_transaction).collect()
}

/// Summary rows: one per page followed by the grand total
pub fn summary_rows(ledger: &Ledger) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = ledger
        .pages()
        .iter()
        .map(|page| SummaryRow {
            label: page.number.to_string(),
            totals: TotalsRow::for_page(page),
        })
        .collect();

    rows.push(SummaryRow {
        label: GRAND_TOTAL_LABEL.to_string(),
        totals: TotalsRow {
            income: format_amount(ledger.income_total()),
            expense: format_amount(ledger.expense_total()),
        },
    });
    rows
}

/// Collapse line breaks and tabs inside a field into single spaces
pub fn single_line(text: &str) -> String {
    text.split(['\r', '\n', '\t'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerBuilder;
    use chrono::NaiveDate;

    fn txn(day: u32, name: &str, amount: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            name,
            amount.parse().unwrap(),
        )
    }

    #[test]
    fn test_sheet_row_places_amount_by_sign() {
        let income = SheetRow::from_transaction(&txn(1, "Kunde", "1234.5"));
        assert_eq!(income.date, "01.02.2024");
        assert_eq!(income.income, "1234,50");
        assert_eq!(income.expense, "");

        let expense = SheetRow::from_transaction(&txn(2, "Lieferant", "-99.99"));
        assert_eq!(expense.income, "");
        assert_eq!(expense.expense, "99,99");

        let zero = SheetRow::from_transaction(&txn(3, "Nullbuchung", "0"));
        assert_eq!(zero.income, "");
        assert_eq!(zero.expense, "");
    }

    #[test]
    fn test_summary_rows_end_with_grand_total() {
        let ledger = LedgerBuilder::new()
            .extend((1..=28).map(|d| txn(d, "x", "10")))
            .add(txn(1, "y", "-5.5"))
            .build();

        let rows = summary_rows(&ledger);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "1");
        assert_eq!(rows[1].label, "2");
        assert_eq!(rows[2].label, GRAND_TOTAL_LABEL);
        assert_eq!(rows[2].totals.income, "280,00");
        assert_eq!(rows[2].totals.expense, "5,50");
        // the expense sorts onto page 1 (1 Feb), so page 2 has none
        assert_eq!(rows[0].totals.expense, "5,50");
        assert_eq!(rows[1].totals.expense, "");
    }

    #[test]
    fn test_summary_of_empty_ledger() {
        let rows = summary_rows(&LedgerBuilder::new().build());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, GRAND_TOTAL_LABEL);
        assert_eq!(rows[0].totals.income, "");
        assert_eq!(rows[0].totals.expense, "");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("Foo\r\nBar\tBaz"), "Foo Bar Baz");
        assert_eq!(single_line("plain"), "plain");
    }
}
