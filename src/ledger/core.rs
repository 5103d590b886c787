//! Ledger assembly: chronological order, pagination and totals

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::ledger::page::{Page, ROWS_PER_PAGE};
use crate::types::*;

/// Paginated, totaled transactions of one conversion.
///
/// This is the only input of the renderers, so every back end prints the
/// same numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pages: Vec<Page>,
    income_total: BigDecimal,
    expense_total: BigDecimal,
}

impl Ledger {
    /// Pages in order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Grand total of income (`Gesamt`)
    pub fn income_total(&self) -> &BigDecimal {
        &self.income_total
    }

    /// Grand total of expenses (`Gesamt`)
    pub fn expense_total(&self) -> &BigDecimal {
        &self.expense_total
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// All transactions in ledger order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.pages.iter().flat_map(|page| page.transactions.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Collects transactions and builds a [`Ledger`]
#[derive(Debug, Clone, Default)]
pub struct LedgerBuilder {
    transactions: Vec<Transaction>,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one transaction
    pub fn add(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    /// Add transactions in input order
    pub fn extend<I: IntoIterator<Item = Transaction>>(mut self, transactions: I) -> Self {
        self.transactions.extend(transactions);
        self
    }

    /// Sort by date, chunk into pages and total them.
    ///
    /// The sort is stable: transactions on the same day keep their input
    /// order. Grand totals are folded from the page totals.
    pub fn build(mut self) -> Ledger {
        self.transactions.sort_by_key(|t| t.date);

        let mut pages = Vec::with_capacity(self.transactions.len().div_ceil(ROWS_PER_PAGE));
        let mut remaining = self.transactions.into_iter().peekable();
        while remaining.peek().is_some() {
            let chunk: Vec<Transaction> = remaining.by_ref().take(ROWS_PER_PAGE).collect();
            pages.push(Page::new(pages.len() + 1, chunk));
        }

        let income_total: BigDecimal = pages.iter().map(|p| &p.income_total).sum();
        let expense_total: BigDecimal = pages.iter().map(|p| &p.expense_total).sum();

        log::debug!(
            "built ledger with {} page(s), income {}, expenses {}",
            pages.len(),
            income_total,
            expense_total
        );

        Ledger {
            pages,
            income_total,
            expense_total,
        }
    }
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        LedgerBuilder::new().extend(iter).build()
    }
}
