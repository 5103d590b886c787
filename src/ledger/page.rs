//! A single ledger sheet: up to [`ROWS_PER_PAGE`] transactions and their subtotal

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Capacity of one ledger page, matching the printed form
pub const ROWS_PER_PAGE: usize = 27;

/// One page of the ledger with its carried-forward totals (`Übertrag`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// Transactions in chronological order
    pub transactions: Vec<Transaction>,
    /// Sum of all positive amounts on this page
    pub income_total: BigDecimal,
    /// Sum of the magnitudes of all negative amounts on this page
    pub expense_total: BigDecimal,
}

impl Page {
    /// Create a page and compute its totals
    pub fn new(number: usize, transactions: Vec<Transaction>) -> Self {
        let income_total: BigDecimal = transactions.iter().filter_map(Transaction::income).sum();
        let expense_total: BigDecimal = transactions.iter().filter_map(Transaction::expense).sum();
        Self {
            number,
            transactions,
            income_total,
            expense_total,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(amount: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "Test",
            amount.parse().unwrap(),
        )
    }

    #[test]
    fn test_page_totals_split_by_sign() {
        let page = Page::new(
            1,
            vec![txn("100.10"), txn("-20.05"), txn("0"), txn("0.90"), txn("-0.95")],
        );
        assert_eq!(page.len(), 5);
        assert_eq!(page.income_total, "101.00".parse::<BigDecimal>().unwrap());
        assert_eq!(page.expense_total, "21.00".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn test_empty_page_totals_are_zero() {
        let page = Page::new(1, Vec::new());
        assert!(page.is_empty());
        assert_eq!(page.income_total, BigDecimal::from(0));
        assert_eq!(page.expense_total, BigDecimal::from(0));
    }
}
