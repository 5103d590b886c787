//! Core types and data structures for the ledger sheet pipeline

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which side of the ledger a transaction is booked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlow {
    /// Money received - positive amounts
    Income,
    /// Money paid out - negative amounts
    Expense,
    /// Zero (or unparseable) amount, shown blank in both columns
    Neutral,
}

/// One booked line of a bank export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Booking date (`Buchungstag`)
    pub date: NaiveDate,
    /// Payer or payee as exported by the bank
    pub counterparty: String,
    /// Signed amount; positive is income, negative is expense
    pub amount: BigDecimal,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(date: NaiveDate, counterparty: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            date,
            counterparty: counterparty.into(),
            amount,
        }
    }

    /// Classify the transaction by the sign of its amount
    pub fn cash_flow(&self) -> CashFlow {
        let zero = BigDecimal::from(0);
        if self.amount > zero {
            CashFlow::Income
        } else if self.amount < zero {
            CashFlow::Expense
        } else {
            CashFlow::Neutral
        }
    }

    /// Unsigned amount for the income column, if this is income
    pub fn income(&self) -> Option<BigDecimal> {
        (self.cash_flow() == CashFlow::Income).then(|| self.amount.clone())
    }

    /// Unsigned amount for the expense column, if this is an expense
    pub fn expense(&self) -> Option<BigDecimal> {
        (self.cash_flow() == CashFlow::Expense).then(|| self.amount.abs())
    }
}

/// Output document formats the renderers can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// LaTeX source, compiled to a document by an external toolchain
    #[default]
    Latex,
    /// Ready-to-print PDF
    Pdf,
}

impl OutputFormat {
    /// Conventional file extension (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Latex => "tex",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// Infer the format from an output path's extension
    pub fn from_path(path: &Path) -> ConvertResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConvertError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Latex => write!(f, "latex"),
            OutputFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tex" | "latex" => Ok(OutputFormat::Latex),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(ConvertError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Errors that abort a conversion
///
/// Row-level problems (unparseable dates, bad amounts) are never reported here;
/// they are absorbed by the reader and counted instead.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Render error ({format}): {message}")]
    Render {
        format: OutputFormat,
        message: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

impl ConvertError {
    /// Build a render error for the given back end
    pub fn render(format: OutputFormat, message: impl fmt::Display) -> Self {
        ConvertError::Render {
            format,
            message: message.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
