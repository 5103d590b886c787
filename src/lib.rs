//! # Ledger Sheet
//!
//! Turns German bank CSV exports into an accountant-style income and expense
//! ledger ("Einnahmen und Ausgaben"): 27 transactions per page, a
//! carried-forward subtotal (`Übertrag`) under every page and a closing page
//! summary with the grand total (`Gesamt`).
//!
//! ## Pipeline
//!
//! - **Import**: UTF-8 or Latin-9 input, `;` separated, with Sparkasse,
//!   Commerzbank or Volksbank column names
//! - **Locale**: German amounts (`1.234,56`) and dates (`dd.mm.yyyy`, `dd.mm.yy`)
//!   parsed into exact decimals and calendar dates
//! - **Ledger**: stable chronological sort, fixed-size pages, page and grand totals
//! - **Render**: LaTeX source or a ready-to-print PDF, both driven by the same ledger
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_sheet::{convert, OutputFormat};
//!
//! let export = "Buchungstag;Beguenstigter/Zahlungspflichtiger;Betrag\n\
//!               02.01.2024;Stadtwerke;-45,90\n";
//! let mut tex = Vec::new();
//! let report = convert(export.as_bytes(), &mut tex, OutputFormat::Latex).unwrap();
//! assert_eq!(report.transactions, 1);
//! assert_eq!(report.pages, 1);
//! ```

pub mod convert;
pub mod import;
pub mod ledger;
pub mod locale;
pub mod render;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use convert::*;
pub use import::{read_transactions, ImportOutcome, SchemaVariant, TextEncoding};
pub use ledger::{Ledger, LedgerBuilder, Page, ROWS_PER_PAGE};
pub use locale::{format_amount, format_date, parse_amount, parse_date};
pub use render::{renderer_for, LatexRenderer, PdfRenderer};
pub use traits::*;
pub use types::*;
