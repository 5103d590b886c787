//! Ledger module: pagination and totals over imported transactions

pub mod core;
pub mod page;

pub use self::core::*;
pub use page::*;
