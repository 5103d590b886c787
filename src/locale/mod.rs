//! Locale codecs for bank export text

pub mod german;

pub use german::*;
